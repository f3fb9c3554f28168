pub mod dsl;
pub mod editor;
pub mod model;
pub mod profile;
