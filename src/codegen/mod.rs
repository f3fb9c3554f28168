pub mod css;
pub mod effects;
pub mod generate;
pub mod ir;
pub mod script;
