pub mod delay;
pub mod dom;
pub mod host;
pub mod rebuild;
pub mod runtime;
pub mod segment;
pub mod trigger;
