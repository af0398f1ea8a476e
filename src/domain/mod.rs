pub mod builder;
pub mod entities;
pub mod errors;
pub mod plan;
pub mod ports;
pub mod value_objects;
