// Domain layer: reference-data models and ports. Only std, serde and rust_decimal here.

pub mod model;
pub mod ports;
