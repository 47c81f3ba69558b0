// Domain layer: resolution models and ports (interfaces).

pub mod model;
pub mod ports;
