// Domain layer: test document models, rendered output models and ports (interfaces).

pub mod model;
pub mod ports;
