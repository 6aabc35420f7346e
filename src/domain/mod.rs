// Domain layer: pricing models and the form surface port.

pub mod model;
pub mod ports;
