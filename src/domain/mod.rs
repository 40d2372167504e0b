// Domain layer: post models and the ports the page engine depends on.

pub mod model;
pub mod ports;
