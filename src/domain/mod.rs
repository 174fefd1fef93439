// Domain layer: service records, normalized metadata and the ports the adapter is built on.

pub mod model;
pub mod ports;
