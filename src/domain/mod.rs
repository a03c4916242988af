// Domain layer: organisation records, report rows and the ports the pipeline is wired through.

pub mod model;
pub mod ports;
