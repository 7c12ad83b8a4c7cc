// Domain layer: data model and the transport port. No scraping logic here.

pub mod model;
pub mod ports;
