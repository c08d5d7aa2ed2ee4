// Adapters layer: concrete implementations of the domain ports.

pub mod amadeus;
pub mod countries;
pub mod dataset;
