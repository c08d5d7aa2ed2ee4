pub mod resolver;
pub mod search;

pub use crate::domain::model::{AirportRecord, MatchedAirports, ResolutionResult};
pub use crate::domain::ports::{AirportDataset, CountryRegistry, FlightOffersApi};
pub use crate::utils::error::Result;
