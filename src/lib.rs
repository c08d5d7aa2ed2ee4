pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{amadeus::AmadeusClient, countries::Iso3166, dataset::CsvAirports};
pub use config::{ApiConfig, AppConfig, DatasetConfig};
pub use core::{
    resolver::AirportResolver,
    search::{FlightSearch, Place, SearchOutcome, TripRequest},
};
pub use utils::error::{FinderError, ResolutionFailure, Result};
