use crate::core::search::{Place, TripRequest};
use crate::domain::model::{SearchOptions, TravelClass};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "flight-finder")]
#[command(about = "Look up airports by city and search flight offers")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file (default: environment variables)")]
    pub config: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Airport CSV in airportsdata format (default: bundled sample table)"
    )]
    pub airports_file: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the airports serving a city
    Airports(AirportsArgs),
    /// Search flight offers between two cities
    Search(SearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AirportsArgs {
    #[arg(long)]
    pub city: String,

    #[arg(long, help = "ISO 3166 country name, e.g. \"Australia\"")]
    pub country: String,

    #[arg(long, help = "Print JSON instead of a table")]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub origin_city: String,

    #[arg(long)]
    pub origin_country: String,

    #[arg(long)]
    pub destination_city: String,

    #[arg(long)]
    pub destination_country: String,

    #[arg(long, help = "YYYY-MM-DD")]
    pub departure_date: NaiveDate,

    #[arg(long, help = "YYYY-MM-DD")]
    pub return_date: Option<NaiveDate>,

    #[arg(long, default_value = "1")]
    pub adults: u32,

    #[arg(long, help = "ECONOMY, PREMIUM_ECONOMY, BUSINESS or FIRST")]
    pub travel_class: Option<TravelClass>,

    #[arg(long, value_delimiter = ',')]
    pub include_airlines: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub exclude_airlines: Vec<String>,

    #[arg(long)]
    pub non_stop: bool,

    #[arg(long)]
    pub currency: Option<String>,

    #[arg(long)]
    pub max_price: Option<u32>,

    #[arg(long)]
    pub max_results: Option<u32>,

    #[arg(long, help = "Print the decoded offers as JSON")]
    pub json: bool,
}

impl SearchArgs {
    pub fn to_trip(&self) -> TripRequest {
        TripRequest {
            origin: Place::new(&self.origin_city, &self.origin_country),
            destination: Place::new(&self.destination_city, &self.destination_country),
            departure_date: self.departure_date,
            adults: self.adults,
            options: SearchOptions {
                return_date: self.return_date,
                travel_class: self.travel_class,
                included_airline_codes: self.include_airlines.clone(),
                excluded_airline_codes: self.exclude_airlines.clone(),
                // leave the API default in place unless asked
                non_stop: self.non_stop.then_some(true),
                currency_code: self.currency.clone(),
                max_price: self.max_price,
                max_results: self.max_results,
            },
        }
    }
}
