use crate::utils::error::ResolutionFailure;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One row of the airport dataset (airportsdata CSV layout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub icao: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub subd: String,
    pub country: String,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tz: String,
    #[serde(default)]
    pub lid: String,
}

impl AirportRecord {
    pub fn has_iata(&self) -> bool {
        !self.iata.trim().is_empty()
    }
}

/// The whole dataset keyed by airport identifier, iterated in key order.
pub type AirportTable = BTreeMap<String, AirportRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCode {
    pub name: String,
    pub alpha_2: String,
    pub alpha_3: String,
}

impl CountryCode {
    pub fn matches(&self, code: &str) -> bool {
        code == self.alpha_2 || code == self.alpha_3
    }
}

/// A non-empty list of airports matching a city/country pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchedAirports(Vec<AirportRecord>);

impl MatchedAirports {
    /// Returns `None` for an empty list.
    pub fn new(airports: Vec<AirportRecord>) -> Option<Self> {
        if airports.is_empty() {
            None
        } else {
            Some(Self(airports))
        }
    }

    /// First record carrying a usable IATA code.
    pub fn first_with_iata(&self) -> Option<&AirportRecord> {
        self.0.iter().find(|airport| airport.has_iata())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirportRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

pub type ResolutionResult = std::result::Result<MatchedAirports, ResolutionFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ECONOMY" => Ok(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Ok(TravelClass::PremiumEconomy),
            "BUSINESS" => Ok(TravelClass::Business),
            "FIRST" => Ok(TravelClass::First),
            other => Err(format!(
                "unknown travel class '{}', expected ECONOMY, PREMIUM_ECONOMY, BUSINESS or FIRST",
                other
            )),
        }
    }
}

/// Optional search filters; unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub return_date: Option<NaiveDate>,
    pub travel_class: Option<TravelClass>,
    #[serde(default)]
    pub included_airline_codes: Vec<String>,
    #[serde(default)]
    pub excluded_airline_codes: Vec<String>,
    pub non_stop: Option<bool>,
    pub currency_code: Option<String>,
    pub max_price: Option<u32>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub adults: u32,
    #[serde(default)]
    pub options: SearchOptions,
}

impl FlightQuery {
    /// Query-string pairs in the flight-offers API's parameter names.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("originLocationCode", self.origin.clone()),
            ("destinationLocationCode", self.destination.clone()),
            ("departureDate", self.departure_date.format("%Y-%m-%d").to_string()),
            ("adults", self.adults.to_string()),
        ];

        let options = &self.options;
        if let Some(date) = options.return_date {
            pairs.push(("returnDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(class) = options.travel_class {
            pairs.push(("travelClass", class.as_str().to_string()));
        }
        if !options.included_airline_codes.is_empty() {
            pairs.push(("includedAirlineCodes", options.included_airline_codes.join(",")));
        }
        if !options.excluded_airline_codes.is_empty() {
            pairs.push(("excludedAirlineCodes", options.excluded_airline_codes.join(",")));
        }
        if let Some(non_stop) = options.non_stop {
            pairs.push(("nonStop", non_stop.to_string()));
        }
        if let Some(currency) = &options.currency_code {
            pairs.push(("currencyCode", currency.clone()));
        }
        if let Some(max_price) = options.max_price {
            pairs.push(("maxPrice", max_price.to_string()));
        }
        if let Some(max) = options.max_results {
            pairs.push(("max", max.to_string()));
        }

        pairs
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
