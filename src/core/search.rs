use crate::core::resolver::AirportResolver;
use crate::domain::model::{AirportRecord, FlightQuery, SearchOptions};
use crate::domain::offers::FlightOffers;
use crate::domain::ports::{AirportDataset, CountryRegistry, FlightOffersApi};
use crate::utils::error::{FinderError, Leg, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub country: String,
}

impl Place {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

/// A trip described by place names rather than airport codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: Place,
    pub destination: Place,
    pub departure_date: NaiveDate,
    pub adults: u32,
    #[serde(default)]
    pub options: SearchOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub origin: AirportRecord,
    pub destination: AirportRecord,
    pub offers: FlightOffers,
}

/// Resolve both ends, fetch a token, run one search. Nothing is retried or cached.
pub struct FlightSearch<R: CountryRegistry, D: AirportDataset, A: FlightOffersApi> {
    resolver: AirportResolver<R, D>,
    api: A,
}

impl<R: CountryRegistry, D: AirportDataset, A: FlightOffersApi> FlightSearch<R, D, A> {
    pub fn new(resolver: AirportResolver<R, D>, api: A) -> Self {
        Self { resolver, api }
    }

    pub async fn run(&self, trip: &TripRequest) -> Result<SearchOutcome> {
        tracing::info!(
            "Searching flights {}, {} -> {}, {} on {}",
            trip.origin.city,
            trip.origin.country,
            trip.destination.city,
            trip.destination.country,
            trip.departure_date
        );

        // 兩端都先解析完成，才會發出任何網路請求
        let origin = self.pick_airport(Leg::Origin, &trip.origin)?;
        let destination = self.pick_airport(Leg::Destination, &trip.destination)?;
        tracing::info!("Using airports {} -> {}", origin.iata, destination.iata);

        let query = FlightQuery {
            origin: origin.iata.clone(),
            destination: destination.iata.clone(),
            departure_date: trip.departure_date,
            adults: trip.adults,
            options: trip.options.clone(),
        };

        let token = self.api.access_token().await?;
        let offers = self.api.search_offers(&token, &query).await?;

        Ok(SearchOutcome {
            origin,
            destination,
            offers,
        })
    }

    fn pick_airport(&self, leg: Leg, place: &Place) -> Result<AirportRecord> {
        let found = self
            .resolver
            .resolve(&place.city, &place.country)
            .map_err(|failure| FinderError::Resolution { leg, failure })?;

        let airport = found
            .first_with_iata()
            .cloned()
            .ok_or_else(|| FinderError::NoIataCode {
                leg,
                city: place.city.clone(),
            })?;

        tracing::debug!(
            "{} {} resolved to {} ({}) out of {} candidate(s)",
            leg,
            place.city,
            airport.iata,
            airport.name,
            found.len()
        );
        Ok(airport)
    }
}
