use crate::domain::model::{AccessToken, AirportTable, CountryCode, FlightQuery};
use crate::domain::offers::FlightOffers;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Maps a country display name to its ISO codes.
pub trait CountryRegistry: Send + Sync {
    fn lookup(&self, name: &str) -> Option<CountryCode>;
}

/// Source of the full airport table. Loaded on every resolution.
pub trait AirportDataset: Send + Sync {
    fn load(&self) -> Result<AirportTable>;

    /// True when the table is only a subset of the airportsdata rows.
    fn is_partial(&self) -> bool {
        false
    }
}

#[async_trait]
pub trait FlightOffersApi: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken>;
    async fn search_offers(
        &self,
        token: &AccessToken,
        query: &FlightQuery,
    ) -> Result<FlightOffers>;
}
