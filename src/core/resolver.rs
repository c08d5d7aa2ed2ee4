use crate::adapters::countries::Iso3166;
use crate::adapters::dataset::CsvAirports;
use crate::domain::model::{AirportRecord, MatchedAirports, ResolutionResult};
use crate::domain::ports::{AirportDataset, CountryRegistry};
use crate::utils::error::ResolutionFailure;

/// Finds the airports serving a city, scoped to one country.
pub struct AirportResolver<R: CountryRegistry, D: AirportDataset> {
    registry: R,
    dataset: D,
}

impl AirportResolver<Iso3166, CsvAirports> {
    /// ISO 3166 registry over the bundled airport table.
    pub fn bundled() -> Self {
        Self::new(Iso3166, CsvAirports::bundled())
    }
}

impl<R: CountryRegistry, D: AirportDataset> AirportResolver<R, D> {
    pub fn new(registry: R, dataset: D) -> Self {
        Self { registry, dataset }
    }

    /// Country names match exactly; city names match case-insensitively.
    /// Every failure comes back as a `ResolutionFailure`, never a panic.
    pub fn resolve(&self, city: &str, country: &str) -> ResolutionResult {
        let Some(code) = self.registry.lookup(country) else {
            tracing::warn!("Unknown country name: {:?}", country);
            return Err(ResolutionFailure::InvalidCountry {
                country: country.to_string(),
            });
        };
        tracing::debug!(
            "Resolved {} to {}/{}",
            code.name,
            code.alpha_2,
            code.alpha_3
        );

        let airports = match self.dataset.load() {
            Ok(airports) => airports,
            Err(e) => {
                tracing::warn!("Airport dataset failed to load: {}", e);
                return Err(ResolutionFailure::DatasetLoadError {
                    reason: e.to_string(),
                });
            }
        };

        let wanted_city = city.to_lowercase();
        let matches: Vec<AirportRecord> = airports
            .into_values()
            .filter(|airport| {
                code.matches(&airport.country) && airport.city.to_lowercase() == wanted_city
            })
            .collect();

        match MatchedAirports::new(matches) {
            Some(found) => {
                tracing::debug!("{} airport(s) found for {}, {}", found.len(), city, country);
                Ok(found)
            }
            None => {
                tracing::warn!("No airports found for {}, {}", city, country);
                if self.dataset.is_partial() {
                    tracing::warn!(
                        "Only the bundled sample table was searched; \
                         pass --airports-file or set AIRPORTS_DATA_PATH for the full table"
                    );
                }
                Err(ResolutionFailure::NoMatch {
                    city: city.to_string(),
                    country: country.to_string(),
                })
            }
        }
    }
}
