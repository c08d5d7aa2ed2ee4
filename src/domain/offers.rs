// Flight-offers search payloads. Only the fields the CLI reports are typed;
// everything else in the response is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightOffers {
    #[serde(default)]
    pub meta: Option<OffersMeta>,
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

impl FlightOffers {
    pub fn count(&self) -> usize {
        self.meta
            .as_ref()
            .and_then(|meta| meta.count)
            .unwrap_or(self.data.len())
    }

    /// Offer with the lowest grand total, skipping prices that do not parse.
    pub fn cheapest(&self) -> Option<&FlightOffer> {
        self.data
            .iter()
            .filter_map(|offer| offer.price.grand_total_amount().map(|amount| (amount, offer)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, offer)| offer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffersMeta {
    pub count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    #[serde(default)]
    pub number_of_bookable_seats: Option<u32>,
    #[serde(default)]
    pub last_ticketing_date: Option<String>,
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    pub currency: String,
    pub total: String,
    #[serde(default)]
    pub grand_total: Option<String>,
}

impl OfferPrice {
    pub fn grand_total_amount(&self) -> Option<f64> {
        self.grand_total
            .as_deref()
            .unwrap_or(&self.total)
            .parse()
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Itinerary {
    pub fn stops(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentPoint,
    pub arrival: SegmentPoint,
    pub carrier_code: String,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPoint {
    pub iata_code: String,
    #[serde(default)]
    pub terminal: Option<String>,
    pub at: String,
}

/// Body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrors {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ApiErrors {
    /// `title: detail` per entry, joined with `; `. `None` when nothing useful is present.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .errors
            .iter()
            .filter_map(|entry| match (&entry.title, &entry.detail) {
                (Some(title), Some(detail)) => Some(format!("{}: {}", title, detail)),
                (Some(title), None) => Some(title.clone()),
                (None, Some(detail)) => Some(detail.clone()),
                (None, None) => entry.code.map(|code| format!("error code {}", code)),
            })
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "meta": {"count": 2, "links": {"self": "https://test.api.amadeus.com/v2/shopping/flight-offers"}},
        "data": [
            {
                "type": "flight-offer",
                "id": "1",
                "numberOfBookableSeats": 9,
                "lastTicketingDate": "2024-11-19",
                "itineraries": [{
                    "duration": "PT9H10M",
                    "segments": [{
                        "departure": {"iataCode": "SYD", "terminal": "1", "at": "2024-11-20T11:35:00"},
                        "arrival": {"iataCode": "BKK", "at": "2024-11-20T17:45:00"},
                        "carrierCode": "TG",
                        "number": "476",
                        "aircraft": {"code": "359"}
                    }]
                }],
                "price": {"currency": "EUR", "total": "546.70", "base": "334.00", "grandTotal": "546.70"},
                "validatingAirlineCodes": ["TG"]
            },
            {
                "type": "flight-offer",
                "id": "2",
                "itineraries": [{
                    "duration": "PT14H05M",
                    "segments": [
                        {
                            "departure": {"iataCode": "SYD", "at": "2024-11-20T06:00:00"},
                            "arrival": {"iataCode": "SIN", "at": "2024-11-20T11:50:00"},
                            "carrierCode": "SQ",
                            "number": "232"
                        },
                        {
                            "departure": {"iataCode": "SIN", "at": "2024-11-20T13:10:00"},
                            "arrival": {"iataCode": "BKK", "at": "2024-11-20T14:35:00"},
                            "carrierCode": "SQ",
                            "number": "976"
                        }
                    ]
                }],
                "price": {"currency": "EUR", "total": "412.30", "grandTotal": "412.30"}
            }
        ],
        "dictionaries": {"carriers": {"TG": "THAI AIRWAYS INTERNATIONAL", "SQ": "SINGAPORE AIRLINES"}}
    }"#;

    #[test]
    fn test_decode_offers_ignores_unknown_fields() {
        let offers: FlightOffers = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(offers.count(), 2);
        assert_eq!(offers.data[0].number_of_bookable_seats, Some(9));
        assert_eq!(offers.data[0].itineraries[0].segments[0].departure.iata_code, "SYD");
        assert_eq!(offers.data[1].itineraries[0].stops(), 1);
        assert!(offers.data[1].validating_airline_codes.is_empty());
    }

    #[test]
    fn test_cheapest_uses_grand_total() {
        let offers: FlightOffers = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(offers.cheapest().unwrap().id, "2");
    }

    #[test]
    fn test_count_falls_back_to_data_length() {
        let offers: FlightOffers = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(offers.count(), 0);
        assert!(offers.cheapest().is_none());
    }

    #[test]
    fn test_api_error_summary() {
        let body = r#"{"errors":[{"status":400,"code":477,"title":"INVALID FORMAT","detail":"departureDate must be in the future","source":{"parameter":"departureDate"}}]}"#;
        let errors: ApiErrors = serde_json::from_str(body).unwrap();
        assert_eq!(
            errors.summary().as_deref(),
            Some("INVALID FORMAT: departureDate must be in the future")
        );

        let empty: ApiErrors = serde_json::from_str("{}").unwrap();
        assert!(empty.summary().is_none());
    }
}
