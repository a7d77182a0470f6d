//! Place search and details tools.

pub mod details;
pub mod find;
pub mod nearby;

pub use details::{PlaceDetailsParams, PlaceDetailsTool};
pub use find::{FindPlaceParams, FindPlaceTool};
pub use nearby::{PlaceNearbyParams, PlaceNearbyTool};

use schemars::JsonSchema;
use serde::Serialize;

use crate::domains::maps::LatLng;
use crate::domains::maps::payload::PlaceRecord;

/// Compact place record shared by the search tools.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PlaceSummary {
    /// Identifier accepted by `place_details`.
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    pub types: Vec<String>,
}

impl From<PlaceRecord> for PlaceSummary {
    fn from(place: PlaceRecord) -> Self {
        Self {
            place_id: place.place_id,
            name: place.name,
            address: place.formatted_address.or(place.vicinity),
            rating: place.rating,
            user_ratings_total: place.user_ratings_total,
            location: place.geometry.map(|g| g.location),
            types: place.types,
        }
    }
}

/// Keep the first `limit` places in provider order.
pub(crate) fn summarize_places(places: Vec<PlaceRecord>, limit: usize) -> Vec<PlaceSummary> {
    places.into_iter().take(limit).map(Into::into).collect()
}

/// Text listing of place summaries, one per line.
pub(crate) fn format_place_list(header: String, places: &[PlaceSummary]) -> String {
    let mut text = header;
    for (i, place) in places.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", i + 1, place.name));
        if let Some(address) = &place.address {
            text.push_str(&format!(" - {address}"));
        }
        if let Some(rating) = place.rating {
            text.push_str(&format!(" ({rating:.1})"));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::payload::Geometry;

    #[test]
    fn test_summary_falls_back_to_vicinity() {
        let record = PlaceRecord {
            place_id: "abc".to_string(),
            name: "Cafe".to_string(),
            vicinity: Some("12 King St".to_string()),
            geometry: Some(Geometry {
                location: LatLng::new(43.0, -80.0),
            }),
            ..Default::default()
        };
        let summary = PlaceSummary::from(record);
        assert_eq!(summary.address.as_deref(), Some("12 King St"));
        assert_eq!(summary.location, Some(LatLng::new(43.0, -80.0)));
    }

    #[test]
    fn test_summarize_places_keeps_order() {
        let places = (0..5)
            .map(|i| PlaceRecord {
                place_id: format!("p{i}"),
                name: format!("Place {i}"),
                ..Default::default()
            })
            .collect();
        let kept = summarize_places(places, 3);
        let ids: Vec<_> = kept.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn test_format_place_list() {
        let places = vec![PlaceSummary {
            place_id: "p0".to_string(),
            name: "Google Waterloo".to_string(),
            address: Some("151 Charles St W".to_string()),
            rating: Some(4.44),
            user_ratings_total: None,
            location: None,
            types: vec![],
        }];
        assert_eq!(
            format_place_list("Found 1 place(s)".to_string(), &places),
            "Found 1 place(s)\n1. Google Waterloo - 151 Charles St W (4.4)"
        );
    }
}
