//! Routing tools: turn-by-turn directions and distance matrices.

pub mod directions;
pub mod distance;

pub use directions::{GetDirectionsParams, GetDirectionsTool};
pub use distance::{GetDistanceParams, GetDistanceTool};

use schemars::JsonSchema;
use serde::Serialize;

use crate::domains::maps::payload::TextValue;

/// A human-readable measure with its raw value (meters or seconds).
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Measure {
    pub text: String,
    pub value: u64,
}

impl From<TextValue> for Measure {
    fn from(tv: TextValue) -> Self {
        Self {
            text: tv.text,
            value: tv.value,
        }
    }
}
