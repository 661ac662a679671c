//! The delivery order record and per-line decoding.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One delivery request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier. Uniqueness is not enforced.
    pub id: i64,
    /// Package weight. No range validation is performed.
    pub weight: f64,
    /// Delivery zone label, matched exactly (case-sensitive).
    pub district: String,
    /// Scheduled delivery time, time-zone-naive.
    pub delivery_time: NaiveDateTime,
}

/// Outcome of decoding a single non-blank input line.
///
/// A line can decode to a record, or to JSON `null` (decodable but
/// semantically absent). Absent lines are excluded from the working set
/// rather than replaced with a placeholder record, so no placeholder can
/// ever collide with a real district value.
#[derive(Debug)]
pub enum Decoded {
    Order(Order),
    Absent,
}

/// Decode one input line.
pub fn decode_line(line: &str) -> Result<Decoded, serde_json::Error> {
    let order: Option<Order> = serde_json::from_str(line)?;
    Ok(match order {
        Some(order) => Decoded::Order(order),
        None => Decoded::Absent,
    })
}
