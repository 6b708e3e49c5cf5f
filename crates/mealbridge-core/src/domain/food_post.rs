use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a food post.
///
/// The graph only moves forward:
///
/// ```text
/// available --claim (recipient)--> claimed
/// available --claim (NGO)--------> claimed_by_ngo
/// claimed_by_ngo --pickup--------> in_transit
/// in_transit --deliver-----------> delivered
/// available | claimed -----------> completed   [terminal]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodStatus {
    Available,
    Claimed,
    ClaimedByNgo,
    InTransit,
    Delivered,
    Completed,
}

impl FoodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodStatus::Available => "available",
            FoodStatus::Claimed => "claimed",
            FoodStatus::ClaimedByNgo => "claimed_by_ngo",
            FoodStatus::InTransit => "in_transit",
            FoodStatus::Delivered => "delivered",
            FoodStatus::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `to` follows the lifecycle graph.
    pub fn can_transition(&self, to: FoodStatus) -> bool {
        use FoodStatus::*;
        matches!(
            (self, to),
            (Available, Claimed)
                | (Available, ClaimedByNgo)
                | (Available, Completed)
                | (Claimed, Completed)
                | (ClaimedByNgo, InTransit)
                | (InTransit, Delivered)
        )
    }

    /// No outgoing edges.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FoodStatus::Delivered | FoodStatus::Completed)
    }
}

impl fmt::Display for FoodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(FoodStatus::Available),
            "claimed" => Ok(FoodStatus::Claimed),
            "claimed_by_ngo" => Ok(FoodStatus::ClaimedByNgo),
            "in_transit" => Ok(FoodStatus::InTransit),
            "delivered" => Ok(FoodStatus::Delivered),
            "completed" => Ok(FoodStatus::Completed),
            other => Err(format!("unknown food status: {other}")),
        }
    }
}

/// A surplus food posting.
///
/// Invariant: `claimed_by` is non-null iff `status != available`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPost {
    pub food_id: Uuid,
    pub donor_id: String,
    /// Display name snapshot taken when the post was created.
    pub donor_name: String,
    pub food_name: String,
    pub quantity: String,
    pub description: String,
    pub image_url: String,
    /// Free text, not parsed structurally.
    pub pickup_time: String,
    pub location: String,
    /// 0.0 means unknown.
    pub latitude: f64,
    pub longitude: f64,
    pub status: FoodStatus,
    pub claimed_by: Option<String>,
    /// Set when this post fulfills an open food request.
    pub request_id: Option<Uuid>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Content fields supplied by the donor when posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewFoodPost {
    pub food_name: String,
    pub quantity: String,
    pub description: String,
    pub image_url: String,
    pub pickup_time: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FoodPost {
    /// Create an available post with a fresh id.
    pub fn new(donor_id: String, donor_name: String, fields: NewFoodPost) -> Self {
        Self {
            food_id: Uuid::new_v4(),
            donor_id,
            donor_name,
            food_name: fields.food_name,
            quantity: fields.quantity,
            description: fields.description,
            image_url: fields.image_url,
            pickup_time: fields.pickup_time,
            location: fields.location,
            latitude: fields.latitude,
            longitude: fields.longitude,
            status: FoodStatus::Available,
            claimed_by: None,
            request_id: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
