use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How soon the requester needs the food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    Urgent,
    Immediate,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "Normal",
            Urgency::Urgent => "Urgent",
            Urgency::Immediate => "Immediate",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Urgency::Normal),
            "Urgent" => Ok(Urgency::Urgent),
            "Immediate" => Ok(Urgency::Immediate),
            other => Err(format!("unknown urgency: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Fulfilled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Fulfilled => "fulfilled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(RequestStatus::Open),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A standing ask for food, independent of any specific post.
///
/// Invariant: `matched_food_id` and `assigned_ngo_id` are non-null iff
/// `status == fulfilled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRequest {
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub quantity: String,
    pub location: String,
    pub urgency: Urgency,
    pub status: RequestStatus,
    /// Post that fulfilled this request.
    pub matched_food_id: Option<Uuid>,
    /// NGO that performed the match.
    pub assigned_ngo_id: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Content fields supplied by the requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodRequest {
    pub food_name: String,
    pub quantity: String,
    pub location: String,
    pub urgency: Urgency,
}

impl FoodRequest {
    /// Create an open request with a fresh id.
    pub fn new(user_id: String, fields: NewFoodRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            food_name: fields.food_name,
            quantity: fields.quantity,
            location: fields.location,
            urgency: fields.urgency,
            status: RequestStatus::Open,
            matched_food_id: None,
            assigned_ngo_id: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
