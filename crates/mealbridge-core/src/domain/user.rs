use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a user plays on the platform.
///
/// `None` on the [`User`] means the role has not been chosen yet
/// (onboarding not finished).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Donor,
    Recipient,
    Ngo,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Donor => "donor",
            UserType::Recipient => "recipient",
            UserType::Ngo => "ngo",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(UserType::Donor),
            "recipient" => Ok(UserType::Recipient),
            "ngo" => Ok(UserType::Ngo),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// User entity. The id is opaque and issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: Option<UserType>,
    /// Number of posts this user has donated. Incremented as a side
    /// effect of posting food; a separate write from the insert.
    /// Unsigned so a patch cannot drive the counter negative.
    pub food_donated: u32,
    pub food_received: u32,
    pub profile_image_url: String,
    /// Push token; absent until the device registers one.
    pub fcm_token: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl User {
    /// Create a profile row for a freshly signed-up user.
    pub fn new(user_id: String, name: String, email: String, phone: String) -> Self {
        Self {
            user_id,
            name,
            email,
            phone,
            user_type: None,
            food_donated: 0,
            food_received: 0,
            profile_image_url: String::new(),
            fcm_token: None,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
