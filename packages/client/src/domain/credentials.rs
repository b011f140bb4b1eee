//! Session credentials and the user profile snapshot.

use serde::{Deserialize, Serialize};

use super::value_object::UserId;

/// User record as returned by login and `GET /profile/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub ranking: Option<i64>,
    #[serde(default)]
    pub wallet_balance: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub photo_filename: Option<String>,
}

/// Access token, refresh token and the current user.
///
/// The three fields are persisted and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Credentials {
    pub fn new(access_token: String, refresh_token: String, user: UserProfile) -> Self {
        Self {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user: Some(user),
        }
    }

    /// A user is authenticated iff both an access token and a user record are present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str, username: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(id).unwrap(),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: format!("{}@example.com", username),
            phone_number: String::new(),
            role: Some("player".to_string()),
            ranking: Some(800),
            wallet_balance: Some(0.0),
            is_active: true,
            is_verified: false,
            photo_filename: Some("default.jpg".to_string()),
        }
    }
}
