//! Wire types exchanged with the user service.

use serde::{Deserialize, Serialize};

/// A user as stored by the service.
///
/// `id`, `created_at` and `updated_at` are assigned by the service. They are
/// left empty when creating a user and are omitted from request bodies while
/// empty, so a create request only carries the caller-set fields.
///
/// # Examples
///
/// ```
/// use restuser::User;
///
/// let user = User::new("Pepe", "pepe@faceit.com", "fr");
/// let json = serde_json::to_string(&user).unwrap();
/// assert_eq!(json, r#"{"name":"Pepe","email":"pepe@faceit.com","country":"fr"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Service-generated UUID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// RFC3339 creation timestamp, set by the service.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,

    /// RFC3339 timestamp of the last update. Equals `created_at` for a
    /// freshly created user.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,

    /// Name of the user.
    #[serde(default)]
    pub name: String,

    /// Email of the user.
    #[serde(default)]
    pub email: String,

    /// ISO 3166-1 alpha-2 country code in lowercase, e.g. `"es"`.
    ///
    /// The code is not checked against a list of real countries.
    #[serde(default)]
    pub country: String,
}

impl User {
    /// Builds a user carrying only the caller-set fields, ready to be created.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            country: country.into(),
            ..Self::default()
        }
    }
}

/// Filters for listing users. The default value lists every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersParams {
    /// Only return users from this country. Empty means no filter.
    pub country: String,
}

impl ListUsersParams {
    /// Filters the listing by country code.
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }

    /// Query pairs to append to the listing URL. Empty filters are left out.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if !self.country.is_empty() {
            pairs.push(("country", self.country.as_str()));
        }
        pairs
    }
}

/// Body of a non-successful response, when the service provides one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
