//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication settings for validating bearer tokens.
///
/// PlanHub's identity service issues the tokens; this subsystem only
/// verifies them to resolve the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer.
    pub jwt_secret: String,
    /// Expected token issuer claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
}
