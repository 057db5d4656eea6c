//! Mock authentication session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The locally stored sign-in record.
///
/// There is no credential check: signing in only records the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Email address the user signed in with.
    pub email: String,
    /// When the session was created.
    pub signed_in_at: DateTime<Utc>,
}
