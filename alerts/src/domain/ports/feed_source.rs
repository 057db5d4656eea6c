//! Driven port for fetching raw hazard records from an upstream feed.
//!
//! Adapters map their wire format onto domain records. Scoping, caching and
//! fallback stay on the domain side so every feed behaves the same.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling an upstream hazard feed.
    pub enum FeedSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "feed transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "feed timeout: {message}",
        /// The upstream rate-limited the request.
        RateLimited { message: String } =>
            "feed rate limited request: {message}",
        /// The upstream answered with a non-success status.
        Status { status: u16, message: String } =>
            "feed returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "feed response decode failed: {message}",
    }
}

impl FeedSourceError {
    /// Short, stable label used as the fallback reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::RateLimited { .. } => "rate_limited",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
        }
    }
}

/// Port for reading the current records of one upstream feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Record type this feed produces.
    type Record: Send;

    /// Name used in logs and fallback reasons, e.g. `"geonet"`.
    fn name(&self) -> &'static str;

    /// Fetch every current record.
    async fn fetch_records(&self) -> Result<Vec<Self::Record>, FeedSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FeedSourceError::transport("reset"), "transport")]
    #[case(FeedSourceError::timeout("10s"), "timeout")]
    #[case(FeedSourceError::rate_limited("slow down"), "rate_limited")]
    #[case(FeedSourceError::status(502_u16, "bad gateway"), "status")]
    #[case(FeedSourceError::decode("missing field"), "decode")]
    fn reasons_are_stable(#[case] error: FeedSourceError, #[case] expected: &str) {
        assert_eq!(error.reason(), expected);
    }

    #[rstest]
    fn status_message_includes_code() {
        let error = FeedSourceError::status(503_u16, "maintenance");
        assert_eq!(error.to_string(), "feed returned status 503: maintenance");
    }
}
