//! Shared reqwest plumbing for the feed adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::FeedSourceError;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("nz-alerts/", env!("CARGO_PKG_VERSION"));

/// Outbound identity shared by every feed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedHttpIdentity {
    /// HTTP user-agent header value.
    pub user_agent: String,
}

impl Default for FeedHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Reqwest client with a request timeout and the identity's user agent.
pub(crate) fn build_client(
    timeout: Duration,
    identity: &FeedHttpIdentity,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(identity.user_agent.as_str())
        .build()
}

/// `GET url` and return the body of a successful response.
pub(crate) async fn get_body(
    client: &Client,
    url: Url,
    accept: &str,
) -> Result<Vec<u8>, FeedSourceError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, accept)
        .send()
        .await
        .map_err(map_transport_error)?;

    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> FeedSourceError {
    if error.is_timeout() {
        FeedSourceError::timeout(error.to_string())
    } else if error.is_decode() {
        FeedSourceError::decode(error.to_string())
    } else {
        FeedSourceError::transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> FeedSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => FeedSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            FeedSourceError::timeout(message)
        }
        _ => FeedSourceError::status(status.as_u16(), message),
    }
}

pub(crate) fn decode_error(feed: &str, error: &serde_json::Error) -> FeedSourceError {
    FeedSourceError::decode(format!("invalid {feed} JSON payload: {error}"))
}

/// Whitespace-compacted start of an error body.
///
/// Upstreams serve HTML maintenance pages on outages, so markup is dropped
/// when the body opens with a tag.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let text = String::from_utf8_lossy(body);
    let text = if text.trim_start().starts_with('<') {
        strip_markup(&text)
    } else {
        text.into_owned()
    };
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    //! Status mapping shared by every feed adapter.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "rate_limited")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "timeout")]
    #[case::not_found(StatusCode::NOT_FOUND, "status")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "status")]
    fn maps_http_statuses_to_feed_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"message\":\"upstream unavailable\"}");
        assert_eq!(error.reason(), expected);
    }

    #[rstest]
    fn status_errors_keep_the_code() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(error, FeedSourceError::status(503_u16, "status 503"));
    }

    #[rstest]
    fn maintenance_pages_lose_their_markup() {
        let page = b"<!DOCTYPE html>\n<html><head><title>GeoNet</title></head>\n<body>\n  \
            <h1>Down for maintenance</h1>\n  <p>Quake data will return shortly.</p>\n\
            </body></html>";
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, page);
        assert_eq!(
            error,
            FeedSourceError::status(
                503_u16,
                "status 503: GeoNet Down for maintenance Quake data will return shortly."
            )
        );
    }

    #[rstest]
    fn json_error_bodies_are_kept_verbatim() {
        let body = br#"{"message": "API key required", "code": 401}"#;
        assert_eq!(body_preview(body), r#"{"message": "API key required", "code": 401}"#);
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let closures = "SH73 Arthur's Pass closed due to snow. ".repeat(10);
        let preview = body_preview(closures.as_bytes());
        assert!(preview.starts_with("SH73 Arthur's Pass closed"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[rstest]
    fn default_identity_names_the_crate() {
        assert!(FeedHttpIdentity::default().user_agent.starts_with("nz-alerts/"));
    }
}
