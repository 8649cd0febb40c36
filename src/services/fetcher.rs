//! Contribution calendar fetch over HTTP
//!
//! `GET {api_url}/{encoded subject}` returning the GraphQL-shaped calendar body.

use std::time::Duration;

use crate::types::{ContribheatError, ContributionData, Result};

/// Default contribution endpoint
pub const DEFAULT_API_URL: &str =
    "https://hono-backend.vanshchopra101.workers.dev/api/contributions";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Anything that can produce a calendar for a subject
pub trait ContributionSource: Send + Sync {
    fn fetch(&self, api_url: &str, subject: &str) -> Result<ContributionData>;
}

/// Blocking reqwest-backed source; meant to run off the UI thread
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("contribheat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContribheatError::Fetch(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl ContributionSource for HttpSource {
    fn fetch(&self, api_url: &str, subject: &str) -> Result<ContributionData> {
        let url = contribution_url(api_url, subject);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ContribheatError::Fetch(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContribheatError::Status(status.as_u16()));
        }

        let mut body = response
            .bytes()
            .map_err(|e| ContribheatError::Fetch(format!("reading body failed: {}", e)))?
            .to_vec();

        ContributionData::from_response_slice(&mut body)
    }
}

/// Join the base URL and the percent-encoded subject
pub fn contribution_url(api_url: &str, subject: &str) -> String {
    format!(
        "{}/{}",
        api_url.trim_end_matches('/'),
        encode_uri_component(subject)
    )
}

/// Percent-encode everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
