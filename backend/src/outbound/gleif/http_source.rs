//! Reqwest-backed GLEIF registry adapter.
//!
//! This adapter owns transport details only: the lookup request, timeout and
//! HTTP error mapping, and JSON decoding into domain entities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::dto::LeiRecordDto;
use crate::domain::Lei;
use crate::domain::ports::{LegalEntity, LegalEntityRegistry, LegalEntityRegistryError};

/// Public GLEIF LEI lookup endpoint.
pub const DEFAULT_GLEIF_ENDPOINT: &str = "https://leilookup.gleif.org/api/v2/leirecords";

const USER_AGENT: &str = concat!("bonds-backend/", env!("CARGO_PKG_VERSION"));

/// Registry adapter issuing `GET {endpoint}?lei={LEI}` requests.
pub struct GleifHttpRegistry {
    client: Client,
    endpoint: Url,
}

impl GleifHttpRegistry {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn lookup_url(&self, lei: &Lei) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("lei", lei.as_str());
        url
    }
}

#[async_trait]
impl LegalEntityRegistry for GleifHttpRegistry {
    async fn lookup(&self, lei: &Lei) -> Result<Vec<LegalEntity>, LegalEntityRegistryError> {
        let url = self.lookup_url(lei);
        debug!(%url, "querying GLEIF");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_entities(body.as_ref())
    }
}

/// Decode a lookup body into at most one entity.
///
/// Records after the first are never inspected, so a malformed tail does not
/// fail a lookup whose first match is usable.
fn parse_entities(body: &[u8]) -> Result<Vec<LegalEntity>, LegalEntityRegistryError> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(body).map_err(|error| {
        LegalEntityRegistryError::decode(format!("invalid GLEIF JSON payload: {error}"))
    })?;
    let Some(first) = records.into_iter().next() else {
        return Ok(Vec::new());
    };
    let record = LeiRecordDto::deserialize(first).map_err(|error| {
        LegalEntityRegistryError::decode(format!("invalid GLEIF LEI record: {error}"))
    })?;
    Ok(vec![LegalEntity::from(record)])
}

fn map_transport_error(error: reqwest::Error) -> LegalEntityRegistryError {
    if error.is_timeout() {
        LegalEntityRegistryError::timeout(error.to_string())
    } else {
        LegalEntityRegistryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LegalEntityRegistryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    LegalEntityRegistryError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
