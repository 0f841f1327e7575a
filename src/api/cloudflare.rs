use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::models::{ApiResponse, DnsRecord, Zone};
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cloudflare v4 API client, scoped to the zone and record operations the
/// sync and failover routines need.
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl CloudflareClient {
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, DEFAULT_BASE_URL)
    }

    /// Build a client against a non-default endpoint (mock servers in tests).
    pub fn with_base_url(api_token: impl Into<String>, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Provider(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            api_token: api_token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a zone name to its id. Zero matches and more than one match
    /// are both provider failures.
    pub async fn get_zone_id(&self, zone_name: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/zones", self.base_url))
            .query(&[("name", zone_name)])
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("cloudflare zone lookup failed: {e}")))?;

        let body: ApiResponse<Vec<Zone>> =
            parse_response("cloudflare zone lookup", response).await?;
        let mut zones = body.result.unwrap_or_default();

        if zones.is_empty() {
            return Err(Error::Provider(format!(
                "no cloudflare zone found for {zone_name}"
            )));
        }
        if zones.len() > 1 {
            return Err(Error::Provider(format!(
                "ambiguous cloudflare zone lookup for {zone_name}: {} matches",
                zones.len()
            )));
        }

        let zone = zones.remove(0);
        debug!("found cloudflare zone {} ({})", zone.name, zone.id);
        Ok(zone.id)
    }

    /// Fetch the first record matching `(name, type)` in the zone, if any.
    pub async fn get_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
    ) -> Result<Option<DnsRecord>> {
        let response = self
            .client
            .get(format!("{}/zones/{zone_id}/dns_records", self.base_url))
            .query(&[("type", record_type), ("name", name)])
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("cloudflare record lookup failed: {e}")))?;

        let body: ApiResponse<Vec<DnsRecord>> =
            parse_response("cloudflare record lookup", response).await?;
        Ok(body.result.unwrap_or_default().into_iter().next())
    }

    /// Create or fully update a record. An existing record with the same
    /// `(name, type)` is replaced via PUT; otherwise a new one is created.
    /// `proxied` is only meaningful for A/AAAA/CNAME records.
    pub async fn upsert_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        content: &str,
        ttl: u32,
        proxied: Option<bool>,
    ) -> Result<()> {
        let existing = self.get_record(zone_id, name, record_type).await?;

        let mut payload = json!({
            "type": record_type,
            "name": name,
            "content": content,
            "ttl": ttl,
        });
        if let Some(proxied) = proxied {
            if matches!(record_type, "A" | "AAAA" | "CNAME") {
                payload["proxied"] = json!(proxied);
            }
        }

        let (action, request) = match &existing {
            Some(record) => (
                "update",
                self.client.put(format!(
                    "{}/zones/{zone_id}/dns_records/{}",
                    self.base_url, record.id
                )),
            ),
            None => (
                "create",
                self.client
                    .post(format!("{}/zones/{zone_id}/dns_records", self.base_url)),
            ),
        };

        let response = request
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("cloudflare {action} failed for {name}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "cloudflare {action} failed for {name}: {status} {text}"
            )));
        }
        Ok(())
    }
}

/// Check the HTTP status, then decode the Cloudflare envelope, treating a
/// 2xx body with `success: false` as a failure too.
async fn parse_response<T: DeserializeOwned>(
    what: &str,
    response: reqwest::Response,
) -> Result<ApiResponse<T>> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::Provider(format!("{what} failed: {e}")))?;

    if !status.is_success() {
        return Err(Error::Provider(format!("{what} failed: {status} {text}")));
    }

    let body: ApiResponse<T> = serde_json::from_str(&text)
        .map_err(|e| Error::Provider(format!("{what} returned unexpected body: {e}. Response: {text}")))?;

    if !body.success {
        return Err(Error::Provider(format!(
            "{what} failed: {:?}",
            body.errors
        )));
    }
    Ok(body)
}
