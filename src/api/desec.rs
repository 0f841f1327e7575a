use std::time::Duration;

use serde_json::json;

use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://desec.io/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// deSEC API client. The RRset PUT endpoint is an idempotent replace, so a
/// single operation covers both create and update.
pub struct DesecClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl DesecClient {
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

    /// Replace the RRset identified by `(subname, type)` with the given
    /// values and ttl. `subname` uses "@" for the zone apex.
    pub async fn upsert_rrset(
        &self,
        domain: &str,
        subname: &str,
        record_type: &str,
        ttl: u32,
        records: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/domains/{domain}/rrsets/{subname}/{record_type}/",
            self.base_url
        );
        let payload = json!({
            "subname": subname,
            "type": record_type,
            "ttl": ttl,
            "records": records,
        });

        let response = self
            .client
            .put(url)
            .header("Authorization", format!("Token {}", self.api_token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                Error::Provider(format!(
                    "desec rrset upsert failed for {domain} {subname} {record_type}: {e}"
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "desec rrset upsert failed for {domain} {subname} {record_type}: {status} {text}"
            )));
        }
        Ok(())
    }
}
