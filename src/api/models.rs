use serde::Deserialize;

/// Envelope wrapped around every Cloudflare v4 response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub r#type: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
}
