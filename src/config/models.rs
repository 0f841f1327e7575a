use serde::Deserialize;
use validator::Validate;

use crate::error::Result;

fn default_record_ttl() -> u32 {
    300
}

fn default_timeout_seconds() -> u64 {
    5
}

/// A zone and the records to keep identical in both providers.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    #[validate(length(min = 1, message = "Domain cannot be empty"))]
    pub domain: String,

    #[validate(nested)]
    #[serde(default)]
    pub records: Vec<ZoneRecord>,
}

/// One managed record. `name` may be relative ("www") or absolute
/// ("www.example.com."). `domain` is filled in by the loader from the
/// enclosing [`ZoneConfig`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ZoneRecord {
    #[serde(skip)]
    pub domain: String,

    #[validate(length(min = 1, message = "Record name cannot be empty"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Record type cannot be empty"))]
    pub record_type: String,

    #[serde(default = "default_record_ttl")]
    pub ttl: u32,

    // Cloudflare records hold a single content value, so one value per
    // record is the rule for both providers.
    #[validate(length(equal = 1, message = "Each record must have exactly one value"))]
    pub values: Vec<String>,
}

impl ZoneRecord {
    /// Absolute name of this record within its zone, without a trailing dot.
    pub fn fqdn(&self) -> String {
        super::fqdn(&self.domain, &self.name)
    }

    /// deSEC-style label relative to the zone apex ("@" for the apex itself).
    pub fn subname(&self) -> Result<String> {
        super::subname(&self.domain, &self.name)
    }
}

/// Health-based failover between two targets for a single router CNAME.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FailoverConfig {
    #[validate(length(min = 1, message = "Domain cannot be empty"))]
    pub domain: String,

    #[validate(length(min = 1, message = "Router record cannot be empty"))]
    pub router_record: String,

    #[validate(length(min = 1, message = "Primary target cannot be empty"))]
    pub primary_target: String,

    #[validate(length(min = 1, message = "Secondary target cannot be empty"))]
    pub secondary_target: String,

    #[validate(length(min = 1, message = "Primary check URL cannot be empty"))]
    pub primary_check_url: String,

    #[validate(length(min = 1, message = "Secondary check URL cannot be empty"))]
    pub secondary_check_url: String,

    #[validate(range(min = 100, max = 599, message = "Expected status must be an HTTP status code"))]
    pub expected_status: u16,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}
