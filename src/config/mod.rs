pub mod models;

use std::path::Path;
use std::{env, fs};

use log::debug;
use validator::Validate;

pub use models::{FailoverConfig, ZoneConfig, ZoneRecord};

use crate::error::{Error, Result};

/// Absolute name of `name` within `domain`, without a trailing dot.
///
/// A name carrying a trailing dot is taken as already absolute; a name equal
/// to the domain, or already suffixed by it, passes through unchanged.
pub fn fqdn(domain: &str, name: &str) -> String {
    if name.ends_with('.') {
        return name.trim_end_matches('.').to_string();
    }
    if name == domain {
        return domain.to_string();
    }
    if name.ends_with(&format!(".{domain}")) {
        return name.to_string();
    }
    format!("{name}.{domain}")
}

/// Label of `name` relative to the zone apex, with "@" denoting the apex.
pub fn subname(domain: &str, name: &str) -> Result<String> {
    let fqdn = fqdn(domain, name);
    if fqdn == domain {
        return Ok("@".to_string());
    }
    let suffix = format!(".{domain}");
    match fqdn.strip_suffix(&suffix) {
        Some(label) => Ok(label.to_string()),
        None => Err(Error::Config(format!(
            "record {name} does not belong to domain {domain}"
        ))),
    }
}

/// Load and validate a zone config from a YAML file.
///
/// Record types are normalized to uppercase and every record is checked to
/// belong to the configured domain before anything talks to a provider.
pub fn load_zone_config(path: &Path) -> Result<ZoneConfig> {
    let contents = read_config(path)?;
    let mut config: ZoneConfig = serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("invalid zone config {}: {e}", path.display())))?;
    config
        .validate()
        .map_err(|e| Error::Config(format!("invalid zone config {}: {e}", path.display())))?;

    for record in &mut config.records {
        record.domain = config.domain.clone();
        record.record_type = record.record_type.to_uppercase();
        record.subname()?;
    }

    debug!(
        "loaded zone config for {} with {} records",
        config.domain,
        config.records.len()
    );
    Ok(config)
}

/// Load and validate a failover config from a YAML file.
pub fn load_failover_config(path: &Path) -> Result<FailoverConfig> {
    let contents = read_config(path)?;
    let config: FailoverConfig = serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("invalid failover config {}: {e}", path.display())))?;
    config
        .validate()
        .map_err(|e| Error::Config(format!("invalid failover config {}: {e}", path.display())))?;

    debug!("loaded failover config for {}", config.domain);
    Ok(config)
}

/// Read a required environment variable, failing with a config error when it
/// is absent or empty.
pub fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "missing required environment variable: {key}"
        ))),
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read config file {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn fqdn_builds_absolute_names() {
        assert_eq!(fqdn("example.com", "www"), "www.example.com");
        assert_eq!(fqdn("example.com", "example.com"), "example.com");
        assert_eq!(fqdn("example.com", "www.example.com"), "www.example.com");
        assert_eq!(fqdn("example.com", "www.example.com."), "www.example.com");
    }

    #[test]
    fn fqdn_is_idempotent() {
        let once = fqdn("example.com", "www");
        assert_eq!(fqdn("example.com", &once), once);

        let apex = fqdn("example.com", "example.com");
        assert_eq!(fqdn("example.com", &apex), apex);
    }

    #[test]
    fn subname_uses_at_for_apex() {
        assert_eq!(subname("example.com", "example.com").unwrap(), "@");
        assert_eq!(subname("example.com", "www").unwrap(), "www");
        assert_eq!(subname("example.com", "www.example.com").unwrap(), "www");
        assert_eq!(subname("example.com", "a.b").unwrap(), "a.b");
    }

    #[test]
    fn subname_rejects_foreign_names() {
        let err = subname("example.com", "other.org.").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zone_config_loads_and_normalizes() {
        let file = write_config(
            r#"
domain: example.com
records:
  - name: www
    type: a
    values: ["192.0.2.1"]
  - name: blog
    type: CNAME
    ttl: 600
    values: ["www.example.com"]
"#,
        );

        let config = load_zone_config(file.path()).unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.records.len(), 2);
        assert_eq!(config.records[0].record_type, "A");
        assert_eq!(config.records[0].ttl, 300);
        assert_eq!(config.records[0].fqdn(), "www.example.com");
        assert_eq!(config.records[0].subname().unwrap(), "www");
        assert_eq!(config.records[1].ttl, 600);
    }

    #[test]
    fn zone_config_rejects_zero_values() {
        let file = write_config(
            r#"
domain: example.com
records:
  - name: www
    type: A
    values: []
"#,
        );
        assert!(matches!(
            load_zone_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zone_config_rejects_multiple_values() {
        let file = write_config(
            r#"
domain: example.com
records:
  - name: www
    type: A
    values: ["192.0.2.1", "192.0.2.2"]
"#,
        );
        assert!(matches!(
            load_zone_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zone_config_rejects_unknown_fields() {
        let file = write_config(
            r#"
domain: example.com
records:
  - name: www
    type: A
    values: ["192.0.2.1"]
    proxied: true
"#,
        );
        assert!(matches!(
            load_zone_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zone_config_rejects_record_outside_domain() {
        let file = write_config(
            r#"
domain: example.com
records:
  - name: www.other.org.
    type: A
    values: ["192.0.2.1"]
"#,
        );
        assert!(matches!(
            load_zone_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn failover_config_defaults_timeout() {
        let file = write_config(
            r#"
domain: example.com
router_record: www
primary_target: primary
secondary_target: failover
primary_check_url: https://primary.example.com/health
secondary_check_url: https://failover.example.com/health
expected_status: 200
"#,
        );

        let config = load_failover_config(file.path()).unwrap();
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.expected_status, 200);
    }

    #[test]
    fn failover_config_requires_all_keys() {
        let file = write_config(
            r#"
domain: example.com
router_record: www
primary_target: primary
"#,
        );
        assert!(matches!(
            load_failover_config(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn require_env_reports_missing_variables() {
        env::remove_var("ZONESYNC_TEST_ABSENT_TOKEN");
        assert!(matches!(
            require_env("ZONESYNC_TEST_ABSENT_TOKEN"),
            Err(Error::Config(_))
        ));

        env::set_var("ZONESYNC_TEST_PRESENT_TOKEN", "sekrit");
        assert_eq!(
            require_env("ZONESYNC_TEST_PRESENT_TOKEN").unwrap(),
            "sekrit"
        );
    }
}
