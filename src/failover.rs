use std::time::Duration;

use log::{info, warn};

use crate::api::{CloudflareClient, DesecClient};
use crate::config::{fqdn, subname, FailoverConfig};
use crate::error::Result;

/// TTL for the router record, kept low so a flip propagates quickly.
const ROUTER_TTL: u32 = 60;

/// Probe a health endpoint. Healthy means the response arrived within the
/// timeout and its status matches `expected_status`; any transport failure
/// counts as unhealthy, never as an error.
pub async fn check_health(
    client: &reqwest::Client,
    url: &str,
    expected_status: u16,
    timeout: Duration,
) -> bool {
    match client.get(url).timeout(timeout).send().await {
        Ok(response) => response.status().as_u16() == expected_status,
        Err(_) => false,
    }
}

/// Decide where the router CNAME should point and apply the change to both
/// providers if it differs from the current Cloudflare state.
///
/// Priority is fixed: a healthy primary always wins and the secondary is
/// only probed once the primary has failed. When both are down the routine
/// warns and leaves the record untouched.
pub async fn run_failover(
    config: &FailoverConfig,
    cloudflare: &CloudflareClient,
    desec: &DesecClient,
) -> Result<()> {
    let router_fqdn = fqdn(&config.domain, &config.router_record);
    let primary_fqdn = fqdn(&config.domain, &config.primary_target);
    let secondary_fqdn = fqdn(&config.domain, &config.secondary_target);

    let zone_id = cloudflare.get_zone_id(&config.domain).await?;

    info!("running failover check for domain {}", config.domain);
    info!("router record: {router_fqdn}");
    info!("primary target: {primary_fqdn}");
    info!("secondary target: {secondary_fqdn}");

    let http = reqwest::Client::new();
    let timeout = Duration::from_secs(config.timeout_seconds);

    let primary_ok =
        check_health(&http, &config.primary_check_url, config.expected_status, timeout).await;
    info!("primary health ({}) -> {primary_ok}", config.primary_check_url);

    let desired = if primary_ok {
        primary_fqdn
    } else {
        let secondary_ok = check_health(
            &http,
            &config.secondary_check_url,
            config.expected_status,
            timeout,
        )
        .await;
        info!(
            "secondary health ({}) -> {secondary_ok}",
            config.secondary_check_url
        );
        if secondary_ok {
            secondary_fqdn
        } else {
            warn!("both primary and secondary appear unhealthy; no change will be made");
            return Ok(());
        }
    };

    let current = cloudflare
        .get_record(&zone_id, &router_fqdn, "CNAME")
        .await?
        .map(|record| record.content);
    info!("current router target (cloudflare): {current:?}");

    if current.as_deref() == Some(desired.as_str()) {
        info!("router already points to desired target; no update needed");
        return Ok(());
    }

    set_router_target(config, cloudflare, desec, &zone_id, &router_fqdn, &desired).await?;
    info!("failover update completed");
    Ok(())
}

/// Point the router CNAME at `target_fqdn` in both providers.
async fn set_router_target(
    config: &FailoverConfig,
    cloudflare: &CloudflareClient,
    desec: &DesecClient,
    zone_id: &str,
    router_fqdn: &str,
    target_fqdn: &str,
) -> Result<()> {
    info!("setting router {router_fqdn} -> {target_fqdn}");

    cloudflare
        .upsert_record(zone_id, router_fqdn, "CNAME", target_fqdn, ROUTER_TTL, None)
        .await?;

    // deSEC stores CNAME content as an absolute name.
    let absolute_target = if target_fqdn.ends_with('.') {
        target_fqdn.to_string()
    } else {
        format!("{target_fqdn}.")
    };
    let router_subname = subname(&config.domain, router_fqdn)?;

    desec
        .upsert_rrset(
            &config.domain,
            &router_subname,
            "CNAME",
            ROUTER_TTL,
            &[absolute_target],
        )
        .await
}
