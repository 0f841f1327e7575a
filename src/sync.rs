use log::info;

use crate::api::{CloudflareClient, DesecClient};
use crate::config::ZoneConfig;
use crate::error::{Error, Result};

/// Push every configured record into both providers.
///
/// Records are processed in config order and the first failure halts the
/// run; there is no transactionality across providers, so a deSEC failure
/// leaves the already-applied Cloudflare write in place.
pub async fn sync_zone(
    config: &ZoneConfig,
    cloudflare: &CloudflareClient,
    desec: &DesecClient,
) -> Result<()> {
    let zone_id = cloudflare.get_zone_id(&config.domain).await?;
    info!("cloudflare zone id for {}: {zone_id}", config.domain);

    for record in &config.records {
        let fqdn = record.fqdn();
        let subname = record.subname()?;
        let value = record.values.first().ok_or_else(|| {
            Error::Config(format!("record {} has no value", record.name))
        })?;

        info!(
            "upserting {} {fqdn} -> {value} (ttl {}) in cloudflare and desec",
            record.record_type, record.ttl
        );

        cloudflare
            .upsert_record(&zone_id, &fqdn, &record.record_type, value, record.ttl, None)
            .await?;

        desec
            .upsert_rrset(
                &config.domain,
                &subname,
                &record.record_type,
                record.ttl,
                &record.values,
            )
            .await?;
    }

    info!("sync completed successfully");
    Ok(())
}
