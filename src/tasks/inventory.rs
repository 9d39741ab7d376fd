use anyhow::{Context, Result};
use serde_json::Value;
use tokio::select;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Configuration;
use crate::events::{ImageRef, InventorySource};
use crate::inventory::{fallback_images, flatten_inventory};

/// One-shot inventory load. Sends exactly one `InventorySource` downstream
/// and returns; any failure substitutes the static fallback list without
/// retrying.
pub async fn run(
    cfg: Configuration,
    to_rotator: Sender<InventorySource>,
    cancel: CancellationToken,
) -> Result<()> {
    let source = select! {
        _ = cancel.cancelled() => return Ok(()),
        source = load(&cfg) => source,
    };
    let _ = to_rotator.send(source).await;
    Ok(())
}

/// Fetches and flattens the inventory, falling back on any failure.
pub async fn load(cfg: &Configuration) -> InventorySource {
    match fetch_inventory(cfg).await {
        Ok(images) => {
            info!(
                count = images.len(),
                url = %cfg.inventory_url,
                "image inventory loaded"
            );
            InventorySource::Fetched(images)
        }
        Err(err) => {
            warn!(
                url = %cfg.inventory_url,
                "inventory fetch failed, using fallback images: {err:#}"
            );
            InventorySource::Fallback(fallback_images())
        }
    }
}

async fn fetch_inventory(cfg: &Configuration) -> Result<Vec<ImageRef>> {
    let client = reqwest::Client::builder()
        .timeout(cfg.request_timeout)
        .build()
        .context("building http client")?;
    let body: Value = client
        .get(&cfg.inventory_url)
        .send()
        .await
        .context("requesting image inventory")?
        .error_for_status()
        .context("image inventory request rejected")?
        .json()
        .await
        .context("decoding image inventory body")?;
    flatten_inventory(&body).context("image inventory held no usable images")
}
