use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::{BackgroundMode, Configuration};
use crate::events::InventorySource;
use crate::rotation::{Rotation, Rotator};
use crate::scene::{BackgroundStyle, SceneFrame, SlideSurface};

/// Drives the slideshow: waits for the inventory to resolve, shuffles, then
/// emits one frame immediately and one per `slide-interval` tick until
/// cancelled. The other background modes emit at most one static frame.
pub async fn run(
    cfg: Configuration,
    mut inventory_rx: Receiver<InventorySource>,
    to_viewer: Sender<SceneFrame>,
    cancel: CancellationToken,
) -> Result<()> {
    match cfg.background {
        BackgroundMode::Slideshow => {}
        BackgroundMode::CustomImage => {
            if let Some(custom) = &cfg.custom_image {
                let frame = SceneFrame::Cut {
                    background: BackgroundStyle::positioned(custom.url.clone(), &custom.position),
                };
                let _ = to_viewer.send(frame).await;
            }
            return Ok(());
        }
        BackgroundMode::Default => {
            info!("background mode is default; slideshow stays off");
            return Ok(());
        }
    }

    // Rotation begins only once the inventory resolves, success or fallback.
    let source = select! {
        _ = cancel.cancelled() => return Ok(()),
        source = inventory_rx.recv() => match source {
            Some(source) => source,
            None => {
                warn!("inventory channel closed before any images arrived");
                return Ok(());
            }
        },
    };

    let mut rng = match cfg.startup_shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match &source {
        InventorySource::Fetched(images) => {
            info!(count = images.len(), "starting slideshow")
        }
        InventorySource::Fallback(images) => {
            info!(count = images.len(), "starting slideshow from fallback list")
        }
    }

    let mut rotator = Rotator::new(Rotation::new(source.into_images(), &mut rng));
    let mut surface = SlideSurface::for_transition(&cfg.transition, cfg.darkness_alpha());

    if !rotator.start() {
        return Ok(());
    }

    // The first tick fires immediately, so the first image shows at startup.
    let mut ticker = interval(cfg.slide_interval);
    loop {
        select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(image) = rotator.step(&mut rng) else {
                    continue;
                };
                let url = image.resolve(&cfg.image_base_url);
                debug!(image = %image.path, "display step");
                if to_viewer.send(surface.show(url, &mut rng)).await.is_err() {
                    warn!("viewer channel closed");
                    break;
                }
            }
        }
    }
    Ok(())
}
