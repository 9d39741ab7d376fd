use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::scene::{PanEffect, SceneFrame};

/// Applies scene frames to a rendering backend.
pub trait Renderer: Send {
    fn apply(&mut self, frame: &SceneFrame);
}

/// Reports each applied frame through the log. Stands in wherever no real
/// compositor is attached.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn apply(&mut self, frame: &SceneFrame) {
        match frame {
            SceneFrame::Cut { background } => {
                info!(image = %background.url, position = %background.position, "background swapped");
            }
            SceneFrame::Crossfade {
                fade_in,
                fade_out,
                darkness,
            } => {
                info!(
                    layer = %fade_in.layer,
                    image = fade_in.background.as_ref().map(|b| b.url.as_str()),
                    effect = fade_in.effect.map(PanEffect::class_name),
                    fading_out = %fade_out.layer,
                    darkness = f64::from(*darkness),
                    "crossfade started"
                );
            }
        }
    }
}

pub async fn run(
    mut frames_rx: Receiver<SceneFrame>,
    mut renderer: impl Renderer,
    cancel: CancellationToken,
) -> Result<()> {
    loop {
        select! {
            _ = cancel.cancelled() => break,
            frame = frames_rx.recv() => match frame {
                Some(frame) => renderer.apply(&frame),
                None => break,
            },
        }
    }
    Ok(())
}
