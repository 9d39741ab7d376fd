//! Declarative visual state for the hero background.
//!
//! Display steps never touch a real compositor. Each step produces a
//! [`SceneFrame`] describing which layer shows which image, at which opacity,
//! with which pan effect, under the fixed darkening overlay; a renderer
//! applies the frame with whatever technology it has.

use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::config::TransitionMode;

/// One of the two overlapping slide layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    A,
    B,
}

impl Layer {
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Directional pan/zoom applied to an incoming slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanEffect {
    Up,
    Down,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl PanEffect {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Identifier understood by the style sheet driving the transform.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Up => "pan-up",
            Self::Down => "pan-down",
            Self::Left => "pan-left",
            Self::Right => "pan-right",
            Self::TopLeft => "pan-top-left",
            Self::TopRight => "pan-top-right",
            Self::BottomLeft => "pan-bottom-left",
            Self::BottomRight => "pan-bottom-right",
        }
    }

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for PanEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Full-bleed background placement for one surface or layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundStyle {
    pub url: String,
    pub size: &'static str,
    pub position: String,
    pub repeat: &'static str,
}

impl BackgroundStyle {
    /// Cover sizing, centered, no repeat.
    pub fn cover(url: String) -> Self {
        Self::positioned(url, "center")
    }

    pub fn positioned(url: String, position: &str) -> Self {
        Self {
            url,
            size: "cover",
            position: position.to_string(),
            repeat: "no-repeat",
        }
    }
}

/// State one layer ends this display step in.
///
/// `opacity` is the target the fade runs to; the renderer must place the
/// incoming layer at opacity 0 before applying its background, so the old
/// content never flashes at full opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub layer: Layer,
    pub background: Option<BackgroundStyle>,
    pub opacity: f32,
    pub effect: Option<PanEffect>,
    pub fade: Option<Duration>,
}

/// Declarative result of one display step.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneFrame {
    /// Instantaneous swap on a single surface.
    Cut { background: BackgroundStyle },
    /// Symmetric dual-layer fade under a fixed darkening overlay.
    Crossfade {
        /// Layer fading in to opacity 1; becomes the active layer.
        fade_in: LayerState,
        /// Layer fading out to opacity 0, stripped of its previous effect.
        fade_out: LayerState,
        /// Darkening overlay alpha in `[0, 1]`.
        darkness: f32,
    },
}

impl fmt::Display for SceneFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cut { background } => write!(f, "cut -> {}", background.url),
            Self::Crossfade {
                fade_in, darkness, ..
            } => {
                let url = fade_in
                    .background
                    .as_ref()
                    .map_or("(none)", |b| b.url.as_str());
                let effect = fade_in.effect.map_or("(none)", PanEffect::class_name);
                let fade = fade_in.fade.unwrap_or_default();
                write!(
                    f,
                    "crossfade {} <- {url} ({effect}, fade {}, darkness {darkness:.2})",
                    fade_in.layer,
                    humantime::format_duration(fade),
                )
            }
        }
    }
}

/// The visual surface slides land on; variant chosen by the configured
/// transition.
#[derive(Debug)]
pub enum SlideSurface {
    Single(SingleSurface),
    Crossfade(CrossfadeSurface),
}

impl SlideSurface {
    pub fn for_transition(transition: &TransitionMode, darkness_alpha: f32) -> Self {
        match *transition {
            TransitionMode::Cut => Self::Single(SingleSurface),
            TransitionMode::Crossfade { fade } => {
                Self::Crossfade(CrossfadeSurface::new(fade, darkness_alpha))
            }
        }
    }

    pub fn show<R: Rng + ?Sized>(&mut self, url: String, rng: &mut R) -> SceneFrame {
        match self {
            Self::Single(surface) => surface.show(url),
            Self::Crossfade(surface) => surface.show(url, rng),
        }
    }
}

/// Single full-bleed surface; every step replaces whatever was shown.
#[derive(Debug, Default)]
pub struct SingleSurface;

impl SingleSurface {
    pub fn show(&mut self, url: String) -> SceneFrame {
        SceneFrame::Cut {
            background: BackgroundStyle::cover(url),
        }
    }
}

/// Two overlapping layers plus a fixed darkening overlay.
///
/// Exactly one layer holds opacity 1 between steps; each step loads the
/// inactive layer, fades the pair symmetrically and hands the active
/// designation over.
#[derive(Debug)]
pub struct CrossfadeSurface {
    active: Layer,
    fade: Duration,
    darkness: f32,
    current: Option<BackgroundStyle>,
}

impl CrossfadeSurface {
    pub fn new(fade: Duration, darkness: f32) -> Self {
        Self {
            active: Layer::A,
            fade,
            darkness,
            current: None,
        }
    }

    /// Layer currently holding opacity 1.
    pub fn active_layer(&self) -> Layer {
        self.active
    }

    pub fn show<R: Rng + ?Sized>(&mut self, url: String, rng: &mut R) -> SceneFrame {
        let incoming = self.active.other();
        let effect = PanEffect::pick(rng);
        let background = BackgroundStyle::cover(url);
        let frame = SceneFrame::Crossfade {
            fade_in: LayerState {
                layer: incoming,
                background: Some(background.clone()),
                opacity: 1.0,
                effect: Some(effect),
                fade: Some(self.fade),
            },
            fade_out: LayerState {
                layer: self.active,
                background: self.current.take(),
                opacity: 0.0,
                effect: None,
                fade: Some(self.fade),
            },
            darkness: self.darkness,
        };
        self.current = Some(background);
        self.active = incoming;
        frame
    }
}
