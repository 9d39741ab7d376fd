use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Which hero background is active. Only `slideshow` arms the rotation timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    Slideshow,
    CustomImage,
    Default,
}

/// How successive slides replace each other.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransitionMode {
    /// Instantaneous swap on a single surface.
    Cut,
    /// Dual-layer fade with a random pan effect on the incoming slide.
    Crossfade {
        #[serde(default = "TransitionMode::default_fade", with = "humantime_serde")]
        fade: Duration,
    },
}

impl TransitionMode {
    const fn default_fade() -> Duration {
        Duration::from_millis(500)
    }
}

impl Default for TransitionMode {
    fn default() -> Self {
        Self::Crossfade {
            fade: Self::default_fade(),
        }
    }
}

/// Fixed background used by the `custom-image` mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CustomImage {
    pub url: String,
    #[serde(default = "CustomImage::default_position")]
    pub position: String,
}

impl CustomImage {
    fn default_position() -> String {
        "center center".to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// GET endpoint returning the category/subcategory image inventory.
    pub inventory_url: String,
    /// Base URL prefixed to every image path.
    pub image_base_url: String,
    /// Time between display steps.
    #[serde(with = "humantime_serde")]
    pub slide_interval: Duration,
    /// Active hero background.
    pub background: BackgroundMode,
    /// Fixed background for the `custom-image` mode.
    pub custom_image: Option<CustomImage>,
    /// Darkening overlay percentage, 0-100.
    pub hero_darkness: u8,
    /// Transition between successive slides.
    pub transition: TransitionMode,
    /// Optional deterministic seed for the startup shuffle.
    pub startup_shuffle_seed: Option<u64>,
    /// Inventory fetch timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&s).context("parsing configuration yaml")
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.inventory_url.is_empty(),
            "inventory-url must not be empty"
        );
        ensure!(
            !self.image_base_url.is_empty(),
            "image-base-url must not be empty"
        );
        ensure!(
            self.slide_interval > Duration::ZERO,
            "slide-interval must be greater than zero"
        );
        ensure!(
            self.request_timeout > Duration::ZERO,
            "request-timeout must be greater than zero"
        );
        ensure!(
            self.hero_darkness <= 100,
            "hero-darkness must be between 0 and 100"
        );
        if let TransitionMode::Crossfade { fade } = self.transition {
            ensure!(
                fade > Duration::ZERO,
                "transition.fade must be greater than zero"
            );
        }
        ensure!(
            self.background != BackgroundMode::CustomImage || self.custom_image.is_some(),
            "background custom-image requires a custom-image block"
        );
        Ok(self)
    }

    /// Overlay alpha derived from the configured percentage.
    pub fn darkness_alpha(&self) -> f32 {
        f32::from(self.hero_darkness) / 100.0
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            inventory_url: String::new(),
            image_base_url: String::new(),
            slide_interval: Duration::from_secs(6),
            background: BackgroundMode::Slideshow,
            custom_image: None,
            hero_darkness: 40,
            transition: TransitionMode::default(),
            startup_shuffle_seed: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}
