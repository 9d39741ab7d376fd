//! Message types passed between the pipeline tasks.

pub use crate::scene::SceneFrame;

/// One rotatable image, resolved from the inventory hierarchy.
///
/// `path` is the relative `category/subcategory/filename` location; both
/// fields are fixed once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef {
    pub path: String,
    pub filename: String,
}

impl ImageRef {
    pub fn new(category: &str, subcategory: &str, filename: &str) -> Self {
        Self {
            path: format!("{category}/{subcategory}/{filename}"),
            filename: filename.to_string(),
        }
    }

    /// Absolute URL under the configured image base.
    pub fn resolve(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Outcome of the one-shot inventory load: the fetched sequence, or the
/// static fallback list when the fetch failed in any way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    Fetched(Vec<ImageRef>),
    Fallback(Vec<ImageRef>),
}

impl InventorySource {
    pub fn images(&self) -> &[ImageRef] {
        match self {
            Self::Fetched(images) | Self::Fallback(images) => images,
        }
    }

    pub fn into_images(self) -> Vec<ImageRef> {
        match self {
            Self::Fetched(images) | Self::Fallback(images) => images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_concatenates_hierarchy() {
        let image = ImageRef::new("A", "Anywhere", "sunset.jpg");
        assert_eq!(image.path, "A/Anywhere/sunset.jpg");
        assert_eq!(image.filename, "sunset.jpg");
    }

    #[test]
    fn resolve_tolerates_trailing_slash_on_base() {
        let image = ImageRef::new("A", "Anywhere", "sunset.jpg");
        assert_eq!(
            image.resolve("https://cdn.example.net/"),
            "https://cdn.example.net/A/Anywhere/sunset.jpg"
        );
        assert_eq!(
            image.resolve("https://cdn.example.net"),
            "https://cdn.example.net/A/Anywhere/sunset.jpg"
        );
    }
}
