//! Flattening of the remote image inventory and the static fallback list.

use serde_json::Value;

use crate::events::ImageRef;

/// Images substituted when the remote inventory cannot be loaded.
const FALLBACK_IMAGES: &[(&str, &str, &str)] = &[
    ("A", "Anywhere", "Whisk_0071c25679.jpg"),
    ("A", "Anywhere", "Whisk_04c695ef4e.jpg"),
    ("A", "Anywhere", "Whisk_0854079d29.jpg"),
];

pub fn fallback_images() -> Vec<ImageRef> {
    FALLBACK_IMAGES
        .iter()
        .map(|(category, subcategory, filename)| ImageRef::new(category, subcategory, filename))
        .collect()
}

/// Flattens a `{ category: { subcategory: [filename] } }` tree into image
/// references. Entries that do not match the shape are skipped.
///
/// Returns `None` when the body is not a JSON object or nothing usable
/// remains, so callers take the fallback path instead of rotating an empty
/// sequence forever.
pub fn flatten_inventory(body: &Value) -> Option<Vec<ImageRef>> {
    let categories = body.as_object()?;
    let mut images = Vec::new();
    for (category, subcategories) in categories {
        let Some(subcategories) = subcategories.as_object() else {
            continue;
        };
        for (subcategory, filenames) in subcategories {
            let Some(filenames) = filenames.as_array() else {
                continue;
            };
            for filename in filenames.iter().filter_map(Value::as_str) {
                images.push(ImageRef::new(category, subcategory, filename));
            }
        }
    }
    if images.is_empty() { None } else { Some(images) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_categories() {
        let body = json!({
            "A": {
                "Anywhere": ["one.jpg", "two.jpg"],
                "Beach": ["three.jpg"],
            },
            "B": {
                "City": ["four.jpg"],
            },
        });
        let images = flatten_inventory(&body).expect("shape matches");
        let paths: Vec<&str> = images.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "A/Anywhere/one.jpg",
                "A/Anywhere/two.jpg",
                "A/Beach/three.jpg",
                "B/City/four.jpg",
            ]
        );
    }

    #[test]
    fn skips_entries_that_do_not_match_the_shape() {
        let body = json!({
            "A": {
                "Anywhere": ["one.jpg"],
                "Broken": "not-an-array",
            },
            "B": 42,
        });
        let images = flatten_inventory(&body).expect("one usable entry remains");
        assert_eq!(images, vec![ImageRef::new("A", "Anywhere", "one.jpg")]);
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert_eq!(flatten_inventory(&json!(null)), None);
        assert_eq!(flatten_inventory(&json!(42)), None);
        assert_eq!(flatten_inventory(&json!(["a.jpg"])), None);
    }

    #[test]
    fn rejects_objects_with_nothing_usable() {
        assert_eq!(flatten_inventory(&json!({})), None);
        assert_eq!(flatten_inventory(&json!({"A": 5, "B": "x"})), None);
        assert_eq!(flatten_inventory(&json!({"A": {"sub": []}})), None);
    }

    #[test]
    fn fallback_list_is_fixed_and_non_empty() {
        let images = fallback_images();
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|i| i.path.starts_with("A/Anywhere/")));
    }
}
