//! Fixed catalog of platform output specifications.
//!
//! Both tables here are declarative data, not code branches: adding a fifth
//! platform means adding a row, and the orchestrator, caption binding, and
//! metadata assembly pick it up without modification.

/// One platform-sized output the pipeline knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    /// Stable key used for font-size lookup, caption binding, and filenames.
    pub key: &'static str,
    pub width: u32,
    pub height: u32,
    /// Display name of the platform (e.g. "Instagram Story").
    pub platform: &'static str,
    /// Display name of the format (e.g. "Portrait").
    pub format: &'static str,
}

impl PlatformSpec {
    /// The `"WxH"` label recorded in variant metadata.
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// The four platform renditions every campaign produces.
pub const PLATFORM_SPECS: [PlatformSpec; 4] = [
    PlatformSpec {
        key: "linkedin_landscape",
        width: 1200,
        height: 627,
        platform: "LinkedIn",
        format: "Landscape",
    },
    PlatformSpec {
        key: "instagram_portrait",
        width: 1080,
        height: 1350,
        platform: "Instagram",
        format: "Portrait",
    },
    PlatformSpec {
        key: "instagram_story",
        width: 1080,
        height: 1920,
        platform: "Instagram Story",
        format: "Story",
    },
    PlatformSpec {
        key: "facebook_landscape",
        width: 1200,
        height: 630,
        platform: "Facebook",
        format: "Landscape",
    },
];

/// Variant key → caption key. Both Instagram renditions share the single
/// `instagram` caption; they differ only in geometry.
const CAPTION_KEYS: [(&str, &str); 4] = [
    ("linkedin_landscape", "linkedin"),
    ("instagram_portrait", "instagram"),
    ("instagram_story", "instagram"),
    ("facebook_landscape", "facebook"),
];

/// Resolve the caption lookup key for a variant key.
///
/// Unknown variant keys fall back to `facebook`, matching the most permissive
/// caption constraints.
pub fn caption_key(variant_key: &str) -> &'static str {
    CAPTION_KEYS
        .iter()
        .find(|(variant, _)| *variant == variant_key)
        .map(|(_, caption)| *caption)
        .unwrap_or("facebook")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_entries_with_unique_keys() {
        let mut keys: Vec<_> = PLATFORM_SPECS.iter().map(|s| s.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn size_labels_match_pixel_dimensions() {
        let linkedin = &PLATFORM_SPECS[0];
        assert_eq!(linkedin.size_label(), "1200x627");

        let story = PLATFORM_SPECS
            .iter()
            .find(|s| s.key == "instagram_story")
            .unwrap();
        assert_eq!(story.size_label(), "1080x1920");
    }

    #[test]
    fn instagram_variants_share_caption_key() {
        assert_eq!(caption_key("instagram_portrait"), "instagram");
        assert_eq!(caption_key("instagram_story"), "instagram");
    }

    #[test]
    fn caption_key_direct_mappings() {
        assert_eq!(caption_key("linkedin_landscape"), "linkedin");
        assert_eq!(caption_key("facebook_landscape"), "facebook");
    }

    #[test]
    fn caption_key_unknown_falls_back_to_facebook() {
        assert_eq!(caption_key("tiktok_vertical"), "facebook");
    }
}
