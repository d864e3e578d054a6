//! Campaign brief construction.
//!
//! The brief is the structured contract between raw user input and every
//! later stage: the copy provider prompts from it, the layout designer reads
//! the tone, and the variant orchestrator picks up the image path. Input
//! validation happens here and nowhere downstream.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BriefError {
    #[error("Product name is required")]
    MissingProductName,
    #[error("At least 3 features are required (got {0})")]
    TooFewFeatures(usize),
}

/// Brand tone. Drives both voice attributes (copy) and styling (layout).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Premium,
    Playful,
    Minimal,
    Luxury,
    #[default]
    Professional,
}

/// Voice guidance handed to the copy provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAttributes {
    pub adjectives: Vec<String>,
    pub style: String,
    pub avoid: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Tone → voice attribute table.
pub fn voice_attributes(tone: Tone) -> VoiceAttributes {
    match tone {
        Tone::Premium => VoiceAttributes {
            adjectives: strings(&["sophisticated", "refined", "quality"]),
            style: "Elegant and authoritative".to_string(),
            avoid: strings(&["slang", "emojis", "exclamation marks"]),
        },
        Tone::Playful => VoiceAttributes {
            adjectives: strings(&["fun", "energetic", "vibrant"]),
            style: "Light-hearted and engaging".to_string(),
            avoid: strings(&["formal language", "technical jargon"]),
        },
        Tone::Minimal => VoiceAttributes {
            adjectives: strings(&["simple", "clean", "essential"]),
            style: "Concise and focused".to_string(),
            avoid: strings(&["flowery language", "excessive details"]),
        },
        Tone::Luxury => VoiceAttributes {
            adjectives: strings(&["exclusive", "prestigious", "exceptional"]),
            style: "Aspirational and refined".to_string(),
            avoid: strings(&["common phrases", "mass market language"]),
        },
        Tone::Professional => VoiceAttributes {
            adjectives: strings(&["reliable", "trustworthy", "expert"]),
            style: "Clear and authoritative".to_string(),
            avoid: strings(&["casual language", "informal tone"]),
        },
    }
}

/// Per-platform copy constraints the provider is prompted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBrief {
    pub format: String,
    pub max_caption_length: u32,
    pub hashtag_count: String,
    pub image_sizes: Vec<String>,
}

/// Caption constraints per platform key (linkedin, instagram, facebook).
pub fn platform_briefs() -> BTreeMap<String, PlatformBrief> {
    BTreeMap::from([
        (
            "linkedin".to_string(),
            PlatformBrief {
                format: "professional".to_string(),
                max_caption_length: 3000,
                hashtag_count: "3-5".to_string(),
                image_sizes: strings(&["1200x627"]),
            },
        ),
        (
            "instagram".to_string(),
            PlatformBrief {
                format: "visual_storytelling".to_string(),
                max_caption_length: 2200,
                hashtag_count: "10-15".to_string(),
                image_sizes: strings(&["1080x1350", "1080x1920"]),
            },
        ),
        (
            "facebook".to_string(),
            PlatformBrief {
                format: "engaging".to_string(),
                max_caption_length: 63206,
                hashtag_count: "2-3".to_string(),
                image_sizes: strings(&["1200x630"]),
            },
        ),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub features: Vec<String>,
    pub image_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub tone: Tone,
    pub voice_attributes: VoiceAttributes,
}

/// Structured campaign brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brief {
    pub campaign_id: String,
    pub product: Product,
    pub brand: Brand,
    pub platforms: BTreeMap<String, PlatformBrief>,
    pub objectives: Vec<String>,
    pub created_at: String,
}

/// Build a validated brief from raw user input.
///
/// Features are trimmed and blank entries dropped before the minimum-count
/// check, so `["a", " ", "b"]` counts as two features, not three.
pub fn create_brief(
    campaign_id: &str,
    product_name: &str,
    features: &[String],
    tone: Tone,
    image_path: &std::path::Path,
) -> Result<Brief, BriefError> {
    if product_name.trim().is_empty() {
        return Err(BriefError::MissingProductName);
    }

    let clean_features: Vec<String> = features
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if clean_features.len() < 3 {
        return Err(BriefError::TooFewFeatures(clean_features.len()));
    }

    Ok(Brief {
        campaign_id: campaign_id.to_string(),
        product: Product {
            name: product_name.to_string(),
            features: clean_features,
            image_path: image_path.to_path_buf(),
        },
        brand: Brand {
            tone,
            voice_attributes: voice_attributes(tone),
        },
        platforms: platform_briefs(),
        objectives: strings(&[
            "Generate brand awareness",
            "Highlight key product features",
            "Drive engagement and conversions",
        ]),
        created_at: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn features(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn brief_requires_product_name() {
        let err = create_brief(
            "c1",
            "  ",
            &features(&["a", "b", "c"]),
            Tone::Professional,
            Path::new("photo.jpg"),
        )
        .unwrap_err();
        assert_eq!(err, BriefError::MissingProductName);
    }

    #[test]
    fn brief_requires_three_nonblank_features() {
        let err = create_brief(
            "c1",
            "Widget",
            &features(&["fast", "  ", "light"]),
            Tone::Professional,
            Path::new("photo.jpg"),
        )
        .unwrap_err();
        assert_eq!(err, BriefError::TooFewFeatures(2));
    }

    #[test]
    fn brief_trims_features() {
        let brief = create_brief(
            "c1",
            "Widget",
            &features(&[" fast ", "light", "durable"]),
            Tone::Premium,
            Path::new("photo.jpg"),
        )
        .unwrap();
        assert_eq!(brief.product.features, features(&["fast", "light", "durable"]));
    }

    #[test]
    fn brief_carries_tone_attributes_and_platforms() {
        let brief = create_brief(
            "c1",
            "Widget",
            &features(&["fast", "light", "durable"]),
            Tone::Luxury,
            Path::new("photo.jpg"),
        )
        .unwrap();

        assert_eq!(brief.brand.tone, Tone::Luxury);
        assert!(brief
            .brand
            .voice_attributes
            .adjectives
            .contains(&"exclusive".to_string()));
        assert_eq!(brief.platforms.len(), 3);
        assert_eq!(brief.platforms["instagram"].max_caption_length, 2200);
    }

    #[test]
    fn brief_round_trips_json() {
        let brief = create_brief(
            "c1",
            "Widget",
            &features(&["fast", "light", "durable"]),
            Tone::Playful,
            Path::new("photo.jpg"),
        )
        .unwrap();
        let json = serde_json::to_string(&brief).unwrap();
        let back: Brief = serde_json::from_str(&json).unwrap();
        assert_eq!(back, brief);
    }
}
