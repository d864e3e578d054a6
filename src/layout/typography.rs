//! Tone styling table and the headline-length font-size planner.
//!
//! Both are pure data transforms: the tone table maps a brand tone to
//! typography/effect defaults, and the size planner buckets the headline by
//! character count and derives per-variant sizes with fixed ratios.

use std::collections::BTreeMap;

use crate::brief::Tone;

/// Typography and effect defaults for one brand tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneStyle {
    pub font_family: &'static str,
    pub font_weight: &'static str,
    pub letter_spacing: u32,
    pub background_overlay: bool,
    pub text_shadow: bool,
    pub outline: bool,
}

/// Styling defaults per tone.
///
/// Every tone currently maps to the same family; premium typefaces are a
/// licensing question, not a rendering one.
pub fn tone_style(tone: Tone) -> ToneStyle {
    match tone {
        Tone::Premium => ToneStyle {
            font_family: "Arial",
            font_weight: "bold",
            letter_spacing: 2,
            background_overlay: true,
            text_shadow: false,
            outline: false,
        },
        Tone::Playful => ToneStyle {
            font_family: "Arial",
            font_weight: "bold",
            letter_spacing: 0,
            background_overlay: true,
            text_shadow: true,
            outline: true,
        },
        Tone::Minimal => ToneStyle {
            font_family: "Arial",
            font_weight: "normal",
            letter_spacing: 1,
            background_overlay: false,
            text_shadow: true,
            outline: false,
        },
        Tone::Luxury => ToneStyle {
            font_family: "Arial",
            font_weight: "bold",
            letter_spacing: 3,
            background_overlay: true,
            text_shadow: false,
            outline: false,
        },
        Tone::Professional => ToneStyle {
            font_family: "Arial",
            font_weight: "bold",
            letter_spacing: 1,
            background_overlay: true,
            text_shadow: false,
            outline: false,
        },
    }
}

/// Base size bucketed by headline length, then derived per variant.
///
/// Buckets: `< 20` chars → 72, `< 40` → 60, otherwise 48. The empty headline
/// falls in the first bucket. Portrait shrinks to 90% of base, story grows to
/// 120%, the two landscape variants use base unchanged.
pub fn font_sizes(headline: &str) -> BTreeMap<String, u32> {
    let length = headline.chars().count();

    let base: u32 = if length < 20 {
        72
    } else if length < 40 {
        60
    } else {
        48
    };

    BTreeMap::from([
        ("linkedin_landscape".to_string(), base),
        (
            "instagram_portrait".to_string(),
            (base as f64 * 0.9).round() as u32,
        ),
        (
            "instagram_story".to_string(),
            (base as f64 * 1.2).round() as u32,
        ),
        ("facebook_landscape".to_string(), base),
    ])
}
