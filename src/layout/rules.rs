//! The layout-rule bundle: everything the compositor needs to draw one
//! headline.
//!
//! A [`LayoutRules`] value is produced once per chosen headline (not per
//! variant) by [`design_layout`] and consumed read-only downstream. The only
//! per-variant piece is the `font_size` map, which the compositor resolves
//! through a fallback chain so a missing entry can never fail a render.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::{ColorStrategy, HighContrast};
use super::placement::{BottomThird, PlacementStrategy};
use super::typography::{font_sizes, tone_style};
use crate::brief::Tone;

/// Vertical anchor for the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
    Center,
}

/// Where the headline goes on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Position,
    pub alignment: String,
    /// Fraction of the image height where a `Bottom` block starts, in [0, 1].
    pub vertical_fraction: f32,
    pub justification: String,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Position::Bottom,
            alignment: "center".to_string(),
            vertical_fraction: 0.75,
            justification: "center".to_string(),
        }
    }
}

/// An RGBA color. Alpha 255 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The resolved high-contrast palette for one headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    pub text_color: Color,
    pub background_color: Color,
    pub outline_color: Color,
    pub shadow_color: Color,
}

/// Which overlay layers to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub background_overlay: bool,
    pub text_shadow: bool,
    pub outline: bool,
}

/// Typeface settings plus the per-variant font-size map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub font_family: String,
    /// Platform key → size in px. Resolved via [`Typography::size_for`].
    pub font_size: BTreeMap<String, u32>,
    pub font_weight: String,
    /// Extra pixels between glyphs.
    pub letter_spacing: u32,
    pub line_height: f32,
}

/// Size used when neither the variant key nor the landscape anchor entry is
/// present in the map.
pub const DEFAULT_FONT_SIZE: u32 = 60;

impl Typography {
    /// Resolve the font size for a variant key.
    ///
    /// Fallback chain: exact key → `linkedin_landscape` → 60. This is the
    /// config-gap policy: a missing entry degrades, it never errors.
    pub fn size_for(&self, variant_key: &str) -> u32 {
        self.font_size
            .get(variant_key)
            .or_else(|| self.font_size.get("linkedin_landscape"))
            .copied()
            .unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// Whitespace between the text block and the canvas edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub horizontal: u32,
    pub vertical: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            horizontal: 50,
            vertical: 40,
        }
    }
}

/// The complete rule bundle consumed by the compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRules {
    pub placement: Placement,
    pub typography: Typography,
    pub colors: ColorSet,
    pub effects: Effects,
    pub padding: Padding,
    pub max_width_percent: u32,
}

/// Design the overlay rules for one campaign headline.
///
/// `image_path` feeds the placement and color strategies. Both currently
/// return constants regardless of pixel content (the strategy seam exists so
/// a content-aware implementation can be swapped in later); an unreadable
/// image therefore degrades to the same defaults instead of erroring.
pub fn design_layout(tone: Tone, image_path: &Path, headline: &str) -> LayoutRules {
    let dimensions = image::image_dimensions(image_path).ok();
    if dimensions.is_none() {
        tracing::warn!(path = %image_path.display(), "could not read image dimensions, using default placement");
    }

    let placement = BottomThird.plan(dimensions);
    let colors = HighContrast.resolve(dimensions, &placement);
    let style = tone_style(tone);

    LayoutRules {
        placement,
        typography: Typography {
            font_family: style.font_family.to_string(),
            font_size: font_sizes(headline),
            font_weight: style.font_weight.to_string(),
            letter_spacing: style.letter_spacing,
            line_height: 1.2,
        },
        colors,
        effects: Effects {
            background_overlay: style.background_overlay,
            text_shadow: style.text_shadow,
            outline: style.outline,
        },
        padding: Padding::default(),
        max_width_percent: 80,
    }
}
