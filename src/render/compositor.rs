//! The two pixel operations behind every variant: aspect-correct crop/resize
//! and the layered text overlay.
//!
//! `composite` has no failure path by design. Font resolution degrades to
//! bitmap glyphs, missing font-size entries resolve through the fallback
//! chain, and all drawing clips at the canvas. The overlay z-order is fixed:
//!
//! ```text
//! scrim → shadow → fill → outline halo → fill redraw
//! ```
//!
//! The halo is drawn *after* the first fill pass and then the fill is drawn
//! once more on top, so the outline never obscures the glyph body.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};

use super::calculations::{crop_box, scrim_box, text_origin};
use super::draw::{draw_text, fill_rect, text_size};
use super::font::{self, LoadedFont};
use crate::layout::rules::LayoutRules;

/// Offset of the drop shadow, in pixels, applied on both axes.
const SHADOW_OFFSET: i32 = 3;

/// Reach of the outline halo: the fill is redrawn at every offset in
/// `[-OUTLINE_REACH, OUTLINE_REACH]²` except the origin.
const OUTLINE_REACH: i32 = 2;

/// Center-crop the source to the target aspect ratio and resample to exactly
/// `target_width x target_height` (Lanczos3, upscaling included).
pub fn fit(img: &DynamicImage, target_width: u32, target_height: u32) -> RgbaImage {
    let b = crop_box(img.dimensions(), (target_width, target_height));
    img.crop_imm(b.x, b.y, b.width, b.height)
        .resize_exact(target_width, target_height, FilterType::Lanczos3)
        .to_rgba8()
}

/// Overlay the headline on an already-resized variant canvas.
///
/// `variant_key` selects the per-variant font size via the fallback chain in
/// [`Typography::size_for`](crate::layout::rules::Typography::size_for).
pub fn composite(img: &mut RgbaImage, headline: &str, rules: &LayoutRules, variant_key: &str) {
    let size = rules.typography.size_for(variant_key);
    let font = font::load(&rules.typography.font_family, size);
    composite_with_font(img, headline, rules, &font);
}

pub(crate) fn composite_with_font(
    img: &mut RgbaImage,
    headline: &str,
    rules: &LayoutRules,
    font: &LoadedFont,
) {
    if headline.is_empty() {
        return;
    }

    let spacing = rules.typography.letter_spacing;
    let text = text_size(font, headline, spacing);
    let origin = text_origin(img.dimensions(), text, &rules.placement, &rules.padding);
    let (x, y) = origin;
    let colors = &rules.colors;

    if rules.effects.background_overlay {
        fill_rect(img, scrim_box(origin, text), colors.background_color);
    }

    if rules.effects.text_shadow {
        draw_text(
            img,
            font,
            x + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            colors.shadow_color,
            headline,
            spacing,
        );
    }

    draw_text(img, font, x, y, colors.text_color, headline, spacing);

    if rules.effects.outline {
        for dx in -OUTLINE_REACH..=OUTLINE_REACH {
            for dy in -OUTLINE_REACH..=OUTLINE_REACH {
                if dx == 0 && dy == 0 {
                    continue;
                }
                draw_text(img, font, x + dx, y + dy, colors.outline_color, headline, spacing);
            }
        }
        // Redraw the fill so the halo sits around the glyphs, not on them
        draw_text(img, font, x, y, colors.text_color, headline, spacing);
    }
}
