//! Alpha-blended drawing primitives on RGBA buffers.
//!
//! Glyph rasterization goes through `rusttype` coverage callbacks; the
//! built-in bitmap path scales 8x8 glyph cells. Both blend with the color's
//! alpha so semi-transparent shadows and scrims composite correctly over the
//! photo. Everything clips at the image edges — callers may pass
//! out-of-bounds coordinates freely.

use image::RgbaImage;
use rusttype::{point, Scale};

use super::calculations::Rect;
use super::font::LoadedFont;
use crate::layout::rules::Color;

/// Source-over blend of `color` at `coverage` (0..=1) into one pixel.
fn blend(img: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }

    let sa = coverage.clamp(0.0, 1.0) * (color.a as f32 / 255.0);
    if sa <= 0.0 {
        return;
    }
    let inv = 1.0 - sa;

    let dst = img.get_pixel_mut(x, y);
    dst.0[0] = (color.r as f32 * sa + dst.0[0] as f32 * inv) as u8;
    dst.0[1] = (color.g as f32 * sa + dst.0[1] as f32 * inv) as u8;
    dst.0[2] = (color.b as f32 * sa + dst.0[2] as f32 * inv) as u8;
    dst.0[3] = 255;
}

/// Fill a rectangle, clipped to the image, blending with the color's alpha.
pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Color) {
    let x0 = rect.x0.max(0);
    let y0 = rect.y0.max(0);
    let x1 = rect.x1.min(img.width() as i32);
    let y1 = rect.y1.min(img.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            blend(img, x, y, color, 1.0);
        }
    }
}

/// Measure the rendered bounding box of `text`, including letter spacing.
///
/// Width is advance-based (caret travel), height is the font's ascent minus
/// descent — the box a line of this text occupies, independent of which
/// glyphs happen to have descenders.
pub fn text_size(font: &LoadedFont, text: &str, letter_spacing: u32) -> (u32, u32) {
    let glyph_count = text.chars().count() as u32;
    if glyph_count == 0 {
        return (0, 0);
    }
    let total_spacing = letter_spacing * (glyph_count - 1);

    match font {
        LoadedFont::Truetype { font, size } => {
            let scale = Scale::uniform(*size);
            let v = font.v_metrics(scale);
            let advance: f32 = text
                .chars()
                .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width)
                .sum();
            let height = (v.ascent - v.descent).ceil() as u32;
            (advance.ceil() as u32 + total_spacing, height)
        }
        LoadedFont::Bitmap { scale } => {
            (glyph_count * 8 * scale + total_spacing, 8 * scale)
        }
    }
}

/// Draw `text` with its top-left corner at `(x, y)`.
///
/// The baseline is derived from the font ascent so that `y` means the top of
/// the measured box from [`text_size`].
pub fn draw_text(
    img: &mut RgbaImage,
    font: &LoadedFont,
    x: i32,
    y: i32,
    color: Color,
    text: &str,
    letter_spacing: u32,
) {
    match font {
        LoadedFont::Truetype { font, size } => {
            let scale = Scale::uniform(*size);
            let v = font.v_metrics(scale);
            let baseline = y as f32 + v.ascent;
            let mut caret = x as f32;

            for ch in text.chars() {
                let glyph = font.glyph(ch).scaled(scale);
                let advance = glyph.h_metrics().advance_width;
                let positioned = glyph.positioned(point(caret, baseline));
                if let Some(bb) = positioned.pixel_bounding_box() {
                    positioned.draw(|gx, gy, coverage| {
                        blend(
                            img,
                            gx as i32 + bb.min.x,
                            gy as i32 + bb.min.y,
                            color,
                            coverage,
                        );
                    });
                }
                caret += advance + letter_spacing as f32;
            }
        }
        LoadedFont::Bitmap { scale } => {
            let scale = *scale as i32;
            let mut caret = x;
            for ch in text.chars() {
                draw_bitmap_glyph(img, ch, caret, y, scale, color);
                caret += 8 * scale + letter_spacing as i32;
            }
        }
    }
}

/// Rasterize one 8x8 glyph cell at integer scale. Unmapped codepoints render
/// as `?`.
fn draw_bitmap_glyph(img: &mut RgbaImage, ch: char, x: i32, y: i32, scale: i32, color: Color) {
    let code = ch as usize;
    let glyph = if code < 128 {
        font8x8::legacy::BASIC_LEGACY[code]
    } else {
        font8x8::legacy::BASIC_LEGACY[b'?' as usize]
    };

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            if bits & (1 << col) == 0 {
                continue;
            }
            let px = x + col as i32 * scale;
            let py = y + row as i32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    blend(img, px + dx, py + dy, color, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::calculations::Rect;

    const WHITE: Color = Color::rgb(255, 255, 255);

    fn canvas(w: u32, h: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([value, value, value, 255]))
    }

    fn bitmap(scale: u32) -> LoadedFont {
        LoadedFont::Bitmap { scale }
    }

    #[test]
    fn bitmap_text_size_counts_cells_and_spacing() {
        assert_eq!(text_size(&bitmap(2), "AB", 0), (32, 16));
        assert_eq!(text_size(&bitmap(2), "AB", 3), (35, 16));
        assert_eq!(text_size(&bitmap(1), "", 5), (0, 0));
    }

    #[test]
    fn draw_text_marks_pixels_inside_the_box_only() {
        let mut img = canvas(64, 32, 0);
        draw_text(&mut img, &bitmap(2), 4, 4, WHITE, "HI", 0);

        let touched = img.pixels().filter(|p| p.0[0] == 255).count();
        assert!(touched > 0, "glyphs drew nothing");

        // Nothing outside the measured box
        let (w, h) = text_size(&bitmap(2), "HI", 0);
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[0] == 255 {
                assert!(x >= 4 && x < 4 + w && y >= 4 && y < 4 + h, "stray pixel at {x},{y}");
            }
        }
    }

    #[test]
    fn draw_text_clips_at_edges_without_panicking() {
        let mut img = canvas(16, 16, 0);
        draw_text(&mut img, &bitmap(3), -10, -10, WHITE, "XYZ", 0);
        draw_text(&mut img, &bitmap(3), 14, 14, WHITE, "XYZ", 0);
    }

    #[test]
    fn fill_rect_blends_semi_transparent_color() {
        let mut img = canvas(10, 10, 255);
        let scrim = Color::rgba(0, 0, 0, 180);
        fill_rect(&mut img, Rect { x0: 0, y0: 0, x1: 10, y1: 10 }, scrim);

        // 255 * (1 - 180/255) = 75
        let p = img.get_pixel(5, 5);
        assert_eq!(p.0[0], 75);
        assert_eq!(p.0[3], 255);
    }

    #[test]
    fn fill_rect_clips_negative_and_oversized_bounds() {
        let mut img = canvas(8, 8, 0);
        fill_rect(
            &mut img,
            Rect { x0: -5, y0: -5, x1: 100, y1: 100 },
            Color::rgb(10, 20, 30),
        );
        assert_eq!(img.get_pixel(0, 0).0[0], 10);
        assert_eq!(img.get_pixel(7, 7).0[2], 30);
    }

    #[test]
    fn opaque_draw_replaces_destination() {
        let mut img = canvas(20, 20, 40);
        draw_text(&mut img, &bitmap(2), 0, 0, WHITE, "I", 0);
        let lit = img.pixels().filter(|p| p.0[0] == 255).count();
        assert!(lit > 0);
    }
}
