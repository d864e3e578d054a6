//! Pure geometry for cropping and text layout.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::layout::rules::{Padding, Placement, Position};

/// Region of the source image to keep before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the centered crop that matches the target aspect ratio.
///
/// If the source is relatively wider than the target, width is cropped
/// symmetrically; otherwise height is. The crop never letterboxes: the
/// resulting region always fills the target ratio and is resampled to the
/// exact target size afterwards (upscaling included).
///
/// # Examples
/// ```
/// # use adsmith::render::calculations::crop_box;
/// // 2000x1000 source into a square: crop width to 1000, centered
/// let b = crop_box((2000, 1000), (500, 500));
/// assert_eq!((b.x, b.y, b.width, b.height), (500, 0, 1000, 1000));
/// ```
pub fn crop_box(source: (u32, u32), target: (u32, u32)) -> CropBox {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_ratio = src_w as f64 / src_h as f64;
    let tgt_ratio = tgt_w as f64 / tgt_h as f64;

    if src_ratio > tgt_ratio {
        // Source is wider: crop width, keep full height
        let new_w = ((src_h as f64 * tgt_ratio).round() as u32).min(src_w).max(1);
        CropBox {
            x: (src_w - new_w) / 2,
            y: 0,
            width: new_w,
            height: src_h,
        }
    } else {
        // Source is taller or same ratio: crop height, keep full width
        let new_h = ((src_w as f64 / tgt_ratio).round() as u32).min(src_h).max(1);
        CropBox {
            x: 0,
            y: (src_h - new_h) / 2,
            width: src_w,
            height: new_h,
        }
    }
}

/// Compute the top-left draw origin for a measured text block.
///
/// Horizontal placement is always centered. Vertical placement follows the
/// layout position: `Bottom` anchors at `height * vertical_fraction`, `Top`
/// at the vertical padding, `Center` at the midpoint of the remaining space.
pub fn text_origin(
    target: (u32, u32),
    text: (u32, u32),
    placement: &Placement,
    padding: &Padding,
) -> (i32, i32) {
    let (tgt_w, tgt_h) = target;
    let (text_w, text_h) = text;

    let x = (tgt_w as i32 - text_w as i32) / 2;
    let y = match placement.position {
        Position::Bottom => (tgt_h as f32 * placement.vertical_fraction) as i32,
        Position::Top => padding.vertical as i32,
        Position::Center => (tgt_h as i32 - text_h as i32) / 2,
    };

    (x, y)
}

/// Margin added to the text bounding box on every side of the scrim.
pub const SCRIM_MARGIN: i32 = 20;

/// Rectangle in image space; may extend past the image and is clipped when
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// The scrim rectangle behind a text block at `origin` with size `text`.
pub fn scrim_box(origin: (i32, i32), text: (u32, u32)) -> Rect {
    let (x, y) = origin;
    let (text_w, text_h) = text;
    Rect {
        x0: x - SCRIM_MARGIN,
        y0: y - SCRIM_MARGIN,
        x1: x + text_w as i32 + SCRIM_MARGIN,
        y1: y + text_h as i32 + SCRIM_MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom_placement() -> Placement {
        Placement::default()
    }

    // =========================================================================
    // crop_box tests
    // =========================================================================

    #[test]
    fn wider_source_crops_width_symmetrically() {
        // 2000x1000 into 1200x627 (ratio ~1.914): new_w = round(1000 * 1.914) = 1914
        let b = crop_box((2000, 1000), (1200, 627));
        assert_eq!(b.height, 1000);
        assert_eq!(b.width, 1914);
        assert_eq!(b.x, (2000 - 1914) / 2);
        assert_eq!(b.y, 0);
    }

    #[test]
    fn taller_source_crops_height_symmetrically() {
        // 1000x2000 into 1080x1350 (ratio 0.8): new_h = round(1000 / 0.8) = 1250
        let b = crop_box((1000, 2000), (1080, 1350));
        assert_eq!(b.width, 1000);
        assert_eq!(b.height, 1250);
        assert_eq!(b.x, 0);
        assert_eq!(b.y, (2000 - 1250) / 2);
    }

    #[test]
    fn matching_ratio_keeps_full_frame() {
        let b = crop_box((2400, 1254), (1200, 627));
        assert_eq!((b.x, b.y), (0, 0));
        assert_eq!((b.width, b.height), (2400, 1254));
    }

    #[test]
    fn crop_never_exceeds_source_bounds() {
        for &(sw, sh) in &[(1u32, 1u32), (3, 7), (640, 480), (1081, 1919), (5000, 33)] {
            for spec in &crate::render::platform::PLATFORM_SPECS {
                let b = crop_box((sw, sh), (spec.width, spec.height));
                assert!(b.width >= 1 && b.height >= 1);
                assert!(b.x + b.width <= sw, "{sw}x{sh} -> {spec:?}: {b:?}");
                assert!(b.y + b.height <= sh, "{sw}x{sh} -> {spec:?}: {b:?}");
            }
        }
    }

    #[test]
    fn crop_offset_is_centered_within_one_pixel() {
        let b = crop_box((1001, 500), (500, 500));
        // Odd remainder: left offset may round down by one
        let excess = 1001 - b.width;
        assert!(b.x == excess / 2 || b.x == excess.div_ceil(2));
    }

    #[test]
    fn smaller_source_than_target_still_valid() {
        // Upscaling is the resampler's job; the crop only fixes the ratio
        let b = crop_box((100, 80), (1200, 627));
        assert_eq!(b.width, 100);
        assert_eq!(b.height, (100.0_f64 / (1200.0 / 627.0)).round() as u32);
    }

    // =========================================================================
    // text_origin tests
    // =========================================================================

    #[test]
    fn origin_is_horizontally_centered() {
        let placement = bottom_placement();
        let (x, _) = text_origin((1200, 627), (400, 80), &placement, &Padding::default());
        assert_eq!(x, (1200 - 400) / 2);
    }

    #[test]
    fn bottom_position_uses_vertical_fraction() {
        let placement = bottom_placement();
        let (_, y) = text_origin((1200, 627), (400, 80), &placement, &Padding::default());
        assert_eq!(y, (627.0 * 0.75) as i32);
    }

    #[test]
    fn top_position_uses_vertical_padding() {
        let placement = Placement {
            position: Position::Top,
            ..Placement::default()
        };
        let padding = Padding {
            horizontal: 50,
            vertical: 40,
        };
        let (_, y) = text_origin((1080, 1920), (500, 100), &placement, &padding);
        assert_eq!(y, 40);
    }

    #[test]
    fn center_position_accounts_for_text_height() {
        let placement = Placement {
            position: Position::Center,
            ..Placement::default()
        };
        let (_, y) = text_origin((1080, 1350), (500, 150), &placement, &Padding::default());
        assert_eq!(y, (1350 - 150) / 2);
    }

    // =========================================================================
    // scrim_box tests
    // =========================================================================

    #[test]
    fn scrim_expands_text_box_by_fixed_margin() {
        let r = scrim_box((100, 200), (400, 80));
        assert_eq!(r, Rect {
            x0: 80,
            y0: 180,
            x1: 520,
            y1: 300,
        });
    }

    #[test]
    fn scrim_may_extend_past_image_edges() {
        // Clipping happens at draw time, not here
        let r = scrim_box((5, 5), (400, 80));
        assert!(r.x0 < 0 && r.y0 < 0);
    }
}
