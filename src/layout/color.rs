//! Color resolution strategies.
//!
//! The same seam as placement: [`ColorStrategy`] exists so a palette sampled
//! from the placement region can be substituted later. [`HighContrast`]
//! ignores the image entirely and returns the fixed white-on-black palette,
//! which stays legible on any photograph.

use super::rules::{Color, ColorSet, Placement};

/// Resolves the overlay palette for one headline.
///
/// Must never fail: an unreadable image (`dimensions == None`) still gets a
/// palette.
pub trait ColorStrategy {
    fn resolve(&self, dimensions: Option<(u32, u32)>, placement: &Placement) -> ColorSet;
}

/// The fixed high-contrast palette: white text over a semi-transparent black
/// scrim, black outline, half-transparent black shadow.
pub struct HighContrast;

impl ColorStrategy for HighContrast {
    fn resolve(&self, _dimensions: Option<(u32, u32)>, _placement: &Placement) -> ColorSet {
        ColorSet {
            text_color: Color::rgb(255, 255, 255),
            background_color: Color::rgba(0, 0, 0, 180),
            outline_color: Color::rgb(0, 0, 0),
            shadow_color: Color::rgba(0, 0, 0, 128),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_constant_and_never_fails() {
        let with_image = HighContrast.resolve(Some((1080, 1350)), &Placement::default());
        let without = HighContrast.resolve(None, &Placement::default());
        assert_eq!(with_image, without);
        assert_eq!(with_image.text_color, Color::rgb(255, 255, 255));
        assert_eq!(with_image.background_color.a, 180);
        assert_eq!(with_image.shadow_color.a, 128);
        assert_eq!(with_image.outline_color.a, 255);
    }
}
