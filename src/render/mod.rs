//! The image-variant compositor: crop, overlay, and fan out per platform.
//!
//! | Piece | Role |
//! |---|---|
//! | [`platform`] | Fixed 4-entry platform catalog + caption key table |
//! | [`calculations`] | Pure geometry: crop box, text origin, scrim box |
//! | [`font`] | Process-wide font cache with bitmap fallback |
//! | [`draw`] | Alpha-blended glyph/rect primitives |
//! | [`compositor`] | `fit` (crop+resample) and `composite` (layered overlay) |
//! | [`variants`] | Per-platform orchestration with failure isolation |

pub mod calculations;
pub mod compositor;
pub mod draw;
pub mod font;
pub mod platform;
pub mod variants;

pub use compositor::{composite, fit};
pub use platform::{caption_key, PlatformSpec, PLATFORM_SPECS};
pub use variants::{create_variants, RenderError, Variant};
