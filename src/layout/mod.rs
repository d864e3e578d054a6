//! Layout-rule production — one [`LayoutRules`](rules::LayoutRules) bundle
//! per chosen headline.
//!
//! The module is split into:
//! - **Rules**: the value object itself plus [`rules::design_layout`]
//! - **Placement**: [`placement::PlacementStrategy`] seam + bottom-third default
//! - **Color**: [`color::ColorStrategy`] seam + fixed high-contrast palette
//! - **Typography**: tone style table + headline-length size planner

pub mod color;
pub mod placement;
pub mod rules;
pub mod typography;

pub use rules::{design_layout, LayoutRules};
