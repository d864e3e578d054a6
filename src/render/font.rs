//! Font resolution with a process-wide cache.
//!
//! TrueType data is size-independent (the scale is applied at layout time),
//! so the cache is keyed by family only. Lookups that fail are cached too —
//! a missing font is probed once per process, not once per variant.
//!
//! Resolution order: the `ADSMITH_FONT` environment variable, then a list of
//! well-known system font paths. When nothing resolves, rendering degrades to
//! the built-in 8x8 bitmap glyphs instead of failing; headline text stays
//! readable, just not pretty.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use rusttype::Font;

/// Well-known bold sans-serif locations, probed in order.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A font ready to measure and draw at a fixed pixel size.
#[derive(Clone)]
pub enum LoadedFont {
    Truetype { font: Arc<Font<'static>>, size: f32 },
    /// 8x8 bitmap glyphs scaled to an integer multiple.
    Bitmap { scale: u32 },
}

static FONT_CACHE: LazyLock<RwLock<HashMap<String, Option<Arc<Font<'static>>>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Load a font for the given family and pixel size. Never fails.
pub fn load(family: &str, size: u32) -> LoadedFont {
    match resolve_family(family) {
        Some(font) => LoadedFont::Truetype {
            font,
            size: size as f32,
        },
        None => LoadedFont::Bitmap {
            scale: bitmap_scale(size),
        },
    }
}

/// Integer bitmap scale approximating the requested pixel size.
pub(crate) fn bitmap_scale(size: u32) -> u32 {
    ((size as f64 / 8.0).round() as u32).max(1)
}

fn resolve_family(family: &str) -> Option<Arc<Font<'static>>> {
    if let Some(cached) = FONT_CACHE.read().unwrap_or_else(|e| e.into_inner()).get(family) {
        return cached.clone();
    }

    let loaded = probe_paths();
    if loaded.is_none() {
        tracing::warn!(family, "no TrueType font found, degrading to bitmap glyphs");
    }

    FONT_CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(family.to_string(), loaded.clone());
    loaded
}

fn probe_paths() -> Option<Arc<Font<'static>>> {
    let override_path = std::env::var("ADSMITH_FONT").ok();
    let candidates = override_path
        .as_deref()
        .into_iter()
        .chain(FONT_CANDIDATES.iter().copied());

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                return Some(Arc::new(font));
            }
        }
    }
    None
}
