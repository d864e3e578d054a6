//! Per-platform variant generation with failure isolation.
//!
//! The four platform renditions are independent: each starts from a fresh
//! crop of the shared read-only source, writes to its own output path, and
//! fails alone. A bad variant is logged and skipped — the batch returns
//! whatever subset succeeded, possibly empty, and never errors. Rendering
//! fans out over rayon since inputs are shared immutably and output paths
//! are disjoint.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::compositor::{composite, fit};
use super::platform::{caption_key, PlatformSpec, PLATFORM_SPECS};
use crate::layout::rules::LayoutRules;

/// JPEG quality for published creatives.
const JPEG_QUALITY: u8 = 95;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// One rendered platform creative plus its metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub platform: String,
    pub format: String,
    /// `"WxH"` of the rendered image.
    pub size: String,
    pub image_url: String,
    pub caption: String,
    pub variant_key: String,
}

/// Render all platform variants for one campaign.
///
/// Output files land at `{output_root}/{campaign_id}/{variant_key}.jpg`.
/// Captions are bound through the variant→caption key table. Partial success
/// is the steady state: per-variant failures (unwritable output, encode
/// error) are logged and skipped. An unreadable source image fails every
/// variant and yields an empty list — still not an error here; whether an
/// empty batch is fatal is the caller's policy.
pub fn create_variants(
    campaign_id: &str,
    image_path: &Path,
    headline: &str,
    captions: &BTreeMap<String, String>,
    rules: &LayoutRules,
    output_root: &Path,
) -> Vec<Variant> {
    let source = match image::open(image_path) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!(path = %image_path.display(), error = %e, "cannot open source image, no variants rendered");
            return Vec::new();
        }
    };

    let campaign_dir = output_root.join(campaign_id);
    if let Err(e) = std::fs::create_dir_all(&campaign_dir) {
        tracing::warn!(dir = %campaign_dir.display(), error = %e, "cannot create output directory");
    }

    PLATFORM_SPECS
        .par_iter()
        .filter_map(|spec| {
            match render_variant(&source, spec, headline, rules, &campaign_dir) {
                Ok(path) => {
                    let caption = captions
                        .get(caption_key(spec.key))
                        .cloned()
                        .unwrap_or_default();
                    Some(Variant {
                        platform: spec.platform.to_string(),
                        format: spec.format.to_string(),
                        size: spec.size_label(),
                        image_url: path.display().to_string(),
                        caption,
                        variant_key: spec.key.to_string(),
                    })
                }
                Err(e) => {
                    tracing::warn!(variant = spec.key, error = %e, "variant failed, skipping");
                    None
                }
            }
        })
        .collect()
}

/// Crop, composite, and encode one variant. Returns the written path.
fn render_variant(
    source: &DynamicImage,
    spec: &PlatformSpec,
    headline: &str,
    rules: &LayoutRules,
    campaign_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let mut canvas = fit(source, spec.width, spec.height);
    composite(&mut canvas, headline, rules, spec.key);

    let output = campaign_dir.join(format!("{}.jpg", spec.key));
    let write_result = (|| -> Result<(), RenderError> {
        let file = File::create(&output)?;
        let writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .write_with_encoder(encoder)?;
        Ok(())
    })();

    if let Err(e) = write_result {
        // A half-written file is not a creative
        let _ = std::fs::remove_file(&output);
        return Err(e);
    }

    Ok(output)
}
