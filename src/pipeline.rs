//! Campaign pipeline orchestration.
//!
//! Three stages, each persisting its result before returning:
//!
//! 1. [`start_campaign`] — validate input into a brief, generate the copy
//!    deck, store the record as `copy_generated`.
//! 2. [`build_creatives`] — pick a headline and caption option, design the
//!    layout from the brand tone, render all platform variants, advance to
//!    `creatives_ready`.
//! 3. [`publish_campaign`] — push the creatives to the selected platforms
//!    and advance to `published`.
//!
//! Stages are re-runnable: rebuilding creatives replaces the previous
//! variants, republishing replaces the previous outcomes.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

use crate::brief::{create_brief, BriefError, Tone};
use crate::copygen::{generate_copy, CopyProvider};
use crate::layout::design_layout;
use crate::publish::{publish, Credentials};
use crate::render::create_variants;
use crate::storage::{CampaignRecord, CampaignStatus, CampaignStore, StorageError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Brief(#[from] BriefError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("campaign not found: {0}")]
    CampaignNotFound(String),
    #[error("headline index {index} out of range ({count} options)")]
    HeadlineOutOfRange { index: usize, count: usize },
    #[error("no creatives could be rendered from {0}")]
    NoCreatives(String),
    #[error("campaign {0} has no creatives to publish")]
    NothingToPublish(String),
}

/// Validate input, generate copy, persist a new campaign.
pub fn start_campaign(
    store: &CampaignStore,
    provider: &dyn CopyProvider,
    product_name: &str,
    features: &[String],
    tone: Tone,
    image_path: &Path,
) -> Result<CampaignRecord, PipelineError> {
    let campaign_id = Uuid::new_v4().to_string();
    let brief = create_brief(&campaign_id, product_name, features, tone, image_path)?;
    tracing::info!(%campaign_id, product = product_name, "campaign brief created");

    let copy = generate_copy(provider, &brief);
    let mut record = CampaignRecord::new(brief, copy);
    store.save(&mut record)?;
    tracing::info!(%campaign_id, headlines = record.copy.headlines.len(), "copy generated");
    Ok(record)
}

/// Render platform variants for a stored campaign.
///
/// `headline_index` and `caption_index` select among the copy options;
/// the headline index must be valid, the caption index clamps to the last
/// option so a deck with fewer captions than asked for still renders.
pub fn build_creatives(
    store: &CampaignStore,
    campaign_id: &str,
    headline_index: usize,
    caption_index: usize,
    output_root: &Path,
) -> Result<CampaignRecord, PipelineError> {
    let mut record = store
        .load(campaign_id)?
        .ok_or_else(|| PipelineError::CampaignNotFound(campaign_id.to_string()))?;

    let headline = record
        .copy
        .headlines
        .get(headline_index)
        .ok_or(PipelineError::HeadlineOutOfRange {
            index: headline_index,
            count: record.copy.headlines.len(),
        })?
        .clone();

    let captions: BTreeMap<String, String> = record
        .copy
        .captions
        .iter()
        .filter_map(|(platform, options)| {
            let pick = options.get(caption_index).or_else(|| options.last())?;
            Some((platform.clone(), pick.clone()))
        })
        .collect();

    let image_path = record.brief.product.image_path.clone();
    let rules = design_layout(record.brief.brand.tone, &image_path, &headline);
    let variants = create_variants(
        campaign_id,
        &image_path,
        &headline,
        &captions,
        &rules,
        output_root,
    );
    if variants.is_empty() {
        return Err(PipelineError::NoCreatives(image_path.display().to_string()));
    }
    tracing::info!(%campaign_id, count = variants.len(), "creatives rendered");

    record.headline = Some(headline);
    record.variants = variants;
    record.status = CampaignStatus::CreativesReady;
    store.save(&mut record)?;
    Ok(record)
}

/// Publish a campaign's creatives and record the outcomes.
pub fn publish_campaign(
    store: &CampaignStore,
    credentials: &Credentials,
    campaign_id: &str,
    platforms: &[String],
) -> Result<CampaignRecord, PipelineError> {
    let mut record = store
        .load(campaign_id)?
        .ok_or_else(|| PipelineError::CampaignNotFound(campaign_id.to_string()))?;

    if record.variants.is_empty() {
        return Err(PipelineError::NothingToPublish(campaign_id.to_string()));
    }

    let outcomes = publish(credentials, campaign_id, &record.variants, platforms);
    let published = outcomes.iter().filter(|o| o.success).count();
    tracing::info!(%campaign_id, attempted = outcomes.len(), published, "publish complete");

    record.publish_results = outcomes;
    record.status = CampaignStatus::Published;
    store.save(&mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copygen::CopyError;
    use crate::storage::CampaignStatus;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    struct NoProvider;
    impl CopyProvider for NoProvider {
        fn headlines(&self, _: &crate::brief::Brief) -> Result<Vec<String>, CopyError> {
            Err(CopyError::MissingApiKey)
        }
        fn captions(&self, _: &crate::brief::Brief, _: &str) -> Result<Vec<String>, CopyError> {
            Err(CopyError::MissingApiKey)
        }
    }

    fn features() -> Vec<String> {
        vec!["fast".to_string(), "light".to_string(), "durable".to_string()]
    }

    fn write_source(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("product.png");
        let img = RgbaImage::from_pixel(640, 480, Rgba([90, 120, 150, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn full_pipeline_advances_status() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(&dir.path().join("campaigns")).unwrap();
        let output_root = dir.path().join("outputs");
        let source = write_source(dir.path());

        let record =
            start_campaign(&store, &NoProvider, "Widget", &features(), Tone::Playful, &source)
                .unwrap();
        assert_eq!(record.status, CampaignStatus::CopyGenerated);
        assert_eq!(record.copy.headlines.len(), 3);

        let record =
            build_creatives(&store, &record.campaign_id, 0, 0, &output_root).unwrap();
        assert_eq!(record.status, CampaignStatus::CreativesReady);
        assert_eq!(record.headline.as_deref(), Some("Discover Widget"));
        assert_eq!(record.variants.len(), 4);

        let record = publish_campaign(
            &store,
            &Credentials::default(),
            &record.campaign_id,
            &[],
        )
        .unwrap();
        assert_eq!(record.status, CampaignStatus::Published);
        assert_eq!(record.publish_results.len(), 2);

        // each stage persisted
        let reloaded = store.load(&record.campaign_id).unwrap().unwrap();
        assert_eq!(reloaded.status, CampaignStatus::Published);
    }

    #[test]
    fn invalid_product_rejected_before_anything_is_stored() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(dir.path()).unwrap();

        let err = start_campaign(
            &store,
            &NoProvider,
            "",
            &features(),
            Tone::Professional,
            Path::new("photo.jpg"),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Brief(BriefError::MissingProductName)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn creatives_for_unknown_campaign_fail() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(dir.path()).unwrap();
        let err = build_creatives(&store, "ghost", 0, 0, dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::CampaignNotFound(_)));
    }

    #[test]
    fn headline_index_is_validated() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(&dir.path().join("campaigns")).unwrap();
        let source = write_source(dir.path());

        let record =
            start_campaign(&store, &NoProvider, "Widget", &features(), Tone::Minimal, &source)
                .unwrap();
        let err = build_creatives(&store, &record.campaign_id, 9, 0, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::HeadlineOutOfRange { index: 9, count: 3 }
        ));
    }

    #[test]
    fn caption_index_clamps_to_last_option() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(&dir.path().join("campaigns")).unwrap();
        let output_root = dir.path().join("outputs");
        let source = write_source(dir.path());

        let record =
            start_campaign(&store, &NoProvider, "Widget", &features(), Tone::Luxury, &source)
                .unwrap();
        let record =
            build_creatives(&store, &record.campaign_id, 0, 99, &output_root).unwrap();

        let expected_last = record.copy.captions["linkedin"].last().unwrap();
        let linkedin = record
            .variants
            .iter()
            .find(|v| v.variant_key == "linkedin_landscape")
            .unwrap();
        assert_eq!(&linkedin.caption, expected_last);
    }

    #[test]
    fn unreadable_source_fails_creatives_stage() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(&dir.path().join("campaigns")).unwrap();

        let record = start_campaign(
            &store,
            &NoProvider,
            "Widget",
            &features(),
            Tone::Premium,
            &dir.path().join("missing.png"),
        )
        .unwrap();
        let err = build_creatives(&store, &record.campaign_id, 0, 0, dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::NoCreatives(_)));

        // campaign stays at copy_generated
        let reloaded = store.load(&record.campaign_id).unwrap().unwrap();
        assert_eq!(reloaded.status, CampaignStatus::CopyGenerated);
    }

    #[test]
    fn publish_requires_creatives() {
        let dir = TempDir::new().unwrap();
        let store = CampaignStore::open(&dir.path().join("campaigns")).unwrap();
        let source = write_source(dir.path());

        let record =
            start_campaign(&store, &NoProvider, "Widget", &features(), Tone::Playful, &source)
                .unwrap();
        let err = publish_campaign(&store, &Credentials::default(), &record.campaign_id, &[])
            .unwrap_err();
        assert!(matches!(err, PipelineError::NothingToPublish(_)));
    }
}
