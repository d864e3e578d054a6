//! Campaign persistence.
//!
//! Campaigns live as flat JSON files, one per campaign, in a single
//! directory: `{root}/{campaign_id}.json`. No database, no index file — the
//! directory listing is the index. Every save stamps `last_updated`, and
//! listing sorts by that stamp so the most recently touched campaign comes
//! first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::brief::Brief;
use crate::copygen::CopyDeck;
use crate::publish::PublishOutcome;
use crate::render::Variant;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("campaign record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a campaign sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    CopyGenerated,
    CreativesReady,
    Published,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::CopyGenerated => "copy_generated",
            CampaignStatus::CreativesReady => "creatives_ready",
            CampaignStatus::Published => "published",
        }
    }
}

/// Everything known about one campaign. Grows as stages complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_id: String,
    pub status: CampaignStatus,
    pub brief: Brief,
    pub copy: CopyDeck,
    /// Headline chosen for the image overlay, set once creatives exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub publish_results: Vec<PublishOutcome>,
    pub created_at: String,
    pub last_updated: String,
}

impl CampaignRecord {
    pub fn new(brief: Brief, copy: CopyDeck) -> Self {
        let now = Utc::now().to_rfc3339();
        CampaignRecord {
            campaign_id: brief.campaign_id.clone(),
            status: CampaignStatus::CopyGenerated,
            brief,
            copy,
            headline: None,
            variants: Vec::new(),
            publish_results: Vec::new(),
            created_at: now.clone(),
            last_updated: now,
        }
    }
}

/// One row in a campaign listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub status: CampaignStatus,
    pub product_name: String,
    pub variant_count: usize,
    pub last_updated: String,
}

/// File-backed campaign store.
#[derive(Debug, Clone)]
pub struct CampaignStore {
    root: PathBuf,
}

impl CampaignStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(root)?;
        Ok(CampaignStore {
            root: root.to_path_buf(),
        })
    }

    fn record_path(&self, campaign_id: &str) -> PathBuf {
        self.root.join(format!("{campaign_id}.json"))
    }

    /// Persist a record, stamping `last_updated` first.
    pub fn save(&self, record: &mut CampaignRecord) -> Result<(), StorageError> {
        record.last_updated = Utc::now().to_rfc3339();
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(&record.campaign_id), json)?;
        tracing::debug!(campaign_id = %record.campaign_id, status = record.status.as_str(), "campaign saved");
        Ok(())
    }

    /// Load a record. `Ok(None)` when the campaign does not exist.
    pub fn load(&self, campaign_id: &str) -> Result<Option<CampaignRecord>, StorageError> {
        let path = self.record_path(campaign_id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Summaries of every stored campaign, most recently updated first.
    /// Files that fail to parse are skipped with a warning rather than
    /// poisoning the whole listing.
    pub fn list(&self) -> Result<Vec<CampaignSummary>, StorageError> {
        let mut summaries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let record: CampaignRecord = match fs::read_to_string(&path)
                .map_err(StorageError::from)
                .and_then(|json| serde_json::from_str(&json).map_err(StorageError::from))
            {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable campaign file");
                    continue;
                }
            };
            summaries.push(CampaignSummary {
                campaign_id: record.campaign_id,
                status: record.status,
                product_name: record.brief.product.name,
                variant_count: record.variants.len(),
                last_updated: record.last_updated,
            });
        }
        // RFC 3339 sorts lexicographically
        summaries.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(summaries)
    }

    /// Change a campaign's status in place. `Ok(None)` when it does not
    /// exist.
    pub fn update_status(
        &self,
        campaign_id: &str,
        status: CampaignStatus,
    ) -> Result<Option<CampaignRecord>, StorageError> {
        let Some(mut record) = self.load(campaign_id)? else {
            return Ok(None);
        };
        record.status = status;
        self.save(&mut record)?;
        Ok(Some(record))
    }

    /// Delete a campaign. Returns whether it existed.
    pub fn delete(&self, campaign_id: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.record_path(campaign_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
