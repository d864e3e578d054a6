//! # Adsmith
//!
//! A marketing creative pipeline. One product photo plus a short feature list
//! becomes a complete social campaign: headline and caption options, the
//! photo recomposed into four platform-sized creatives with the headline
//! overlaid, and (simulated) publishing to LinkedIn, Facebook, and Instagram.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! A campaign moves through three independent stages, each persisting its
//! result as a JSON record the next stage consumes:
//!
//! ```text
//! 1. Copy       input     →  brief + copy deck    (copy_generated)
//! 2. Creatives  record    →  outputs/{id}/*.jpg   (creatives_ready)
//! 3. Publish    record    →  publish outcomes     (published)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Human review**: copy options are stored before any pixel is rendered,
//!   so a reviewer can pick the headline and caption between stages.
//! - **Re-runnability**: creatives can be rebuilt with a different headline,
//!   and publishing re-attempted, without regenerating copy.
//! - **Testability**: each stage is a function from record to record, so
//!   tests exercise the pipeline without a network in sight.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`brief`] | Input validation into a structured campaign brief: tone, voice, platform constraints |
//! | [`copygen`] | Headline/caption generation via an OpenAI-compatible API, with deterministic fallbacks |
//! | [`layout`] | Layout production rules: text placement, color scheme, tone-driven typography |
//! | [`render`] | Stage 2 proper — center-crop, Lanczos resize, text overlay compositing, JPEG output |
//! | [`publish`] | Simulated platform publishing driven by environment credentials |
//! | [`pipeline`] | Stage orchestration and status progression |
//! | [`storage`] | Flat-file campaign persistence, one JSON record per campaign |
//! | [`config`] | `adsmith.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## Degrading, Not Failing
//!
//! Each stage prefers a worse result over no result. Copy generation falls
//! back to template copy when the API is unreachable. Text rendering falls
//! back to built-in bitmap glyphs when no TrueType font resolves. Variant
//! rendering skips a platform that fails and keeps the rest. Only an
//! unreadable source image or invalid input stops a campaign.
//!
//! ## Pure-Rust Imaging (No ImageMagick, No System Libraries)
//!
//! The [`render`] module uses the `image` crate (Lanczos3 resampling, JPEG
//! encoding) and `rusttype` for glyph rasterization — all pure Rust. No
//! `apt install`, no version conflicts: the binary is self-contained and the
//! same pixels come out on any machine.
//!
//! ## Data-Driven Platform Catalog
//!
//! The four output sizes live in one table ([`render::PLATFORM_SPECS`]), and
//! caption binding is a second table keyed off it. Adding a platform is
//! adding a row; the orchestrator, caption lookup, and metadata assembly all
//! pick it up without a code branch.
//!
//! ## Flat-File Storage
//!
//! Campaigns persist as one JSON file each in a single directory. The
//! directory listing is the index, records are human-readable, and `rm` is
//! the delete operation of last resort. No database to install or migrate.

pub mod brief;
pub mod config;
pub mod copygen;
pub mod layout;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod storage;
