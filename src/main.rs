use adsmith::brief::Tone;
use adsmith::config;
use adsmith::copygen::OpenAiCopywriter;
use adsmith::pipeline;
use adsmith::publish::Credentials;
use adsmith::storage::{CampaignRecord, CampaignStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shared flags for commands that start a campaign.
#[derive(clap::Args, Clone)]
struct BriefArgs {
    /// Product name
    #[arg(long)]
    product: String,

    /// Product feature (repeat at least 3 times)
    #[arg(long = "feature")]
    features: Vec<String>,

    /// Brand tone
    #[arg(long, value_enum, default_value_t = Tone::Professional)]
    tone: Tone,

    /// Source product image
    #[arg(long)]
    image: PathBuf,
}

/// Shared flags for commands that render creatives.
#[derive(clap::Args, Clone)]
struct SelectionArgs {
    /// Which headline option to overlay (0-based)
    #[arg(long, default_value_t = 0)]
    headline: usize,

    /// Which caption option to use (0-based)
    #[arg(long, default_value_t = 0)]
    caption: usize,
}

#[derive(Parser)]
#[command(name = "adsmith")]
#[command(about = "Marketing creative pipeline: copy, platform-sized image variants, publishing")]
#[command(long_about = "\
Marketing creative pipeline

Takes one product photo plus a short feature list and produces a complete
social campaign: headline and caption options, the photo recomposed into
four platform-sized creatives with the headline overlaid, and simulated
publishing to LinkedIn, Facebook, and Instagram.

Stages (each persisted under the storage directory):

  copy       brief validation + headline/caption generation   → copy_generated
  creatives  center-crop, resize, text overlay per platform   → creatives_ready
  publish    post the creatives (demo mode)                   → published

Copywriting uses an OpenAI-compatible API when OPENAI_API_KEY is set and
falls back to deterministic template copy when it is not. Publishing is
simulated either way; platform credentials only change the reported result.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "adsmith.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a campaign and generate headline/caption options
    Copy(BriefArgs),
    /// Render the platform creatives for a campaign
    Creatives {
        campaign_id: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Publish a campaign's creatives
    Publish {
        campaign_id: String,
        /// Target platform (repeatable; defaults to linkedin + facebook)
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Run the full pipeline: copy → creatives → publish
    Run {
        #[command(flatten)]
        brief: BriefArgs,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Target platform (repeatable; defaults to linkedin + facebook)
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// List stored campaigns
    Campaigns,
    /// Show one campaign in full
    Show { campaign_id: String },
    /// Delete a campaign record
    Delete { campaign_id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("adsmith=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings(&cli.config)?;
    let store = CampaignStore::open(&settings.storage_dir)?;

    match cli.command {
        Command::Copy(brief) => {
            let provider = OpenAiCopywriter::from_env(settings.copy.model.clone());
            let record = pipeline::start_campaign(
                &store,
                &provider,
                &brief.product,
                &brief.features,
                brief.tone,
                &brief.image,
            )?;
            print_copy(&record);
        }
        Command::Creatives {
            campaign_id,
            selection,
        } => {
            let record = pipeline::build_creatives(
                &store,
                &campaign_id,
                selection.headline,
                selection.caption,
                &settings.output_dir,
            )?;
            print_creatives(&record);
        }
        Command::Publish {
            campaign_id,
            platforms,
        } => {
            let record = pipeline::publish_campaign(
                &store,
                &Credentials::from_env(),
                &campaign_id,
                &platforms,
            )?;
            print_publish(&record);
        }
        Command::Run {
            brief,
            selection,
            platforms,
        } => {
            let provider = OpenAiCopywriter::from_env(settings.copy.model.clone());

            println!("==> Stage 1: Generating copy for {}", brief.product);
            let record = pipeline::start_campaign(
                &store,
                &provider,
                &brief.product,
                &brief.features,
                brief.tone,
                &brief.image,
            )?;
            print_copy(&record);

            println!("==> Stage 2: Rendering creatives");
            let record = pipeline::build_creatives(
                &store,
                &record.campaign_id,
                selection.headline,
                selection.caption,
                &settings.output_dir,
            )?;
            print_creatives(&record);

            println!("==> Stage 3: Publishing");
            let record = pipeline::publish_campaign(
                &store,
                &Credentials::from_env(),
                &record.campaign_id,
                &platforms,
            )?;
            print_publish(&record);

            println!("==> Campaign complete: {}", record.campaign_id);
        }
        Command::Campaigns => {
            let summaries = store.list()?;
            if summaries.is_empty() {
                println!("No campaigns stored");
            }
            for summary in summaries {
                println!(
                    "{}  {:15}  {} variant(s)  {}  [{}]",
                    summary.campaign_id,
                    summary.status.as_str(),
                    summary.variant_count,
                    summary.product_name,
                    summary.last_updated,
                );
            }
        }
        Command::Show { campaign_id } => {
            let record = store
                .load(&campaign_id)?
                .ok_or_else(|| format!("campaign not found: {campaign_id}"))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Delete { campaign_id } => {
            if store.delete(&campaign_id)? {
                println!("Deleted {campaign_id}");
            } else {
                println!("No such campaign: {campaign_id}");
            }
        }
    }

    Ok(())
}

fn print_copy(record: &CampaignRecord) {
    println!("Campaign {}", record.campaign_id);
    println!("Headlines:");
    for (i, headline) in record.copy.headlines.iter().enumerate() {
        println!("  [{i}] {headline}");
    }
    for (platform, options) in &record.copy.captions {
        println!("Captions ({platform}):");
        for (i, caption) in options.iter().enumerate() {
            println!("  [{i}] {caption}");
        }
    }
}

fn print_creatives(record: &CampaignRecord) {
    if let Some(headline) = &record.headline {
        println!("Headline: {headline}");
    }
    for variant in &record.variants {
        println!(
            "  {:20} {:9} {}  {}",
            variant.platform, variant.size, variant.format, variant.image_url,
        );
    }
}

fn print_publish(record: &CampaignRecord) {
    for outcome in &record.publish_results {
        let mark = if outcome.success { "ok" } else { "--" };
        match &outcome.post_url {
            Some(url) => println!("  [{mark}] {}: {} ({url})", outcome.platform, outcome.message),
            None => println!("  [{mark}] {}: {}", outcome.platform, outcome.message),
        }
    }
}
