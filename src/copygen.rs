//! Headline and caption generation.
//!
//! [`CopyProvider`] is the seam to the text-generation service. The shipped
//! implementation talks to an OpenAI-compatible chat-completions endpoint
//! with a blocking client; the pipeline never depends on it succeeding.
//! [`generate_copy`] wraps any provider with the fallback policy: a failed or
//! malformed response for one section is replaced by deterministic template
//! copy built from the brief, and the rest of the deck still generates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::brief::Brief;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// How many options each section carries.
const HEADLINE_COUNT: usize = 3;
const CAPTION_COUNT: usize = 2;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response was not a JSON string array: {0}")]
    MalformedResponse(String),
    #[error("response contained no choices")]
    EmptyResponse,
}

/// Generated copy options for one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyDeck {
    /// Exactly three headline options for the image overlay.
    pub headlines: Vec<String>,
    /// Platform key → two caption options.
    pub captions: BTreeMap<String, Vec<String>>,
}

/// A text-generation service that can write marketing copy from a brief.
pub trait CopyProvider {
    /// Up to three short overlay headlines.
    fn headlines(&self, brief: &Brief) -> Result<Vec<String>, CopyError>;
    /// Up to two captions for the given platform key.
    fn captions(&self, brief: &Brief, platform: &str) -> Result<Vec<String>, CopyError>;
}

/// Generate the full deck, substituting deterministic fallback copy wherever
/// the provider fails. Never errors.
pub fn generate_copy(provider: &dyn CopyProvider, brief: &Brief) -> CopyDeck {
    let mut headlines = match provider.headlines(brief) {
        Ok(lines) if !lines.is_empty() => lines,
        Ok(_) => fallback_headlines(brief),
        Err(e) => {
            tracing::warn!(error = %e, "headline generation failed, using fallback copy");
            fallback_headlines(brief)
        }
    };
    headlines.truncate(HEADLINE_COUNT);

    let captions = brief
        .platforms
        .keys()
        .map(|platform| {
            let mut options = match provider.captions(brief, platform) {
                Ok(lines) if !lines.is_empty() => lines,
                Ok(_) => fallback_captions(brief),
                Err(e) => {
                    tracing::warn!(platform, error = %e, "caption generation failed, using fallback copy");
                    fallback_captions(brief)
                }
            };
            options.truncate(CAPTION_COUNT);
            (platform.clone(), options)
        })
        .collect();

    CopyDeck {
        headlines,
        captions,
    }
}

/// Deterministic headlines used when the provider is unavailable.
pub fn fallback_headlines(brief: &Brief) -> Vec<String> {
    let name = &brief.product.name;
    vec![
        format!("Discover {name}"),
        format!("Experience {name}"),
        format!("{name} - Redefined"),
    ]
}

/// Deterministic captions built from the first two features.
pub fn fallback_captions(brief: &Brief) -> Vec<String> {
    let name = &brief.product.name;
    let tag = name.replace(' ', "");
    let features = &brief.product.features;
    let first = features.first().map(String::as_str).unwrap_or_default();
    let second = features.get(1).map(String::as_str).unwrap_or(first);
    vec![
        format!("Introducing {name}! {first}. Learn more today. #{tag} #Innovation"),
        format!("Transform your experience with {name}. {second}. Get yours now! #{tag} #Quality"),
    ]
}

/// Copywriter backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiCopywriter {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiCopywriter {
    /// Build from the environment: `OPENAI_API_KEY`, optional
    /// `OPENAI_BASE_URL`. A missing key is not an error until a request is
    /// attempted — the fallback policy handles it.
    pub fn from_env(model: Option<String>) -> Self {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty() && k != "sk-your-openai-api-key-here");
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
        }
    }

    fn complete(&self, system: &str, prompt: &str, max_tokens: u32) -> Result<Vec<String>, CopyError> {
        let key = self.api_key.as_ref().ok_or(CopyError::MissingApiKey)?;

        #[derive(Deserialize)]
        struct Completion {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }
        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: String,
        }

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.8,
            "max_tokens": max_tokens,
        });

        let response: Completion = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(CopyError::EmptyResponse)?;

        parse_string_array(&content)
    }
}

impl CopyProvider for OpenAiCopywriter {
    fn headlines(&self, brief: &Brief) -> Result<Vec<String>, CopyError> {
        let voice = &brief.brand.voice_attributes;
        let prompt = format!(
            "You are an expert marketing copywriter. Generate {HEADLINE_COUNT} short, impactful \
             headlines for a product image overlay.\n\n\
             Product: {}\n\
             Key Features: {}\n\
             Brand Tone: {:?} - {}\n\n\
             Requirements:\n\
             - Each headline must be 3-8 words maximum\n\
             - Should be punchy and memorable\n\
             - Suitable for overlay on product image\n\
             - Avoid: {}\n\n\
             Return ONLY a JSON array of {HEADLINE_COUNT} headlines, nothing else.",
            brief.product.name,
            brief.product.features.join(", "),
            brief.brand.tone,
            voice.style,
            voice.avoid.join(", "),
        );
        self.complete(
            "You are an expert marketing copywriter. Always return valid JSON.",
            &prompt,
            200,
        )
    }

    fn captions(&self, brief: &Brief, platform: &str) -> Result<Vec<String>, CopyError> {
        let constraints = brief.platforms.get(platform);
        let (format, max_len, hashtags) = constraints
            .map(|p| (p.format.as_str(), p.max_caption_length, p.hashtag_count.as_str()))
            .unwrap_or(("engaging", 2200, "2-3"));
        let prompt = format!(
            "You are an expert {platform} marketing specialist. Generate {CAPTION_COUNT} engaging \
             captions for this product.\n\n\
             Product: {}\n\
             Key Features: {}\n\
             Brand Tone: {:?}\n\
             Format: {format}\n\
             Max Length: {max_len} characters\n\
             Hashtags: Include {hashtags} relevant hashtags\n\n\
             Requirements:\n\
             - Include call-to-action\n\
             - Keep under max length\n\n\
             Return ONLY a JSON array of {CAPTION_COUNT} captions, nothing else.",
            brief.product.name,
            brief.product.features.join(", "),
            brief.brand.tone,
        );
        self.complete(
            &format!("You are an expert {platform} marketing specialist. Always return valid JSON."),
            &prompt,
            500,
        )
    }
}

/// Parse a JSON string array out of a model response, tolerating markdown
/// code fences around it.
fn parse_string_array(content: &str) -> Result<Vec<String>, CopyError> {
    let stripped = strip_code_fences(content);
    serde_json::from_str::<Vec<String>>(stripped)
        .map_err(|_| CopyError::MalformedResponse(truncated(content)))
}

/// Remove a surrounding ```/```json fence if present.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn truncated(content: &str) -> String {
    content.chars().take(120).collect()
}
