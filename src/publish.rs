//! Simulated publishing to social platforms.
//!
//! Every outcome here is demo-mode: credentials are read from the
//! environment and their presence changes the reported message and URL, but
//! no network call is made. The seam is [`publish`], which selects the right
//! creative per platform and never fails the batch because one platform has
//! no credentials or no matching variant.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::render::Variant;

/// Platforms published to when the caller does not pick any.
pub const DEFAULT_PLATFORMS: [&str; 2] = ["linkedin", "facebook"];

/// Result of one platform publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub platform: String,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    pub demo_mode: bool,
}

impl PublishOutcome {
    fn missing_creative(platform: &str) -> Self {
        PublishOutcome {
            platform: platform.to_string(),
            success: false,
            message: format!("No {platform} creative found"),
            post_url: None,
            posted_at: None,
            demo_mode: true,
        }
    }

    fn missing_credentials(platform: &str, message: &str, simulated_url: String) -> Self {
        PublishOutcome {
            platform: platform.to_string(),
            success: false,
            message: message.to_string(),
            post_url: Some(simulated_url),
            posted_at: None,
            demo_mode: true,
        }
    }

    fn posted(platform: &str, display: &str, post_url: String) -> Self {
        PublishOutcome {
            platform: platform.to_string(),
            success: true,
            message: format!("Successfully posted to {display} (Demo Mode)"),
            post_url: Some(post_url),
            posted_at: Some(Utc::now().to_rfc3339()),
            demo_mode: true,
        }
    }
}

/// Social API credentials read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub linkedin_token: Option<String>,
    pub facebook_token: Option<String>,
    pub facebook_page_id: Option<String>,
    pub instagram_user_id: Option<String>,
    pub instagram_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Credentials {
            linkedin_token: var("LINKEDIN_ACCESS_TOKEN"),
            facebook_token: var("FACEBOOK_ACCESS_TOKEN"),
            facebook_page_id: var("FACEBOOK_PAGE_ID"),
            instagram_user_id: var("INSTAGRAM_USER_ID"),
            instagram_token: var("INSTAGRAM_ACCESS_TOKEN"),
        }
    }
}

/// Publish creatives to the named platforms, defaulting to LinkedIn and
/// Facebook. Unknown platform names are skipped with a warning; every known
/// platform always yields an outcome.
pub fn publish(
    credentials: &Credentials,
    campaign_id: &str,
    variants: &[Variant],
    platforms: &[String],
) -> Vec<PublishOutcome> {
    let defaults: Vec<String> = DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect();
    let platforms = if platforms.is_empty() {
        &defaults[..]
    } else {
        platforms
    };

    platforms
        .iter()
        .filter_map(|platform| match platform.to_lowercase().as_str() {
            "linkedin" => Some(publish_linkedin(credentials, campaign_id, variants)),
            "facebook" => Some(publish_facebook(credentials, campaign_id, variants)),
            "instagram" => Some(publish_instagram(credentials, campaign_id, variants)),
            other => {
                tracing::warn!(platform = other, "unknown platform, skipping");
                None
            }
        })
        .collect()
}

fn publish_linkedin(
    credentials: &Credentials,
    campaign_id: &str,
    variants: &[Variant],
) -> PublishOutcome {
    let Some(_creative) = variants.iter().find(|v| v.platform.contains("LinkedIn")) else {
        return PublishOutcome::missing_creative("linkedin");
    };

    let url = format!("https://linkedin.com/feed/update/urn:li:share:{campaign_id}");
    if credentials.linkedin_token.is_none() {
        return PublishOutcome::missing_credentials(
            "linkedin",
            "LinkedIn API token not configured. Set LINKEDIN_ACCESS_TOKEN environment variable.",
            url,
        );
    }

    PublishOutcome::posted("linkedin", "LinkedIn", url)
}

fn publish_facebook(
    credentials: &Credentials,
    campaign_id: &str,
    variants: &[Variant],
) -> PublishOutcome {
    let Some(_creative) = variants.iter().find(|v| v.platform == "Facebook") else {
        return PublishOutcome::missing_creative("facebook");
    };

    if credentials.facebook_token.is_none() || credentials.facebook_page_id.is_none() {
        let page = credentials.facebook_page_id.as_deref().unwrap_or("page");
        return PublishOutcome::missing_credentials(
            "facebook",
            "Facebook API credentials not configured. Set FACEBOOK_ACCESS_TOKEN and FACEBOOK_PAGE_ID.",
            format!("https://facebook.com/{page}/posts/{campaign_id}"),
        );
    }

    PublishOutcome::posted(
        "facebook",
        "Facebook",
        format!("https://facebook.com/{campaign_id}"),
    )
}

fn publish_instagram(
    credentials: &Credentials,
    campaign_id: &str,
    variants: &[Variant],
) -> PublishOutcome {
    // Feed posts want the portrait rendition, not the story
    let Some(_creative) = variants
        .iter()
        .find(|v| v.platform.contains("Instagram") && v.format == "Portrait")
    else {
        return PublishOutcome::missing_creative("instagram");
    };

    let url = format!("https://instagram.com/p/{campaign_id}");
    if credentials.instagram_token.is_none() || credentials.instagram_user_id.is_none() {
        return PublishOutcome::missing_credentials(
            "instagram",
            "Instagram API credentials not configured. Set INSTAGRAM_ACCESS_TOKEN and INSTAGRAM_USER_ID.",
            url,
        );
    }

    PublishOutcome::posted("instagram", "Instagram", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(platform: &str, format: &str, key: &str) -> Variant {
        Variant {
            platform: platform.to_string(),
            format: format.to_string(),
            size: "100x100".to_string(),
            image_url: format!("/outputs/c1/{key}.jpg"),
            caption: "caption".to_string(),
            variant_key: key.to_string(),
        }
    }

    fn all_variants() -> Vec<Variant> {
        vec![
            variant("LinkedIn", "Landscape", "linkedin_landscape"),
            variant("Instagram", "Portrait", "instagram_portrait"),
            variant("Instagram Story", "Story", "instagram_story"),
            variant("Facebook", "Landscape", "facebook_landscape"),
        ]
    }

    #[test]
    fn defaults_to_linkedin_and_facebook() {
        let outcomes = publish(&Credentials::default(), "c1", &all_variants(), &[]);
        let platforms: Vec<&str> = outcomes.iter().map(|o| o.platform.as_str()).collect();
        assert_eq!(platforms, vec!["linkedin", "facebook"]);
    }

    #[test]
    fn missing_credentials_simulate_a_url_without_success() {
        let outcomes = publish(
            &Credentials::default(),
            "c1",
            &all_variants(),
            &["linkedin".to_string()],
        );

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].success);
        assert!(outcomes[0].demo_mode);
        assert_eq!(
            outcomes[0].post_url.as_deref(),
            Some("https://linkedin.com/feed/update/urn:li:share:c1")
        );
        assert!(outcomes[0].posted_at.is_none());
    }

    #[test]
    fn configured_credentials_report_demo_success() {
        let credentials = Credentials {
            linkedin_token: Some("token".to_string()),
            ..Credentials::default()
        };
        let outcomes = publish(&credentials, "c1", &all_variants(), &["linkedin".to_string()]);

        assert!(outcomes[0].success);
        assert!(outcomes[0].demo_mode);
        assert!(outcomes[0].posted_at.is_some());
    }

    #[test]
    fn instagram_requires_the_portrait_variant() {
        let credentials = Credentials {
            instagram_token: Some("token".to_string()),
            instagram_user_id: Some("user".to_string()),
            ..Credentials::default()
        };
        let story_only = vec![variant("Instagram Story", "Story", "instagram_story")];
        let outcomes = publish(&credentials, "c1", &story_only, &["instagram".to_string()]);

        assert!(!outcomes[0].success);
        assert_eq!(outcomes[0].message, "No instagram creative found");
    }

    #[test]
    fn missing_creative_beats_missing_credentials() {
        let outcomes = publish(&Credentials::default(), "c1", &[], &["facebook".to_string()]);
        assert_eq!(outcomes[0].message, "No facebook creative found");
        assert!(outcomes[0].post_url.is_none());
    }

    #[test]
    fn unknown_platforms_are_skipped() {
        let outcomes = publish(
            &Credentials::default(),
            "c1",
            &all_variants(),
            &["myspace".to_string(), "facebook".to_string()],
        );
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].platform, "facebook");
    }
}
