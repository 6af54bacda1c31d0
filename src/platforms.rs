use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Placeholder token replaced with the url-encoded username.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// A probe target. Defined once at startup, read-only afterwards.
/// Catalog order decides report order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub key: String,
    pub name: String,
    pub url_template: String,
}

impl PlatformSpec {
    fn new(key: &str, name: &str, url_template: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            url_template: url_template.to_string(),
        }
    }

    /// Substitute an already url-encoded username into the template.
    pub fn profile_url(&self, encoded_username: &str) -> String {
        self.url_template.replace(USERNAME_PLACEHOLDER, encoded_username)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate platform key: {0}")]
    DuplicateKey(String),
    #[error("platform '{0}' template has no {{username}} placeholder")]
    MissingPlaceholder(String),
}

static BUILT_IN: Lazy<Vec<PlatformSpec>> = Lazy::new(|| {
    vec![
        PlatformSpec::new("twitter", "Twitter / X", "https://twitter.com/{username}"),
        PlatformSpec::new("instagram", "Instagram", "https://www.instagram.com/{username}/"),
        PlatformSpec::new("github", "GitHub", "https://github.com/{username}"),
        PlatformSpec::new("linkedin", "LinkedIn (public)", "https://www.linkedin.com/in/{username}"),
        PlatformSpec::new("facebook", "Facebook", "https://www.facebook.com/{username}"),
        PlatformSpec::new("reddit", "Reddit", "https://www.reddit.com/user/{username}"),
        PlatformSpec::new("youtube", "YouTube (channel)", "https://www.youtube.com/{username}"),
        PlatformSpec::new("medium", "Medium", "https://medium.com/@{username}"),
        PlatformSpec::new("pinterest", "Pinterest", "https://www.pinterest.com/{username}/"),
        PlatformSpec::new("tiktok", "TikTok (web profile)", "https://www.tiktok.com/@{username}"),
        PlatformSpec::new("stack_overflow", "StackOverflow", "https://stackoverflow.com/users/{username}"),
        PlatformSpec::new("snapchat", "Snapchat (public)", "https://www.snapchat.com/add/{username}"),
    ]
});

pub fn built_in() -> &'static [PlatformSpec] {
    &BUILT_IN
}

/// Assemble the probe catalog: built-ins plus config extras, minus
/// disabled keys. Key uniqueness and template placeholders are checked
/// here, before any probe is dispatched.
pub fn assemble(config: &Config) -> Result<Vec<PlatformSpec>, CatalogError> {
    let mut catalog: Vec<PlatformSpec> = built_in().to_vec();
    catalog.extend(config.extra_platforms.iter().cloned());

    for key in &config.disabled {
        if !catalog.iter().any(|spec| &spec.key == key) {
            log::warn!("disabled key '{key}' matches no platform");
        }
    }
    catalog.retain(|spec| !config.disabled.contains(&spec.key));

    let mut seen = HashSet::new();
    for spec in &catalog {
        if !seen.insert(spec.key.as_str()) {
            return Err(CatalogError::DuplicateKey(spec.key.clone()));
        }
        if !spec.url_template.contains(USERNAME_PLACEHOLDER) {
            return Err(CatalogError::MissingPlaceholder(spec.key.clone()));
        }
    }

    Ok(catalog)
}
