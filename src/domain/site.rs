//! Request body parsing and site validation.

use std::collections::BTreeMap;

use url::Url;

use crate::domain::AppError;

pub const SITE_TITLE: &str = "SITE_TITLE";
pub const SITE_URL: &str = "SITE_URL";
pub const SITE_PROFILE: &str = "SITE_PROFILE";

/// Parsed `KEY=VALUE` pairs from a serialized `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvInput {
    vars: BTreeMap<String, String>,
}

impl EnvInput {
    /// Parse `.env` text.
    ///
    /// Lines split on the first `=` only. Blank lines and `#` comments are
    /// skipped, and later duplicates win. A leading byte order mark is ignored.
    pub fn parse(text: &str) -> Result<Self, AppError> {
        let mut vars = BTreeMap::new();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (index, raw) in text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or_else(|| AppError::MalformedInput {
                line: index + 1,
                reason: "expected KEY=VALUE".to_string(),
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::MalformedInput {
                    line: index + 1,
                    reason: "empty key".to_string(),
                });
            }

            vars.insert(key.to_string(), unquote(value.trim()).to_string());
        }

        Ok(Self { vars })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn require(&self, key: &str) -> Result<&str, AppError> {
        self.get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::MissingField(key.to_string()))
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Which optional services a project includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Core services plus WP-CLI, Certbot, GraphViz, and the native application.
    #[default]
    Full,
    /// Core services only.
    Core,
}

impl Profile {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "full" => Ok(Profile::Full),
            "core" => Ok(Profile::Core),
            _ => Err(AppError::InvalidProfile(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Core => "core",
        }
    }

    pub fn includes_extras(&self) -> bool {
        matches!(self, Profile::Full)
    }
}

/// Validated site identity for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSpec {
    /// Human-readable title as submitted.
    pub title: String,
    /// Bare host name the site is served on, e.g. `acme.example.com`.
    pub host: String,
    pub profile: Profile,
}

impl SiteSpec {
    pub fn new(title: &str, url: &str) -> Result<Self, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::MissingField(SITE_TITLE.to_string()));
        }
        let host = normalize_host(url)?;
        Ok(Self { title: title.to_string(), host, profile: Profile::default() })
    }

    pub fn from_env(env: &EnvInput) -> Result<Self, AppError> {
        let title = env.require(SITE_TITLE)?;
        let url = env.require(SITE_URL)?;
        let mut site = Self::new(title, url)?;
        if let Some(profile) = env.get(SITE_PROFILE) {
            site.profile = Profile::parse(profile)?;
        }
        Ok(site)
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Slug used as the prefix of every generated name.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Reduce a URL or bare host to its host part.
fn normalize_host(url: &str) -> Result<String, AppError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::MissingField(SITE_URL.to_string()));
    }

    let candidate =
        if url.contains("://") { url.to_string() } else { format!("http://{}", url) };
    let parsed = Url::parse(&candidate).map_err(|e| AppError::InvalidField {
        key: SITE_URL.to_string(),
        reason: e.to_string(),
    })?;

    parsed
        .host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_ascii_lowercase())
        .filter(|host| !host.is_empty())
        .ok_or_else(|| AppError::MissingField(SITE_URL.to_string()))
}

/// Lowercase ASCII alphanumerics joined by single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() { "site".to_string() } else { slug.to_string() }
}
