//! Configuration parsing and validation
//!
//! This module handles loading and validating `stanza.yaml`.
//!
//! # Sections
//!
//! - `source` - where poems come from (PoetryDB endpoint and query)
//! - `render` - how a poem record becomes HTML
//! - `page` - optional custom template for standalone pages
//! - `profiles` - named overlays merged over the sections above

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default config file name looked up inside a directory
pub const CONFIG_FILE: &str = "stanza.yaml";

/// Root configuration document from `stanza.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Poem source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Standalone page settings
    #[serde(default)]
    pub page: PageConfig,

    /// Named overlays, merged over the root sections when selected
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub profiles: HashMap<String, serde_yaml::Value>,
}

/// Where poems are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// PoetryDB base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of random poems requested per fetch
    #[serde(default = "default_count")]
    pub count: u32,

    /// Exact line count to ask for; `null` accepts any length
    #[serde(default = "default_line_count")]
    pub line_count: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            count: default_count(),
            line_count: default_line_count(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://poetrydb.org".to_string()
}

fn default_count() -> u32 {
    1
}

fn default_line_count() -> Option<u32> {
    Some(12)
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("stanza/", env!("CARGO_PKG_VERSION")).to_string()
}

/// How consecutive stanza delimiters are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StanzaBreaks {
    /// Runs of blank lines form one boundary; leading and trailing blanks are dropped
    #[default]
    Collapse,
    /// Every blank line is a boundary, so extra blanks yield empty paragraphs
    Preserve,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Marker placed between lines of a stanza
    #[serde(default = "default_line_break")]
    pub line_break: String,

    /// Consecutive-delimiter policy
    #[serde(default)]
    pub stanza_breaks: StanzaBreaks,

    /// HTML-escape title, author and lines before wrapping them
    #[serde(default)]
    pub escape: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_break: default_line_break(),
            stanza_breaks: StanzaBreaks::default(),
            escape: false,
        }
    }
}

fn default_line_break() -> String {
    "<br>".to_string()
}

/// Standalone page configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageConfig {
    /// Path to a custom minijinja template, relative to the config file
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved configuration (profile already applied)
    pub project: ProjectConfig,

    /// Directory the configuration was loaded from
    pub base_path: PathBuf,

    /// Profile that was applied, if any
    pub profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            base_path: PathBuf::from("."),
            profile: None,
        }
    }
}

impl Config {
    /// Load configuration from a directory or a `stanza.yaml` file
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = Config::load("./stanza.yaml")?;
    /// println!("Source: {}", config.project.source.base_url);
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_profile(path, None)
    }

    /// Load configuration and merge the named profile over it
    pub fn load_with_profile<P: AsRef<Path>>(path: P, profile: Option<&str>) -> Result<Self> {
        let (config_path, base_path) = resolve_paths(path.as_ref());

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config = Self::from_yaml_str(&contents, profile)?;
        tracing::debug!("Loaded configuration from {}", config_path.display());

        Ok(Self {
            base_path,
            ..config
        })
    }

    /// Like [`Config::load_with_profile`], but a missing file yields defaults.
    ///
    /// A profile cannot be applied without a file, so asking for one is still
    /// an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P, profile: Option<&str>) -> Result<Self> {
        let (config_path, _) = resolve_paths(path.as_ref());
        if config_path.exists() {
            return Self::load_with_profile(path, profile);
        }
        if let Some(name) = profile {
            return Err(Error::ProfileNotFound {
                profile_name: name.to_string(),
            });
        }
        tracing::debug!(
            "No configuration at {}, using defaults",
            config_path.display()
        );
        Ok(Self::default())
    }

    /// Parse configuration from YAML text, applying `profile` if given
    pub fn from_yaml_str(contents: &str, profile: Option<&str>) -> Result<Self> {
        let mut doc: serde_yaml::Value = if contents.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(contents)?
        };
        // A blank or comment-only file is null
        if doc.is_null() {
            doc = serde_yaml::Value::Mapping(Default::default());
        }

        if let Some(name) = profile {
            let overlay = doc
                .get("profiles")
                .and_then(|profiles| profiles.get(name))
                .cloned()
                .ok_or_else(|| Error::ProfileNotFound {
                    profile_name: name.to_string(),
                })?;
            merge_yaml(&mut doc, overlay);
        }

        let project: ProjectConfig = serde_yaml::from_value(doc)?;
        let config = Self {
            project,
            profile: profile.map(str::to_string),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        let source = &self.project.source;
        if !(source.base_url.starts_with("http://") || source.base_url.starts_with("https://")) {
            return Err(invalid(format!(
                "source.base_url must be an http(s) URL, got '{}'",
                source.base_url
            )));
        }
        if source.count == 0 {
            return Err(invalid("source.count must be at least 1"));
        }
        if source.line_count == Some(0) {
            return Err(invalid("source.line_count must be at least 1"));
        }
        if source.timeout_secs == 0 {
            return Err(invalid("source.timeout_secs must be at least 1"));
        }
        if self.project.render.line_break.is_empty() {
            return Err(invalid("render.line_break must not be empty"));
        }
        Ok(())
    }

    /// Absolute-or-relative path of the custom page template, if configured
    pub fn page_template_path(&self) -> Option<PathBuf> {
        self.project
            .page
            .template
            .as_ref()
            .map(|p| self.base_path.join(p))
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::ConfigInvalid {
        message: message.into(),
    }
}

fn resolve_paths(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_dir() {
        (path.join(CONFIG_FILE), path.to_path_buf())
    } else {
        (
            path.to_path_buf(),
            path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        )
    }
}

/// Deep-merge `overlay` into `base`. Mappings merge key by key; anything
/// else in the overlay replaces the base value.
pub fn merge_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stanza_breaks() {
        assert_eq!(StanzaBreaks::default(), StanzaBreaks::Collapse);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = Config::from_yaml_str("", None).unwrap();
        assert_eq!(config.project.source.base_url, "https://poetrydb.org");
        assert_eq!(config.project.source.count, 1);
        assert_eq!(config.project.source.line_count, Some(12));
        assert_eq!(config.project.render.line_break, "<br>");
        assert!(!config.project.render.escape);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
source:
  base_url: "http://localhost:8080"
  count: 2
  line_count: null
  timeout_secs: 3
render:
  line_break: "<br/>"
  stanza_breaks: preserve
  escape: true
page:
  template: templates/poem.html
"#;
        let config = Config::from_yaml_str(yaml, None).unwrap();
        let project = &config.project;
        assert_eq!(project.source.base_url, "http://localhost:8080");
        assert_eq!(project.source.count, 2);
        assert_eq!(project.source.line_count, None);
        assert_eq!(project.source.timeout_secs, 3);
        assert_eq!(project.render.line_break, "<br/>");
        assert_eq!(project.render.stanza_breaks, StanzaBreaks::Preserve);
        assert!(project.render.escape);
        assert_eq!(
            config.page_template_path(),
            Some(PathBuf::from("./templates/poem.html"))
        );
    }

    #[test]
    fn test_profile_overlays_fields() {
        let yaml = r#"
source:
  count: 1
  line_count: 12
profiles:
  short:
    source:
      line_count: 4
"#;
        let config = Config::from_yaml_str(yaml, Some("short")).unwrap();
        assert_eq!(config.project.source.line_count, Some(4));
        // untouched fields survive the merge
        assert_eq!(config.project.source.count, 1);
        assert_eq!(config.profile.as_deref(), Some("short"));
    }

    #[test]
    fn test_unknown_profile_errors() {
        let result = Config::from_yaml_str("source: {}\n", Some("missing"));
        assert!(matches!(result, Err(Error::ProfileNotFound { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for yaml in [
            "source: { base_url: \"ftp://example.com\" }",
            "source: { count: 0 }",
            "source: { line_count: 0 }",
            "source: { timeout_secs: 0 }",
            "render: { line_break: \"\" }",
        ] {
            let result = Config::from_yaml_str(yaml, None);
            assert!(
                matches!(result, Err(Error::ConfigInvalid { .. })),
                "expected {yaml} to be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_stanza_breaks_is_parse_error() {
        let result = Config::from_yaml_str("render: { stanza_breaks: squash }", None);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "source:\n  line_count: 8\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.project.source.line_count, Some(8));
        assert_eq!(config.base_path, dir.path());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path());
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join(CONFIG_FILE), None).unwrap();
        assert_eq!(config.project.source.count, 1);

        let result = Config::load_or_default(dir.path().join(CONFIG_FILE), Some("dev"));
        assert!(matches!(result, Err(Error::ProfileNotFound { .. })));
    }

    #[test]
    fn test_merge_yaml_replaces_scalars_and_merges_maps() {
        let mut base: serde_yaml::Value = serde_yaml::from_str("a: 1\nb: { c: 2, d: 3 }").unwrap();
        let overlay: serde_yaml::Value = serde_yaml::from_str("a: 9\nb: { d: 4 }\ne: 5").unwrap();
        merge_yaml(&mut base, overlay);
        assert_eq!(base["a"].as_i64(), Some(9));
        assert_eq!(base["b"]["c"].as_i64(), Some(2));
        assert_eq!(base["b"]["d"].as_i64(), Some(4));
        assert_eq!(base["e"].as_i64(), Some(5));
    }
}
