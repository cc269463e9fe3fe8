use crate::classify::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for pr-changelog.
///
/// Contains the classification rule vocabulary and the changelog template
/// settings. Everything has sensible conventional-commit defaults, so a
/// config file is only needed to override the vocabulary or headings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub template: TemplateConfig,
}

/// Returns the default breaking change indicators searched in the full message.
fn default_breaking_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Returns the default conventional types classified as features.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string(), "feature".to_string()]
}

/// Returns the default conventional types classified as fixes.
fn default_fix_types() -> Vec<String> {
    vec!["fix".to_string(), "perf".to_string()]
}

/// Vocabulary for the commit classification rule table.
///
/// These lists feed [crate::classify::RuleTable]; the evaluation priority
/// (breaking, then feature, then fix, then the chore fallback) is fixed and
/// not configurable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_breaking_indicators")]
    pub breaking_indicators: Vec<String>,

    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_fix_types")]
    pub fix_types: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            breaking_indicators: default_breaking_indicators(),
            feature_types: default_feature_types(),
            fix_types: default_fix_types(),
        }
    }
}

fn default_title() -> String {
    "## Changelog".to_string()
}

fn default_breaking_heading() -> String {
    "💥 Breaking Changes".to_string()
}

fn default_feature_heading() -> String {
    "🚀 Features".to_string()
}

fn default_fix_heading() -> String {
    "🐛 Bug Fixes".to_string()
}

fn default_chore_heading() -> String {
    "🧹 Chores".to_string()
}

/// Headings used when rendering the changelog document.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TemplateConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_breaking_heading")]
    pub breaking_heading: String,

    #[serde(default = "default_feature_heading")]
    pub feature_heading: String,

    #[serde(default = "default_fix_heading")]
    pub fix_heading: String,

    #[serde(default = "default_chore_heading")]
    pub chore_heading: String,
}

impl TemplateConfig {
    /// Section heading for a category
    pub fn heading(&self, category: Category) -> &str {
        match category {
            Category::Breaking => &self.breaking_heading,
            Category::Feature => &self.feature_heading,
            Category::Fix => &self.fix_heading,
            Category::Chore => &self.chore_heading,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            title: default_title(),
            breaking_heading: default_breaking_heading(),
            feature_heading: default_feature_heading(),
            fix_heading: default_fix_heading(),
            chore_heading: default_chore_heading(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            classifier: ClassifierConfig::default(),
            template: TemplateConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `prchangelog.toml` in current directory
/// 3. `~/.config/.prchangelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./prchangelog.toml").exists() {
        fs::read_to_string("./prchangelog.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".prchangelog.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
