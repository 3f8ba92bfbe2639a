use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub contributions: ContributionsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// The subject account whose public data is displayed.
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionsConfig {
    #[serde(default = "default_contributions_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

/// Placeholder content that is displayed but never fetched. Kept in config so
/// the demo/real boundary is visible and the samples are replaceable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_blog_posts")]
    pub blog_posts: Vec<BlogPost>,
    #[serde(default = "default_achievements")]
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub date: String,
    pub url: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub icon: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_contributions_url() -> String {
    "https://github-contributions-api.jogruber.de/v4".to_string()
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            title: "Understanding React Hooks".to_string(),
            date: "2023-06-01".to_string(),
            url: "#".to_string(),
            excerpt: "React Hooks are a powerful feature that allow you to use state and other \
                      React features without writing a class..."
                .to_string(),
        },
        BlogPost {
            title: "Building Scalable Node.js Applications".to_string(),
            date: "2023-05-15".to_string(),
            url: "#".to_string(),
            excerpt: "Scalability is crucial when building Node.js applications. In this post, \
                      we'll explore best practices for creating scalable architectures..."
                .to_string(),
        },
        BlogPost {
            title: "The Future of TypeScript".to_string(),
            date: "2023-04-30".to_string(),
            url: "#".to_string(),
            excerpt: "TypeScript continues to evolve, bringing new features and improvements. \
                      Let's take a look at what the future holds for TypeScript..."
                .to_string(),
        },
    ]
}

fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            title: "100 Days Streak".to_string(),
            description: "Contributed code for 100 days in a row".to_string(),
            icon: "📅".to_string(),
        },
        Achievement {
            title: "1000 Commits".to_string(),
            description: "Reached 1000 total commits".to_string(),
            icon: "🔀".to_string(),
        },
        Achievement {
            title: "Open Source Hero".to_string(),
            description: "Contributed to 10+ open source projects".to_string(),
            icon: "⭐".to_string(),
        },
    ]
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            api_url: default_api_url(),
        }
    }
}

impl Default for ContributionsConfig {
    fn default() -> Self {
        Self {
            api_url: default_contributions_url(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            blog_posts: default_blog_posts(),
            achievements: default_achievements(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: AppConfig =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            return Ok(config);
        }

        // Search candidate paths in order
        let mut candidates = Vec::new();

        // 1. ~/.config/quackhub/config.toml (standard XDG on all platforms)
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/quackhub/config.toml"));
        }

        // 2. Platform-specific path from `directories` crate
        //    (macOS: ~/Library/Application Support/quackhub/)
        if let Some(proj_dirs) = ProjectDirs::from("", "", "quackhub") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path).with_context(|| {
                    format!("Failed to read config file: {}", config_path.display())
                })?;
                let config: AppConfig =
                    toml::from_str(&content).with_context(|| "Failed to parse config file")?;
                return Ok(config);
            }
        }

        // Fallback to default
        Ok(AppConfig::default())
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "quackhub") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/quackhub/logs")
    }
}
