use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Root of the markdown content tree. Empty means "resolve at startup"
    #[serde(default)]
    pub content_dir: String,
    #[serde(default = "default_port")]
    pub port: String,
    /// Built frontend served as static files with an SPA fallback
    #[serde(default = "default_frontend_dist")]
    pub frontend_dist: String,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    /// "*" allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_cors_enabled() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Search stops once this many files matched
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Snippet length in bytes, before ellipses are added
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,
}

fn default_max_results() -> usize {
    20
}

fn default_snippet_length() -> usize {
    120
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            snippet_length: default_snippet_length(),
        }
    }
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_frontend_dist() -> String {
    "../frontend/build".to_string()
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `CONTENT_DIR`, `PORT` and `FRONTEND_DIST` from the environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(dir) = non_empty("CONTENT_DIR") {
            self.content_dir = dir;
        }
        if let Some(port) = non_empty("PORT") {
            self.port = port;
        }
        if let Some(dist) = non_empty("FRONTEND_DIST") {
            self.frontend_dist = dist;
        }
    }

    /// Resolve the content directory to an absolute path.
    ///
    /// With no configured directory, `content/` next to the executable wins
    /// when it exists, otherwise `./content`.
    pub fn resolve_content_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = if !self.content_dir.is_empty() {
            PathBuf::from(&self.content_dir)
        } else {
            let beside_exe = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|p| p.join("content")));
            match beside_exe {
                Some(path) if path.exists() => path,
                _ => PathBuf::from("./content"),
            }
        };

        absolute(&dir)
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: String::new(),
            port: default_port(),
            frontend_dist: default_frontend_dist(),
            cors: CorsConfig::default(),
            search: SearchConfig::default(),
        }
    }
}
