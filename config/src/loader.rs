use crate::{ConfigError, SqltoshConfig};
use regex::Regex;
use std::path::{Path, PathBuf};

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/sqltosh/sqltosh.yaml"));
        }
        search_paths.push(PathBuf::from("./sqltosh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/sqltosh/sqltosh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    #[must_use]
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<SqltoshConfig, ConfigError> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Loads with `lookup` standing in for the process environment.
    ///
    /// An explicit file wins over `SQLTOSH_CONFIG`; either one replaces the
    /// search path entirely.
    pub fn load_with_env<F>(&self, lookup: F) -> Result<SqltoshConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SqltoshConfig::default();

        let explicit = self
            .explicit_file
            .clone()
            .or_else(|| lookup("SQLTOSH_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            config = self.read_file(&path, &lookup)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    if let Ok(content) = std::fs::read_to_string(path) {
                        tracing::debug!(path = %path.display(), "merging config file");
                        config = self.merge_yaml(&config, &content, &lookup)?;
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config, &lookup);
        validate(&config)?;
        Ok(config)
    }

    fn read_file<F>(&self, path: &Path, lookup: &F) -> Result<SqltoshConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_yaml(&content, lookup)
    }

    fn parse_yaml<F>(&self, content: &str, lookup: &F) -> Result<SqltoshConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = self.expand_env_vars(content, lookup);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml<F>(
        &self,
        base: &SqltoshConfig,
        content: &str,
        lookup: &F,
    ) -> Result<SqltoshConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overlay = self.parse_yaml(content, lookup)?;
        Ok(merge_configs(base, &overlay))
    }

    fn expand_env_vars<F>(&self, content: &str, lookup: &F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides<F>(&self, config: &mut SqltoshConfig, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("SQLTOSH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
        if let Some(file) = lookup("SQLTOSH_HISTORY_FILE") {
            if !file.is_empty() {
                config.shell.history.file = file;
            }
        }
        if let Some(no_color) = lookup("NO_COLOR") {
            if !no_color.is_empty() {
                config.display.color = false;
            }
        }
    }
}

fn merge_configs(base: &SqltoshConfig, overlay: &SqltoshConfig) -> SqltoshConfig {
    let defaults = SqltoshConfig::default();
    let mut result = base.clone();

    if overlay.shell.prompt != defaults.shell.prompt {
        result.shell.prompt = overlay.shell.prompt.clone();
    }
    if overlay.shell.continuation_prompt != defaults.shell.continuation_prompt {
        result.shell.continuation_prompt = overlay.shell.continuation_prompt.clone();
    }
    if overlay.shell.history != defaults.shell.history {
        result.shell.history = overlay.shell.history.clone();
    }
    if overlay.display != defaults.display {
        result.display = overlay.display.clone();
    }
    if overlay.logging != defaults.logging {
        result.logging = overlay.logging.clone();
    }

    result
}

fn validate(config: &SqltoshConfig) -> Result<(), ConfigError> {
    if config.shell.prompt.is_empty() {
        return Err(ConfigError::InvalidValue("shell.prompt must not be empty".to_string()));
    }
    if config.shell.history.enabled && config.shell.history.max_entries == 0 {
        return Err(ConfigError::InvalidValue(
            "shell.history.max_entries must be positive when history is enabled".to_string(),
        ));
    }
    Ok(())
}
