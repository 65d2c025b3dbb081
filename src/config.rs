use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Directory holding schedule exports (schedules/*.json, feed/*.jsonl)
    #[serde(default)]
    pub(crate) data_dir: Option<String>,
    /// Admin backend endpoint returning the active membership list
    #[serde(default)]
    pub(crate) members_url: Option<String>,
    #[serde(default)]
    pub(crate) gym_id: Option<String>,
    #[serde(default)]
    pub(crate) offline: bool,
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) breakdown: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        eprintln!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/gymstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("gymstats").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/gymstats/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("gymstats").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.gymstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gymstats.toml"));
        }

        paths
    }

    /// Membership endpoint with the gym id appended, when both are set.
    pub(crate) fn members_endpoint(&self) -> Option<String> {
        let url = self.members_url.as_deref()?;
        match self.gym_id.as_deref() {
            Some(gym_id) if !gym_id.is_empty() => {
                let sep = if url.contains('?') { '&' } else { '?' };
                Some(format!("{url}{sep}gym_id={gym_id}"))
            }
            _ => Some(url.to_string()),
        }
    }
}
