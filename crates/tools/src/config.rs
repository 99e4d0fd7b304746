//! Configuration file support for tool servers
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup rooted at `./data`.

use anyhow::{Context, Result, anyhow};
use orderup_ledger::LockMode;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "orderup.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub files: DataFiles,
    #[serde(default)]
    pub lock_mode: LockMode,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,
    /// Directory for request/response traffic logs. Disabled when unset.
    #[serde(default)]
    pub traffic_dir: Option<PathBuf>,
}

/// File names of each ledger and catalog inside `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DataFiles {
    pub pantry: String,
    pub foods: String,
    pub orders: String,
    pub chef_orders: String,
    pub menu: String,
    pub recipes: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            pantry: "pantry.json".into(),
            foods: "food.json".into(),
            orders: "orders.json".into(),
            chef_orders: "chef_orders.json".into(),
            menu: "menu.json".into(),
            recipes: "recipes.json".into(),
        }
    }
}

impl DataFiles {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.pantry,
            &self.foods,
            &self.orders,
            &self.chef_orders,
            &self.menu,
            &self.recipes,
        ]
        .into_iter()
        .map(String::as_str)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_low_stock_threshold() -> f64 {
    3.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            files: DataFiles::default(),
            lock_mode: LockMode::default(),
            low_stock_threshold: default_low_stock_threshold(),
            traffic_dir: None,
        }
    }
}

impl Config {
    pub fn data_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

/// Load and parse a config file.
///
/// Relative directories are resolved against the file's own directory.
pub async fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let processed = interpolate_env_vars(&content)?;
    let mut config: Config = toml::from_str(&processed)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    validate_config(&config)?;

    let base_path = path.parent().unwrap_or(Path::new("."));
    config.data_dir = resolve_relative(base_path, &config.data_dir);
    config.traffic_dir = config
        .traffic_dir
        .as_deref()
        .map(|dir| resolve_relative(base_path, dir));

    Ok(config)
}

/// Use `explicit` when given, else the first config file found in the
/// working directory or the user config directory, else the defaults.
pub async fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path).await;
    }
    match default_config_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using config file");
            load_config(path).await
        }
        None => Ok(Config::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    let user = dirs::config_dir().map(|dir| dir.join("orderup").join(CONFIG_FILE_NAME));
    std::iter::once(local)
        .chain(user)
        .find(|candidate| candidate.is_file())
}

/// Interpolate environment variables in config content
/// Supports ${VAR} and ${VAR:-default} syntax
pub fn interpolate_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .context("Failed to compile env var regex")?;

    let mut missing = Vec::new();
    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str());

        match (std::env::var(var_name), default) {
            (Ok(val), _) => val,
            (Err(_), Some(default)) => default.to_string(),
            (Err(_), None) => {
                missing.push(var_name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(anyhow!(
            "Required environment variables not set: {}",
            missing.join(", ")
        ));
    }

    Ok(result.into_owned())
}

fn validate_config(config: &Config) -> Result<()> {
    if !config.low_stock_threshold.is_finite() || config.low_stock_threshold < 0.0 {
        return Err(anyhow!(
            "low_stock_threshold must be a non-negative number, got {}",
            config.low_stock_threshold
        ));
    }
    if let Some(empty) = config.files.iter().find(|name| name.trim().is_empty()) {
        return Err(anyhow!("data file names cannot be empty (got {:?})", empty));
    }
    Ok(())
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_fill_every_field() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_path(&config.files.orders), PathBuf::from("data/orders.json"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("datadir = \"x\"").is_err());
        assert!(toml::from_str::<Config>("[files]\npantree = \"p.json\"").is_err());
    }

    #[test]
    fn lock_mode_and_file_overrides() {
        let config: Config = toml::from_str(
            "lock_mode = \"none\"\nlow_stock_threshold = 5\n[files]\npantry = \"stock.json\"",
        )
        .unwrap();
        assert_eq!(config.lock_mode, LockMode::None);
        assert_eq!(config.low_stock_threshold, 5.0);
        assert_eq!(config.files.pantry, "stock.json");
        assert_eq!(config.files.orders, "orders.json");
    }

    #[test]
    fn test_interpolate_env_vars() {
        unsafe {
            std::env::set_var("ORDERUP_TEST_DATA", "/srv/kitchen");
        }
        let result = interpolate_env_vars("data_dir = \"${ORDERUP_TEST_DATA}\"").unwrap();
        assert_eq!(result, "data_dir = \"/srv/kitchen\"");

        let with_default = interpolate_env_vars("x = \"${ORDERUP_TEST_UNSET:-data}\"").unwrap();
        assert_eq!(with_default, "x = \"data\"");

        assert!(interpolate_env_vars("x = \"${ORDERUP_TEST_REQUIRED}\"").is_err());
    }

    #[tokio::test]
    async fn relative_dirs_resolve_against_the_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "data_dir = \"state\"\ntraffic_dir = \"traffic\"").unwrap();

        let config = load_config(&path).await.unwrap();
        assert_eq!(config.data_dir, dir.path().join("state"));
        assert_eq!(config.traffic_dir, Some(dir.path().join("traffic")));
    }

    #[tokio::test]
    async fn negative_threshold_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "low_stock_threshold = -1").unwrap();
        assert!(load_config(&path).await.is_err());
    }
}
