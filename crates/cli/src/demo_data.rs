//! The demo kitchen shipped inside the binary.
//!
//! Order ledgers are not seeded; they start empty on first use.

use anyhow::{Context, Result, bail};
use orderup_tools::Config;
use std::path::PathBuf;

const PANTRY: &str = include_str!("../../../data/pantry.json");
const FOODS: &str = include_str!("../../../data/food.json");
const MENU: &str = include_str!("../../../data/menu.json");
const RECIPES: &str = include_str!("../../../data/recipes.json");

fn demo_files(config: &Config) -> [(PathBuf, &'static str); 4] {
    let files = &config.files;
    [
        (config.data_path(&files.pantry), PANTRY),
        (config.data_path(&files.foods), FOODS),
        (config.data_path(&files.menu), MENU),
        (config.data_path(&files.recipes), RECIPES),
    ]
}

/// Write the demo data set into the configured data directory.
///
/// Refuses to touch anything when one of the files already exists, unless
/// `force` is set.
pub async fn write_demo_data(config: &Config, force: bool) -> Result<Vec<PathBuf>> {
    let files = demo_files(config);

    if !force {
        let existing: Vec<String> = files
            .iter()
            .filter(|(path, _)| path.exists())
            .map(|(path, _)| path.display().to_string())
            .collect();
        if !existing.is_empty() {
            bail!(
                "refusing to overwrite {} (use --force)",
                existing.join(", ")
            );
        }
    }

    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {:?}", config.data_dir))?;

    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Failed to write {:?}", path))?;
        ::tracing::info!(path = %path.display(), "wrote demo data");
        written.push(path);
    }
    Ok(written)
}
