use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use workplan_core::{config::Config, io, paths};

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let dir = paths::workplan_dir(root);
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let created = if paths::config_path(root).exists() {
        false
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        true
    };

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config": paths::CONFIG_FILE,
            "created": created,
        }))?;
        return Ok(());
    }

    println!("Initializing workplan in: {}", root.display());
    if created {
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }
    Ok(())
}
