//! `herald init`: write a commented starter config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::HeraldConfig;
use crate::log;

/// Write the starter config into `dir` (created if missing).
///
/// With `dry_run` the template goes to stdout and nothing is written.
pub fn new_config(dir: &Path, config_name: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", HeraldConfig::template());
        return Ok(());
    }

    let path = write_config(dir, config_name)?;
    log!("init"; "wrote {}", path.display());
    Ok(())
}

/// Write the template to `dir/config_name`, refusing to overwrite.
pub fn write_config(dir: &Path, config_name: &Path) -> Result<PathBuf> {
    let path = dir.join(config_name);
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it or pass a different directory.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    fs::write(&path, HeraldConfig::template())
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}
