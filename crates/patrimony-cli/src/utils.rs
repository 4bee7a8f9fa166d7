use std::fmt::Display;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use patrimony_config::PatrimonyConfig;
use patrimony_core::Picture;
use patrimony_store::{FileStore, Inventory, InventoryError, load_config};
use serde::Serialize;
use tracing::debug;

/// Load patrimony.json and open the inventory snapshot it points at.
pub fn open_inventory() -> Result<(PatrimonyConfig, Inventory<FileStore>)> {
    let config = load_config()?;
    let path = config.data_path();
    debug!(path = %path.display(), format = ?config.data_format(), "opening inventory");
    let store = FileStore::open_with_format(&path, config.data_format())
        .with_context(|| format!("open inventory: {}", path.display()))?;
    Ok((config, Inventory::new(store)))
}

/// Print field errors of a rejected form to stderr and turn the error into
/// an `anyhow` error for the exit status.
pub fn report(err: InventoryError) -> anyhow::Error {
    if let Some(errors) = err.field_errors() {
        eprintln!("{}", "The form has errors:".bright_red().bold());
        for (field, messages) in errors.messages() {
            for message in messages {
                eprintln!("  {} {}", format!("{field}:").red(), message);
            }
        }
        return anyhow::anyhow!("validation failed");
    }
    err.into()
}

/// Ask before a destructive action, unless `assume_yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("confirmation needs a terminal; pass --yes to skip it")
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize output")?
    );
    Ok(())
}

/// `-` for missing values.
pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// MIME type guessed from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("tif" | "tiff") => "image/tiff",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Upload metadata of a picture file: name, byte size, MIME type.
pub fn picture_from_path(path: &Path) -> Result<Picture> {
    let metadata =
        fs::metadata(path).with_context(|| format!("read picture: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Picture {
        file_name,
        size_bytes: metadata.len(),
        content_type: content_type_for(path).to_string(),
    })
}
