use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use patrimony_config::{CONFIG_FILE_NAME, FileFormat, PatrimonyConfig};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Snapshot file format.
    #[arg(long, value_enum, default_value_t = FileFormat::Json)]
    pub format: FileFormat,
}

pub fn cmd_init(args: InitArgs) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("patrimony.json already exists");
    }

    let config = PatrimonyConfig {
        data_file: PathBuf::from("data/inventory").with_extension(args.format.extension()),
        data_format: args.format,
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).context("write patrimony.json")?;
    println!("created {:?}", path);
    Ok(())
}
