use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use patrimony_config::PatrimonyConfig;
use patrimony_core::{EquipmentInput, OfficeInput, RoomInput};
use schemars::{Schema, schema_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    Office,
    Room,
    Equipment,
    Config,
}

impl SchemaTarget {
    fn schema(self) -> Schema {
        match self {
            SchemaTarget::Office => schema_for!(OfficeInput),
            SchemaTarget::Room => schema_for!(RoomInput),
            SchemaTarget::Equipment => schema_for!(EquipmentInput),
            SchemaTarget::Config => schema_for!(PatrimonyConfig),
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            SchemaTarget::Office => "office.schema.json",
            SchemaTarget::Room => "room.schema.json",
            SchemaTarget::Equipment => "equipment.schema.json",
            SchemaTarget::Config => "config.schema.json",
        }
    }
}

/// Print the JSON Schema of `target`, or write it under `out`.
pub fn cmd_schema(target: SchemaTarget, out: Option<&Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(&target.schema()).context("serialize JSON schema")?;
    let Some(out) = out else {
        println!("{json}");
        return Ok(());
    };
    if !out.exists() {
        fs::create_dir_all(out).with_context(|| format!("create dir {}", out.display()))?;
    }
    let path = out.join(target.file_name());
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
