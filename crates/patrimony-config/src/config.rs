use std::path::{Path, PathBuf};

use patrimony_core::RoomOrder;
use serde::{Deserialize, Serialize};

use crate::admin::AdminSite;
use crate::file_format::FileFormat;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "patrimony.json";

pub fn default_data_file() -> PathBuf {
    PathBuf::from("data/inventory.json")
}

/// Top-level patrimony configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PatrimonyConfig {
    /// Inventory snapshot. Its extension picks the format; without one,
    /// `dataFormat` supplies it.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default)]
    pub data_format: FileFormat,
    /// Ordering of room listings when none is requested.
    #[serde(default)]
    pub room_order: RoomOrder,
    #[serde(default)]
    pub admin: AdminSite,
}

impl Default for PatrimonyConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            data_format: FileFormat::Json,
            room_order: RoomOrder::Level,
            admin: AdminSite::default(),
        }
    }
}

impl PatrimonyConfig {
    /// Snapshot path, with the configured format's extension added when the
    /// configured path has none.
    pub fn data_path(&self) -> PathBuf {
        if self.data_file.extension().is_some() {
            self.data_file.clone()
        } else {
            self.data_file.with_extension(self.data_format.extension())
        }
    }

    /// Format used to read and write the snapshot.
    pub fn data_format(&self) -> FileFormat {
        FileFormat::from_path(&self.data_file).unwrap_or(self.data_format)
    }

    pub fn room_order(&self) -> RoomOrder {
        self.room_order
    }

    pub fn admin(&self) -> &AdminSite {
        &self.admin
    }

    /// Resolve the snapshot path against a project root.
    pub fn data_path_in(&self, root: &Path) -> PathBuf {
        root.join(self.data_path())
    }
}
