pub mod admin;
pub mod config;
pub mod file_format;

pub use admin::{AdminEntry, AdminError, AdminSite, known_fields};
pub use config::{CONFIG_FILE_NAME, PatrimonyConfig, default_data_file};
pub use file_format::FileFormat;
