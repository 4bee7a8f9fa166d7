use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use patrimony_core::{Room, RoomId, RoomInput, RoomKind, RoomOrder};
use patrimony_query::RoomFilter;
use rust_decimal::Decimal;

use crate::commands::equipment::print_equipment_line;
use crate::utils::{confirm, open_inventory, or_dash, picture_from_path, print_json, report};

#[derive(Args, Debug)]
pub struct RoomFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub capacity: Option<i64>,
    /// Surface area in m².
    #[arg(long, allow_hyphen_values = true)]
    pub surface: Option<Decimal>,
    /// Free-text equipment notes.
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, conflicts_with = "available")]
    pub unavailable: bool,
    #[arg(long)]
    pub available: bool,
    /// Picture file; only its name, size and type are recorded.
    #[arg(long)]
    pub picture: Option<PathBuf>,
    #[arg(long, conflicts_with = "picture")]
    pub no_picture: bool,
    /// Forget the recorded surface.
    #[arg(long, conflicts_with = "surface")]
    pub clear_surface: bool,
    /// Forget the recorded capacity.
    #[arg(long, conflicts_with = "capacity")]
    pub clear_capacity: bool,
}

impl RoomFields {
    fn apply(self, input: &mut RoomInput) -> Result<()> {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(level) = self.level {
            input.level = level;
        }
        if self.capacity.is_some() || self.clear_capacity {
            input.capacity = self.capacity;
        }
        if self.surface.is_some() || self.clear_surface {
            input.surface_area = self.surface;
        }
        if let Some(notes) = self.notes {
            input.equipment_notes = notes;
        }
        if self.unavailable {
            input.available = false;
        } else if self.available {
            input.available = true;
        }
        if let Some(path) = self.picture {
            input.picture = Some(picture_from_path(&path)?);
        } else if self.no_picture {
            input.picture = None;
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum RoomCommand {
    /// Create a room.
    Add {
        #[arg(long, value_enum)]
        kind: RoomKind,
        #[command(flatten)]
        fields: RoomFields,
    },
    /// List rooms.
    List {
        /// Text matched against name, type and level.
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        kind: Option<RoomKind>,
        /// Only available (`true`) or unavailable (`false`) rooms.
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        capacity_min: Option<u32>,
        /// Defaults to the `roomOrder` of patrimony.json.
        #[arg(long, value_enum)]
        order: Option<RoomOrder>,
        #[arg(long)]
        json: bool,
    },
    /// Show a room and its equipment.
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Change a room; omitted fields keep their value.
    Edit {
        id: u64,
        #[arg(long, value_enum)]
        kind: Option<RoomKind>,
        #[command(flatten)]
        fields: RoomFields,
    },
    /// Delete a room and its equipment.
    Delete {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub(crate) fn print_room_line(room: &Room) {
    let availability = if room.available {
        "available".bright_green()
    } else {
        "unavailable".bright_red()
    };
    println!(
        "{} {} {} {} {} {} {}",
        format!("#{}", room.id).bright_yellow(),
        room.to_string().bright_white().bold(),
        room.kind.to_string().cyan(),
        format!("level {}", if room.level.is_empty() { "-" } else { room.level.as_str() }).white(),
        format!("{} m²", or_dash(room.surface_area)).white(),
        format!("capacity {}", or_dash(room.capacity)).white(),
        availability,
    );
}

pub fn cmd_room(command: RoomCommand) -> Result<()> {
    let (config, mut inventory) = open_inventory()?;
    match command {
        RoomCommand::Add { kind, fields } => {
            let mut input = RoomInput::new(kind);
            fields.apply(&mut input)?;
            let room = inventory.create_room(&input).map_err(report)?;
            println!("{} {}", "Created room".bright_green(), room.id);
        }
        RoomCommand::List {
            search,
            kind,
            available,
            capacity_min,
            order,
            json,
        } => {
            let spec = RoomFilter {
                search,
                kind,
                available,
                capacity_min,
            };
            let rooms = inventory.list_rooms(&spec, order.unwrap_or(config.room_order()))?;
            if json {
                return print_json(&rooms);
            }
            println!(
                "{} {}",
                "Rooms:".bright_cyan().bold(),
                rooms.len().to_string().bright_yellow()
            );
            for room in &rooms {
                print_room_line(room);
            }
        }
        RoomCommand::Show { id, json } => {
            let id = RoomId(id);
            let room = inventory.get_room(id)?;
            let equipment = inventory.equipment_in_room(id)?;
            if json {
                return print_json(&serde_json::json!({
                    "room": room,
                    "equipment": equipment,
                }));
            }
            print_room_line(&room);
            if let Some(ratio) = room.occupancy_ratio() {
                println!("  {} {} persons/m²", "Occupancy:".bright_cyan(), ratio);
            }
            if !room.equipment_notes.is_empty() {
                println!("  {} {}", "Notes:".bright_cyan(), room.equipment_notes);
            }
            if let Some(picture) = &room.picture {
                println!(
                    "  {} {} ({}, {} bytes)",
                    "Picture:".bright_cyan(),
                    picture.file_name,
                    picture.content_type,
                    picture.size_bytes
                );
            }
            println!(
                "{} {}",
                "Equipment:".bright_cyan().bold(),
                equipment.len().to_string().bright_yellow()
            );
            for item in &equipment {
                print_equipment_line(item);
            }
        }
        RoomCommand::Edit { id, kind, fields } => {
            let id = RoomId(id);
            let mut input = RoomInput::from(&inventory.get_room(id)?);
            if let Some(kind) = kind {
                input.kind = kind;
            }
            fields.apply(&mut input)?;
            inventory.update_room(id, &input).map_err(report)?;
            println!("{} {}", "Updated room".bright_green(), id);
        }
        RoomCommand::Delete { id, yes } => {
            let id = RoomId(id);
            let room = inventory.get_room(id)?;
            if !confirm(&format!("Delete room '{room}' and its equipment?"), yes)? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }
            let removed = inventory.delete_room(id)?;
            println!(
                "{} {} ({} equipment removed)",
                "Deleted room".bright_green(),
                id,
                removed.len()
            );
        }
    }
    Ok(())
}
