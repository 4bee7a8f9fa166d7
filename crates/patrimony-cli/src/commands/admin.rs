use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use patrimony_config::AdminEntry;
use patrimony_core::{
    Choice, EntityKind, Equipment, EquipmentOrder, Office, OfficeId, OfficeOrder, Room, RoomId,
    RoomOrder,
};
use patrimony_query::{EquipmentFilter, OfficeFilter, RoomFilter};

use crate::utils::{open_inventory, or_dash};

#[derive(Args, Debug)]
pub struct AdminArgs {
    /// Only this entity's change list.
    #[arg(long, value_enum)]
    pub kind: Option<EntityKind>,
    /// Case-insensitive text matched against each entry's search fields.
    #[arg(short, long)]
    pub search: Option<String>,
}

fn office_field(office: &Office, field: &str) -> String {
    match field {
        "id" => office.id.to_string(),
        "kind" => office.kind.label().to_string(),
        "name" => office.name.clone(),
        "level" => office.level.clone(),
        "surface_area" => or_dash(office.surface_area),
        "capacity" => or_dash(office.capacity),
        "created_at" => office.created_at.to_rfc3339(),
        "updated_at" => office.updated_at.to_rfc3339(),
        _ => String::new(),
    }
}

fn room_field(room: &Room, field: &str) -> String {
    match field {
        "id" => room.id.to_string(),
        "kind" => room.kind.label().to_string(),
        "name" => room.name.clone(),
        "level" => room.level.clone(),
        "capacity" => or_dash(room.capacity),
        "surface_area" => or_dash(room.surface_area),
        "equipment_notes" => room.equipment_notes.clone(),
        "available" => room.available.to_string(),
        "created_at" => room.created_at.to_rfc3339(),
        "updated_at" => room.updated_at.to_rfc3339(),
        _ => String::new(),
    }
}

/// Parent names, so equipment rows show "Salle A" rather than an id.
struct Parents {
    rooms: BTreeMap<RoomId, String>,
    offices: BTreeMap<OfficeId, String>,
}

fn equipment_field(item: &Equipment, field: &str, parents: &Parents) -> String {
    match field {
        "id" => item.id.to_string(),
        "room" => or_dash(
            item.location
                .room_id()
                .and_then(|id| parents.rooms.get(&id)),
        ),
        "office" => or_dash(
            item.location
                .office_id()
                .and_then(|id| parents.offices.get(&id)),
        ),
        "name" => item.name.clone(),
        "description" => item.description.clone(),
        "quantity" => item.quantity.to_string(),
        "state" => item.state.label().to_string(),
        "serial_number" => item.serial_number.clone(),
        "acquisition_date" => or_dash(item.acquisition_date),
        "unit_price" => or_dash(item.unit_price),
        "created_at" => item.created_at.to_rfc3339(),
        "updated_at" => item.updated_at.to_rfc3339(),
        _ => String::new(),
    }
}

/// Rows of one change list: the `list_display` cells of every record whose
/// search fields contain `needle`.
fn change_list<T>(
    entry: &AdminEntry,
    records: &[T],
    needle: Option<&str>,
    cell: impl Fn(&T, &str) -> String,
) -> Vec<Vec<String>> {
    records
        .iter()
        .filter(|record| match needle {
            None => true,
            Some(needle) => entry
                .search_fields
                .iter()
                .any(|field| cell(*record, field.as_str()).to_lowercase().contains(needle)),
        })
        .map(|record| {
            entry
                .list_display
                .iter()
                .map(|field| cell(record, field.as_str()))
                .collect()
        })
        .collect()
}

fn print_change_list(entry: &AdminEntry, rows: &[Vec<String>]) {
    println!(
        "{} {}",
        format!("{}:", entry.kind).bright_cyan().bold(),
        rows.len().to_string().bright_yellow()
    );
    println!("  {}", entry.list_display.join(" | ").cyan());
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| if cell.is_empty() { "-".to_string() } else { cell.clone() })
            .collect();
        println!("  {}", cells.join(" | ").bright_white());
    }
}

pub fn cmd_admin(args: AdminArgs) -> Result<()> {
    let (config, inventory) = open_inventory()?;
    let site = config.admin();
    let needle = args
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let offices = inventory.list_offices(&OfficeFilter::default(), OfficeOrder::Name)?;
    let rooms = inventory.list_rooms(&RoomFilter::default(), RoomOrder::Name)?;
    let equipment = inventory.list_equipment(&EquipmentFilter::default(), EquipmentOrder::Name)?;
    let parents = Parents {
        rooms: rooms.iter().map(|r| (r.id, r.to_string())).collect(),
        offices: offices.iter().map(|o| (o.id, o.to_string())).collect(),
    };

    println!("{}", site.site_header.bright_white().bold());
    println!("{}", site.index_title.bright_magenta());
    println!();

    for entry in &site.entries {
        if args.kind.is_some_and(|kind| kind != entry.kind) {
            continue;
        }
        let rows = match entry.kind {
            EntityKind::Office => change_list(entry, &offices, needle.as_deref(), office_field),
            EntityKind::Room => change_list(entry, &rooms, needle.as_deref(), room_field),
            EntityKind::Equipment => {
                change_list(entry, &equipment, needle.as_deref(), |item, field| {
                    equipment_field(item, field, &parents)
                })
            }
        };
        print_change_list(entry, &rows);
        println!();
    }
    Ok(())
}
