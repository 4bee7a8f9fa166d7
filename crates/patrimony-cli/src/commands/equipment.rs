use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use patrimony_core::{
    Equipment, EquipmentId, EquipmentInput, EquipmentOrder, EquipmentState, Location,
    LocationKind, OfficeId, RoomId,
};
use patrimony_query::EquipmentFilter;
use rust_decimal::Decimal;

use crate::utils::{confirm, open_inventory, or_dash, print_json, report};

#[derive(Args, Debug)]
pub struct EquipmentFields {
    /// Room holding the item.
    #[arg(long)]
    pub room: Option<u64>,
    /// Office holding the item.
    #[arg(long)]
    pub office: Option<u64>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<i64>,
    #[arg(long, value_enum)]
    pub state: Option<EquipmentState>,
    #[arg(long)]
    pub serial: Option<String>,
    /// Acquisition date, YYYY-MM-DD.
    #[arg(long)]
    pub acquired: Option<NaiveDate>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Decimal>,
    /// Forget the recorded acquisition date.
    #[arg(long, conflicts_with = "acquired")]
    pub clear_acquired: bool,
    /// Forget the recorded unit price.
    #[arg(long, conflicts_with = "price")]
    pub clear_price: bool,
}

impl EquipmentFields {
    fn apply(self, input: &mut EquipmentInput) {
        // A new location replaces the old one as a whole.
        if self.room.is_some() || self.office.is_some() {
            input.room = self.room.map(RoomId);
            input.office = self.office.map(OfficeId);
        }
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(quantity) = self.quantity {
            input.quantity = quantity;
        }
        if let Some(state) = self.state {
            input.state = state;
        }
        if let Some(serial) = self.serial {
            input.serial_number = serial;
        }
        if self.acquired.is_some() || self.clear_acquired {
            input.acquisition_date = self.acquired;
        }
        if self.price.is_some() || self.clear_price {
            input.unit_price = self.price;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum EquipmentCommand {
    /// Record an equipment item in exactly one room or office.
    Add {
        #[command(flatten)]
        fields: EquipmentFields,
    },
    /// List equipment.
    List {
        /// Text matched against name and state.
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        state: Option<EquipmentState>,
        /// Only items held by rooms, or by offices.
        #[arg(long, value_enum)]
        location: Option<LocationKind>,
        #[arg(long, value_enum, default_value_t = EquipmentOrder::Name)]
        order: EquipmentOrder,
        #[arg(long)]
        json: bool,
    },
    /// Show an equipment item.
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Change an item; omitted fields keep their value.
    Edit {
        id: u64,
        #[command(flatten)]
        fields: EquipmentFields,
    },
    Delete {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
}

fn location_tag(location: Location) -> String {
    match location {
        Location::Room(id) => format!("room #{id}"),
        Location::Office(id) => format!("office #{id}"),
    }
}

pub(crate) fn print_equipment_line(item: &Equipment) {
    println!(
        "{} {} x{} {} {} {}",
        format!("#{}", item.id).bright_yellow(),
        item.to_string().bright_white().bold(),
        item.quantity,
        item.state.to_string().cyan(),
        location_tag(item.location).white(),
        format!("value {}", or_dash(item.total_value())).white(),
    );
}

pub fn cmd_equipment(command: EquipmentCommand) -> Result<()> {
    let (_config, mut inventory) = open_inventory()?;
    match command {
        EquipmentCommand::Add { fields } => {
            let mut input = EquipmentInput::default();
            fields.apply(&mut input);
            let item = inventory.create_equipment(&input).map_err(report)?;
            println!("{} {}", "Created equipment".bright_green(), item.id);
        }
        EquipmentCommand::List {
            search,
            state,
            location,
            order,
            json,
        } => {
            let spec = EquipmentFilter {
                search,
                state,
                location,
            };
            let items = inventory.list_equipment(&spec, order)?;
            if json {
                return print_json(&items);
            }
            println!(
                "{} {}",
                "Equipment:".bright_cyan().bold(),
                items.len().to_string().bright_yellow()
            );
            for item in &items {
                print_equipment_line(item);
            }
        }
        EquipmentCommand::Show { id, json } => {
            let item = inventory.get_equipment(EquipmentId(id))?;
            let location = inventory.location_label(&item)?;
            if json {
                return print_json(&serde_json::json!({
                    "equipment": item,
                    "location": location,
                    "total_value": item.total_value(),
                }));
            }
            print_equipment_line(&item);
            println!("  {} {}", "Location:".bright_cyan(), location);
            if !item.serial_number.is_empty() {
                println!("  {} {}", "Serial:".bright_cyan(), item.serial_number);
            }
            if !item.description.is_empty() {
                println!("  {} {}", "Description:".bright_cyan(), item.description);
            }
            println!(
                "  {} {}",
                "Acquired:".bright_cyan(),
                or_dash(item.acquisition_date)
            );
            println!("  {} {}", "Unit price:".bright_cyan(), or_dash(item.unit_price));
        }
        EquipmentCommand::Edit { id, fields } => {
            let id = EquipmentId(id);
            let mut input = EquipmentInput::from(&inventory.get_equipment(id)?);
            fields.apply(&mut input);
            inventory.update_equipment(id, &input).map_err(report)?;
            println!("{} {}", "Updated equipment".bright_green(), id);
        }
        EquipmentCommand::Delete { id, yes } => {
            let id = EquipmentId(id);
            let item = inventory.get_equipment(id)?;
            if !confirm(&format!("Delete equipment '{item}'?"), yes)? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }
            inventory.delete_equipment(id)?;
            println!("{} {}", "Deleted equipment".bright_green(), id);
        }
    }
    Ok(())
}
