use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use patrimony_core::{Office, OfficeId, OfficeInput, OfficeKind, OfficeOrder};
use patrimony_query::OfficeFilter;
use rust_decimal::Decimal;

use crate::commands::equipment::print_equipment_line;
use crate::utils::{confirm, open_inventory, or_dash, print_json, report};

#[derive(Args, Debug)]
pub struct OfficeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
    /// Surface area in m².
    #[arg(long, allow_hyphen_values = true)]
    pub surface: Option<Decimal>,
    #[arg(long, allow_hyphen_values = true)]
    pub capacity: Option<i64>,
    /// Forget the recorded surface.
    #[arg(long, conflicts_with = "surface")]
    pub clear_surface: bool,
    /// Forget the recorded capacity.
    #[arg(long, conflicts_with = "capacity")]
    pub clear_capacity: bool,
}

impl OfficeFields {
    fn apply(self, input: &mut OfficeInput) {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(level) = self.level {
            input.level = level;
        }
        if self.surface.is_some() || self.clear_surface {
            input.surface_area = self.surface;
        }
        if self.capacity.is_some() || self.clear_capacity {
            input.capacity = self.capacity;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum OfficeCommand {
    /// Create an office.
    Add {
        #[arg(long, value_enum)]
        kind: OfficeKind,
        #[command(flatten)]
        fields: OfficeFields,
    },
    /// List offices.
    List {
        /// Text matched against name, type and level.
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        kind: Option<OfficeKind>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long, value_enum, default_value_t = OfficeOrder::Name)]
        order: OfficeOrder,
        #[arg(long)]
        json: bool,
    },
    /// Show an office and its equipment.
    Show {
        id: u64,
        #[arg(long)]
        json: bool,
    },
    /// Change an office; omitted fields keep their value.
    Edit {
        id: u64,
        #[arg(long, value_enum)]
        kind: Option<OfficeKind>,
        #[command(flatten)]
        fields: OfficeFields,
    },
    /// Delete an office and its equipment.
    Delete {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
}

pub(crate) fn print_office_line(office: &Office) {
    let level = if office.level.is_empty() {
        "-"
    } else {
        office.level.as_str()
    };
    println!(
        "{} {} {} {} {} {}",
        format!("#{}", office.id).bright_yellow(),
        office.to_string().bright_white().bold(),
        office.kind.to_string().cyan(),
        format!("level {level}").white(),
        format!("{} m²", or_dash(office.surface_area)).white(),
        format!("capacity {}", or_dash(office.capacity)).white(),
    );
}

pub fn cmd_office(command: OfficeCommand) -> Result<()> {
    let (_config, mut inventory) = open_inventory()?;
    match command {
        OfficeCommand::Add { kind, fields } => {
            let mut input = OfficeInput::new(kind);
            fields.apply(&mut input);
            let office = inventory.create_office(&input).map_err(report)?;
            println!("{} {}", "Created office".bright_green(), office.id);
        }
        OfficeCommand::List {
            search,
            kind,
            level,
            order,
            json,
        } => {
            let spec = OfficeFilter {
                search,
                kind,
                level,
            };
            let offices = inventory.list_offices(&spec, order)?;
            if json {
                return print_json(&offices);
            }
            println!(
                "{} {}",
                "Offices:".bright_cyan().bold(),
                offices.len().to_string().bright_yellow()
            );
            for office in &offices {
                print_office_line(office);
            }
        }
        OfficeCommand::Show { id, json } => {
            let id = OfficeId(id);
            let office = inventory.get_office(id)?;
            let equipment = inventory.equipment_in_office(id)?;
            if json {
                return print_json(&serde_json::json!({
                    "office": office,
                    "equipment": equipment,
                }));
            }
            print_office_line(&office);
            println!(
                "{} {}",
                "Equipment:".bright_cyan().bold(),
                equipment.len().to_string().bright_yellow()
            );
            for item in &equipment {
                print_equipment_line(item);
            }
        }
        OfficeCommand::Edit { id, kind, fields } => {
            let id = OfficeId(id);
            let mut input = OfficeInput::from(&inventory.get_office(id)?);
            if let Some(kind) = kind {
                input.kind = kind;
            }
            fields.apply(&mut input);
            inventory.update_office(id, &input).map_err(report)?;
            println!("{} {}", "Updated office".bright_green(), id);
        }
        OfficeCommand::Delete { id, yes } => {
            let id = OfficeId(id);
            let office = inventory.get_office(id)?;
            if !confirm(&format!("Delete office '{office}' and its equipment?"), yes)? {
                println!("{}", "Cancelled.".yellow());
                return Ok(());
            }
            let removed = inventory.delete_office(id)?;
            println!(
                "{} {} ({} equipment removed)",
                "Deleted office".bright_green(),
                id,
                removed.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn fields() -> OfficeFields {
        OfficeFields {
            name: None,
            level: None,
            surface: None,
            capacity: None,
            clear_surface: false,
            clear_capacity: false,
        }
    }

    fn stored() -> OfficeInput {
        OfficeInput {
            name: "Direction".into(),
            surface_area: Some(dec!(20)),
            capacity: Some(4),
            ..OfficeInput::new(OfficeKind::BoxOffice)
        }
    }

    #[rstest]
    #[case::untouched(fields(), Some(dec!(20)), Some(4))]
    #[case::replaced(
        OfficeFields { surface: Some(dec!(30)), capacity: Some(6), ..fields() },
        Some(dec!(30)),
        Some(6)
    )]
    #[case::surface_cleared(
        OfficeFields { clear_surface: true, ..fields() },
        None,
        Some(4)
    )]
    #[case::capacity_cleared(
        OfficeFields { clear_capacity: true, ..fields() },
        Some(dec!(20)),
        None
    )]
    fn edit_sets_or_clears_optional_fields(
        #[case] fields: OfficeFields,
        #[case] surface: Option<Decimal>,
        #[case] capacity: Option<i64>,
    ) {
        let mut input = stored();
        fields.apply(&mut input);
        assert_eq!(input.name, "Direction");
        assert_eq!(input.surface_area, surface);
        assert_eq!(input.capacity, capacity);
    }
}
