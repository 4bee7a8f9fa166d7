use anyhow::Result;
use colored::Colorize;
use patrimony_query::DashboardSummary;

use crate::utils::{open_inventory, or_dash, print_json};

pub fn cmd_dashboard(json: bool) -> Result<()> {
    let (_config, inventory) = open_inventory()?;
    let summary = inventory.dashboard()?;
    if json {
        return print_json(&summary);
    }
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    let offices = &summary.offices;
    println!(
        "{} {}",
        "Offices:".bright_cyan().bold(),
        offices.count.to_string().bright_yellow()
    );
    println!(
        "  {} {}",
        "Total surface:".cyan(),
        format!("{} m²", offices.total_surface).bright_white()
    );
    println!(
        "  {} {}",
        "Total capacity:".cyan(),
        offices.total_capacity.to_string().bright_white()
    );
    println!();

    let rooms = &summary.rooms;
    println!(
        "{} {}",
        "Rooms:".bright_cyan().bold(),
        rooms.count.to_string().bright_yellow()
    );
    println!(
        "  {} {}",
        "Available:".cyan(),
        rooms.available.to_string().bright_green()
    );
    println!(
        "  {} {}",
        "Total surface:".cyan(),
        format!("{} m²", rooms.total_surface).bright_white()
    );
    println!(
        "  {} {}",
        "Total capacity:".cyan(),
        rooms.total_capacity.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Mean occupancy:".cyan(),
        format!("{} persons/m²", or_dash(rooms.mean_occupancy)).bright_white()
    );
    println!();

    let equipment = &summary.equipment;
    println!(
        "{} {}",
        "Equipment:".bright_cyan().bold(),
        equipment.count.to_string().bright_yellow()
    );
    println!(
        "  {} {}",
        "Total value:".cyan(),
        equipment.total_value.to_string().bright_magenta()
    );
    for (state, count) in &equipment.by_state {
        println!(
            "  {} {}",
            format!("{state}:").cyan(),
            count.to_string().bright_white()
        );
    }
}
