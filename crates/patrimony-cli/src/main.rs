use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod utils;
use commands::{
    AdminArgs, Backend, EquipmentCommand, InitArgs, OfficeCommand, RoomCommand, SchemaTarget,
    cmd_admin, cmd_dashboard, cmd_equipment, cmd_init, cmd_office, cmd_room, cmd_schema, cmd_sql,
};

/// patrimony command-line interface.
#[derive(Parser, Debug)]
#[command(name = "patrimony", author, version, about)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize patrimony.json with defaults.
    Init(InitArgs),
    /// Manage offices.
    #[command(subcommand)]
    Office(OfficeCommand),
    /// Manage rooms.
    #[command(subcommand)]
    Room(RoomCommand),
    /// Manage equipment.
    #[command(subcommand)]
    Equipment(EquipmentCommand),
    /// Show inventory totals.
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// Show the admin registration table and its change lists.
    Admin(AdminArgs),
    /// Print the JSON Schema of a form or of the configuration.
    Schema {
        #[arg(value_enum)]
        target: SchemaTarget,
        /// Write `<target>.schema.json` into this directory instead of stdout.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },
    /// Print the SQL schema (tables and indexes).
    Sql {
        #[arg(long, value_enum, default_value_t = Backend::Postgres)]
        backend: Backend,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.command {
        Commands::Init(args) => cmd_init(args),
        Commands::Office(command) => cmd_office(command),
        Commands::Room(command) => cmd_room(command),
        Commands::Equipment(command) => cmd_equipment(command),
        Commands::Dashboard { json } => cmd_dashboard(json),
        Commands::Admin(args) => cmd_admin(args),
        Commands::Schema { target, out } => cmd_schema(target, out.as_deref()),
        Commands::Sql { backend } => cmd_sql(backend),
    }
}
