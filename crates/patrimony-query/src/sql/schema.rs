use sea_query::{Alias, ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

use super::types::BuiltQuery;

pub const OFFICE_TABLE: &str = "office";
pub const ROOM_TABLE: &str = "room";
pub const EQUIPMENT_TABLE: &str = "equipment";

/// Width of enum code columns.
const CODE_LEN: u32 = 20;
/// Width of `name`, `level` and `serial_number`.
const TEXT_LEN: u32 = 100;

fn id_column() -> ColumnDef {
    ColumnDef::new(Alias::new("id"))
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn code_column(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .string_len(CODE_LEN)
        .not_null()
        .to_owned()
}

fn short_text_column(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .string_len(TEXT_LEN)
        .not_null()
        .default("")
        .to_owned()
}

fn long_text_column(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .text()
        .not_null()
        .default("")
        .to_owned()
}

fn timestamp_column(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name))
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn create_office() -> BuiltQuery {
    let stmt = Table::create()
        .table(Alias::new(OFFICE_TABLE))
        .col(id_column())
        .col(code_column("kind"))
        .col(short_text_column("name"))
        .col(short_text_column("level"))
        .col(ColumnDef::new(Alias::new("surface_area")).decimal_len(10, 2).null())
        .col(ColumnDef::new(Alias::new("capacity")).integer().null())
        .col(timestamp_column("created_at"))
        .col(timestamp_column("updated_at"))
        .to_owned();
    BuiltQuery::CreateTable(Box::new(stmt))
}

fn create_room() -> BuiltQuery {
    let stmt = Table::create()
        .table(Alias::new(ROOM_TABLE))
        .col(id_column())
        .col(code_column("kind"))
        .col(short_text_column("name"))
        .col(short_text_column("level"))
        .col(ColumnDef::new(Alias::new("capacity")).integer().null())
        .col(ColumnDef::new(Alias::new("surface_area")).decimal_len(10, 2).null())
        .col(long_text_column("equipment_notes"))
        .col(
            ColumnDef::new(Alias::new("available"))
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(Alias::new("picture_file_name")).string_len(255).null())
        .col(ColumnDef::new(Alias::new("picture_size_bytes")).big_integer().null())
        .col(ColumnDef::new(Alias::new("picture_content_type")).string_len(TEXT_LEN).null())
        .col(timestamp_column("created_at"))
        .col(timestamp_column("updated_at"))
        .to_owned();
    BuiltQuery::CreateTable(Box::new(stmt))
}

fn create_equipment() -> BuiltQuery {
    let stmt = Table::create()
        .table(Alias::new(EQUIPMENT_TABLE))
        .col(id_column())
        .col(ColumnDef::new(Alias::new("room_id")).big_integer().null())
        .col(ColumnDef::new(Alias::new("office_id")).big_integer().null())
        .col(short_text_column("name"))
        .col(long_text_column("description"))
        .col(
            ColumnDef::new(Alias::new("quantity"))
                .integer()
                .not_null()
                .default(1),
        )
        .col(
            ColumnDef::new(Alias::new("state"))
                .string_len(CODE_LEN)
                .not_null()
                .default("good"),
        )
        .col(short_text_column("serial_number"))
        .col(ColumnDef::new(Alias::new("acquisition_date")).date().null())
        .col(ColumnDef::new(Alias::new("unit_price")).decimal_len(12, 2).null())
        .col(timestamp_column("created_at"))
        .col(timestamp_column("updated_at"))
        .foreign_key(
            ForeignKey::create()
                .name("fk_equipment_room")
                .from(Alias::new(EQUIPMENT_TABLE), Alias::new("room_id"))
                .to(Alias::new(ROOM_TABLE), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_equipment_office")
                .from(Alias::new(EQUIPMENT_TABLE), Alias::new("office_id"))
                .to(Alias::new(OFFICE_TABLE), Alias::new("id"))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();
    BuiltQuery::CreateTable(Box::new(stmt))
}

fn create_index(column: &str) -> BuiltQuery {
    let stmt = Index::create()
        .name(format!("idx_{EQUIPMENT_TABLE}_{column}"))
        .table(Alias::new(EQUIPMENT_TABLE))
        .col(Alias::new(column))
        .to_owned();
    BuiltQuery::CreateIndex(Box::new(stmt))
}

/// Tables then indexes, in dependency order. Deleting a room or office
/// cascades to its equipment.
pub fn schema_statements() -> Vec<BuiltQuery> {
    vec![
        create_office(),
        create_room(),
        create_equipment(),
        create_index("room_id"),
        create_index("office_id"),
        create_index("state"),
    ]
}
