use patrimony_core::{
    Choice, EquipmentOrder, EquipmentState, LocationKind, OfficeKind, OfficeOrder, RoomKind,
    RoomOrder,
};
use sea_query::{Alias, Cond, ConditionExpression, Order, Query, SelectStatement};

use super::helpers::{col, lower, lower_contains};
use super::schema::{EQUIPMENT_TABLE, OFFICE_TABLE, ROOM_TABLE};
use super::types::BuiltQuery;
use crate::filter::{EquipmentFilter, OfficeFilter, RoomFilter, normalize_search};

const OFFICE_COLUMNS: &[&str] = &[
    "id",
    "kind",
    "name",
    "level",
    "surface_area",
    "capacity",
    "created_at",
    "updated_at",
];

const ROOM_COLUMNS: &[&str] = &[
    "id",
    "kind",
    "name",
    "level",
    "capacity",
    "surface_area",
    "equipment_notes",
    "available",
    "picture_file_name",
    "picture_size_bytes",
    "picture_content_type",
    "created_at",
    "updated_at",
];

const EQUIPMENT_COLUMNS: &[&str] = &[
    "id",
    "room_id",
    "office_id",
    "name",
    "description",
    "quantity",
    "state",
    "serial_number",
    "acquisition_date",
    "unit_price",
    "created_at",
    "updated_at",
];

/// Codes of the choices whose code or label contains `needle`. Lets SQL match
/// enum columns the same way the in-memory filter does.
fn matching_codes<C: Choice>(needle: &str) -> Vec<&'static str> {
    C::ALL
        .iter()
        .filter(|choice| choice.matches_text(needle))
        .map(|choice| choice.code())
        .collect()
}

/// OR group for a free-text search over text columns and one enum column.
fn search_group<C: Choice>(
    needle: &str,
    text_columns: &[&str],
    enum_column: &str,
) -> ConditionExpression {
    let mut any = Cond::any();
    for column in text_columns {
        any = any.add(lower_contains(column, needle));
    }
    let codes = matching_codes::<C>(needle);
    if !codes.is_empty() {
        any = any.add(col(enum_column).is_in(codes));
    }
    any.into()
}

fn base_select(table: &str, columns: &[&str]) -> SelectStatement {
    Query::select()
        .columns(columns.iter().map(|c| Alias::new(*c)))
        .from(Alias::new(table))
        .to_owned()
}

fn finish(
    mut stmt: SelectStatement,
    parts: Vec<ConditionExpression>,
    sort_column: &str,
) -> BuiltQuery {
    if !parts.is_empty() {
        let all = parts.into_iter().fold(Cond::all(), |all, part| all.add(part));
        stmt.cond_where(all);
    }
    stmt.order_by_expr(lower(sort_column), Order::Asc)
        .order_by(Alias::new("id"), Order::Asc);
    BuiltQuery::Select(Box::new(stmt))
}

pub fn select_offices(filter: &OfficeFilter, order: OfficeOrder) -> BuiltQuery {
    let mut parts = Vec::new();
    if let Some(needle) = normalize_search(filter.search.as_deref()) {
        parts.push(search_group::<OfficeKind>(&needle, &["name", "level"], "kind"));
    }
    if let Some(kind) = filter.kind {
        parts.push(col("kind").eq(kind.code()).into());
    }
    if let Some(level) = normalize_search(filter.level.as_deref()) {
        parts.push(lower_contains("level", &level).into());
    }
    let sort = match order {
        OfficeOrder::Name => "name",
        OfficeOrder::Level => "level",
    };
    finish(base_select(OFFICE_TABLE, OFFICE_COLUMNS), parts, sort)
}

pub fn select_rooms(filter: &RoomFilter, order: RoomOrder) -> BuiltQuery {
    let mut parts = Vec::new();
    if let Some(needle) = normalize_search(filter.search.as_deref()) {
        parts.push(search_group::<RoomKind>(&needle, &["name", "level"], "kind"));
    }
    if let Some(kind) = filter.kind {
        parts.push(col("kind").eq(kind.code()).into());
    }
    if let Some(available) = filter.available {
        parts.push(col("available").eq(available).into());
    }
    if let Some(min) = filter.capacity_min {
        // NULL capacities never compare true
        parts.push(col("capacity").gte(min).into());
    }
    let sort = match order {
        RoomOrder::Level => "level",
        RoomOrder::Name => "name",
    };
    finish(base_select(ROOM_TABLE, ROOM_COLUMNS), parts, sort)
}

pub fn select_equipment(filter: &EquipmentFilter, order: EquipmentOrder) -> BuiltQuery {
    let mut parts = Vec::new();
    if let Some(needle) = normalize_search(filter.search.as_deref()) {
        parts.push(search_group::<EquipmentState>(&needle, &["name"], "state"));
    }
    if let Some(state) = filter.state {
        parts.push(col("state").eq(state.code()).into());
    }
    match filter.location {
        Some(LocationKind::Room) => parts.push(col("room_id").is_not_null().into()),
        Some(LocationKind::Office) => parts.push(col("office_id").is_not_null().into()),
        None => {}
    }
    let sort = match order {
        EquipmentOrder::Name => "name",
        EquipmentOrder::State => "state",
    };
    finish(base_select(EQUIPMENT_TABLE, EQUIPMENT_COLUMNS), parts, sort)
}
