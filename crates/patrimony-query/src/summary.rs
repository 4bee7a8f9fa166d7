//! Dashboard figures computed over the full collections.

use std::collections::BTreeMap;

use patrimony_core::{Equipment, EquipmentState, Office, Room};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfficeSummary {
    pub count: usize,
    /// Missing surfaces count as 0.
    pub total_surface: Decimal,
    pub total_capacity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub count: usize,
    pub available: usize,
    pub total_surface: Decimal,
    pub total_capacity: u64,
    /// Mean of the per-room capacity / surface ratios, over rooms recording
    /// both, rounded to 2 decimals. `None` when no room qualifies.
    pub mean_occupancy: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentSummary {
    pub count: usize,
    /// Σ unit price × quantity; items without a price add nothing.
    pub total_value: Decimal,
    /// Item count per state. States with no item are absent.
    pub by_state: BTreeMap<EquipmentState, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub offices: OfficeSummary,
    pub rooms: RoomSummary,
    pub equipment: EquipmentSummary,
}

pub fn aggregate_dashboard<'a>(
    offices: impl IntoIterator<Item = &'a Office>,
    rooms: impl IntoIterator<Item = &'a Room>,
    equipment: impl IntoIterator<Item = &'a Equipment>,
) -> DashboardSummary {
    DashboardSummary {
        offices: summarize_offices(offices),
        rooms: summarize_rooms(rooms),
        equipment: summarize_equipment(equipment),
    }
}

fn summarize_offices<'a>(offices: impl IntoIterator<Item = &'a Office>) -> OfficeSummary {
    offices
        .into_iter()
        .fold(OfficeSummary::default(), |mut acc, office| {
            acc.count += 1;
            if let Some(surface) = office.surface_area {
                acc.total_surface = acc.total_surface.saturating_add(surface);
            }
            acc.total_capacity += u64::from(office.capacity.unwrap_or(0));
            acc
        })
}

fn summarize_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> RoomSummary {
    let mut summary = RoomSummary::default();
    let mut ratio_sum = Decimal::ZERO;
    let mut ratio_count = 0u32;

    for room in rooms {
        summary.count += 1;
        if room.available {
            summary.available += 1;
        }
        if let Some(surface) = room.surface_area {
            summary.total_surface = summary.total_surface.saturating_add(surface);
        }
        summary.total_capacity += u64::from(room.capacity.unwrap_or(0));

        if let Some(ratio) = room.density() {
            ratio_sum = ratio_sum.saturating_add(ratio);
            ratio_count += 1;
        }
    }

    summary.mean_occupancy = ratio_sum
        .checked_div(Decimal::from(ratio_count))
        .map(|mean| mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero));
    summary
}

fn summarize_equipment<'a>(equipment: impl IntoIterator<Item = &'a Equipment>) -> EquipmentSummary {
    let mut summary = EquipmentSummary::default();
    for item in equipment {
        summary.count += 1;
        if let Some(price) = item.unit_price {
            let value = price.saturating_mul(Decimal::from(item.quantity));
            summary.total_value = summary.total_value.saturating_add(value);
        }
        *summary.by_state.entry(item.state).or_default() += 1;
    }
    summary
}
