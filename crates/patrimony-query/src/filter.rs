//! In-memory filtering and ordering of record collections.
//!
//! Every filter is a set of optional dimensions combined with AND. The
//! free-text dimension matches a case-insensitive substring against several
//! fields combined with OR. Enum fields match through their code and label.

use std::cmp::Ordering;

use patrimony_core::{
    Choice, Equipment, EquipmentOrder, EquipmentState, LocationKind, Office, OfficeKind,
    OfficeOrder, Room, RoomKind, RoomOrder,
};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Trimmed, lowercased search text, or `None` when nothing is left.
pub(crate) fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// A record type that can be filtered and ordered.
pub trait Filterable {
    type Filter;
    type Order: Copy;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Lowercased text the records are ordered by.
    fn sort_key(&self, order: Self::Order) -> String;

    /// Tie-breaker after the sort key.
    fn id_key(&self) -> u64;
}

/// Keep the records matching `spec`, ordered by `order` then by id.
pub fn filter<'a, T, I>(collection: I, spec: &T::Filter, order: T::Order) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut keyed: Vec<(String, &'a T)> = collection
        .into_iter()
        .filter(|item| item.matches(spec))
        .map(|item| (item.sort_key(order), item))
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| match ka.cmp(kb) {
        Ordering::Equal => a.id_key().cmp(&b.id_key()),
        other => other,
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeFilter {
    /// Matched against name, type and level.
    pub search: Option<String>,
    pub kind: Option<OfficeKind>,
    /// Substring of the level.
    pub level: Option<String>,
}

impl OfficeFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn of_kind(kind: OfficeKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Build from query-string pairs: `search`, `type`, `level`.
    /// Unknown keys are ignored.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, QueryError> {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => filter.search = non_empty(value),
                "type" => filter.kind = parse_choice(value)?,
                "level" => filter.level = non_empty(value),
                _ => {}
            }
        }
        Ok(filter)
    }
}

impl Filterable for Office {
    type Filter = OfficeFilter;
    type Order = OfficeOrder;

    fn matches(&self, filter: &OfficeFilter) -> bool {
        if let Some(needle) = normalize_search(filter.search.as_deref()) {
            let hit = contains_ci(&self.name, &needle)
                || self.kind.matches_text(&needle)
                || contains_ci(&self.level, &needle);
            if !hit {
                return false;
            }
        }
        if filter.kind.is_some_and(|kind| kind != self.kind) {
            return false;
        }
        match normalize_search(filter.level.as_deref()) {
            Some(level) => contains_ci(&self.level, &level),
            None => true,
        }
    }

    fn sort_key(&self, order: OfficeOrder) -> String {
        match order {
            OfficeOrder::Name => self.name.to_lowercase(),
            OfficeOrder::Level => self.level.to_lowercase(),
        }
    }

    fn id_key(&self) -> u64 {
        self.id.get()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    /// Matched against name, level and type.
    pub search: Option<String>,
    pub kind: Option<RoomKind>,
    pub available: Option<bool>,
    /// Rooms without a recorded capacity never satisfy this bound.
    pub capacity_min: Option<u32>,
}

impl RoomFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn of_kind(kind: RoomKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Build from query-string pairs: `search`, `type`, `available`,
    /// `capacity_min`. Unknown keys are ignored.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, QueryError> {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => filter.search = non_empty(value),
                "type" => filter.kind = parse_choice(value)?,
                "available" => filter.available = parse_bool(key, value)?,
                "capacity_min" => {
                    filter.capacity_min = match value.trim() {
                        "" => None,
                        raw => Some(raw.parse().map_err(|_| QueryError::InvalidParam {
                            param: key.to_string(),
                            value: value.to_string(),
                            reason: "expected a non-negative integer",
                        })?),
                    }
                }
                _ => {}
            }
        }
        Ok(filter)
    }
}

impl Filterable for Room {
    type Filter = RoomFilter;
    type Order = RoomOrder;

    fn matches(&self, filter: &RoomFilter) -> bool {
        if let Some(needle) = normalize_search(filter.search.as_deref()) {
            let hit = contains_ci(&self.name, &needle)
                || contains_ci(&self.level, &needle)
                || self.kind.matches_text(&needle);
            if !hit {
                return false;
            }
        }
        if filter.kind.is_some_and(|kind| kind != self.kind) {
            return false;
        }
        if filter.available.is_some_and(|available| available != self.available) {
            return false;
        }
        match filter.capacity_min {
            Some(min) => self.capacity.is_some_and(|capacity| capacity >= min),
            None => true,
        }
    }

    fn sort_key(&self, order: RoomOrder) -> String {
        match order {
            RoomOrder::Level => self.level.to_lowercase(),
            RoomOrder::Name => self.name.to_lowercase(),
        }
    }

    fn id_key(&self) -> u64 {
        self.id.get()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentFilter {
    /// Matched against name and state.
    pub search: Option<String>,
    pub state: Option<EquipmentState>,
    pub location: Option<LocationKind>,
}

impl EquipmentFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn in_state(state: EquipmentState) -> Self {
        Self {
            state: Some(state),
            ..Default::default()
        }
    }

    /// Build from query-string pairs: `search`, `state`, `location`
    /// (`room` or `office`). Unknown keys are ignored.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, QueryError> {
        let mut filter = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => filter.search = non_empty(value),
                "state" => filter.state = parse_choice(value)?,
                "location" => {
                    filter.location = match value.trim().to_lowercase().as_str() {
                        "" => None,
                        "room" => Some(LocationKind::Room),
                        "office" => Some(LocationKind::Office),
                        _ => {
                            return Err(QueryError::InvalidParam {
                                param: key.to_string(),
                                value: value.to_string(),
                                reason: "expected 'room' or 'office'",
                            });
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(filter)
    }
}

impl Filterable for Equipment {
    type Filter = EquipmentFilter;
    type Order = EquipmentOrder;

    fn matches(&self, filter: &EquipmentFilter) -> bool {
        if let Some(needle) = normalize_search(filter.search.as_deref()) {
            if !(contains_ci(&self.name, &needle) || self.state.matches_text(&needle)) {
                return false;
            }
        }
        if filter.state.is_some_and(|state| state != self.state) {
            return false;
        }
        match filter.location {
            Some(kind) => self.location.kind() == kind,
            None => true,
        }
    }

    fn sort_key(&self, order: EquipmentOrder) -> String {
        match order {
            EquipmentOrder::Name => self.name.to_lowercase(),
            EquipmentOrder::State => self.state.code().to_string(),
        }
    }

    fn id_key(&self) -> u64 {
        self.id.get()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_choice<C: Choice>(value: &str) -> Result<Option<C>, QueryError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(C::parse_choice(value)?))
}

fn parse_bool(param: &str, value: &str) -> Result<Option<bool>, QueryError> {
    match value.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(QueryError::InvalidParam {
            param: param.to_string(),
            value: value.to_string(),
            reason: "expected a boolean",
        }),
    }
}
