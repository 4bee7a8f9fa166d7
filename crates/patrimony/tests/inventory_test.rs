use patrimony::{
    Decimal, EquipmentFilter, EquipmentInput, EquipmentOrder, EquipmentState, FORM_KEY, FileStore,
    Inventory, MemoryStore, OfficeFilter, OfficeId, OfficeInput, OfficeKind, OfficeOrder, Room,
    RoomId, RoomInput, RoomKind, aggregate_dashboard, filter, validate_equipment, validate_office,
    validate_room,
};
use rstest::rstest;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn office_input(surface: Decimal, capacity: i64) -> OfficeInput {
    OfficeInput {
        surface_area: Some(surface),
        capacity: Some(capacity),
        ..OfficeInput::new(OfficeKind::BoxOffice)
    }
}

fn room_input(kind: RoomKind, name: &str, capacity: i64, surface: Decimal) -> RoomInput {
    RoomInput {
        name: name.into(),
        capacity: Some(capacity),
        surface_area: Some(surface),
        ..RoomInput::new(kind)
    }
}

#[rstest]
#[case::one_per_m2(dec!(10), 10, true)]
#[case::just_over(dec!(10), 11, false)]
#[case::sparse(dec!(250.5), 100, true)]
#[case::fractional_over(dec!(9.99), 10, false)]
#[case::no_one(dec!(10), 0, false)]
#[case::over_hundred(dec!(500), 101, false)]
#[case::zero_surface(dec!(0), 5, false)]
#[case::negative_surface(dec!(-4), 1, false)]
fn office_valid_iff_density_and_bounds_hold(
    #[case] surface: Decimal,
    #[case] capacity: i64,
    #[case] valid: bool,
) {
    assert_eq!(validate_office(&office_input(surface, capacity)).is_ok(), valid);
}

#[rstest]
#[case::half(10, dec!(20), true)]
#[case::just_over(11, dec!(20), false)]
#[case::roomy(4, dec!(30), true)]
#[case::packed(30, dec!(20), false)]
fn meeting_room_valid_iff_half_person_per_m2(
    #[case] capacity: i64,
    #[case] surface: Decimal,
    #[case] valid: bool,
) {
    let input = room_input(RoomKind::Meeting, "", capacity, surface);
    assert_eq!(validate_room(&input).is_ok(), valid);
}

#[rstest]
#[case::neither(None, None, false)]
#[case::room(Some(RoomId(1)), None, true)]
#[case::office(None, Some(OfficeId(1)), true)]
#[case::both(Some(RoomId(1)), Some(OfficeId(1)), false)]
fn equipment_needs_exactly_one_location(
    #[case] room: Option<RoomId>,
    #[case] office: Option<OfficeId>,
    #[case] valid: bool,
) {
    let input = EquipmentInput {
        room,
        office,
        ..Default::default()
    };
    let result = validate_equipment(&input);
    assert_eq!(result.is_ok(), valid);
    if let Err(errors) = result {
        assert!(errors.contains(FORM_KEY));
    }
}

#[test]
fn mean_occupancy_averages_per_room_ratios() {
    let mut inventory = Inventory::new(MemoryStore::new());
    inventory
        .create_room(&room_input(RoomKind::Plenary, "A", 10, dec!(20)))
        .unwrap();
    inventory
        .create_room(&room_input(RoomKind::Plenary, "B", 1, dec!(100)))
        .unwrap();

    let summary = inventory.dashboard().unwrap();
    assert_eq!(summary.rooms.mean_occupancy, Some(dec!(0.26)));
    assert_eq!(summary.rooms.total_capacity, 11);
}

#[test]
fn office_search_matches_name_and_type_label() {
    let mut inventory = Inventory::new(MemoryStore::new());
    let rdc = inventory
        .create_office(&OfficeInput {
            name: "Open Space RDC".into(),
            ..OfficeInput::new(OfficeKind::BoxOffice)
        })
        .unwrap();
    let floor = inventory
        .create_office(&OfficeInput {
            name: "open floor".into(),
            ..OfficeInput::new(OfficeKind::WholeFloor)
        })
        .unwrap();
    inventory
        .create_office(&OfficeInput {
            name: "Direction".into(),
            ..OfficeInput::new(OfficeKind::Partitioned)
        })
        .unwrap();

    let found = inventory
        .list_offices(&OfficeFilter::search("open"), OfficeOrder::Name)
        .unwrap();
    let ids: Vec<_> = found.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![floor.id, rdc.id]);
}

#[test]
fn equipment_total_skips_unpriced_items() {
    let mut inventory = Inventory::new(MemoryStore::new());
    let office = inventory
        .create_office(&OfficeInput::new(OfficeKind::OpenSpace))
        .unwrap();
    inventory
        .create_equipment(&EquipmentInput {
            name: "Server".into(),
            quantity: 2,
            unit_price: Some(dec!(5_000_000)),
            ..EquipmentInput::in_office(office.id)
        })
        .unwrap();
    inventory
        .create_equipment(&EquipmentInput {
            name: "Cable".into(),
            quantity: 3,
            state: EquipmentState::Poor,
            ..EquipmentInput::in_office(office.id)
        })
        .unwrap();

    let summary = inventory.dashboard().unwrap();
    assert_eq!(summary.equipment.total_value, dec!(10_000_000));
    assert_eq!(summary.equipment.count, 2);
    assert_eq!(summary.equipment.by_state.get(&EquipmentState::Good), Some(&1));
    assert_eq!(summary.equipment.by_state.get(&EquipmentState::Poor), Some(&1));
    assert!(!summary.equipment.by_state.contains_key(&EquipmentState::Average));
}

#[test]
fn room_delete_removes_its_equipment() {
    let mut inventory = Inventory::new(MemoryStore::new());
    let room = inventory
        .create_room(&room_input(RoomKind::Training, "Salle B", 8, dec!(40)))
        .unwrap();
    let chairs = inventory
        .create_equipment(&EquipmentInput {
            name: "Chairs".into(),
            quantity: 8,
            ..EquipmentInput::in_room(room.id)
        })
        .unwrap();
    let board = inventory
        .create_equipment(&EquipmentInput {
            name: "Whiteboard".into(),
            ..EquipmentInput::in_room(room.id)
        })
        .unwrap();

    let removed = inventory.delete_room(room.id).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(inventory.get_room(room.id).unwrap_err().is_not_found());
    assert!(inventory.get_equipment(chairs.id).unwrap_err().is_not_found());
    assert!(inventory.get_equipment(board.id).unwrap_err().is_not_found());
}

#[test]
fn filter_and_aggregate_work_on_plain_slices() {
    let mut inventory = Inventory::new(MemoryStore::new());
    let office = inventory
        .create_office(&OfficeInput::new(OfficeKind::OpenSpace))
        .unwrap();
    for (name, state) in [("Lamp", EquipmentState::OutOfService), ("Desk", EquipmentState::Good)] {
        inventory
            .create_equipment(&EquipmentInput {
                name: name.into(),
                state,
                ..EquipmentInput::in_office(office.id)
            })
            .unwrap();
    }
    let items = inventory
        .list_equipment(&EquipmentFilter::default(), EquipmentOrder::Name)
        .unwrap();

    let broken = filter(
        &items,
        &EquipmentFilter::in_state(EquipmentState::OutOfService),
        EquipmentOrder::Name,
    );
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].name, "Lamp");

    let no_rooms: Vec<Room> = Vec::new();
    let summary = aggregate_dashboard([&office], &no_rooms, &items);
    assert_eq!(summary.offices.count, 1);
    assert_eq!(summary.rooms.count, 0);
    assert_eq!(summary.equipment.count, 2);
}

#[test]
fn file_store_survives_reopen() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("inventory.yaml");

    let mut inventory = Inventory::new(FileStore::open(&path).unwrap());
    let room = inventory
        .create_room(&room_input(RoomKind::Conference, "Auditorium", 60, dec!(100)))
        .unwrap();
    drop(inventory);

    let reopened = Inventory::new(FileStore::open(&path).unwrap());
    assert_eq!(reopened.get_room(room.id).unwrap().name, "Auditorium");
}
