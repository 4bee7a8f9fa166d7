use chrono::{DateTime, Utc};
use patrimony_core::{Picture, Room, RoomId, RoomInput, RoomKind};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{FieldErrors, Violation};
use crate::limits::{
    PICTURE_MAX_BYTES, PICTURE_MIME_PREFIX, ROOM_MAX_CAPACITY, ROOM_MAX_SURFACE,
    ROOM_MIN_CAPACITY,
};
use crate::validate::{check_capacity, check_surface, check_text};

/// A room form that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRoom {
    kind: RoomKind,
    name: String,
    level: String,
    capacity: Option<u32>,
    surface_area: Option<Decimal>,
    equipment_notes: String,
    available: bool,
    picture: Option<Picture>,
}

impl ValidRoom {
    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    pub fn surface_area(&self) -> Option<Decimal> {
        self.surface_area
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn picture(&self) -> Option<&Picture> {
        self.picture.as_ref()
    }

    pub fn into_room(self, id: RoomId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Room {
        Room {
            id,
            kind: self.kind,
            name: self.name,
            level: self.level,
            capacity: self.capacity,
            surface_area: self.surface_area,
            equipment_notes: self.equipment_notes,
            available: self.available,
            picture: self.picture,
            created_at,
            updated_at,
        }
    }
}

/// Validate a room form: surface in [0.01, 10000], capacity in [1, 1000],
/// picture at most 5 MB with an `image/*` type, then the per-kind density cap.
pub fn validate_room(input: &RoomInput) -> Result<ValidRoom, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "name", &input.name);
    check_text(&mut errors, "level", &input.level);
    let surface_area =
        check_surface(&mut errors, input.surface_area, Some(ROOM_MAX_SURFACE));
    let capacity = check_capacity(&mut errors, input.capacity, ROOM_MIN_CAPACITY, ROOM_MAX_CAPACITY);
    if let Some(picture) = &input.picture {
        check_picture(&mut errors, picture);
    }

    if errors.is_empty() {
        check_density(&mut errors, input.kind, surface_area, capacity);
    }

    errors.into_result(ValidRoom {
        kind: input.kind,
        name: input.name.clone(),
        level: input.level.clone(),
        capacity,
        surface_area,
        equipment_notes: input.equipment_notes.clone(),
        available: input.available,
        picture: input.picture.clone(),
    })
}

fn check_picture(errors: &mut FieldErrors, picture: &Picture) {
    if picture.size_bytes > PICTURE_MAX_BYTES {
        errors.add(
            "picture",
            Violation::PictureTooLarge {
                size_bytes: picture.size_bytes,
            },
        );
    }
    if !picture
        .content_type
        .to_ascii_lowercase()
        .starts_with(PICTURE_MIME_PREFIX)
    {
        errors.add(
            "picture",
            Violation::PictureNotImage {
                content_type: picture.content_type.clone(),
            },
        );
    }
}

fn check_density(
    errors: &mut FieldErrors,
    kind: RoomKind,
    surface: Option<Decimal>,
    capacity: Option<u32>,
) {
    let (Some(surface), Some(capacity)) = (surface, capacity) else {
        return;
    };
    // An overflowing ratio is above any maximum.
    let ratio = Decimal::from(capacity)
        .checked_div(surface)
        .unwrap_or(Decimal::MAX);
    let max = kind.max_density();
    if ratio > max {
        errors.add_form(Violation::RoomDensity {
            kind,
            capacity,
            surface,
            ratio: ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            max,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FORM_KEY;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn room(kind: RoomKind, surface: Option<Decimal>, capacity: Option<i64>) -> RoomInput {
        RoomInput {
            surface_area: surface,
            capacity,
            ..RoomInput::new(kind)
        }
    }

    fn picture(size_bytes: u64, content_type: &str) -> Picture {
        Picture {
            file_name: "room.png".into(),
            size_bytes,
            content_type: content_type.into(),
        }
    }

    #[rstest]
    #[case::meeting_at_limit(RoomKind::Meeting, dec!(20), 10)]
    #[case::conference_at_limit(RoomKind::Conference, dec!(100), 67)]
    #[case::plenary_at_limit(RoomKind::Plenary, dec!(300), 300)]
    #[case::training_at_limit(RoomKind::Training, dec!(50), 20)]
    #[case::largest(RoomKind::Plenary, dec!(10000), 1000)]
    fn accepts_density_up_to_kind_maximum(
        #[case] kind: RoomKind,
        #[case] surface: Decimal,
        #[case] capacity: i64,
    ) {
        let valid = validate_room(&room(kind, Some(surface), Some(capacity))).unwrap();
        assert_eq!(valid.kind(), kind);
        assert!(valid.available());
    }

    #[rstest]
    #[case::meeting(RoomKind::Meeting, dec!(20), 11)]
    #[case::conference(RoomKind::Conference, dec!(100), 68)]
    #[case::plenary(RoomKind::Plenary, dec!(300), 301)]
    #[case::training(RoomKind::Training, dec!(50), 21)]
    fn rejects_density_above_kind_maximum(
        #[case] kind: RoomKind,
        #[case] surface: Decimal,
        #[case] capacity: i64,
    ) {
        let errors = validate_room(&room(kind, Some(surface), Some(capacity))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.form(),
            [Violation::RoomDensity { kind: k, .. }] if *k == kind
        ));
    }

    #[rstest]
    #[case::zero_surface(Some(dec!(0)), None, "surface_area")]
    #[case::below_smallest_surface(Some(dec!(0.009)), None, "surface_area")]
    #[case::vanishing_surface(Some(Decimal::new(1, 28)), Some(1000), "surface_area")]
    #[case::huge_surface(Some(dec!(10000.01)), None, "surface_area")]
    #[case::zero_capacity(None, Some(0), "capacity")]
    #[case::capacity_over_1000(None, Some(1001), "capacity")]
    fn rejects_field(
        #[case] surface: Option<Decimal>,
        #[case] capacity: Option<i64>,
        #[case] field: &str,
    ) {
        let errors = validate_room(&room(RoomKind::Plenary, surface, capacity)).unwrap_err();
        assert!(errors.contains(field));
        assert!(!errors.contains(FORM_KEY));
    }

    #[rstest]
    #[case::smallest(dec!(0.01), None, true)]
    #[case::just_below(dec!(0.009), None, false)]
    #[case::smallest_with_one_person(dec!(0.01), Some(1), false)]
    fn smallest_surface_boundary(
        #[case] surface: Decimal,
        #[case] capacity: Option<i64>,
        #[case] ok: bool,
    ) {
        let input = room(RoomKind::Meeting, Some(surface), capacity);
        assert_eq!(validate_room(&input).is_ok(), ok);
    }

    #[rstest]
    #[case::meeting(RoomKind::Meeting)]
    #[case::plenary(RoomKind::Plenary)]
    fn overflowing_ratio_is_too_dense(#[case] kind: RoomKind) {
        let mut errors = FieldErrors::new();
        check_density(&mut errors, kind, Some(Decimal::new(1, 28)), Some(1000));
        assert!(matches!(
            errors.form(),
            [Violation::RoomDensity { capacity: 1000, .. }]
        ));
    }

    #[test]
    fn density_message_names_kind_and_both_ratios() {
        let errors =
            validate_room(&room(RoomKind::Meeting, Some(dec!(10)), Some(6))).unwrap_err();
        let message = errors.to_string();
        assert!(message.contains("Meeting room"), "{message}");
        assert!(message.contains("0.60 persons/m²"), "{message}");
        assert!(message.contains("0.50 persons/m²"), "{message}");
    }

    #[rstest]
    #[case::png(picture(1024, "image/png"), true)]
    #[case::exactly_five_mb(picture(5_242_880, "image/jpeg"), true)]
    #[case::over_five_mb(picture(5_242_881, "image/jpeg"), false)]
    #[case::pdf(picture(1024, "application/pdf"), false)]
    fn checks_picture(#[case] picture: Picture, #[case] ok: bool) {
        let input = RoomInput {
            picture: Some(picture),
            ..RoomInput::new(RoomKind::Training)
        };
        assert_eq!(validate_room(&input).is_ok(), ok);
    }

    #[test]
    fn oversized_non_image_reports_both() {
        let input = RoomInput {
            picture: Some(picture(6_000_000, "text/plain")),
            ..RoomInput::new(RoomKind::Meeting)
        };
        let errors = validate_room(&input).unwrap_err();
        assert_eq!(errors.get("picture").len(), 2);
    }

    /// Meeting rooms fail exactly when c/s > 0.5.
    #[test]
    fn meeting_density_sweep() {
        for surface in [dec!(2), dec!(10), dec!(33.3), dec!(80)] {
            for capacity in [1_i64, 5, 16, 17, 40, 41] {
                let expected_fail = Decimal::from(capacity) / surface > dec!(0.5);
                let result = validate_room(&room(RoomKind::Meeting, Some(surface), Some(capacity)));
                assert_eq!(
                    result.is_err(),
                    expected_fail,
                    "surface={surface} capacity={capacity}"
                );
            }
        }
    }

    #[test]
    fn into_room_keeps_every_field() {
        let input = RoomInput {
            name: "Salle A".into(),
            level: "R+1".into(),
            equipment_notes: "Projector".into(),
            available: false,
            ..room(RoomKind::Conference, Some(dec!(30)), Some(12))
        };
        let now = Utc::now();
        let record = validate_room(&input).unwrap().into_room(RoomId(7), now, now);
        assert_eq!(record.id, RoomId(7));
        assert_eq!(record.name, "Salle A");
        assert_eq!(record.capacity, Some(12));
        assert_eq!(record.equipment_notes, "Projector");
        assert!(!record.available);
    }
}
