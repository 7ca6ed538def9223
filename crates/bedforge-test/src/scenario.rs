//! Small hand-built instances with known outcomes.
//!
//! # Example
//!
//! ```
//! use bedforge_test::scenario::overbooked;
//!
//! let instance = overbooked();
//! assert_eq!(instance.bed_count(), 1);
//! assert_eq!(instance.patient_count(), 2);
//! ```

use bedforge_core::{
    Department, DoctoringLevel, FeatureRequest, Gender, GenderPolicy, Instance, Patient, Room,
};

fn general() -> Department {
    Department::new(0, "General")
        .with_age_range(0, 120)
        .with_level(0, DoctoringLevel::Complete)
}

/// Two mixed rooms of two beds, three patients on days 0..3.
///
/// Every room is feasible and free for every patient, so any placement
/// with at most two patients per room costs 0.
pub fn two_rooms_three_patients() -> Instance {
    Instance::builder(3)
        .with_department(general())
        .with_room(Room::new(0, "A", 2, 0))
        .with_room(Room::new(1, "B", 2, 0))
        .with_patient(Patient::new(0, "P0", Gender::Male, 40, 0, 0, 3))
        .with_patient(Patient::new(1, "P1", Gender::Female, 55, 0, 0, 3))
        .with_patient(Patient::new(2, "P2", Gender::Male, 23, 0, 0, 3))
        .build()
        .expect("valid scenario")
}

/// A female patient whose only room is male-only.
pub fn male_only_female() -> Instance {
    Instance::builder(2)
        .with_department(general())
        .with_room(Room::new(0, "M", 1, 0).with_policy(GenderPolicy::MaleOnly))
        .with_patient(Patient::new(0, "F", Gender::Female, 62, 0, 0, 2))
        .build()
        .expect("valid scenario")
}

/// One bed, two patients needing it on the same nights, no room to delay.
///
/// No construction attempt can ever succeed.
pub fn overbooked() -> Instance {
    Instance::builder(2)
        .with_department(general())
        .with_room(Room::new(0, "Solo", 1, 0))
        .with_patient(Patient::new(0, "P0", Gender::Male, 30, 0, 0, 2))
        .with_patient(Patient::new(1, "P1", Gender::Male, 31, 0, 0, 2))
        .build()
        .expect("valid scenario")
}

/// Whether construction succeeds first time depends on the random room
/// order.
///
/// Room A (oxygen) is feasible for both patients, room B only for P0.
/// An attempt that puts P0 in A strands P1 and must restart.
pub fn seed_sensitive() -> Instance {
    Instance::builder(3)
        .with_department(general())
        .with_room(Room::new(0, "A", 1, 0).with_feature(0))
        .with_room(Room::new(1, "B", 1, 0))
        .with_patient(Patient::new(0, "Flexible", Gender::Male, 45, 0, 0, 3))
        .with_patient(
            Patient::new(1, "Oxygen", Gender::Female, 70, 0, 0, 3)
                .with_request(0, FeatureRequest::Needed),
        )
        .build()
        .expect("valid scenario")
}

/// Two single rooms where only a delayed admission reaches the cheap room.
///
/// Both patients prefer the feature only room W has. P1 is registered
/// on day 0 for admission on day 1. The cheapest schedule keeps P0 in W
/// on days 0..2 and delays P1 by one day into W, at a cost of one delay.
pub fn delayed_admissions() -> Instance {
    Instance::builder(6)
        .with_department(general())
        .with_room(Room::new(0, "W", 1, 0).with_feature(0))
        .with_room(Room::new(1, "X", 1, 0))
        .with_patient(
            Patient::new(0, "P0", Gender::Male, 50, 0, 0, 2)
                .with_request(0, FeatureRequest::Preferred),
        )
        .with_patient(
            Patient::new(1, "P1", Gender::Female, 35, 0, 1, 3)
                .with_registration_day(0)
                .with_max_admission_day(3)
                .with_variability(1)
                .with_request(0, FeatureRequest::Preferred),
        )
        .build()
        .expect("valid scenario")
}

/// The two-room scenario plus a patient needing a feature no room has.
pub fn with_unplaceable_patient() -> Instance {
    Instance::builder(3)
        .with_department(general())
        .with_room(Room::new(0, "A", 2, 0))
        .with_room(Room::new(1, "B", 2, 0))
        .with_feature_count(2)
        .with_patient(Patient::new(0, "P0", Gender::Male, 40, 0, 0, 3))
        .with_patient(
            Patient::new(1, "Isolation", Gender::Female, 28, 0, 1, 3)
                .with_request(1, FeatureRequest::Needed),
        )
        .with_patient(Patient::new(2, "P2", Gender::Male, 23, 0, 0, 2))
        .build()
        .expect("valid scenario")
}
