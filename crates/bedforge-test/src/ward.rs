//! Seeded generator for medium-sized hospital wards.
//!
//! Generated wards always admit an initial schedule: room 0 belongs to a
//! general department treating every specialism at every age, carries
//! every feature, and has as many beds as the busiest night needs.
//!
//! # Example
//!
//! ```
//! use bedforge_test::ward::WardParams;
//!
//! let params = WardParams { patients: 12, ..WardParams::default() };
//! let a = params.generate(3);
//! let b = params.generate(3);
//! assert_eq!(a, b);
//! assert_eq!(a.patient_count(), 12);
//! ```

use bedforge_core::{
    Department, DoctoringLevel, FeatureRequest, Gender, GenderPolicy, Instance, Patient, Room,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Size parameters of a generated ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WardParams {
    pub horizon: usize,
    /// Rooms besides the general overflow room.
    pub rooms: usize,
    pub patients: usize,
    pub features: usize,
    pub specialisms: usize,
    pub max_stay: usize,
}

impl Default for WardParams {
    fn default() -> Self {
        Self {
            horizon: 14,
            rooms: 6,
            patients: 30,
            features: 4,
            specialisms: 3,
            max_stay: 5,
        }
    }
}

impl WardParams {
    /// Generates a ward. The same seed always yields the same instance.
    pub fn generate(&self, seed: u64) -> Instance {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut general = Department::new(0, "General");
        let mut surgery = Department::new(1, "Surgery").with_age_range(18, 0);
        let mut pediatrics = Department::new(2, "Pediatrics").with_age_range(0, 17);
        for s in 0..self.specialisms {
            general = general.with_level(s, DoctoringLevel::Complete);
            surgery = surgery.with_level(s, random_level(&mut rng));
            pediatrics = pediatrics.with_level(s, random_level(&mut rng));
        }

        let patients: Vec<Patient> = (0..self.patients)
            .map(|p| self.random_patient(&mut rng, p))
            .collect();

        let peak = (0..self.horizon)
            .map(|d| {
                patients
                    .iter()
                    .filter(|p| p.nominal_window(self.horizon).contains(&d))
                    .count()
            })
            .max()
            .unwrap_or(0)
            .max(1);

        let mut overflow = Room::new(0, "Overflow", peak as u32, 0);
        for f in 0..self.features {
            overflow = overflow.with_feature(f);
        }

        let mut builder = Instance::builder(self.horizon)
            .with_feature_count(self.features)
            .with_specialism_count(self.specialisms)
            .with_department(general)
            .with_department(surgery)
            .with_department(pediatrics)
            .with_room(overflow);

        for r in 1..=self.rooms {
            let policy = match rng.random_range(0..4) {
                0 => GenderPolicy::MaleOnly,
                1 => GenderPolicy::FemaleOnly,
                2 => GenderPolicy::SameGenderOnly,
                _ => GenderPolicy::Mixed,
            };
            let mut room = Room::new(r, format!("R{r}"), rng.random_range(1..=4), r % 3)
                .with_policy(policy);
            for f in 0..self.features {
                if rng.random_bool(0.5) {
                    room = room.with_feature(f);
                }
            }
            builder = builder.with_room(room);
        }

        for patient in patients {
            builder = builder.with_patient(patient);
        }

        builder.build().expect("generated ward is valid")
    }

    fn random_patient(&self, rng: &mut ChaCha8Rng, id: usize) -> Patient {
        let gender = if rng.random_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        };
        let admission = rng.random_range(0..self.horizon - 1);
        let stay = rng.random_range(1..=self.max_stay);
        let discharge = admission + stay;

        let mut patient = Patient::new(
            id,
            format!("Pat_{id}"),
            gender,
            rng.random_range(1..95),
            rng.random_range(0..self.specialisms),
            admission,
            discharge,
        )
        .with_variability(rng.random_range(0..3));

        if admission > 0 && rng.random_bool(0.4) {
            patient = patient.with_registration_day(rng.random_range(0..admission));
        }
        if rng.random_bool(0.5) {
            let slack = rng.random_range(0..4);
            patient = patient.with_max_admission_day(admission + slack);
        }
        if rng.random_bool(0.3) {
            patient = patient.with_preferred_capacity(rng.random_range(1..=2));
        }
        for f in 0..self.features {
            let request = match rng.random_range(0..10) {
                0 => FeatureRequest::Needed,
                1 | 2 => FeatureRequest::Preferred,
                _ => continue,
            };
            patient = patient.with_request(f, request);
        }
        patient
    }
}

fn random_level(rng: &mut ChaCha8Rng) -> DoctoringLevel {
    match rng.random_range(0..3) {
        0 => DoctoringLevel::Complete,
        1 => DoctoringLevel::Partial,
        _ => DoctoringLevel::None,
    }
}
