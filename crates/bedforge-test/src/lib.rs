//! Shared test fixtures for BedForge crates.
//!
//! This crate provides ready-made instances for testing. It depends only
//! on `bedforge-core` so every other crate can use it as a dev-dependency.
//!
//! - [`scenario`] - Small hand-built instances with known outcomes
//! - [`ward`] - Seeded generator for medium-sized hospital wards
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! bedforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use bedforge_test::scenario::two_rooms_three_patients;
//! use bedforge_test::ward::WardParams;
//!
//! let small = two_rooms_three_patients();
//! assert_eq!(small.patient_count(), 3);
//!
//! let ward = WardParams::default().generate(7);
//! assert!(ward.patient_count() > small.patient_count());
//! ```

pub mod scenario;
pub mod ward;

pub use scenario::{
    delayed_admissions, male_only_female, overbooked, seed_sensitive, two_rooms_three_patients,
    with_unplaceable_patient,
};
pub use ward::WardParams;
