//! Error types for BedForge instance handling.

use thiserror::Error;

use crate::domain::{Day, DepartmentId, FeatureId, PatientId, RoomId, SpecialismId};

/// Violation of an instance invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Planning horizon must contain at least one day")]
    EmptyHorizon,

    /// Arena entries must be stored at the index equal to their id.
    #[error("{kind} at index {index} has id {id}")]
    IdMismatch {
        kind: &'static str,
        index: usize,
        id: usize,
    },

    #[error("Room {room} has zero capacity")]
    ZeroCapacity { room: RoomId },

    #[error("Room {room} refers to unknown department {department}")]
    UnknownDepartment { room: RoomId, department: DepartmentId },

    #[error("Room {room} has unknown feature {feature}")]
    UnknownRoomFeature { room: RoomId, feature: FeatureId },

    #[error("Patient {patient} requests unknown feature {feature}")]
    UnknownPatientFeature { patient: PatientId, feature: FeatureId },

    #[error("Patient {patient} needs unknown specialism {specialism}")]
    UnknownSpecialism {
        patient: PatientId,
        specialism: SpecialismId,
    },

    #[error("Patient {patient} registers on day {registration} after admission day {admission}")]
    RegistrationAfterAdmission {
        patient: PatientId,
        registration: Day,
        admission: Day,
    },

    #[error("Patient {patient} has admission day {admission} after its deadline {deadline}")]
    AdmissionAfterDeadline {
        patient: PatientId,
        admission: Day,
        deadline: Day,
    },

    #[error("Patient {patient} has no night inside the horizon (admission {admission}, discharge {discharge})")]
    EmptyStay {
        patient: PatientId,
        admission: Day,
        discharge: Day,
    },
}
