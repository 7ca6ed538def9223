//! PartialChangeMove - transfers a patient mid-stay.

use bedforge_core::{Day, PatientId, RoomId, Stay};
use smallvec::smallvec;

use super::{Move, MoveKind, Rewrite, Rewrites};

/// Moves a transfer-free patient to `room` from `pivot` onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialChangeMove {
    patient: PatientId,
    stay: Stay,
    pivot: Day,
    room: RoomId,
}

impl PartialChangeMove {
    pub fn new(patient: PatientId, stay: Stay, pivot: Day, room: RoomId) -> Self {
        debug_assert!(stay.is_uniform() && room != stay.room);
        Self {
            patient,
            stay,
            pivot,
            room,
        }
    }

    pub fn pivot(&self) -> Day {
        self.pivot
    }
}

impl Move for PartialChangeMove {
    fn rewrites(&self) -> Rewrites {
        let after = self.stay.with_transfer(self.pivot, self.room);
        smallvec![Rewrite::new(self.patient, self.stay, after)]
    }

    fn kind(&self) -> MoveKind {
        MoveKind::PartialChange
    }
}
