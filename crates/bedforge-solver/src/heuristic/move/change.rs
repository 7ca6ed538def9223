//! ChangeMove - moves a whole stay into one room.

use bedforge_core::{PatientId, RoomId, Stay};
use smallvec::smallvec;

use super::{Move, MoveKind, Rewrite, Rewrites};

/// Puts every night of a patient's stay in `room`.
///
/// Dates are kept. A transfer, if any, is dropped.
///
/// # Example
///
/// ```
/// use bedforge_core::Stay;
/// use bedforge_solver::heuristic::{ChangeMove, Move};
///
/// let m = ChangeMove::new(0, Stay::new(1, 4, 0).with_transfer(2, 1), 2);
/// let rewrite = m.rewrites()[0];
/// assert_eq!(rewrite.after, Stay::new(1, 4, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeMove {
    patient: PatientId,
    stay: Stay,
    room: RoomId,
}

impl ChangeMove {
    pub fn new(patient: PatientId, stay: Stay, room: RoomId) -> Self {
        Self {
            patient,
            stay,
            room,
        }
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn room(&self) -> RoomId {
        self.room
    }
}

impl Move for ChangeMove {
    fn rewrites(&self) -> Rewrites {
        let after = Stay::new(self.stay.admission, self.stay.discharge, self.room);
        smallvec![Rewrite::new(self.patient, self.stay, after)]
    }

    fn kind(&self) -> MoveKind {
        MoveKind::Change
    }
}
