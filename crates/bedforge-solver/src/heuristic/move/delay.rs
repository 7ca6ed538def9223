//! DelayMove - shifts an admission within its window.

use std::ops::Range;

use bedforge_core::{Day, PatientId, Stay};
use smallvec::smallvec;

use super::{Move, MoveKind, Rewrite, Rewrites};

/// Re-admits a patient over `window`, keeping the room.
///
/// The window is the patient's stay from the new admission day, clipped to
/// the horizon. Moving the admission back toward the requested day undoes
/// an earlier delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayMove {
    patient: PatientId,
    stay: Stay,
    admission: Day,
    discharge: Day,
}

impl DelayMove {
    pub fn new(patient: PatientId, stay: Stay, window: Range<Day>) -> Self {
        debug_assert!(stay.is_uniform());
        Self {
            patient,
            stay,
            admission: window.start,
            discharge: window.end,
        }
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn admission(&self) -> Day {
        self.admission
    }
}

impl Move for DelayMove {
    fn rewrites(&self) -> Rewrites {
        let after = Stay::new(self.admission, self.discharge, self.stay.room);
        smallvec![Rewrite::new(self.patient, self.stay, after)]
    }

    fn kind(&self) -> MoveKind {
        MoveKind::Delay
    }
}
