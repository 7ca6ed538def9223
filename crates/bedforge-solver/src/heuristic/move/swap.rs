//! SwapMove - two patients trade rooms.

use bedforge_core::{PatientId, Stay};
use smallvec::smallvec;

use super::{Move, MoveKind, Rewrite, Rewrites};

/// Exchanges the rooms of two transfer-free stays. Dates are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    first: (PatientId, Stay),
    second: (PatientId, Stay),
}

impl SwapMove {
    pub fn new(first: (PatientId, Stay), second: (PatientId, Stay)) -> Self {
        debug_assert!(first.1.is_uniform() && second.1.is_uniform());
        Self { first, second }
    }

    pub fn patients(&self) -> (PatientId, PatientId) {
        (self.first.0, self.second.0)
    }
}

impl Move for SwapMove {
    fn rewrites(&self) -> Rewrites {
        let (p, a) = self.first;
        let (q, b) = self.second;
        smallvec![
            Rewrite::new(p, a, Stay::new(a.admission, a.discharge, b.room)),
            Rewrite::new(q, b, Stay::new(b.admission, b.discharge, a.room)),
        ]
    }

    fn kind(&self) -> MoveKind {
        MoveKind::Swap
    }
}
