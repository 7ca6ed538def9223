//! PartialSwapMove - two patients trade rooms mid-stay.

use bedforge_core::{Day, PatientId, Stay};
use smallvec::smallvec;

use super::{Move, MoveKind, Rewrite, Rewrites};

/// From `pivot` onward, each of two transfer-free patients moves into the
/// other's room. Both gain a transfer.
///
/// `pivot` must lie strictly inside both stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialSwapMove {
    first: (PatientId, Stay),
    second: (PatientId, Stay),
    pivot: Day,
}

impl PartialSwapMove {
    pub fn new(first: (PatientId, Stay), second: (PatientId, Stay), pivot: Day) -> Self {
        debug_assert!(first.1.is_uniform() && second.1.is_uniform());
        Self {
            first,
            second,
            pivot,
        }
    }

    pub fn pivot(&self) -> Day {
        self.pivot
    }
}

impl Move for PartialSwapMove {
    fn rewrites(&self) -> Rewrites {
        let (p, a) = self.first;
        let (q, b) = self.second;
        smallvec![
            Rewrite::new(p, a, a.with_transfer(self.pivot, b.room)),
            Rewrite::new(q, b, b.with_transfer(self.pivot, a.room)),
        ]
    }

    fn kind(&self) -> MoveKind {
        MoveKind::PartialSwap
    }
}
