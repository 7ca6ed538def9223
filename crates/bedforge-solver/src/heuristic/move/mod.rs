//! Move system for rewriting patient stays.
//!
//! Every move is described by the stays it rewrites:
//! - `ChangeMove` - whole stay into another room, transfer-free
//! - `SwapMove` - two transfer-free patients trade rooms
//! - `DelayMove` - admission shifted within the patient's window
//! - `PartialChangeMove` - patient moves to another room from a pivot day
//! - `PartialSwapMove` - two patients trade rooms from a pivot day
//!
//! Moves never touch the schedule themselves. A [`CandidateMove`] checks a
//! move against the static tables and the calendar, prices it, and is then
//! applied by the working state.

mod change;
mod delay;
mod partial_change;
mod partial_swap;
mod swap;

use std::fmt::Debug;
use std::ops::Range;

use bedforge_core::{Day, PatientId, RoomId, Stay};
use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use crate::calendar::{BedDemand, CapacityCalendar};
use crate::problem::Problem;

pub use change::ChangeMove;
pub use delay::DelayMove;
pub use partial_change::PartialChangeMove;
pub use partial_swap::PartialSwapMove;
pub use swap::SwapMove;

/// Replacement of one patient's stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewrite {
    pub patient: PatientId,
    pub before: Stay,
    pub after: Stay,
}

/// Stay rewrites of a single move. No move touches more than two patients.
pub type Rewrites = SmallVec<[Rewrite; 2]>;

impl Rewrite {
    pub fn new(patient: PatientId, before: Stay, after: Stay) -> Self {
        Self {
            patient,
            before,
            after,
        }
    }

    /// Rooms the patient occupies before but not after.
    pub fn left_rooms(&self) -> SmallVec<[RoomId; 2]> {
        rooms_of(&self.before)
            .into_iter()
            .filter(|&r| !rooms_of(&self.after).contains(&r))
            .collect()
    }

    /// Rooms the patient occupies after but not before.
    pub fn entered_rooms(&self) -> SmallVec<[RoomId; 2]> {
        rooms_of(&self.after)
            .into_iter()
            .filter(|&r| !rooms_of(&self.before).contains(&r))
            .collect()
    }

    pub fn admission_changed(&self) -> bool {
        self.before.admission != self.after.admission
    }

    /// Day of the transfer this rewrite introduces into a transfer-free stay.
    pub fn added_transfer(&self) -> Option<Day> {
        match (self.before.transfer, self.after.transfer) {
            (None, Some(t)) => Some(t.day),
            _ => None,
        }
    }

    /// Day of the transfer this rewrite takes out of the stay.
    pub fn removed_transfer(&self) -> Option<Day> {
        match (self.before.transfer, self.after.transfer) {
            (Some(t), None) => Some(t.day),
            _ => None,
        }
    }
}

fn rooms_of(stay: &Stay) -> SmallVec<[RoomId; 2]> {
    match stay.transfer {
        Some(t) => smallvec![stay.room, t.room],
        None => smallvec![stay.room],
    }
}

/// Neighborhood move kinds, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Change,
    Swap,
    Delay,
    PartialChange,
    PartialSwap,
}

impl MoveKind {
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Change => "change",
            MoveKind::Swap => "swap",
            MoveKind::Delay => "delay",
            MoveKind::PartialChange => "partial_change",
            MoveKind::PartialSwap => "partial_swap",
        }
    }
}

/// A move that rewrites the stays of one or two patients.
///
/// Moves are plain values: they describe the rewrite and leave checking,
/// pricing and applying to [`CandidateMove`] and the working state.
pub trait Move: Send + Sync + Debug + Clone {
    /// The stays this move replaces, with their replacements.
    fn rewrites(&self) -> Rewrites;

    fn kind(&self) -> MoveKind;
}

/// A monomorphized union of every neighborhood move.
///
/// Implements [`Move`] by delegating to the inner variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientMove {
    Change(ChangeMove),
    Swap(SwapMove),
    Delay(DelayMove),
    PartialChange(PartialChangeMove),
    PartialSwap(PartialSwapMove),
}

impl Move for PatientMove {
    fn rewrites(&self) -> Rewrites {
        match self {
            Self::Change(m) => m.rewrites(),
            Self::Swap(m) => m.rewrites(),
            Self::Delay(m) => m.rewrites(),
            Self::PartialChange(m) => m.rewrites(),
            Self::PartialSwap(m) => m.rewrites(),
        }
    }

    fn kind(&self) -> MoveKind {
        match self {
            Self::Change(m) => m.kind(),
            Self::Swap(m) => m.kind(),
            Self::Delay(m) => m.kind(),
            Self::PartialChange(m) => m.kind(),
            Self::PartialSwap(m) => m.kind(),
        }
    }
}

macro_rules! impl_from_move {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for PatientMove {
                fn from(m: $ty) -> Self {
                    Self::$variant(m)
                }
            }
        )+
    };
}

impl_from_move!(
    Change => ChangeMove,
    Swap => SwapMove,
    Delay => DelayMove,
    PartialChange => PartialChangeMove,
    PartialSwap => PartialSwapMove,
);

/// A move that passed the feasibility checks, with its cost delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMove {
    mv: PatientMove,
    rewrites: Rewrites,
    delta: i64,
}

impl CandidateMove {
    /// Checks and prices `mv` against the current calendar.
    ///
    /// Returns `None` if any new stay uses a statically infeasible room or
    /// needs a bed the calendar cannot give.
    pub fn evaluate(
        problem: &Problem<'_>,
        calendar: &CapacityCalendar,
        mv: impl Into<PatientMove>,
    ) -> Option<Self> {
        let mv = mv.into();
        let rewrites = mv.rewrites();
        let tables = problem.tables();

        if !rewrites
            .iter()
            .all(|rw| tables.is_stay_feasible(rw.patient, &rw.after))
        {
            return None;
        }

        let mut demand = BedDemand::new();
        for rw in &rewrites {
            demand.release(&rw.before);
        }
        for rw in &rewrites {
            demand.occupy(&rw.after);
        }
        if !calendar.fits(&demand) {
            return None;
        }

        let patients = &problem.instance().patients;
        let delta = rewrites
            .iter()
            .map(|rw| {
                let patient = &patients[rw.patient];
                tables.stay_cost(patient, &rw.after) as i64
                    - tables.stay_cost(patient, &rw.before) as i64
            })
            .sum();

        Some(Self { mv, rewrites, delta })
    }

    pub fn as_move(&self) -> &PatientMove {
        &self.mv
    }

    pub fn kind(&self) -> MoveKind {
        self.mv.kind()
    }

    pub fn rewrites(&self) -> &[Rewrite] {
        &self.rewrites
    }

    /// Cost after minus cost before.
    pub fn delta(&self) -> i64 {
        self.delta
    }

    pub fn patients(&self) -> impl Iterator<Item = PatientId> + '_ {
        self.rewrites.iter().map(|rw| rw.patient)
    }

    /// Smallest day range covering every old and new stay.
    pub fn days(&self) -> Range<Day> {
        let start = self
            .rewrites
            .iter()
            .map(|rw| rw.before.admission.min(rw.after.admission))
            .min()
            .unwrap_or(0);
        let end = self
            .rewrites
            .iter()
            .map(|rw| rw.before.discharge.max(rw.after.discharge))
            .max()
            .unwrap_or(0);
        start..end
    }

    /// Rooms used by the new stays.
    pub fn target_rooms(&self) -> SmallVec<[RoomId; 4]> {
        let mut rooms: SmallVec<[RoomId; 4]> = SmallVec::new();
        for rw in &self.rewrites {
            for room in rooms_of(&rw.after) {
                if !rooms.contains(&room) {
                    rooms.push(room);
                }
            }
        }
        rooms
    }
}

#[cfg(test)]
mod tests;
