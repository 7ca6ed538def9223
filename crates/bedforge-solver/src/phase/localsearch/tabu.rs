//! Tabu attributes and the list that remembers them.

use std::collections::VecDeque;

use bedforge_core::{Day, PatientId, RoomId};

use crate::heuristic::Rewrite;

/// A recently undone piece of a schedule that moves may not restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabuAttribute {
    /// The patient left this room.
    Room { patient: PatientId, room: RoomId },
    /// The patient's previous admission day.
    Admission { patient: PatientId, day: Day },
    /// The patient was split across two rooms on this day.
    Transfer { patient: PatientId, day: Day },
}

/// Finite-memory record of tabu attributes, each with the iteration at
/// which it stops being tabu.
///
/// Entries are kept in insertion order. Expiries never decrease, so expired
/// entries are always at the front.
///
/// # Example
///
/// ```
/// use bedforge_core::Stay;
/// use bedforge_solver::heuristic::{ChangeMove, Move};
/// use bedforge_solver::phase::{TabuAttribute, TabuList};
///
/// let mut tabu = TabuList::new();
/// let change = ChangeMove::new(0, Stay::new(0, 2, 1), 2).rewrites();
/// tabu.record(&change, 10);
///
/// assert!(tabu.contains(TabuAttribute::Room { patient: 0, room: 1 }));
/// tabu.expire(10);
/// assert!(tabu.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    entries: VecDeque<(TabuAttribute, u64)>,
}

impl TabuList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry whose expiry is at or before `iteration`.
    pub fn expire(&mut self, iteration: u64) {
        while self
            .entries
            .front()
            .is_some_and(|&(_, expiry)| expiry <= iteration)
        {
            self.entries.pop_front();
        }
    }

    pub fn contains(&self, attribute: TabuAttribute) -> bool {
        self.entries.iter().any(|&(a, _)| a == attribute)
    }

    /// Pushes one attribute.
    ///
    /// # Panics
    ///
    /// Panics if `expiry` is earlier than that of the newest entry.
    pub fn push(&mut self, attribute: TabuAttribute, expiry: u64) {
        if let Some(&(_, last)) = self.entries.back() {
            assert!(
                expiry >= last,
                "tabu expiry {expiry} precedes newest entry {last}"
            );
        }
        self.entries.push_back((attribute, expiry));
    }

    /// Records the reverse of an applied move: every room a patient left,
    /// the admission day a patient moved away from, and any transfer the
    /// move introduced.
    pub fn record(&mut self, rewrites: &[Rewrite], expiry: u64) {
        for rw in rewrites {
            for room in rw.left_rooms() {
                self.push(
                    TabuAttribute::Room {
                        patient: rw.patient,
                        room,
                    },
                    expiry,
                );
            }
            if rw.admission_changed() {
                self.push(
                    TabuAttribute::Admission {
                        patient: rw.patient,
                        day: rw.before.admission,
                    },
                    expiry,
                );
            }
            if let Some(day) = rw.added_transfer() {
                self.push(
                    TabuAttribute::Transfer {
                        patient: rw.patient,
                        day,
                    },
                    expiry,
                );
            }
        }
    }

    /// Returns true if applying `rewrites` would put a patient back into a
    /// tabu room or on a tabu admission day, or would undo a tabu transfer.
    pub fn is_tabu(&self, rewrites: &[Rewrite]) -> bool {
        rewrites.iter().any(|rw| {
            rw.entered_rooms().into_iter().any(|room| {
                self.contains(TabuAttribute::Room {
                    patient: rw.patient,
                    room,
                })
            }) || (rw.admission_changed()
                && self.contains(TabuAttribute::Admission {
                    patient: rw.patient,
                    day: rw.after.admission,
                }))
                || rw.removed_transfer().is_some_and(|day| {
                    self.contains(TabuAttribute::Transfer {
                        patient: rw.patient,
                        day,
                    })
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{
        ChangeMove, DelayMove, Move, PartialChangeMove, PartialSwapMove, SwapMove,
    };
    use bedforge_core::Stay;

    #[test]
    fn test_swap_back_is_tabu() {
        let mut tabu = TabuList::new();
        let swap = SwapMove::new((0, Stay::new(0, 2, 0)), (1, Stay::new(1, 3, 1)));
        tabu.record(&swap.rewrites(), 5);
        assert_eq!(tabu.len(), 2);

        let back = SwapMove::new((0, Stay::new(0, 2, 1)), (1, Stay::new(1, 3, 0)));
        assert!(tabu.is_tabu(&back.rewrites()));
    }

    #[test]
    fn test_delay_back_is_tabu() {
        let mut tabu = TabuList::new();
        let delay = DelayMove::new(1, Stay::new(1, 3, 0), 2..4);
        tabu.record(&delay.rewrites(), 5);
        assert_eq!(
            tabu.entries.front().map(|e| e.0),
            Some(TabuAttribute::Admission { patient: 1, day: 1 })
        );

        let back = DelayMove::new(1, Stay::new(2, 4, 0), 1..3);
        assert!(tabu.is_tabu(&back.rewrites()));
        let further = DelayMove::new(1, Stay::new(2, 4, 0), 3..5);
        assert!(!tabu.is_tabu(&further.rewrites()));
    }

    #[test]
    fn test_undoing_partial_change_is_tabu() {
        let mut tabu = TabuList::new();
        let mv = PartialChangeMove::new(0, Stay::new(0, 4, 0), 2, 1);
        tabu.record(&mv.rewrites(), 5);
        assert_eq!(tabu.len(), 1);
        assert!(tabu.contains(TabuAttribute::Transfer { patient: 0, day: 2 }));

        let split = Stay::new(0, 4, 0).with_transfer(2, 1);
        let back = ChangeMove::new(0, split, 0);
        assert!(tabu.is_tabu(&back.rewrites()));

        // Dropping the transfer is tabu whichever room the stay ends in.
        let onward = ChangeMove::new(0, split, 1);
        assert!(tabu.is_tabu(&onward.rewrites()));
        tabu.expire(5);
        assert!(!tabu.is_tabu(&back.rewrites()));
    }

    #[test]
    fn test_partial_swap_records_both_transfers() {
        let mut tabu = TabuList::new();
        let mv = PartialSwapMove::new((0, Stay::new(0, 4, 0)), (1, Stay::new(1, 5, 1)), 2);
        tabu.record(&mv.rewrites(), 5);
        assert!(tabu.contains(TabuAttribute::Transfer { patient: 0, day: 2 }));
        assert!(tabu.contains(TabuAttribute::Transfer { patient: 1, day: 2 }));
    }

    #[test]
    fn test_expire_drops_front_only() {
        let mut tabu = TabuList::new();
        tabu.push(TabuAttribute::Room { patient: 0, room: 0 }, 3);
        tabu.push(TabuAttribute::Room { patient: 1, room: 0 }, 4);
        tabu.expire(3);
        assert_eq!(tabu.len(), 1);
        assert!(tabu.contains(TabuAttribute::Room { patient: 1, room: 0 }));
        tabu.expire(4);
        assert!(tabu.is_empty());
    }

    #[test]
    #[should_panic(expected = "precedes newest entry")]
    fn test_non_monotonic_expiry_panics() {
        let mut tabu = TabuList::new();
        tabu.push(TabuAttribute::Room { patient: 0, room: 0 }, 4);
        tabu.push(TabuAttribute::Room { patient: 0, room: 1 }, 3);
    }
}
