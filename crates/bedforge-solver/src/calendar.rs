//! Per-room, per-day bed bookkeeping.

use std::ops::Range;

use bedforge_core::{Day, Instance, RoomId, Stay};
use smallvec::SmallVec;
use thiserror::Error;

use crate::schedule::Schedule;

/// Remaining beds for every (room, day).
///
/// Invariant: `0 <= remaining(r, d) <= capacity(r)` at all times. Releasing
/// a bed that was never taken is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityCalendar {
    horizon: usize,
    capacity: Vec<u32>,
    remaining: Vec<u32>,
}

/// Saved remaining counts for a contiguous day range across all rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSnapshot {
    days: Range<Day>,
    remaining: Vec<u32>,
}

/// A (room, day) whose bed count disagrees with the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("room {room} day {day}: {occupied} beds booked, schedule places {expected}")]
pub struct CalendarMismatch {
    pub room: RoomId,
    pub day: Day,
    pub occupied: u32,
    pub expected: u32,
}

impl CapacityCalendar {
    /// Creates a calendar with every bed free.
    pub fn new(instance: &Instance) -> Self {
        let horizon = instance.horizon;
        let capacity: Vec<u32> = instance.rooms.iter().map(|r| r.capacity).collect();
        let remaining = capacity
            .iter()
            .flat_map(|&c| std::iter::repeat(c).take(horizon))
            .collect();
        Self {
            horizon,
            capacity,
            remaining,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn room_count(&self) -> usize {
        self.capacity.len()
    }

    #[inline]
    fn index(&self, room: RoomId, day: Day) -> usize {
        debug_assert!(day < self.horizon, "day {day} outside horizon {}", self.horizon);
        room * self.horizon + day
    }

    pub fn capacity(&self, room: RoomId) -> u32 {
        self.capacity[room]
    }

    #[inline]
    pub fn remaining(&self, room: RoomId, day: Day) -> u32 {
        self.remaining[self.index(room, day)]
    }

    /// Beds taken in `room` on `day`.
    pub fn occupancy(&self, room: RoomId, day: Day) -> u32 {
        self.capacity[room] - self.remaining(room, day)
    }

    /// Takes one bed. Returns false, leaving the calendar unchanged, if
    /// the room is full that day.
    pub fn occupy(&mut self, room: RoomId, day: Day) -> bool {
        let i = self.index(room, day);
        if self.remaining[i] == 0 {
            return false;
        }
        self.remaining[i] -= 1;
        true
    }

    /// Returns one bed.
    ///
    /// # Panics
    ///
    /// Panics if the room already has all its beds free that day.
    pub fn release(&mut self, room: RoomId, day: Day) {
        let i = self.index(room, day);
        assert!(
            self.remaining[i] < self.capacity[room],
            "release of free bed in room {room} on day {day}"
        );
        self.remaining[i] += 1;
    }

    /// Takes a bed for every night of `stay`, or nothing at all.
    pub fn occupy_stay(&mut self, stay: &Stay) -> bool {
        let mut taken: SmallVec<[(Day, RoomId); 16]> = SmallVec::new();
        for (day, room) in stay.nights() {
            if !self.occupy(room, day) {
                for (d, r) in taken {
                    self.release(r, d);
                }
                return false;
            }
            taken.push((day, room));
        }
        true
    }

    /// Returns the bed of every night of `stay`.
    pub fn release_stay(&mut self, stay: &Stay) {
        for (day, room) in stay.nights() {
            self.release(room, day);
        }
    }

    /// Saves remaining counts of all rooms over `days`.
    pub fn snapshot(&self, days: Range<Day>) -> CalendarSnapshot {
        let mut remaining = Vec::with_capacity(self.room_count() * days.len());
        for room in 0..self.room_count() {
            let start = room * self.horizon + days.start;
            remaining.extend_from_slice(&self.remaining[start..start + days.len()]);
        }
        CalendarSnapshot { days, remaining }
    }

    /// Rolls every room back to `snapshot` over its day range.
    pub fn restore(&mut self, snapshot: &CalendarSnapshot) {
        let len = snapshot.days.len();
        for room in 0..self.room_count() {
            let start = room * self.horizon + snapshot.days.start;
            self.remaining[start..start + len]
                .copy_from_slice(&snapshot.remaining[room * len..(room + 1) * len]);
        }
    }

    /// Returns true if every bed of every room is free.
    pub fn is_empty(&self) -> bool {
        (0..self.room_count()).all(|r| (0..self.horizon).all(|d| self.occupancy(r, d) == 0))
    }

    /// Returns true if the net bed demand fits the remaining beds.
    pub fn fits(&self, demand: &BedDemand) -> bool {
        demand
            .entries
            .iter()
            .filter(|e| e.net > 0)
            .all(|e| i64::from(self.remaining(e.room, e.day)) >= e.net)
    }

    /// Checks that booked beds equal the patients the schedule places.
    ///
    /// # Errors
    ///
    /// Returns the first (room, day) that disagrees.
    pub fn verify_against(&self, schedule: &Schedule) -> Result<(), CalendarMismatch> {
        let mut expected = vec![0u32; self.remaining.len()];
        for stay in schedule.stays().flatten() {
            for (day, room) in stay.nights() {
                expected[self.index(room, day)] += 1;
            }
        }
        for room in 0..self.room_count() {
            for day in 0..self.horizon {
                let occupied = self.occupancy(room, day);
                let placed = expected[self.index(room, day)];
                if occupied != placed {
                    return Err(CalendarMismatch {
                        room,
                        day,
                        occupied,
                        expected: placed,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DemandEntry {
    room: RoomId,
    day: Day,
    net: i64,
}

/// Net bed demand per (room, day) of a set of stay rewrites.
///
/// Beds released by old stays offset beds taken by new ones, so a move
/// that keeps a patient in place for some nights needs no spare bed for
/// those nights.
#[derive(Debug, Clone, Default)]
pub struct BedDemand {
    entries: SmallVec<[DemandEntry; 16]>,
}

impl BedDemand {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, room: RoomId, day: Day, delta: i64) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.room == room && e.day == day)
        {
            Some(entry) => entry.net += delta,
            None => self.entries.push(DemandEntry {
                room,
                day,
                net: delta,
            }),
        }
    }

    /// Frees every night of `stay`.
    pub fn release(&mut self, stay: &Stay) {
        for (day, room) in stay.nights() {
            self.add(room, day, -1);
        }
    }

    /// Takes every night of `stay`.
    pub fn occupy(&mut self, stay: &Stay) {
        for (day, room) in stay.nights() {
            self.add(room, day, 1);
        }
    }

    /// Net demand for `room` on `day`.
    pub fn net(&self, room: RoomId, day: Day) -> i64 {
        self.entries
            .iter()
            .find(|e| e.room == room && e.day == day)
            .map_or(0, |e| e.net)
    }
}
