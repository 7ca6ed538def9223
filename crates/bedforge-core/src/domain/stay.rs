//! Realized placement of a patient.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{Day, RoomId};

/// A mid-stay move to another room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Transfer {
    /// First night spent in the new room.
    pub day: Day,
    pub room: RoomId,
}

/// The nights a patient spends in hospital and the room for each of them.
///
/// Covers `admission..discharge`. At most one transfer splits the stay into
/// a segment in `room` followed by a segment in `transfer.room`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Stay {
    pub admission: Day,
    pub discharge: Day,
    pub room: RoomId,
    pub transfer: Option<Transfer>,
}

impl Stay {
    /// Creates a transfer-free stay.
    pub fn new(admission: Day, discharge: Day, room: RoomId) -> Self {
        debug_assert!(admission < discharge, "empty stay {admission}..{discharge}");
        Self {
            admission,
            discharge,
            room,
            transfer: None,
        }
    }

    /// Creates a stay from `window` in a single room.
    pub fn in_room(window: Range<Day>, room: RoomId) -> Self {
        Self::new(window.start, window.end, room)
    }

    /// Adds a transfer to `room` starting on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is not strictly inside the stay.
    pub fn with_transfer(mut self, day: Day, room: RoomId) -> Self {
        assert!(
            day > self.admission && day < self.discharge,
            "transfer day {day} outside {}..{}",
            self.admission,
            self.discharge
        );
        self.transfer = Some(Transfer { day, room });
        self
    }

    pub fn days(&self) -> Range<Day> {
        self.admission..self.discharge
    }

    pub fn len(&self) -> usize {
        self.discharge - self.admission
    }

    pub fn is_empty(&self) -> bool {
        self.discharge <= self.admission
    }

    pub fn contains(&self, day: Day) -> bool {
        self.days().contains(&day)
    }

    /// Returns true if the whole stay is spent in one room.
    pub fn is_uniform(&self) -> bool {
        self.transfer.is_none()
    }

    /// Room occupied on `day`, if the patient is in hospital that day.
    pub fn room_on(&self, day: Day) -> Option<RoomId> {
        if !self.contains(day) {
            return None;
        }
        match self.transfer {
            Some(t) if day >= t.day => Some(t.room),
            _ => Some(self.room),
        }
    }

    /// Room at the end of the stay.
    pub fn final_room(&self) -> RoomId {
        self.transfer.map_or(self.room, |t| t.room)
    }

    /// Contiguous day ranges spent in a single room, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Range<Day>, RoomId)> {
        let (first, second) = match self.transfer {
            Some(t) => (
                (self.admission..t.day, self.room),
                Some((t.day..self.discharge, t.room)),
            ),
            None => ((self.admission..self.discharge, self.room), None),
        };
        std::iter::once(first).chain(second)
    }

    /// Iterates `(day, room)` for every night of the stay.
    pub fn nights(&self) -> impl Iterator<Item = (Day, RoomId)> {
        self.segments()
            .flat_map(|(days, room)| days.map(move |day| (day, room)))
    }
}
