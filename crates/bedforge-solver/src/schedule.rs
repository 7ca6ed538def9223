//! The solution: one optional stay per patient.

use bedforge_core::{CostTables, Day, Instance, Patient, PatientId, RoomId, Stay};
use serde::Serialize;

/// Where a patient is in the admission process on a given day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    #[default]
    Unregistered,
    Registered,
    Admitted,
    Discharged,
}

/// Per-patient stays plus the derived per-day room and status matrices.
///
/// The matrices are kept in step with the stays by [`Schedule::assign`]
/// and [`Schedule::unassign`]; nothing else writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    horizon: usize,
    stays: Vec<Option<Stay>>,
    #[serde(skip)]
    registration: Vec<Day>,
    rooms: Vec<Option<RoomId>>,
    status: Vec<AdmissionStatus>,
}

impl Schedule {
    /// Creates a schedule with every patient unplaced.
    pub fn new(instance: &Instance) -> Self {
        let horizon = instance.horizon;
        let n = instance.patient_count();
        let mut schedule = Self {
            horizon,
            stays: vec![None; n],
            registration: instance.patients.iter().map(|p| p.registration_day).collect(),
            rooms: vec![None; n * horizon],
            status: vec![AdmissionStatus::Unregistered; n * horizon],
        };
        for p in 0..n {
            schedule.refresh_row(p);
        }
        schedule
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn patient_count(&self) -> usize {
        self.stays.len()
    }

    /// Places `patient` for `stay`, replacing any previous stay.
    pub fn assign(&mut self, patient: PatientId, stay: Stay) {
        debug_assert!(stay.discharge <= self.horizon);
        self.stays[patient] = Some(stay);
        self.refresh_row(patient);
    }

    /// Removes the stay of `patient`, returning it.
    pub fn unassign(&mut self, patient: PatientId) -> Option<Stay> {
        let stay = self.stays[patient].take();
        self.refresh_row(patient);
        stay
    }

    fn refresh_row(&mut self, patient: PatientId) {
        let stay = self.stays[patient];
        let registration = self.registration[patient];
        let row = patient * self.horizon;
        for day in 0..self.horizon {
            self.rooms[row + day] = stay.and_then(|s| s.room_on(day));
            self.status[row + day] = match stay {
                _ if day < registration => AdmissionStatus::Unregistered,
                Some(s) if day >= s.discharge => AdmissionStatus::Discharged,
                Some(s) if day >= s.admission => AdmissionStatus::Admitted,
                _ => AdmissionStatus::Registered,
            };
        }
    }

    pub fn stay(&self, patient: PatientId) -> Option<&Stay> {
        self.stays[patient].as_ref()
    }

    /// Stays indexed by patient.
    pub fn stays(&self) -> impl Iterator<Item = Option<&Stay>> {
        self.stays.iter().map(Option::as_ref)
    }

    pub fn is_placed(&self, patient: PatientId) -> bool {
        self.stays[patient].is_some()
    }

    pub fn placed_count(&self) -> usize {
        self.stays.iter().filter(|s| s.is_some()).count()
    }

    /// Room of `patient` on `day`, or `None` if not in hospital.
    pub fn room_on(&self, patient: PatientId, day: Day) -> Option<RoomId> {
        self.rooms[patient * self.horizon + day]
    }

    pub fn status(&self, patient: PatientId, day: Day) -> AdmissionStatus {
        self.status[patient * self.horizon + day]
    }

    /// Patients in `room` on `day`.
    pub fn occupants(&self, room: RoomId, day: Day) -> impl Iterator<Item = PatientId> + '_ {
        (0..self.patient_count()).filter(move |&p| self.room_on(p, day) == Some(room))
    }

    /// Total realized cost, recomputed from scratch.
    pub fn total_cost(&self, instance: &Instance, tables: &CostTables) -> u64 {
        instance
            .patients
            .iter()
            .zip(&self.stays)
            .filter_map(|(p, stay)| stay.as_ref().map(|s| tables.stay_cost(p, s)))
            .sum()
    }

    /// Realized assignment of every patient, `None` for unplaced ones.
    pub fn assignments(&self, instance: &Instance, tables: &CostTables) -> Vec<Option<AssignmentRecord>> {
        instance
            .patients
            .iter()
            .zip(&self.stays)
            .map(|(p, stay)| stay.as_ref().map(|s| AssignmentRecord::new(p, s, tables)))
            .collect()
    }
}

/// The realized placement of one patient, as handed to a reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentRecord {
    pub patient: PatientId,
    pub admission: Day,
    pub transfer: Option<Day>,
    pub discharge: Day,
    pub room_before: RoomId,
    pub room_after: RoomId,
    pub cost: u64,
}

impl AssignmentRecord {
    pub fn new(patient: &Patient, stay: &Stay, tables: &CostTables) -> Self {
        Self {
            patient: patient.id,
            admission: stay.admission,
            transfer: stay.transfer.map(|t| t.day),
            discharge: stay.discharge,
            room_before: stay.room,
            room_after: stay.final_room(),
            cost: tables.stay_cost(patient, stay),
        }
    }

    /// Days the admission was pushed past the requested day.
    pub fn delay(&self, patient: &Patient) -> usize {
        self.admission.saturating_sub(patient.admission_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedforge_core::PenaltyWeights;
    use bedforge_test::scenario::delayed_admissions;

    #[test]
    fn test_new_schedule_tracks_registration() {
        let instance = delayed_admissions();
        let schedule = Schedule::new(&instance);

        assert_eq!(schedule.placed_count(), 0);
        // P0 registers on admission day 0, P1 on day 0 for day 1.
        assert_eq!(schedule.status(0, 0), AdmissionStatus::Registered);
        assert_eq!(schedule.status(1, 0), AdmissionStatus::Registered);
        assert_eq!(schedule.room_on(1, 1), None);
    }

    #[test]
    fn test_assign_derives_rooms_and_status() {
        let instance = delayed_admissions();
        let mut schedule = Schedule::new(&instance);
        schedule.assign(1, Stay::new(2, 4, 0).with_transfer(3, 1));

        assert_eq!(schedule.status(1, 1), AdmissionStatus::Registered);
        assert_eq!(schedule.status(1, 2), AdmissionStatus::Admitted);
        assert_eq!(schedule.status(1, 4), AdmissionStatus::Discharged);
        assert_eq!(schedule.room_on(1, 2), Some(0));
        assert_eq!(schedule.room_on(1, 3), Some(1));
        assert_eq!(schedule.room_on(1, 4), None);
        assert_eq!(schedule.occupants(1, 3).collect::<Vec<_>>(), vec![1]);

        assert_eq!(schedule.unassign(1), Some(Stay::new(2, 4, 0).with_transfer(3, 1)));
        assert_eq!(schedule.room_on(1, 2), None);
        assert_eq!(schedule.status(1, 4), AdmissionStatus::Registered);
    }

    #[test]
    fn test_assignment_records() {
        let instance = delayed_admissions();
        let weights = PenaltyWeights::default();
        let tables = CostTables::new(&instance, weights);
        let mut schedule = Schedule::new(&instance);
        schedule.assign(0, Stay::new(0, 2, 0));
        schedule.assign(1, Stay::new(2, 4, 0));

        let records = schedule.assignments(&instance, &tables);
        let p1 = records[1].unwrap();
        assert_eq!(p1.admission, 2);
        assert_eq!(p1.transfer, None);
        assert_eq!(p1.room_before, p1.room_after);
        assert_eq!(p1.delay(&instance.patients[1]), 1);
        assert_eq!(p1.cost, weights.delay);
        assert_eq!(schedule.total_cost(&instance, &tables), weights.delay);
    }
}
