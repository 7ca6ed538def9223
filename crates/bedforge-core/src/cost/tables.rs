//! Precomputed patient/room cost and feasibility tables.

use crate::domain::{Instance, Patient, PatientId, RoomId, Stay};

use super::{evaluate_rooms, PenaltyWeights};

/// Per-night cost and feasibility of every patient/room pair.
///
/// Built once from the instance and read-only afterwards.
#[derive(Debug, Clone)]
pub struct CostTables {
    weights: PenaltyWeights,
    room_count: usize,
    cost: Vec<u64>,
    feasible: Vec<bool>,
    feasible_rooms: Vec<Vec<RoomId>>,
}

impl CostTables {
    pub fn new(instance: &Instance, weights: PenaltyWeights) -> Self {
        let room_count = instance.room_count();
        let patient_count = instance.patient_count();
        let mut cost = Vec::with_capacity(patient_count * room_count);
        let mut feasible = Vec::with_capacity(patient_count * room_count);
        let mut feasible_rooms = Vec::with_capacity(patient_count);

        for patient in &instance.patients {
            let mut rooms = Vec::new();
            for (room, ok, c) in evaluate_rooms(instance, &weights, patient) {
                cost.push(c);
                feasible.push(ok);
                if ok {
                    rooms.push(room);
                }
            }
            feasible_rooms.push(rooms);
        }

        Self {
            weights,
            room_count,
            cost,
            feasible,
            feasible_rooms,
        }
    }

    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Per-night cost of `patient` in `room`.
    #[inline]
    pub fn cost(&self, patient: PatientId, room: RoomId) -> u64 {
        self.cost[patient * self.room_count + room]
    }

    /// Whether `room` satisfies every hard constraint of `patient`.
    #[inline]
    pub fn is_feasible(&self, patient: PatientId, room: RoomId) -> bool {
        self.feasible[patient * self.room_count + room]
    }

    /// Rooms satisfying every hard constraint of `patient`, by room id.
    pub fn feasible_rooms(&self, patient: PatientId) -> &[RoomId] {
        &self.feasible_rooms[patient]
    }

    /// Cheapest feasible per-night cost, or `None` if no room is feasible.
    pub fn min_cost(&self, patient: PatientId) -> Option<u64> {
        self.feasible_rooms[patient]
            .iter()
            .map(|&r| self.cost(patient, r))
            .min()
    }

    /// Patients without any feasible room.
    pub fn infeasible_patients(&self) -> Vec<PatientId> {
        self.feasible_rooms
            .iter()
            .enumerate()
            .filter(|(_, rooms)| rooms.is_empty())
            .map(|(p, _)| p)
            .collect()
    }

    /// Sum over placeable patients of cheapest cost times length of stay.
    ///
    /// Diagnostic only; never used to steer the search.
    pub fn lower_bound(&self, instance: &Instance) -> u64 {
        instance
            .patients
            .iter()
            .filter_map(|p| {
                let nights = p.length_of_stay() as u64;
                self.min_cost(p.id).map(|c| c * nights)
            })
            .sum()
    }

    /// Realized cost of a stay.
    ///
    /// Sums the per-night room cost, one transfer penalty if the stay is
    /// split, and the delay penalty for each day past the nominal admission.
    /// Nights the horizon cuts off are still charged, at the rate of the
    /// room the patient ends in.
    pub fn stay_cost(&self, patient: &Patient, stay: &Stay) -> u64 {
        let in_horizon: u64 = stay
            .segments()
            .map(|(days, room)| days.len() as u64 * self.cost(patient.id, room))
            .sum();
        let cut_off = (stay.admission + patient.length_of_stay()).saturating_sub(stay.discharge);
        let beyond = cut_off as u64 * self.cost(patient.id, stay.final_room());
        let transfer = if stay.is_uniform() {
            0
        } else {
            self.weights.transfer
        };
        let delay_days = stay.admission.saturating_sub(patient.admission_day) as u64;
        in_horizon + beyond + transfer + delay_days * self.weights.delay
    }

    /// Whether every room used by `stay` is feasible for `patient`.
    pub fn is_stay_feasible(&self, patient: PatientId, stay: &Stay) -> bool {
        stay.segments().all(|(_, room)| self.is_feasible(patient, room))
    }
}
