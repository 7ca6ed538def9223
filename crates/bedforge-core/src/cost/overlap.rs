//! Pairwise stay overlap between patients.

use crate::domain::{Instance, PatientId};

/// Number of nominal nights two patients share in hospital.
///
/// Swap moves only pair patients with a positive overlap; `partners`
/// lists them with the largest overlap first.
#[derive(Debug, Clone)]
pub struct OverlapTable {
    patient_count: usize,
    overlap: Vec<u32>,
    partners: Vec<Vec<PatientId>>,
}

impl OverlapTable {
    pub fn new(instance: &Instance) -> Self {
        let n = instance.patient_count();
        let mut overlap = vec![0u32; n * n];

        for (i, p1) in instance.patients.iter().enumerate() {
            let w1 = p1.nominal_window(instance.horizon);
            for (j, p2) in instance.patients.iter().enumerate().skip(i + 1) {
                let w2 = p2.nominal_window(instance.horizon);
                let shared = w1.end.min(w2.end).saturating_sub(w1.start.max(w2.start)) as u32;
                overlap[i * n + j] = shared;
                overlap[j * n + i] = shared;
            }
        }

        let partners = (0..n)
            .map(|p| {
                let mut list: Vec<PatientId> =
                    (0..n).filter(|&q| q != p && overlap[p * n + q] > 0).collect();
                // Stable sort keeps id order among equal overlaps.
                list.sort_by(|&a, &b| overlap[p * n + b].cmp(&overlap[p * n + a]));
                list
            })
            .collect();

        Self {
            patient_count: n,
            overlap,
            partners,
        }
    }

    #[inline]
    pub fn overlap(&self, p1: PatientId, p2: PatientId) -> u32 {
        self.overlap[p1 * self.patient_count + p2]
    }

    /// Patients sharing at least one nominal night with `patient`.
    pub fn partners(&self, patient: PatientId) -> &[PatientId] {
        &self.partners[patient]
    }
}
