//! The complete static problem instance.

use serde::{Deserialize, Serialize};

use super::{Department, Patient, Room};
use crate::error::ModelError;

/// Static problem data, produced once by a loader and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Instance {
    /// Number of planning days.
    pub horizon: usize,
    pub feature_count: usize,
    pub specialism_count: usize,
    pub departments: Vec<Department>,
    pub rooms: Vec<Room>,
    pub patients: Vec<Patient>,
}

impl Instance {
    /// Starts building an instance over `horizon` days.
    pub fn builder(horizon: usize) -> InstanceBuilder {
        InstanceBuilder::new(horizon)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Total number of beds across all rooms.
    pub fn bed_count(&self) -> u64 {
        self.rooms.iter().map(|r| u64::from(r.capacity)).sum()
    }

    /// Largest room capacity.
    pub fn max_capacity(&self) -> u32 {
        self.rooms.iter().map(|r| r.capacity).max().unwrap_or(0)
    }

    /// Department owning `room`.
    pub fn department_of(&self, room: &Room) -> &Department {
        &self.departments[room.department]
    }

    /// Checks every structural invariant of the instance.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.horizon == 0 {
            return Err(ModelError::EmptyHorizon);
        }

        for (index, d) in self.departments.iter().enumerate() {
            check_id("department", index, d.id)?;
        }

        for (index, room) in self.rooms.iter().enumerate() {
            check_id("room", index, room.id)?;
            if room.capacity == 0 {
                return Err(ModelError::ZeroCapacity { room: room.id });
            }
            if room.department >= self.departments.len() {
                return Err(ModelError::UnknownDepartment {
                    room: room.id,
                    department: room.department,
                });
            }
            if let Some(&feature) = room.features.iter().find(|&&f| f >= self.feature_count) {
                return Err(ModelError::UnknownRoomFeature {
                    room: room.id,
                    feature,
                });
            }
        }

        for (index, p) in self.patients.iter().enumerate() {
            check_id("patient", index, p.id)?;
            if p.specialism >= self.specialism_count {
                return Err(ModelError::UnknownSpecialism {
                    patient: p.id,
                    specialism: p.specialism,
                });
            }
            if let Some(&feature) = p.requests.keys().find(|&&f| f >= self.feature_count) {
                return Err(ModelError::UnknownPatientFeature {
                    patient: p.id,
                    feature,
                });
            }
            if p.registration_day > p.admission_day {
                return Err(ModelError::RegistrationAfterAdmission {
                    patient: p.id,
                    registration: p.registration_day,
                    admission: p.admission_day,
                });
            }
            if let Some(deadline) = p.max_admission_day {
                if p.admission_day > deadline {
                    return Err(ModelError::AdmissionAfterDeadline {
                        patient: p.id,
                        admission: p.admission_day,
                        deadline,
                    });
                }
            }
            if p.admission_day >= p.valid_discharge_day(self.horizon) {
                return Err(ModelError::EmptyStay {
                    patient: p.id,
                    admission: p.admission_day,
                    discharge: p.discharge_day,
                });
            }
        }

        Ok(())
    }
}

fn check_id(kind: &'static str, index: usize, id: usize) -> Result<(), ModelError> {
    if index == id {
        Ok(())
    } else {
        Err(ModelError::IdMismatch { kind, index, id })
    }
}

/// Fluent builder for [`Instance`].
///
/// Ids are assigned from insertion order, so `with_room(..)` called third
/// yields room 2 regardless of the id passed in.
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    horizon: usize,
    feature_count: usize,
    specialism_count: usize,
    departments: Vec<Department>,
    rooms: Vec<Room>,
    patients: Vec<Patient>,
}

impl InstanceBuilder {
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            feature_count: 0,
            specialism_count: 0,
            departments: Vec::new(),
            rooms: Vec::new(),
            patients: Vec::new(),
        }
    }

    pub fn with_feature_count(mut self, count: usize) -> Self {
        self.feature_count = count;
        self
    }

    pub fn with_specialism_count(mut self, count: usize) -> Self {
        self.specialism_count = count;
        self
    }

    pub fn with_department(mut self, mut department: Department) -> Self {
        department.id = self.departments.len();
        self.specialism_count = self.specialism_count.max(department.levels.len());
        self.departments.push(department);
        self
    }

    pub fn with_room(mut self, mut room: Room) -> Self {
        room.id = self.rooms.len();
        if let Some(&max) = room.features.iter().next_back() {
            self.feature_count = self.feature_count.max(max + 1);
        }
        self.rooms.push(room);
        self
    }

    pub fn with_patient(mut self, mut patient: Patient) -> Self {
        patient.id = self.patients.len();
        if let Some(&max) = patient.requests.keys().next_back() {
            self.feature_count = self.feature_count.max(max + 1);
        }
        self.specialism_count = self.specialism_count.max(patient.specialism + 1);
        self.patients.push(patient);
        self
    }

    /// Builds and validates the instance.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn build(self) -> Result<Instance, ModelError> {
        let instance = Instance {
            horizon: self.horizon,
            feature_count: self.feature_count,
            specialism_count: self.specialism_count,
            departments: self.departments,
            rooms: self.rooms,
            patients: self.patients,
        };
        instance.validate()?;
        Ok(instance)
    }
}
