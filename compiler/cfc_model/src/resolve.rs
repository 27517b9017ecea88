//! Prerequisite closure.
//!
//! Depth-first walk of the prereq graph starting at one parcel. Every
//! prereq must be registered and its version must satisfy the requirement.
//! A parcel that was already fully checked is not revisited; reaching a
//! parcel that is still on the current path is a cycle.

use crate::parcel::VisitState;
use crate::{ModelContext, ModelError, ParcelId};

impl ModelContext {
    /// Validate the prerequisite closure of `parcel_id`.
    ///
    /// Must run for every root parcel before its classes are sorted.
    pub fn check_prereqs(&mut self, parcel_id: ParcelId) -> Result<(), ModelError> {
        let mut path = Vec::new();
        self.visit_prereqs(parcel_id, &mut path)
    }

    fn visit_prereqs(
        &mut self,
        parcel_id: ParcelId,
        path: &mut Vec<ParcelId>,
    ) -> Result<(), ModelError> {
        match self.parcels[parcel_id.index()].visit {
            VisitState::Required => return Ok(()),
            VisitState::InProgress => return Err(self.cycle_error(path, parcel_id)),
            VisitState::Unvisited => {}
        }
        self.parcels[parcel_id.index()].visit = VisitState::InProgress;
        path.push(parcel_id);

        let parcel = self.parcel(parcel_id);
        tracing::debug!(parcel = parcel.name(), "checking prereqs");
        let name = parcel.name().to_string();
        let prereqs = parcel.prereqs().to_vec();

        for prereq in &prereqs {
            let Some(req_id) = self.parcel_id(prereq.name()) else {
                return Err(ModelError::UnresolvedPrereq {
                    name: prereq.name().to_string(),
                    required_by: name,
                });
            };

            let required = self.parcel(req_id);
            if required.version() < prereq.version() {
                return Err(ModelError::VersionTooLow {
                    name: prereq.name().to_string(),
                    required_by: name,
                    found: required.version().to_string(),
                    required: prereq.version().to_string(),
                });
            }
            if !prereq.is_any_version() && required.major_version() > prereq.version() {
                return Err(ModelError::MajorVersionTooHigh {
                    name: prereq.name().to_string(),
                    required_by: name,
                    found: required.major_version().to_string(),
                    required: prereq.version().to_string(),
                });
            }

            self.visit_prereqs(req_id, path)?;
        }

        path.pop();
        self.parcels[parcel_id.index()].visit = VisitState::Required;
        Ok(())
    }

    #[cold]
    fn cycle_error(&self, path: &[ParcelId], reentered: ParcelId) -> ModelError {
        let start = path.iter().position(|&id| id == reentered).unwrap_or(0);
        let mut names: Vec<&str> = path[start..]
            .iter()
            .map(|&id| self.parcel(id).name())
            .collect();
        names.push(self.parcel(reentered).name());
        ModelError::PrereqCycle {
            cycle: names.join(" -> "),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
