use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    ApplicationStatus, CareerCenterStaff, CompanyRepresentative, Internship, InternshipStatus,
    RepresentativeStatus, Withdrawal, WithdrawalStatus,
};
use crate::filter::{filter_internships, InternshipFilter};
use crate::portal::Portal;
use crate::storage::{CsvRecord, StoreError};

use super::report::InternshipReport;

/// Review queue and reporting for career center staff.
pub struct StaffDesk<'a> {
    portal: &'a mut Portal,
    staff: CareerCenterStaff,
}

impl<'a> StaffDesk<'a> {
    pub fn new(portal: &'a mut Portal, staff: CareerCenterStaff) -> Self {
        Self { portal, staff }
    }

    pub fn staff(&self) -> &CareerCenterStaff {
        &self.staff
    }

    pub fn pending_representatives(&self) -> Vec<CompanyRepresentative> {
        self.portal
            .representatives
            .values()
            .filter(|rep| rep.status == RepresentativeStatus::Pending)
            .cloned()
            .collect()
    }

    pub fn approve_representative(
        &mut self,
        representative_id: &str,
    ) -> Result<CompanyRepresentative, StaffError> {
        self.decide_representative(representative_id, RepresentativeStatus::Approved)
    }

    pub fn reject_representative(
        &mut self,
        representative_id: &str,
    ) -> Result<CompanyRepresentative, StaffError> {
        self.decide_representative(representative_id, RepresentativeStatus::Rejected)
    }

    fn decide_representative(
        &mut self,
        representative_id: &str,
        decision: RepresentativeStatus,
    ) -> Result<CompanyRepresentative, StaffError> {
        let current = self
            .portal
            .representatives
            .get(representative_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "company representative",
                id: representative_id.to_string(),
            })?;
        if current.status != RepresentativeStatus::Pending {
            return Err(StaffError::AlreadyDecided {
                kind: "company representative",
                id: representative_id.to_string(),
                status: current.status.label(),
            });
        }

        let updated = self
            .portal
            .representatives
            .update(representative_id, |rep| rep.status = decision)?;
        info!(
            staff = %self.staff.id,
            representative = %updated.id,
            status = decision.label(),
            "representative reviewed"
        );
        Ok(updated)
    }

    pub fn pending_internships(&self) -> Vec<Internship> {
        let filter = InternshipFilter::new().with_statuses([InternshipStatus::Pending.label()]);
        filter_internships(self.portal.internships.values(), &filter)
    }

    pub fn approve_internship(&mut self, internship_id: Uuid) -> Result<Internship, StaffError> {
        self.decide_internship(internship_id, InternshipStatus::Approved)
    }

    pub fn reject_internship(&mut self, internship_id: Uuid) -> Result<Internship, StaffError> {
        self.decide_internship(internship_id, InternshipStatus::Rejected)
    }

    fn decide_internship(
        &mut self,
        internship_id: Uuid,
        decision: InternshipStatus,
    ) -> Result<Internship, StaffError> {
        let current = self
            .portal
            .internships
            .get(&internship_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "internship",
                id: internship_id.to_string(),
            })?;
        if current.status != InternshipStatus::Pending {
            return Err(StaffError::AlreadyDecided {
                kind: "internship",
                id: internship_id.to_string(),
                status: current.status.label(),
            });
        }

        let updated = self
            .portal
            .internships
            .update(&internship_id, |internship| internship.status = decision)?;
        info!(
            staff = %self.staff.id,
            internship = %updated.id,
            status = decision.label(),
            "internship reviewed"
        );
        Ok(updated)
    }

    pub fn pending_withdrawals(&self) -> Vec<Withdrawal> {
        self.portal
            .withdrawals
            .iter()
            .filter(|withdrawal| withdrawal.status == WithdrawalStatus::Pending)
            .cloned()
            .collect()
    }

    /// Approve a pending withdrawal.
    ///
    /// The student's application becomes unsuccessful. If it held a slot of a
    /// filled internship, the internship reopens as approved. The withdrawal
    /// is decided last; when a later step fails the earlier ones are undone.
    pub fn approve_withdrawal(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
    ) -> Result<Withdrawal, StaffError> {
        let pending = self
            .portal
            .withdrawals
            .group(&internship_id)
            .iter()
            .any(|withdrawal| {
                withdrawal.is_from(student_id) && withdrawal.status == WithdrawalStatus::Pending
            });
        if !pending {
            return Err(StoreError::NotFound {
                kind: Withdrawal::KIND,
                id: internship_id.to_string(),
            }
            .into());
        }

        let released = self.release_application(internship_id, student_id)?;

        let reopened = match self.reopen_internship(internship_id, released) {
            Ok(reopened) => reopened,
            Err(err) => {
                self.restore_application(internship_id, student_id, released);
                return Err(err.into());
            }
        };

        match self.decide_withdrawal(internship_id, student_id, WithdrawalStatus::Approved) {
            Ok(withdrawal) => Ok(withdrawal),
            Err(err) => {
                if reopened {
                    self.restore_filled(internship_id);
                }
                self.restore_application(internship_id, student_id, released);
                Err(err)
            }
        }
    }

    /// Mark the student's open application unsuccessful, returning the status
    /// it had before.
    fn release_application(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
    ) -> Result<Option<ApplicationStatus>, StoreError> {
        let previous = self
            .portal
            .applications
            .group(&internship_id)
            .iter()
            .find(|application| {
                application.is_from(student_id)
                    && application.status != ApplicationStatus::Unsuccessful
            })
            .map(|application| application.status);

        let Some(previous) = previous else {
            warn!(
                internship = %internship_id,
                student = student_id,
                "approved withdrawal has no open application"
            );
            return Ok(None);
        };

        self.portal.applications.update_where(
            &internship_id,
            |application| {
                application.is_from(student_id) && application.status == previous
            },
            |application| application.status = ApplicationStatus::Unsuccessful,
        )?;
        Ok(Some(previous))
    }

    fn reopen_internship(
        &mut self,
        internship_id: Uuid,
        released: Option<ApplicationStatus>,
    ) -> Result<bool, StoreError> {
        let filled = self
            .portal
            .internships
            .get(&internship_id)
            .map(|internship| internship.status == InternshipStatus::Filled)
            .unwrap_or(false);
        if released != Some(ApplicationStatus::Successful) || !filled {
            return Ok(false);
        }

        self.portal.internships.update(&internship_id, |internship| {
            internship.status = InternshipStatus::Approved
        })?;
        info!(internship = %internship_id, "internship reopened after withdrawal");
        Ok(true)
    }

    fn restore_application(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
        released: Option<ApplicationStatus>,
    ) {
        let Some(previous) = released else {
            return;
        };
        let restored = self.portal.applications.update_where(
            &internship_id,
            |application| {
                application.is_from(student_id)
                    && application.status == ApplicationStatus::Unsuccessful
            },
            |application| application.status = previous,
        );
        if let Err(err) = restored {
            error!(
                internship = %internship_id,
                student = student_id,
                error = %err,
                "failed to restore application after withdrawal failure"
            );
        }
    }

    fn restore_filled(&mut self, internship_id: Uuid) {
        let restored = self.portal.internships.update(&internship_id, |internship| {
            internship.status = InternshipStatus::Filled
        });
        if let Err(err) = restored {
            error!(
                internship = %internship_id,
                error = %err,
                "failed to restore filled internship after withdrawal failure"
            );
        }
    }

    pub fn reject_withdrawal(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
    ) -> Result<Withdrawal, StaffError> {
        self.decide_withdrawal(internship_id, student_id, WithdrawalStatus::Rejected)
    }

    fn decide_withdrawal(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
        decision: WithdrawalStatus,
    ) -> Result<Withdrawal, StaffError> {
        let updated = self.portal.withdrawals.update_where(
            &internship_id,
            |withdrawal| {
                withdrawal.is_from(student_id) && withdrawal.status == WithdrawalStatus::Pending
            },
            |withdrawal| withdrawal.status = decision,
        )?;
        info!(
            staff = %self.staff.id,
            internship = %internship_id,
            student = student_id,
            status = updated.status_label(),
            "withdrawal reviewed"
        );
        Ok(updated)
    }

    pub fn filtered_internships(&self, filter: &InternshipFilter) -> Vec<Internship> {
        filter_internships(self.portal.internships.values(), filter)
    }

    pub fn report(&self, filter: &InternshipFilter) -> InternshipReport {
        let internships = self.filtered_internships(filter);
        InternshipReport::build(&*self.portal, &internships, filter)
    }
}

/// Error raised by the staff review operations.
#[derive(Debug, thiserror::Error)]
pub enum StaffError {
    #[error("{kind} {id} is already {status}")]
    AlreadyDecided {
        kind: &'static str,
        id: String,
        status: &'static str,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
