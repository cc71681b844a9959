use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, Internship, InternshipLevel, Student, Submission, Withdrawal,
    WithdrawalStatus,
};
use crate::filter::{filter_internships, InternshipFilter};
use crate::portal::Portal;
use crate::storage::StoreError;

/// Browsing, applications, and withdrawal requests for one student.
pub struct StudentDesk<'a> {
    portal: &'a mut Portal,
    student: Student,
}

impl<'a> StudentDesk<'a> {
    pub fn new(portal: &'a mut Portal, student: Student) -> Self {
        Self { portal, student }
    }

    pub fn student(&self) -> &Student {
        &self.student
    }

    /// Check whether the student may apply to `internship` on `today`.
    pub fn check_eligibility(
        &self,
        internship: &Internship,
        today: NaiveDate,
    ) -> Result<(), StudentError> {
        if !internship.is_listed() {
            return Err(StudentError::NotListed(internship.id));
        }
        if !internship.is_open_on(today) {
            return Err(StudentError::NotOpen {
                id: internship.id,
                opening: internship.opening_date,
                closing: internship.closing_date,
            });
        }
        if !internship
            .preferred_major
            .eq_ignore_ascii_case(self.student.major.trim())
        {
            return Err(StudentError::MajorMismatch {
                required: internship.preferred_major.clone(),
            });
        }
        if self.student.is_junior() && internship.level != InternshipLevel::Basic {
            return Err(StudentError::LevelRestricted {
                level: internship.level.label(),
                year: self.student.year,
            });
        }
        Ok(())
    }

    /// Internships the student may apply to today, narrowed by `filter`.
    pub fn eligible_internships(
        &self,
        today: NaiveDate,
        filter: &InternshipFilter,
    ) -> Vec<Internship> {
        let eligible = self
            .portal
            .internships
            .values()
            .filter(|internship| self.check_eligibility(internship, today).is_ok());
        filter_internships(eligible, filter)
    }

    pub fn my_applications(&self) -> Vec<Application> {
        self.portal
            .applications
            .iter()
            .filter(|application| application.is_from(&self.student.id))
            .cloned()
            .collect()
    }

    pub fn my_withdrawals(&self) -> Vec<Withdrawal> {
        self.portal
            .withdrawals
            .iter()
            .filter(|withdrawal| withdrawal.is_from(&self.student.id))
            .cloned()
            .collect()
    }

    pub fn apply(
        &mut self,
        internship_id: Uuid,
        today: NaiveDate,
    ) -> Result<Application, StudentError> {
        let internship = self
            .portal
            .internships
            .get(&internship_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "internship",
                id: internship_id.to_string(),
            })?;
        self.check_eligibility(internship, today)?;

        let mine = self.my_applications();
        if mine
            .iter()
            .any(|application| application.internship_id == internship_id)
        {
            return Err(StudentError::AlreadyApplied(internship_id));
        }
        if mine
            .iter()
            .any(|application| application.status == ApplicationStatus::Successful)
        {
            return Err(StudentError::AlreadyPlaced);
        }
        let limit = self.portal.policy.max_pending_applications;
        let pending = mine
            .iter()
            .filter(|application| application.status == ApplicationStatus::Pending)
            .count();
        if pending >= limit {
            return Err(StudentError::ApplicationLimitReached { limit });
        }

        let application = self.submission(internship_id, today, ApplicationStatus::Pending);
        self.portal.applications.push(application.clone())?;
        info!(
            student = %self.student.id,
            internship = %internship_id,
            "application submitted"
        );
        Ok(application)
    }

    pub fn request_withdrawal(
        &mut self,
        internship_id: Uuid,
        today: NaiveDate,
    ) -> Result<Withdrawal, StudentError> {
        let applied = self
            .portal
            .applications
            .group(&internship_id)
            .iter()
            .any(|application| {
                application.is_from(&self.student.id)
                    && application.status != ApplicationStatus::Unsuccessful
            });
        if !applied {
            return Err(StudentError::NoApplication(internship_id));
        }

        let pending = self
            .portal
            .withdrawals
            .group(&internship_id)
            .iter()
            .any(|withdrawal| {
                withdrawal.is_from(&self.student.id)
                    && withdrawal.status == WithdrawalStatus::Pending
            });
        if pending {
            return Err(StudentError::WithdrawalPending(internship_id));
        }

        let withdrawal = self.submission(internship_id, today, WithdrawalStatus::Pending);
        self.portal.withdrawals.push(withdrawal.clone())?;
        info!(
            student = %self.student.id,
            internship = %internship_id,
            "withdrawal requested"
        );
        Ok(withdrawal)
    }

    fn submission<S>(&self, internship_id: Uuid, today: NaiveDate, status: S) -> Submission<S> {
        Submission {
            internship_id,
            user_id: self.student.id.clone(),
            name: self.student.name.clone(),
            email: self.student.email.clone(),
            major: self.student.major.clone(),
            year: self.student.year,
            submitted_on: today,
            status,
        }
    }
}

/// Error raised by student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    #[error("internship {0} is not open for applications")]
    NotListed(Uuid),
    #[error("internship {id} accepts applications from {opening} to {closing}")]
    NotOpen {
        id: Uuid,
        opening: NaiveDate,
        closing: NaiveDate,
    },
    #[error("internship is reserved for {required} students")]
    MajorMismatch { required: String },
    #[error("year {year} students may only apply for Basic internships, not {level}")]
    LevelRestricted { level: &'static str, year: u8 },
    #[error("already applied for internship {0}")]
    AlreadyApplied(Uuid),
    #[error("a successful placement has already been secured")]
    AlreadyPlaced,
    #[error("at most {limit} pending applications are allowed")]
    ApplicationLimitReached { limit: usize },
    #[error("no active application for internship {0}")]
    NoApplication(Uuid),
    #[error("a withdrawal for internship {0} is already pending")]
    WithdrawalPending(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
}
