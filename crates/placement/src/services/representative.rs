use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, CompanyRepresentative, Internship, InternshipLevel,
    InternshipStatus,
};
use crate::filter::{filter_internships, InternshipFilter};
use crate::portal::Portal;
use crate::storage::StoreError;

/// Fields a representative supplies for a new posting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InternshipDraft {
    pub title: String,
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub slots: u8,
}

/// Posting management for an approved company representative.
pub struct RepresentativeDesk<'a> {
    portal: &'a mut Portal,
    representative: CompanyRepresentative,
}

impl<'a> RepresentativeDesk<'a> {
    pub fn new(
        portal: &'a mut Portal,
        representative: CompanyRepresentative,
    ) -> Result<Self, RepresentativeError> {
        if !representative.is_approved() {
            return Err(RepresentativeError::NotApproved(representative.id));
        }
        Ok(Self {
            portal,
            representative,
        })
    }

    pub fn representative(&self) -> &CompanyRepresentative {
        &self.representative
    }

    /// Postings owned by this representative, ordered by title.
    pub fn my_internships(&self) -> Vec<Internship> {
        let owned = self
            .portal
            .internships
            .values()
            .filter(|internship| internship.representative_id == self.representative.id);
        filter_internships(owned, &InternshipFilter::new())
    }

    pub fn create_internship(
        &mut self,
        draft: InternshipDraft,
    ) -> Result<Internship, RepresentativeError> {
        let policy = self.portal.policy;

        if draft.title.trim().is_empty() {
            return Err(RepresentativeError::InvalidDraft("title must not be blank"));
        }
        if draft.preferred_major.trim().is_empty() {
            return Err(RepresentativeError::InvalidDraft(
                "preferred major must not be blank",
            ));
        }
        if draft.closing_date < draft.opening_date {
            return Err(RepresentativeError::InvalidDraft(
                "closing date must not precede opening date",
            ));
        }
        if draft.slots == 0 || draft.slots > policy.max_slots {
            return Err(RepresentativeError::SlotsOutOfRange {
                requested: draft.slots,
                max: policy.max_slots,
            });
        }

        let owned = self
            .portal
            .internships
            .values()
            .filter(|internship| internship.representative_id == self.representative.id)
            .count();
        if owned >= policy.max_internships_per_representative {
            return Err(RepresentativeError::PostingLimitReached {
                limit: policy.max_internships_per_representative,
            });
        }

        let internship = Internship {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            level: draft.level,
            preferred_major: draft.preferred_major.trim().to_string(),
            opening_date: draft.opening_date,
            closing_date: draft.closing_date,
            status: InternshipStatus::Pending,
            company_name: self.representative.company_name.clone(),
            representative_id: self.representative.id.clone(),
            slots: draft.slots,
            visible: false,
        };

        self.portal.internships.insert(internship.clone())?;
        info!(
            representative = %self.representative.id,
            internship = %internship.id,
            title = %internship.title,
            "internship created"
        );
        Ok(internship)
    }

    /// Show or hide an approved posting.
    pub fn set_visibility(
        &mut self,
        internship_id: Uuid,
        visible: bool,
    ) -> Result<Internship, RepresentativeError> {
        let internship = self.owned(internship_id)?;
        if !matches!(
            internship.status,
            InternshipStatus::Approved | InternshipStatus::Filled
        ) {
            return Err(RepresentativeError::NotApprovedPosting {
                id: internship_id,
                status: internship.status.label(),
            });
        }

        let updated = self
            .portal
            .internships
            .update(&internship_id, |internship| internship.visible = visible)?;
        info!(internship = %internship_id, visible, "visibility changed");
        Ok(updated)
    }

    pub fn applications_for(
        &self,
        internship_id: Uuid,
    ) -> Result<Vec<Application>, RepresentativeError> {
        self.owned(internship_id)?;
        Ok(self.portal.applications.group(&internship_id).to_vec())
    }

    /// Mark a pending application successful or unsuccessful.
    ///
    /// A successful decision takes one slot; the posting becomes filled when
    /// no slots remain.
    pub fn decide_application(
        &mut self,
        internship_id: Uuid,
        student_id: &str,
        successful: bool,
    ) -> Result<Application, RepresentativeError> {
        let internship = self.owned(internship_id)?;
        if successful && internship.status != InternshipStatus::Approved {
            return Err(RepresentativeError::NotApprovedPosting {
                id: internship_id,
                status: internship.status.label(),
            });
        }
        let slots = usize::from(internship.slots);

        let decision = if successful {
            ApplicationStatus::Successful
        } else {
            ApplicationStatus::Unsuccessful
        };
        let application = self
            .portal
            .applications
            .update_where(
                &internship_id,
                |application| {
                    application.is_from(student_id)
                        && application.status == ApplicationStatus::Pending
                },
                |application| application.status = decision,
            )
            .map_err(|err| match err {
                StoreError::NotFound { .. } => RepresentativeError::NoPendingApplication {
                    internship: internship_id,
                    student: student_id.to_string(),
                },
                other => other.into(),
            })?;

        info!(
            internship = %internship_id,
            student = student_id,
            status = application.status_label(),
            "application decided"
        );

        if successful {
            let filled = self
                .portal
                .applications
                .group(&internship_id)
                .iter()
                .filter(|application| application.status == ApplicationStatus::Successful)
                .count();
            if filled >= slots {
                self.portal.internships.update(&internship_id, |internship| {
                    internship.status = InternshipStatus::Filled
                })?;
                info!(internship = %internship_id, filled, "internship filled");
            }
        }

        Ok(application)
    }

    fn owned(&self, internship_id: Uuid) -> Result<Internship, RepresentativeError> {
        let internship = self
            .portal
            .internships
            .get(&internship_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "internship",
                id: internship_id.to_string(),
            })?;
        if internship.representative_id != self.representative.id {
            return Err(RepresentativeError::NotOwner(internship_id));
        }
        Ok(internship.clone())
    }
}

/// Error raised by representative posting operations.
#[derive(Debug, thiserror::Error)]
pub enum RepresentativeError {
    #[error("representative {0} is not approved")]
    NotApproved(String),
    #[error("internship {0} belongs to another representative")]
    NotOwner(Uuid),
    #[error("internship {id} is {status}, not approved")]
    NotApprovedPosting { id: Uuid, status: &'static str },
    #[error("invalid internship: {0}")]
    InvalidDraft(&'static str),
    #[error("slots must be between 1 and {max}, got {requested}")]
    SlotsOutOfRange { requested: u8, max: u8 },
    #[error("posting limit of {limit} internships reached")]
    PostingLimitReached { limit: usize },
    #[error("no pending application from {student} for internship {internship}")]
    NoPendingApplication { internship: Uuid, student: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
