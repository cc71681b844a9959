use tracing::info;

use crate::config::{DataConfig, PlacementPolicy};
use crate::domain::{
    Application, ApplicationStatus, CareerCenterStaff, CompanyRepresentative, Internship,
    Student, Withdrawal,
};
use crate::storage::{EntityStore, GroupedStore, StoreError};

/// Owner of every entity store for one session.
///
/// All stores are loaded once at construction. Mutations need `&mut Portal`,
/// so only one caller can change data at a time.
pub struct Portal {
    pub(crate) students: EntityStore<Student>,
    pub(crate) staff: EntityStore<CareerCenterStaff>,
    pub(crate) representatives: EntityStore<CompanyRepresentative>,
    pub(crate) internships: EntityStore<Internship>,
    pub(crate) applications: GroupedStore<Application>,
    pub(crate) withdrawals: GroupedStore<Withdrawal>,
    pub(crate) policy: PlacementPolicy,
}

impl Portal {
    pub fn open(data: &DataConfig, policy: PlacementPolicy) -> Result<Self, StoreError> {
        let portal = Self {
            students: EntityStore::load(data.students_path())?,
            staff: EntityStore::load(data.staff_path())?,
            representatives: EntityStore::load(data.representatives_path())?,
            internships: EntityStore::load(data.internships_path())?,
            applications: GroupedStore::load(data.applications_path())?,
            withdrawals: GroupedStore::load(data.withdrawals_path())?,
            policy,
        };

        info!(
            dir = %data.dir().display(),
            students = portal.students.len(),
            staff = portal.staff.len(),
            representatives = portal.representatives.len(),
            internships = portal.internships.len(),
            applications = portal.applications.len(),
            withdrawals = portal.withdrawals.len(),
            "placement data loaded"
        );

        Ok(portal)
    }

    pub fn students(&self) -> &EntityStore<Student> {
        &self.students
    }

    pub fn staff(&self) -> &EntityStore<CareerCenterStaff> {
        &self.staff
    }

    pub fn representatives(&self) -> &EntityStore<CompanyRepresentative> {
        &self.representatives
    }

    pub fn internships(&self) -> &EntityStore<Internship> {
        &self.internships
    }

    pub fn applications(&self) -> &GroupedStore<Application> {
        &self.applications
    }

    pub fn withdrawals(&self) -> &GroupedStore<Withdrawal> {
        &self.withdrawals
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Applications marked successful for one internship.
    pub fn filled_slots(&self, internship: &Internship) -> usize {
        self.applications
            .group(&internship.id)
            .iter()
            .filter(|application| application.status == ApplicationStatus::Successful)
            .count()
    }
}
