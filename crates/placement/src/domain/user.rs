use serde::Serialize;

use super::{CareerCenterStaff, CompanyRepresentative, Student};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Staff,
    Representative,
}

/// Actions a signed-in user may be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ChangePassword,
    BrowseInternships,
    ApplyForInternships,
    RequestWithdrawals,
    ManagePostings,
    DecideApplications,
    ReviewRepresentatives,
    ReviewInternships,
    ReviewWithdrawals,
    GenerateReports,
}

impl Capability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChangePassword => "change password",
            Self::BrowseInternships => "browse internships",
            Self::ApplyForInternships => "apply for internships",
            Self::RequestWithdrawals => "request withdrawals",
            Self::ManagePostings => "manage internship postings",
            Self::DecideApplications => "decide applications",
            Self::ReviewRepresentatives => "review company representatives",
            Self::ReviewInternships => "review internship postings",
            Self::ReviewWithdrawals => "review withdrawal requests",
            Self::GenerateReports => "generate reports",
        }
    }
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Staff => "Career Center Staff",
            Self::Representative => "Company Representative",
        }
    }

    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Student => &[
                Capability::ChangePassword,
                Capability::BrowseInternships,
                Capability::ApplyForInternships,
                Capability::RequestWithdrawals,
            ],
            Self::Staff => &[
                Capability::ChangePassword,
                Capability::BrowseInternships,
                Capability::ReviewRepresentatives,
                Capability::ReviewInternships,
                Capability::ReviewWithdrawals,
                Capability::GenerateReports,
            ],
            Self::Representative => &[
                Capability::ChangePassword,
                Capability::ManagePostings,
                Capability::DecideApplications,
            ],
        }
    }
}

/// A signed-in account of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum User {
    Student(Student),
    Staff(CareerCenterStaff),
    Representative(CompanyRepresentative),
}

impl User {
    pub fn id(&self) -> &str {
        match self {
            User::Student(student) => &student.id,
            User::Staff(staff) => &staff.id,
            User::Representative(rep) => &rep.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            User::Student(student) => &student.name,
            User::Staff(staff) => &staff.name,
            User::Representative(rep) => &rep.name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            User::Student(_) => Role::Student,
            User::Staff(_) => Role::Staff,
            User::Representative(_) => Role::Representative,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role().capabilities().contains(&capability)
    }

    pub(crate) fn set_password(&mut self, password: &str) {
        let slot = match self {
            User::Student(student) => &mut student.password,
            User::Staff(staff) => &mut staff.password,
            User::Representative(rep) => &mut rep.password,
        };
        *slot = password.to_string();
    }
}
