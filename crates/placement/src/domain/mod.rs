//! Entities persisted by the placement desk.

pub mod internship;
pub mod representative;
pub mod staff;
pub mod student;
pub mod submission;
pub mod user;

pub use internship::{Internship, InternshipLevel, InternshipStatus};
pub use representative::{CompanyRepresentative, RepresentativeStatus};
pub use staff::CareerCenterStaff;
pub use student::Student;
pub use submission::{
    Application, ApplicationStatus, Submission, SubmissionStatus, Withdrawal, WithdrawalStatus,
};
pub use user::{Capability, Role, User};
