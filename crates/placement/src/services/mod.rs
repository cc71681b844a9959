//! Role services consumed by the command line: sign-in and registration,
//! staff reviews, representative postings, and student applications.

pub mod auth;
pub mod report;
pub mod representative;
pub mod staff;
pub mod student;

#[cfg(test)]
mod tests;

pub use auth::{change_password, login, register_representative, AuthError, RegistrationRequest};
pub use report::{export_csv, listings, CountEntry, InternshipListing, InternshipReport};
pub use representative::{InternshipDraft, RepresentativeDesk, RepresentativeError};
pub use staff::{StaffDesk, StaffError};
pub use student::{StudentDesk, StudentError};
