//! CSV-backed internship placement desk: entity stores, listing filters, and
//! the student, staff, and company representative services built on them.

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod portal;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use filter::{filter_internships, InternshipFilter};
pub use portal::Portal;
