use std::fmt::Debug;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::record::{
    format_date, parse_date, parse_integer, parse_label, parse_uuid, required,
};
use crate::storage::{CsvRecord, RowError};

/// Status vocabulary carried by a [`Submission`].
pub trait SubmissionStatus: Copy + Eq + Debug {
    /// Entity name of the submission kind using this vocabulary.
    const KIND: &'static str;

    fn label(self) -> &'static str;
    fn parse(value: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Successful,
    Unsuccessful,
}

impl SubmissionStatus for ApplicationStatus {
    const KIND: &'static str = "application";

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Successful => "Successful",
            Self::Unsuccessful => "Unsuccessful",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "successful" => Some(Self::Successful),
            "unsuccessful" => Some(Self::Unsuccessful),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus for WithdrawalStatus {
    const KIND: &'static str = "withdrawal";

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A student's request filed against an internship.
///
/// Applications and withdrawals share this shape and differ only in their
/// status vocabulary. Both are grouped by the internship they target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission<S> {
    pub internship_id: Uuid,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub major: String,
    pub year: u8,
    pub submitted_on: NaiveDate,
    pub status: S,
}

pub type Application = Submission<ApplicationStatus>;
pub type Withdrawal = Submission<WithdrawalStatus>;

impl<S: SubmissionStatus> Submission<S> {
    pub fn is_from(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

impl<S: SubmissionStatus> CsvRecord for Submission<S> {
    type Key = Uuid;

    const KIND: &'static str = S::KIND;
    const HEADER: &'static [&'static str] = &[
        "UUID",
        "UserId",
        "Name",
        "Email",
        "Major",
        "Year",
        "SubmittedDate",
        "Status",
    ];

    fn key(&self) -> Uuid {
        self.internship_id
    }

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            internship_id: parse_uuid("UUID", &fields[0])?,
            user_id: required("UserId", &fields[1])?,
            name: fields[2].clone(),
            email: fields[3].clone(),
            major: fields[4].clone(),
            year: parse_integer("Year", &fields[5])?,
            submitted_on: parse_date("SubmittedDate", &fields[6])?,
            status: parse_label("Status", &fields[7], S::parse)?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.internship_id.to_string(),
            self.user_id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.major.clone(),
            self.year.to_string(),
            format_date(self.submitted_on),
            self.status.label().to_string(),
        ]
    }
}
