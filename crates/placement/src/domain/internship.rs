use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::record::{
    format_date, parse_date, parse_flag, parse_integer, parse_label, parse_uuid, required,
};
use crate::storage::{CsvRecord, RowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternshipLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl InternshipLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::Basic, Self::Intermediate, Self::Advanced]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternshipStatus {
    Pending,
    Approved,
    Rejected,
    Filled,
}

impl InternshipStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Pending, Self::Approved, Self::Rejected, Self::Filled]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Filled => "Filled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "filled" => Some(Self::Filled),
            _ => None,
        }
    }
}

/// Internship posting published by a company representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub level: InternshipLevel,
    pub preferred_major: String,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub status: InternshipStatus,
    pub company_name: String,
    pub representative_id: String,
    pub slots: u8,
    pub visible: bool,
}

impl Internship {
    /// Whether the application window includes `today`.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.opening_date <= today && today <= self.closing_date
    }

    /// Approved and switched on by its representative.
    pub fn is_listed(&self) -> bool {
        self.visible && self.status == InternshipStatus::Approved
    }
}

impl CsvRecord for Internship {
    type Key = Uuid;

    const KIND: &'static str = "internship";
    const HEADER: &'static [&'static str] = &[
        "UUID",
        "Title",
        "Description",
        "Level",
        "PreferredMajor",
        "OpeningDate",
        "ClosingDate",
        "Status",
        "CompanyName",
        "Representatives",
        "NumberOfSlots",
        "Visibility",
    ];

    fn key(&self) -> Uuid {
        self.id
    }

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            id: parse_uuid("UUID", &fields[0])?,
            title: required("Title", &fields[1])?,
            description: fields[2].clone(),
            level: parse_label("Level", &fields[3], InternshipLevel::parse)?,
            preferred_major: fields[4].clone(),
            opening_date: parse_date("OpeningDate", &fields[5])?,
            closing_date: parse_date("ClosingDate", &fields[6])?,
            status: parse_label("Status", &fields[7], InternshipStatus::parse)?,
            company_name: fields[8].clone(),
            representative_id: fields[9].clone(),
            slots: parse_integer("NumberOfSlots", &fields[10])?,
            visible: parse_flag(&fields[11]),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone(),
            self.level.label().to_string(),
            self.preferred_major.clone(),
            format_date(self.opening_date),
            format_date(self.closing_date),
            self.status.label().to_string(),
            self.company_name.clone(),
            self.representative_id.clone(),
            self.slots.to_string(),
            self.visible.to_string(),
        ]
    }
}
