use serde::{Deserialize, Serialize};

use crate::storage::record::{parse_integer, password_or_default, required};
use crate::storage::{CsvRecord, RowError};

/// Student account as stored in the student file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub year: u8,
    pub major: String,
}

impl Student {
    /// Years one and two are limited to basic-level internships.
    pub fn is_junior(&self) -> bool {
        self.year <= 2
    }
}

impl CsvRecord for Student {
    type Key = String;

    const KIND: &'static str = "student";
    const HEADER: &'static [&'static str] =
        &["StudentID", "Name", "Major", "Year", "Email", "Password"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            id: required("StudentID", &fields[0])?,
            name: fields[1].clone(),
            major: fields[2].clone(),
            year: parse_integer("Year", &fields[3])?,
            email: fields[4].clone(),
            password: password_or_default(&fields[5]),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.major.clone(),
            self.year.to_string(),
            self.email.clone(),
            self.password.clone(),
        ]
    }
}
