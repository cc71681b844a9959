use serde::{Deserialize, Serialize};

use crate::storage::record::{password_or_default, required};
use crate::storage::{CsvRecord, RowError};

/// Career center staff member who reviews representatives, postings, and withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerCenterStaff {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub department: String,
    pub role: String,
}

impl CsvRecord for CareerCenterStaff {
    type Key = String;

    const KIND: &'static str = "staff";
    const HEADER: &'static [&'static str] =
        &["StaffID", "Name", "Role", "Department", "Email", "Password"];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            id: required("StaffID", &fields[0])?,
            name: fields[1].clone(),
            role: fields[2].clone(),
            department: fields[3].clone(),
            email: fields[4].clone(),
            password: password_or_default(&fields[5]),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role.clone(),
            self.department.clone(),
            self.email.clone(),
            self.password.clone(),
        ]
    }
}
