use serde::{Deserialize, Serialize};

use crate::storage::record::{parse_label, password_or_default, required};
use crate::storage::{CsvRecord, RowError};

/// Registration state of a company representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepresentativeStatus {
    Pending,
    Approved,
    Rejected,
}

impl RepresentativeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Company representative account. The id is the registration e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRepresentative {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub company_name: String,
    pub department: String,
    pub position: String,
    pub status: RepresentativeStatus,
}

impl CompanyRepresentative {
    pub fn is_approved(&self) -> bool {
        self.status == RepresentativeStatus::Approved
    }
}

impl CsvRecord for CompanyRepresentative {
    type Key = String;

    const KIND: &'static str = "company representative";
    const HEADER: &'static [&'static str] = &[
        "CompanyRepID",
        "Name",
        "CompanyName",
        "Department",
        "Position",
        "Email",
        "Status",
        "Password",
    ];

    fn key(&self) -> String {
        self.id.clone()
    }

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        Ok(Self {
            id: required("CompanyRepID", &fields[0])?,
            name: fields[1].clone(),
            company_name: fields[2].clone(),
            department: fields[3].clone(),
            position: fields[4].clone(),
            email: fields[5].clone(),
            status: parse_label("Status", &fields[6], RepresentativeStatus::parse)?,
            password: password_or_default(&fields[7]),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.company_name.clone(),
            self.department.clone(),
            self.position.clone(),
            self.email.clone(),
            self.status.label().to_string(),
            self.password.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            RepresentativeStatus::parse(" APPROVED "),
            Some(RepresentativeStatus::Approved)
        );
        assert_eq!(RepresentativeStatus::parse("maybe"), None);
    }

    #[test]
    fn unknown_status_rejects_the_row() {
        let fields = row(&[
            "hr@acme.test",
            "Hana",
            "Acme",
            "HR",
            "Lead",
            "hr@acme.test",
            "Sleeping",
            "pw",
        ]);
        assert!(matches!(
            CompanyRepresentative::parse_row(&fields),
            Err(RowError::Label { column: "Status", .. })
        ));
    }

    #[test]
    fn fields_follow_the_header_layout() {
        let fields = row(&[
            "hr@acme.test",
            "Hana",
            "Acme",
            "HR",
            "Lead",
            "hr@acme.test",
            "pending",
            "",
        ]);
        let rep = CompanyRepresentative::parse_row(&fields).expect("row parses");

        assert_eq!(rep.company_name, "Acme");
        assert_eq!(rep.position, "Lead");
        assert_eq!(rep.status, RepresentativeStatus::Pending);
        assert_eq!(rep.password, "password");
        assert_eq!(rep.to_fields()[6], "Pending");
    }
}
