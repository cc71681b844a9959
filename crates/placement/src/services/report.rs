use std::fmt::Write as _;
use std::io;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Internship, InternshipLevel, InternshipStatus};
use crate::filter::InternshipFilter;
use crate::portal::Portal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: &'static str,
    pub count: usize,
}

/// Flattened posting row used by reports, listings, and CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternshipListing {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub level: &'static str,
    pub status: &'static str,
    pub preferred_major: String,
    pub opening_date: NaiveDate,
    pub closing_date: NaiveDate,
    pub slots: u8,
    pub filled: usize,
    pub visible: bool,
}

impl InternshipListing {
    pub fn new(portal: &Portal, internship: &Internship) -> Self {
        Self {
            id: internship.id,
            title: internship.title.clone(),
            company_name: internship.company_name.clone(),
            level: internship.level.label(),
            status: internship.status.label(),
            preferred_major: internship.preferred_major.clone(),
            opening_date: internship.opening_date,
            closing_date: internship.closing_date,
            slots: internship.slots,
            filled: portal.filled_slots(internship),
            visible: internship.visible,
        }
    }
}

pub fn listings(portal: &Portal, internships: &[Internship]) -> Vec<InternshipListing> {
    internships
        .iter()
        .map(|internship| InternshipListing::new(portal, internship))
        .collect()
}

/// Write listings as CSV with a header row.
pub fn export_csv<W: io::Write>(listings: &[InternshipListing], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for listing in listings {
        csv_writer.serialize(listing)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Staff-facing summary of a filtered internship view.
#[derive(Debug, Clone, Serialize)]
pub struct InternshipReport {
    pub filter: InternshipFilter,
    pub total: usize,
    pub by_status: Vec<CountEntry>,
    pub by_level: Vec<CountEntry>,
    pub internships: Vec<InternshipListing>,
}

impl InternshipReport {
    /// `internships` is expected to be the already filtered and sorted view.
    pub fn build(portal: &Portal, internships: &[Internship], filter: &InternshipFilter) -> Self {
        let by_status = InternshipStatus::ordered()
            .into_iter()
            .map(|status| CountEntry {
                label: status.label(),
                count: internships.iter().filter(|i| i.status == status).count(),
            })
            .collect();

        let by_level = InternshipLevel::ordered()
            .into_iter()
            .map(|level| CountEntry {
                label: level.label(),
                count: internships.iter().filter(|i| i.level == level).count(),
            })
            .collect();

        Self {
            filter: filter.clone(),
            total: internships.len(),
            by_status,
            by_level,
            internships: listings(portal, internships),
        }
    }

    /// Preformatted text for console display.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Internship report");
        if self.filter.is_empty() {
            let _ = writeln!(out, "Filters: none");
        } else {
            let _ = writeln!(
                out,
                "Filters: status={} level={} company={} major={}",
                describe(&self.filter.statuses),
                describe(&self.filter.levels),
                describe(&self.filter.companies),
                describe(&self.filter.majors)
            );
        }
        let _ = writeln!(out, "Total postings: {}", self.total);

        let _ = writeln!(out, "\nBy status");
        for entry in &self.by_status {
            let _ = writeln!(out, "- {}: {}", entry.label, entry.count);
        }

        let _ = writeln!(out, "\nBy level");
        for entry in &self.by_level {
            let _ = writeln!(out, "- {}: {}", entry.label, entry.count);
        }

        if self.internships.is_empty() {
            let _ = writeln!(out, "\nPostings: none");
        } else {
            let _ = writeln!(out, "\nPostings");
            for listing in &self.internships {
                let _ = writeln!(
                    out,
                    "- {} | {} | {} | {} | {}/{} filled | {} | closes {}",
                    listing.title,
                    listing.company_name,
                    listing.level,
                    listing.status,
                    listing.filled,
                    listing.slots,
                    if listing.visible { "visible" } else { "hidden" },
                    listing.closing_date
                );
            }
        }

        out
    }
}

fn describe(values: &[String]) -> String {
    if values.is_empty() {
        "any".to_string()
    } else {
        values.join("|")
    }
}
