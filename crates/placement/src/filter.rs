//! Category filters and title ordering for internship listings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::Internship;

/// Filter lists applied to an internship listing.
///
/// An empty list places no constraint on its category. Values are compared
/// case-insensitively and the four categories must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipFilter {
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub majors: Vec<String>,
}

impl InternshipFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_levels<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_companies<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_majors<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.majors = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.levels.is_empty()
            && self.companies.is_empty()
            && self.majors.is_empty()
    }
}

/// Lowercased membership test for one category; `None` accepts everything.
struct Category(Option<HashSet<String>>);

impl Category {
    fn new(values: &[String]) -> Self {
        if values.is_empty() {
            Self(None)
        } else {
            Self(Some(values.iter().map(|value| value.to_lowercase()).collect()))
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match &self.0 {
            None => true,
            Some(allowed) => allowed.contains(&value.to_lowercase()),
        }
    }
}

/// Internships matching every non-empty category of `filter`, ordered by
/// title without regard to case. Equal titles keep their input order.
pub fn filter_internships<'a, I>(all: I, filter: &InternshipFilter) -> Vec<Internship>
where
    I: IntoIterator<Item = &'a Internship>,
{
    let statuses = Category::new(&filter.statuses);
    let levels = Category::new(&filter.levels);
    let companies = Category::new(&filter.companies);
    let majors = Category::new(&filter.majors);

    let mut matched: Vec<Internship> = all
        .into_iter()
        .filter(|internship| {
            statuses.accepts(internship.status.label())
                && levels.accepts(internship.level.label())
                && companies.accepts(&internship.company_name)
                && majors.accepts(&internship.preferred_major)
        })
        .cloned()
        .collect();

    matched.sort_by_cached_key(|internship| internship.title.to_lowercase());
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InternshipLevel, InternshipStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn internship(
        title: &str,
        status: InternshipStatus,
        level: InternshipLevel,
        company: &str,
        major: &str,
    ) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            level,
            preferred_major: major.to_string(),
            opening_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid"),
            closing_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid"),
            status,
            company_name: company.to_string(),
            representative_id: "rep@example.test".to_string(),
            slots: 2,
            visible: true,
        }
    }

    fn catalogue() -> Vec<Internship> {
        vec![
            internship(
                "zeta analytics",
                InternshipStatus::Approved,
                InternshipLevel::Basic,
                "Acme",
                "Computer Science",
            ),
            internship(
                "Alpha Platform",
                InternshipStatus::Rejected,
                InternshipLevel::Advanced,
                "Globex",
                "Computer Science",
            ),
            internship(
                "beta Research",
                InternshipStatus::Approved,
                InternshipLevel::Advanced,
                "Initech",
                "Biology",
            ),
            internship(
                "Gamma Ops",
                InternshipStatus::Pending,
                InternshipLevel::Intermediate,
                "Acme",
                "Business",
            ),
        ]
    }

    fn titles(internships: &[Internship]) -> Vec<&str> {
        internships.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_sorted_by_title() {
        let all = catalogue();
        let result = filter_internships(&all, &InternshipFilter::new());
        assert_eq!(
            titles(&result),
            vec!["Alpha Platform", "beta Research", "Gamma Ops", "zeta analytics"]
        );
        assert_eq!(all.len(), 4, "input is untouched");
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        let all = catalogue();
        let filter = InternshipFilter::new().with_statuses(["aPPROVED"]);
        let result = filter_internships(&all, &filter);
        assert_eq!(titles(&result), vec!["beta Research", "zeta analytics"]);
    }

    #[test]
    fn categories_combine_with_and() {
        let all = catalogue();
        let filter = InternshipFilter::new()
            .with_statuses(["Rejected"])
            .with_levels(["Advanced"]);
        assert_eq!(
            titles(&filter_internships(&all, &filter)),
            vec!["Alpha Platform"]
        );

        let filter = InternshipFilter::new()
            .with_companies(["acme", "initech"])
            .with_majors(["biology"]);
        assert_eq!(
            titles(&filter_internships(&all, &filter)),
            vec!["beta Research"]
        );

        let filter = InternshipFilter::new()
            .with_statuses(["Filled"])
            .with_companies(["Acme"]);
        assert!(filter_internships(&all, &filter).is_empty());
    }

    #[test]
    fn equal_titles_keep_input_order() {
        let mut all = catalogue();
        all.push(internship(
            "ALPHA PLATFORM",
            InternshipStatus::Approved,
            InternshipLevel::Basic,
            "Umbrella",
            "Chemistry",
        ));
        let result = filter_internships(&all, &InternshipFilter::new());
        assert_eq!(result[0].company_name, "Globex");
        assert_eq!(result[1].company_name, "Umbrella");
    }

    #[test]
    fn is_empty_tracks_every_category() {
        assert!(InternshipFilter::new().is_empty());
        assert!(!InternshipFilter::new().with_majors(["Math"]).is_empty());
    }
}
