use std::{fmt, str::FromStr};

use crate::model::project::{ParseEnumError, Project, Status};

/// Status predicate for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every status passes.
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// The next selector value, cycling All and the four statuses.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Status::Planned),
            Self::Only(Status::Planned) => Self::Only(Status::Active),
            Self::Only(Status::Active) => Self::Only(Status::Completed),
            Self::Only(Status::Completed) => Self::Only(Status::OnHold),
            Self::Only(Status::OnHold) => Self::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// The displayed subset: records whose name or constituency contains
/// `search` case-insensitively (empty search matches everything) and whose
/// status passes `status`. Order is preserved from the input set.
#[must_use]
pub fn apply<'a>(records: &'a [Project], search: &str, status: StatusFilter) -> Vec<&'a Project> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| {
            let text_hit = needle.is_empty()
                || record.name.to_lowercase().contains(&needle)
                || record.constituency.to_lowercase().contains(&needle);
            text_hit && status.matches(record.status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{StatusFilter, apply};
    use crate::model::project::{Category, Project, Status};

    fn record(name: &str, constituency: &str, status: Status) -> Project {
        Project {
            id: format!("pr-{}", name.to_lowercase().replace(' ', "-")),
            name: name.into(),
            category: Category::Infrastructure,
            constituency: constituency.into(),
            budget: 1_000_000,
            spent: 0,
            progress: 0,
            status,
            start_us: 0,
            end_us: 0,
            description: None,
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            record("Borehole A", "Kawempe North", Status::Planned),
            record("Market Shed", "Nakawa Division", Status::Active),
            record("Clinic Wing", "Kawempe South", Status::Completed),
            record("Feeder Road", "Gulu Municipality", Status::Active),
        ]
    }

    #[test]
    fn empty_search_with_all_keeps_everything() {
        let records = sample();
        assert_eq!(apply(&records, "", StatusFilter::All).len(), records.len());
    }

    #[test]
    fn search_matches_name_or_constituency_case_insensitively() {
        let records = sample();
        let hits = apply(&records, "KAWEMPE", StatusFilter::All);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.constituency.contains("Kawempe")));

        let hits = apply(&records, "market", StatusFilter::All);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Market Shed");
    }

    #[test]
    fn status_filter_composes_with_search() {
        let records = sample();
        let hits = apply(&records, "", StatusFilter::Only(Status::Active));
        assert_eq!(hits.len(), 2);

        let hits = apply(&records, "kawempe", StatusFilter::Only(Status::Active));
        assert!(hits.is_empty());
    }

    #[test]
    fn no_hits_is_an_empty_view_not_an_error() {
        let records = sample();
        assert!(apply(&records, "zzz", StatusFilter::All).is_empty());
        assert!(apply(&[], "", StatusFilter::All).is_empty());
    }

    #[test]
    fn selector_cycles_through_all_and_back() {
        let mut filter = StatusFilter::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "on-hold".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(Status::OnHold)
        );
        assert!("paused".parse::<StatusFilter>().is_err());
    }
}
