// =============================================================================
// Job Category Mapping
// =============================================================================
//
// Maps a sentiment label onto a human-readable job category through a
// static table. Each label owns an ordered list of categories, but only the
// first entry is ever returned; the rest of each list is kept so the table
// shape survives for multi-candidate output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sentiment::{NEGATIVE, POSITIVE};

/// Returned for labels missing from the table (or mapped to an empty list)
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

const POSITIVE_CATEGORIES: &[&str] = &[
    "Java Developer",
    "Testing Engineer",
    "Python Developer",
    "DevOps Engineer",
    "Web Designer",
    "Web Developer",
    "HR Manager",
    "Blockchain Developer",
    "ETL Developer",
    "Operations Manager",
    "Data Science Manager",
    "Sales Manager",
    "Mechanical Engineer",
    "Arts Developer",
    "Electrical Engineering",
    "Health and Fitness Coach",
    "Business Analyst",
    "DotNet Developer",
    "Automation Testing Engineer",
    "Network Security Engineer",
    "SAP Developer",
    "Civil Engineer",
    "Advocate",
];

const NEGATIVE_CATEGORIES: &[&str] = &[
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "Systems Analyst",
    "Cloud Architect",
    "Mobile Developer",
    "UI/UX Designer",
    "Cybersecurity Analyst",
];

/// Label -> ordered list of category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    entries: HashMap<String, Vec<String>>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let entries = [(POSITIVE, POSITIVE_CATEGORIES), (NEGATIVE, NEGATIVE_CATEGORIES)]
            .into_iter()
            .map(|(label, names)| {
                (
                    label.to_string(),
                    names.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }
}

impl CategoryTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Category for `label`: first entry of its list, else `UNKNOWN_CATEGORY`
    pub fn map_category(&self, label: &str) -> &str {
        self.entries
            .get(label)
            .and_then(|names| names.first())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Full list for `label`. Only index 0 is used by `map_category`.
    pub fn candidates(&self, label: &str) -> &[String] {
        self.entries.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `category` can be produced by `map_category` for some label
    pub fn contains(&self, category: &str) -> bool {
        category == UNKNOWN_CATEGORY
            || self
                .entries
                .values()
                .any(|names| names.iter().any(|n| n == category))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
