// directory/src/filter.rs

//! Pure derivation of the visible subset of a collection.
//!
//! A record is visible when the search term (trimmed, case-insensitive) is a
//! substring of its name or of one of its searchable fields, and every facet
//! holds for it. No term and no facets is the identity. Input order is kept.

use std::fmt;
use std::sync::Arc;

use models::Listing;

/// A named boolean predicate over a record, e.g. "has emergency services".
pub struct Facet<T> {
    name: String,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Facet<T> {
    pub fn new(name: impl Into<String>, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holds(&self, record: &T) -> bool {
        (self.predicate)(record)
    }
}

impl<T> Clone for Facet<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facet").field("name", &self.name).finish()
    }
}

/// Search term plus facets.
#[derive(Debug, Clone)]
pub struct FilterQuery<T> {
    term: Option<String>,
    facets: Vec<Facet<T>>,
}

impl<T> Default for FilterQuery<T> {
    fn default() -> Self {
        Self {
            term: None,
            facets: Vec::new(),
        }
    }
}

impl<T: Listing> FilterQuery<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitespace-only terms count as no term.
    pub fn with_term(mut self, term: &str) -> Self {
        let trimmed = term.trim();
        self.term = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    pub fn with_facet(mut self, facet: Facet<T>) -> Self {
        self.facets.push(facet);
        self
    }

    pub fn with_facets(mut self, facets: impl IntoIterator<Item = Facet<T>>) -> Self {
        self.facets.extend(facets);
        self
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn facets(&self) -> &[Facet<T>] {
        &self.facets
    }

    pub fn is_identity(&self) -> bool {
        self.term.is_none() && self.facets.is_empty()
    }

    pub fn matches(&self, record: &T) -> bool {
        let term_ok = match &self.term {
            Some(term) => matches_term(record, term),
            None => true,
        };
        term_ok && self.facets.iter().all(|facet| facet.holds(record))
    }
}

/// `term` must already be lowercased.
fn matches_term<T: Listing>(record: &T, term: &str) -> bool {
    contains_folded(record.name(), term)
        || record
            .searchable_fields()
            .into_iter()
            .any(|field| contains_folded(field, term))
}

fn contains_folded(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Case-insensitive substring test used by facets.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    contains_folded(haystack, &needle.trim().to_lowercase())
}

pub fn filter<'a, T: Listing>(records: &'a [T], query: &FilterQuery<T>) -> Vec<&'a T> {
    if query.is_identity() {
        return records.iter().collect();
    }
    records.iter().filter(|record| query.matches(record)).collect()
}

/// `filter` with the term and facets passed separately.
pub fn filter_records<'a, T: Listing>(records: &'a [T], term: &str, facets: &[Facet<T>]) -> Vec<&'a T> {
    let query = FilterQuery::new().with_term(term).with_facets(facets.iter().cloned());
    filter(records, &query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Doctor, Hospital, Location};

    fn doctor(name: &str, specialty: &str, city: &str) -> Doctor {
        Doctor {
            name: name.to_string(),
            specialty: specialty.to_string(),
            location: Location {
                city: city.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn doctors() -> Vec<Doctor> {
        vec![
            doctor("Asha Rao", "Cardiology", "Pune"),
            doctor("Bimal Shah", "Neurology", "Mumbai"),
            doctor("Asha Mehta", "Dermatology", "Delhi"),
        ]
    }

    fn hospital(name: &str, specialties: &[&str], emergency: bool) -> Hospital {
        Hospital {
            name: name.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            emergency_services: emergency,
            ..Default::default()
        }
    }

    fn names<T: Listing>(records: &[&T]) -> Vec<String> {
        records.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn empty_term_and_no_facets_is_identity() {
        let records = doctors();
        let visible = filter_records(&records, "", &[]);
        assert_eq!(visible.len(), records.len());
        assert!(visible.iter().zip(records.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn whitespace_term_counts_as_no_term() {
        let records = doctors();
        assert_eq!(filter_records(&records, "   \t", &[]).len(), 3);
    }

    #[test]
    fn term_matches_names_case_insensitively_in_input_order() {
        let records = doctors();
        let visible = filter_records(&records, "asha", &[]);
        assert_eq!(names(&visible), vec!["Asha Rao", "Asha Mehta"]);
    }

    #[test]
    fn term_matches_searchable_fields() {
        let records = doctors();
        assert_eq!(names(&filter_records(&records, "NEURO", &[])), vec!["Bimal Shah"]);
        assert_eq!(names(&filter_records(&records, "delh", &[])), vec!["Asha Mehta"]);
        assert!(filter_records(&records, "orthopedics", &[]).is_empty());
    }

    #[test]
    fn every_result_contains_the_term_and_no_excluded_record_does() {
        let records = doctors();
        for term in ["a", "sh", "logy", "pune", "x"] {
            let visible = filter_records(&records, term, &[]);
            for record in &records {
                let contains = std::iter::once(record.name())
                    .chain(record.searchable_fields())
                    .any(|field| field.to_lowercase().contains(term));
                assert_eq!(visible.contains(&record), contains, "term {term} / {}", record.name);
            }
        }
    }

    #[test]
    fn facets_combine_with_and() {
        let records = vec![
            hospital("Apollo", &["Cardiology", "Oncology"], true),
            hospital("Ruby", &["Cardiology"], false),
            hospital("Sahyadri", &["Neurology"], true),
            hospital("Jehangir", &["Orthopedics"], false),
            hospital("KEM", &["Pediatrics"], true),
        ];
        let cardiology = Facet::new("specialty", |h: &Hospital| {
            h.specialties.iter().any(|s| contains_ignore_case(s, "cardiology"))
        });
        let emergency = Facet::new("emergency", |h: &Hospital| h.emergency_services);

        let both = filter_records(&records, "", &[cardiology.clone(), emergency.clone()]);
        assert_eq!(names(&both), vec!["Apollo"]);

        let only_cardiology = filter_records(&records, "", &[cardiology]);
        let only_emergency = filter_records(&records, "", &[emergency]);
        let intersection: Vec<&Hospital> = only_cardiology
            .iter()
            .copied()
            .filter(|h| only_emergency.contains(h))
            .collect();
        assert_eq!(both, intersection);
    }

    #[test]
    fn same_inputs_give_same_output() {
        let records = doctors();
        let query = FilterQuery::new().with_term("asha");
        assert_eq!(filter(&records, &query), filter(&records, &query));
    }
}
