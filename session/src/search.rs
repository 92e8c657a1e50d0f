//! Institute search: the filter query and the facets offered to narrow it.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::collections::{BTreeMap, BTreeSet};

use crate::marketplace::InstituteProfile;

pub const SCHOLARSHIP_TYPES: [&str; 2] = ["Full Scholarship", "Partial Scholarship"];

/// Words kept from an institute description on a result card.
pub const SUMMARY_WORDS: usize = 20;

/// A multi-select dimension of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facet {
    Country,
    City,
    Course,
    ScholarshipType,
}

/// Selected facets plus free-text search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstituteFilter {
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    pub courses: Vec<String>,
    pub search: String,
    pub scholarship_types: Vec<String>,
}

impl InstituteFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.cities.is_empty()
            && self.courses.is_empty()
            && self.search.trim().is_empty()
            && self.scholarship_types.is_empty()
    }

    /// Query string for `/instituteprofile/filter`, without the leading `?`.
    ///
    /// Keys appear in a fixed order and only when set; list values are
    /// comma-joined after encoding each item.
    #[must_use]
    pub fn query(&self) -> String {
        let search = self.search.trim();
        let pairs = [
            ("country", join(&self.countries)),
            ("city", join(&self.cities)),
            ("course", join(&self.courses)),
            ("search", (!search.is_empty()).then(|| urlencoding::encode(search).into_owned())),
            ("scholarship_type", join(&self.scholarship_types)),
        ];
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[must_use]
    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).iter().any(|item| item == value)
    }

    /// Select `value` under `facet` if absent, deselect it if present.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let list = self.values_mut(facet);
        if let Some(at) = list.iter().position(|item| item == value) {
            list.remove(at);
        } else {
            list.push(value.to_owned());
        }
    }

    fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Country => &self.countries,
            Facet::City => &self.cities,
            Facet::Course => &self.courses,
            Facet::ScholarshipType => &self.scholarship_types,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Country => &mut self.countries,
            Facet::City => &mut self.cities,
            Facet::Course => &mut self.courses,
            Facet::ScholarshipType => &mut self.scholarship_types,
        }
    }
}

fn join(values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| urlencoding::encode(v)).collect::<Vec<_>>().join(","))
}

/// Facet values drawn from the full institute list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Country to its cities, both sorted.
    pub locations: BTreeMap<String, BTreeSet<String>>,
    /// Distinct course titles in first-seen order.
    pub courses: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_profiles(profiles: &[InstituteProfile]) -> Self {
        let mut options = Self::default();
        for profile in profiles {
            if let Some(location) = &profile.location {
                if let (Some(country), Some(city)) = (nonblank(location.country.as_deref()), nonblank(location.city.as_deref())) {
                    options.locations.entry(country.to_owned()).or_default().insert(city.to_owned());
                }
            }
            for title in profile.courses().iter().filter_map(|c| nonblank(c.title.as_deref())) {
                if !options.courses.iter().any(|seen| seen == title) {
                    options.courses.push(title.to_owned());
                }
            }
        }
        options
    }
}

fn nonblank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// First `words` words of `text`, with `...` when anything was cut.
#[must_use]
pub fn summarize(text: &str, words: usize) -> String {
    let parts: Vec<&str> = text.split(' ').collect();
    if parts.len() > words {
        format!("{}...", parts[..words].join(" "))
    } else {
        text.to_owned()
    }
}
