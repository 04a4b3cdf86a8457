//! `bag-info.txt` rendering.
//!
//! Keys keep the caller's case and are emitted in ascending byte order,
//! one `"{key}: {value}\n"` line each. Values are written verbatim: an
//! embedded newline produces a malformed line.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use chrono::{Local, NaiveDate};

use crate::constants::headers::{BAGGING_DATE, PAYLOAD_OXUM, STANDARD};
use crate::manifest::PayloadOxum;

/// Ordered header → value mapping for `bag-info.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BagInfo {
    entries: BTreeMap<String, String>,
}

impl BagInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge the two generated headers, overwriting any caller value under
    /// `Bagging-Date` or `Payload-Oxum`.
    pub fn with_generated(mut self, date: NaiveDate, oxum: &PayloadOxum) -> Self {
        self.entries.insert(BAGGING_DATE.to_string(), format_bagging_date(date));
        self.entries.insert(PAYLOAD_OXUM.to_string(), oxum.to_string());
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(self.render().as_bytes())?;
        w.flush()
    }
}

impl From<BTreeMap<String, String>> for BagInfo {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl From<HashMap<String, String>> for BagInfo {
    fn from(entries: HashMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BagInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// `YYYY-MM-DD`
pub fn format_bagging_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Local calendar date used for `Bagging-Date`.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `source-organization` → `Source-Organization`.
///
/// Each dash-separated word gets an upper-case first letter and a
/// lower-case remainder.
pub fn header_from_flag(flag: &str) -> String {
    flag.trim_start_matches('-')
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

/// Whether `key` is one of the documented caller-suppliable headers.
pub fn is_standard_header(key: &str) -> bool {
    STANDARD.contains(&key)
}
