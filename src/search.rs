// Search over repository items.
// Multi-field filter with a pluggable matcher; array fields match on any element.

use regex::{Regex, RegexBuilder};

use crate::api::Item;

/// A field value as seen by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(Vec<&'a str>),
}

/// A record whose fields can be searched by name.
pub trait Searchable {
    /// The named field, or `None` when the record does not have it.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Predicate deciding whether a single string satisfies a query.
pub trait Matcher {
    fn test(&self, value: &str) -> bool;
}

impl Matcher for Regex {
    fn test(&self, value: &str) -> bool {
        self.is_match(value)
    }
}

impl<F: Fn(&str) -> bool> Matcher for F {
    fn test(&self, value: &str) -> bool {
        self(value)
    }
}

/// Keep the records where any of `fields` matches.
///
/// Missing and empty field values are skipped. The result preserves the
/// order of `items`.
pub fn filter<'a, R, M>(items: &'a [R], matcher: &M, fields: &[&str]) -> Vec<&'a R>
where
    R: Searchable,
    M: Matcher + ?Sized,
{
    items
        .iter()
        .filter(|item| fields.iter().any(|field| matches_field(*item, matcher, field)))
        .collect()
}

fn matches_field<R: Searchable, M: Matcher + ?Sized>(item: &R, matcher: &M, field: &str) -> bool {
    match item.field(field) {
        Some(FieldValue::Text(value)) => !value.is_empty() && matcher.test(value),
        Some(FieldValue::List(values)) => values.iter().any(|v| matcher.test(v)),
        None => false,
    }
}

/// Fields searched when the caller does not name any.
pub const DEFAULT_FIELDS: &[&str] = &["title", "by", "labels"];

/// A case-insensitive literal search over named fields.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    text: String,
    pattern: Regex,
    fields: Vec<String>,
}

impl SearchQuery {
    pub fn new(text: &str, fields: &[&str]) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            text: text.to_string(),
            pattern,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn apply<'a, R: Searchable>(&self, items: &'a [R]) -> Vec<&'a R> {
        let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        filter(items, &self.pattern, &fields)
    }
}

impl Searchable for Item {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some(FieldValue::Text(&self.title)),
            "by" => Some(FieldValue::Text(&self.by)),
            "link" => Some(FieldValue::Text(&self.link)),
            "labels" => Some(FieldValue::List(
                self.labels.iter().map(String::as_str).collect(),
            )),
            _ => None,
        }
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// JSON objects expose their string and string-array members. Other JSON
/// types count as absent.
impl Searchable for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(FieldValue::Text(s)),
            serde_json::Value::Array(values) => Some(FieldValue::List(
                values.iter().filter_map(|v| v.as_str()).collect(),
            )),
            _ => None,
        }
    }
}
