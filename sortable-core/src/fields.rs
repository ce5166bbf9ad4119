//! Field tokens, sort directions and logical field mappings
//!
//! A field token is a concrete field name with an optional direction prefix:
//!
//! | prefix      | meaning                                   |
//! |-------------|-------------------------------------------|
//! | `--`        | always descending                         |
//! | `++`        | always ascending                          |
//! | `-`         | opposite of the requested direction       |
//! | `+` or none | follows the requested direction           |
//!
//! [`prepare_fields`] resolves a token list against a requested direction
//! into [`SignedField`]s, which render either as signed names (`"-rating"`)
//! for native ordering or as an SQL `ORDER BY` fragment via [`order_clause`].

use crate::error::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parse `"asc"` or `"desc"`; anything else is not a direction
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn is_descending(self) -> bool {
        self == Direction::Desc
    }
}

impl FromStr for Direction {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        Direction::parse(s).ok_or_else(|| SortError::InvalidDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete field name with its resolved direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedField {
    pub name: String,
    pub descending: bool,
}

impl SignedField {
    pub fn new(name: impl Into<String>, descending: bool) -> Self {
        Self {
            name: name.into(),
            descending,
        }
    }

    pub fn ascending(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn descending(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn direction(&self) -> Direction {
        if self.descending {
            Direction::Desc
        } else {
            Direction::Asc
        }
    }

    /// Render as an `ORDER BY` term, e.g. `"title ASC"`
    pub fn to_predicate(&self) -> String {
        if self.descending {
            format!("{} DESC", self.name)
        } else {
            format!("{} ASC", self.name)
        }
    }
}

/// Signed form: a leading `-` marks a descending field
impl fmt::Display for SignedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

fn sign_token(token: &str, direction: Direction) -> SignedField {
    if let Some(rest) = token.strip_prefix("--") {
        SignedField::descending(rest)
    } else if let Some(rest) = token.strip_prefix("++") {
        SignedField::ascending(rest)
    } else if let Some(rest) = token.strip_prefix('-') {
        SignedField::new(rest, direction == Direction::Asc)
    } else {
        let rest = token.strip_prefix('+').unwrap_or(token);
        SignedField::new(rest, direction == Direction::Desc)
    }
}

/// Resolve field tokens against a requested direction string.
///
/// Anything other than `"asc"` or `"desc"` is treated as `"asc"`.
pub fn prepare_fields<I, S>(fields: I, direction: &str) -> Vec<SignedField>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    prepare_fields_with(fields, Direction::parse(direction).unwrap_or_default())
}

/// Resolve field tokens against an already parsed direction
pub fn prepare_fields_with<I, S>(fields: I, direction: Direction) -> Vec<SignedField>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|token| sign_token(token.as_ref(), direction))
        .collect()
}

/// Signed field names suitable for a native `order_by` call
pub fn signed_names<I, S>(fields: I, direction: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    prepare_fields(fields, direction)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Join already signed fields into an `ORDER BY` fragment
pub fn predicate_from_signed(fields: &[SignedField]) -> String {
    fields
        .iter()
        .map(SignedField::to_predicate)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SQL `ORDER BY` fragment for field tokens, e.g. `"one ASC, two DESC"`
pub fn order_clause<I, S>(fields: I, direction: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    predicate_from_signed(&prepare_fields(fields, direction))
}

/// Field name of a token with its direction prefix removed
fn bare_name(token: &str) -> &str {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix("++"))
        .or_else(|| token.strip_prefix('-'))
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token)
}

/// One entry of caller-provided mapping input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// Logical name that is also the concrete field
    Name(String),
    /// Logical name backed by one concrete field token
    Single(String, String),
    /// Logical name backed by an ordered list of tokens
    Many(String, Vec<String>),
}

impl FieldSpec {
    fn into_entry(self) -> (String, Vec<String>) {
        match self {
            FieldSpec::Name(name) => (name.clone(), vec![name]),
            FieldSpec::Single(logical, token) => (logical, vec![token]),
            FieldSpec::Many(logical, tokens) => (logical, tokens),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(value: &str) -> Self {
        FieldSpec::Name(value.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(value: String) -> Self {
        FieldSpec::Name(value)
    }
}

impl From<(&str, &str)> for FieldSpec {
    fn from((logical, token): (&str, &str)) -> Self {
        FieldSpec::Single(logical.to_string(), token.to_string())
    }
}

impl From<(String, String)> for FieldSpec {
    fn from((logical, token): (String, String)) -> Self {
        FieldSpec::Single(logical, token)
    }
}

impl From<(&str, Vec<&str>)> for FieldSpec {
    fn from((logical, tokens): (&str, Vec<&str>)) -> Self {
        FieldSpec::Many(
            logical.to_string(),
            tokens.into_iter().map(str::to_string).collect(),
        )
    }
}

impl<const N: usize> From<(&str, [&str; N])> for FieldSpec {
    fn from((logical, tokens): (&str, [&str; N])) -> Self {
        FieldSpec::Many(
            logical.to_string(),
            tokens.into_iter().map(str::to_string).collect(),
        )
    }
}

impl From<(String, Vec<String>)> for FieldSpec {
    fn from((logical, tokens): (String, Vec<String>)) -> Self {
        FieldSpec::Many(logical, tokens)
    }
}

/// Logical field name to concrete field tokens.
///
/// Every logical name maps to a non-empty token list; the order of the list
/// is the tie-break order. Insertion order of logical names is preserved and
/// re-inserting a name replaces its tokens in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from mixed mapping input, failing on the first malformed entry
    pub fn try_from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        let mut map = Self::new();
        for spec in specs {
            let (logical, tokens) = spec.into().into_entry();
            map.insert(logical, tokens)?;
        }
        Ok(map)
    }

    pub fn insert(&mut self, logical: impl Into<String>, tokens: Vec<String>) -> Result<()> {
        let logical = logical.into();
        validate_entry(&logical, &tokens)?;

        match self.entries.iter_mut().find(|(name, _)| *name == logical) {
            Some((_, existing)) => *existing = tokens,
            None => self.entries.push((logical, tokens)),
        }
        Ok(())
    }

    pub fn get(&self, logical: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == logical)
            .map(|(_, tokens)| tokens.as_slice())
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.get(logical).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn logical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }
}

fn validate_entry(logical: &str, tokens: &[String]) -> Result<()> {
    let invalid = |reason: &str| SortError::InvalidFieldMapping {
        logical: logical.to_string(),
        reason: reason.to_string(),
    };

    if logical.is_empty() {
        return Err(invalid("logical name is empty"));
    }
    if tokens.is_empty() {
        return Err(invalid("no concrete fields"));
    }
    if tokens.iter().any(|token| bare_name(token).is_empty()) {
        return Err(invalid("field token has no field name"));
    }
    Ok(())
}
