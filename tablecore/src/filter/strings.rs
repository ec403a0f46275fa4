//! Predicates over string cells, alone or paired with a second column.
use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;

/// A test on one string cell. A missing cell answers `false` to everything
/// except [`StringPredicate::IsMissing`].
#[derive(Clone, Debug)]
pub enum StringPredicate {
    EqualTo(String),
    NotEqualTo(String),
    EqualToIgnoringCase(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    IsIn(BTreeSet<String>),
    IsNotIn(BTreeSet<String>),
    /// Must match the whole cell. Build with [`StringPredicate::matches_regex`].
    MatchesRegex(Regex),
    IsUpperCase,
    IsLowerCase,
    IsAlpha,
    IsAlphaNumeric,
    IsNumeric,
    IsEmptyString,
    /// Length in characters.
    IsLongerThan(usize),
    IsShorterThan(usize),
    LengthEqualTo(usize),
    IsMissing,
    IsNotMissing,
}

impl StringPredicate {
    /// Compiles `pattern` anchored at both ends.
    pub fn matches_regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(StringPredicate::MatchesRegex(regex))
    }

    pub fn is_in<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        StringPredicate::IsIn(values.into_iter().map(Into::into).collect())
    }

    pub fn is_not_in<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        StringPredicate::IsNotIn(values.into_iter().map(Into::into).collect())
    }

    pub fn test(&self, value: Option<&str>) -> bool {
        let Some(s) = value else {
            return matches!(self, StringPredicate::IsMissing);
        };
        match self {
            StringPredicate::EqualTo(v) => s == v,
            StringPredicate::NotEqualTo(v) => s != v,
            StringPredicate::EqualToIgnoringCase(v) => eq_ignore_case(s, v),
            StringPredicate::Contains(v) => s.contains(v.as_str()),
            StringPredicate::StartsWith(v) => s.starts_with(v.as_str()),
            StringPredicate::EndsWith(v) => s.ends_with(v.as_str()),
            StringPredicate::IsIn(set) => set.contains(s),
            StringPredicate::IsNotIn(set) => !set.contains(s),
            StringPredicate::MatchesRegex(regex) => regex.is_match(s),
            StringPredicate::IsUpperCase => all_chars(s, char::is_uppercase),
            StringPredicate::IsLowerCase => all_chars(s, char::is_lowercase),
            StringPredicate::IsAlpha => all_chars(s, char::is_alphabetic),
            StringPredicate::IsAlphaNumeric => all_chars(s, char::is_alphanumeric),
            StringPredicate::IsNumeric => all_chars(s, char::is_numeric),
            StringPredicate::IsEmptyString => s.is_empty(),
            StringPredicate::IsLongerThan(n) => s.chars().count() > *n,
            StringPredicate::IsShorterThan(n) => s.chars().count() < *n,
            StringPredicate::LengthEqualTo(n) => s.chars().count() == *n,
            StringPredicate::IsMissing => false,
            StringPredicate::IsNotMissing => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StringPredicate::EqualTo(_) => "is_equal_to",
            StringPredicate::NotEqualTo(_) => "is_not_equal_to",
            StringPredicate::EqualToIgnoringCase(_) => "equals_ignore_case",
            StringPredicate::Contains(_) => "contains_string",
            StringPredicate::StartsWith(_) => "starts_with",
            StringPredicate::EndsWith(_) => "ends_with",
            StringPredicate::IsIn(_) => "is_in",
            StringPredicate::IsNotIn(_) => "is_not_in",
            StringPredicate::MatchesRegex(_) => "matches_regex",
            StringPredicate::IsUpperCase => "is_upper_case",
            StringPredicate::IsLowerCase => "is_lower_case",
            StringPredicate::IsAlpha => "is_alpha",
            StringPredicate::IsAlphaNumeric => "is_alpha_numeric",
            StringPredicate::IsNumeric => "is_numeric",
            StringPredicate::IsEmptyString => "is_empty_string",
            StringPredicate::IsLongerThan(_) => "is_longer_than",
            StringPredicate::IsShorterThan(_) => "is_shorter_than",
            StringPredicate::LengthEqualTo(_) => "length_equals",
            StringPredicate::IsMissing => "is_missing",
            StringPredicate::IsNotMissing => "is_not_missing",
        }
    }
}

/// A test pairing row `i` of the filtered column with row `i` of another
/// string column. Rows where either side is missing never match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringPairPredicate {
    EqualTo,
    NotEqualTo,
    EqualToIgnoringCase,
    StartsWith,
    EndsWith,
    Contains,
}

impl StringPairPredicate {
    pub fn test(&self, value: Option<&str>, other: Option<&str>) -> bool {
        let (Some(a), Some(b)) = (value, other) else {
            return false;
        };
        match self {
            StringPairPredicate::EqualTo => a == b,
            StringPairPredicate::NotEqualTo => a != b,
            StringPairPredicate::EqualToIgnoringCase => eq_ignore_case(a, b),
            StringPairPredicate::StartsWith => a.starts_with(b),
            StringPairPredicate::EndsWith => a.ends_with(b),
            StringPairPredicate::Contains => a.contains(b),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StringPairPredicate::EqualTo => "column_is_equal_to",
            StringPairPredicate::NotEqualTo => "column_is_not_equal_to",
            StringPairPredicate::EqualToIgnoringCase => "column_equals_ignore_case",
            StringPairPredicate::StartsWith => "column_starts_with",
            StringPairPredicate::EndsWith => "column_ends_with",
            StringPairPredicate::Contains => "column_contains_string",
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Non-empty and every character satisfies `f`.
fn all_chars(s: &str, f: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(f)
}
