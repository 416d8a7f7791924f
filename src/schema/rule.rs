//! Field rules: a message plus a pure predicate over the trimmed value.

use super::ValidationContext;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_%+-]+(?:\.[A-Za-z0-9_%+-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

// Digits are ASCII only; `\d` would also admit other scripts' digits.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[0-9\s()-]{7,20}$").expect("phone pattern is valid"));

/// Date format accepted by date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

type Check = Arc<dyn Fn(&str, &ValidationContext) -> bool + Send + Sync>;

/// One validation rule.
///
/// A rule passes when its predicate returns `true` for the (already trimmed)
/// value. Rules are evaluated in order and the first failing rule's message
/// is the one reported for the field.
#[derive(Clone)]
pub struct Rule {
    message: String,
    check: Check,
}

impl Rule {
    /// Build a rule from an arbitrary predicate.
    pub fn custom<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str, &ValidationContext) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// Value must be non-empty.
    pub fn required(message: impl Into<String>) -> Self {
        Self::custom(message, |value, _| !value.is_empty())
    }

    /// Value must have at least `min` characters.
    pub fn min_chars(min: usize, message: impl Into<String>) -> Self {
        Self::custom(message, move |value, _| value.chars().count() >= min)
    }

    /// Value must have at most `max` characters.
    pub fn max_chars(max: usize, message: impl Into<String>) -> Self {
        Self::custom(message, move |value, _| value.chars().count() <= max)
    }

    /// Value must match `regex`.
    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self::custom(message, move |value, _| regex.is_match(value))
    }

    /// Value must be a syntactically valid email address.
    pub fn email(message: impl Into<String>) -> Self {
        Self::custom(message, |value, _| EMAIL.is_match(value))
    }

    /// Value must look like a phone number: optional leading `+`, then 7 to 20
    /// digits, spaces, parentheses or hyphens.
    pub fn phone(message: impl Into<String>) -> Self {
        Self::custom(message, |value, _| PHONE.is_match(value))
    }

    /// Value must be one of `allowed`, compared exactly.
    pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        Self::custom(message, move |value, _| {
            allowed.iter().any(|candidate| candidate == value)
        })
    }

    /// Value must parse as a `YYYY-MM-DD` date.
    pub fn iso_date(message: impl Into<String>) -> Self {
        Self::custom(message, |value, _| parse_date(value).is_some())
    }

    /// Value must be a date no earlier than the context's today.
    ///
    /// Unparseable values fail; pair with [`Rule::iso_date`] to report those
    /// separately.
    pub fn not_before_today(message: impl Into<String>) -> Self {
        Self::custom(message, |value, ctx| {
            parse_date(value).is_some_and(|date| date >= ctx.today)
        })
    }

    /// Message reported when the rule fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the rule against a trimmed value.
    pub fn check(&self, value: &str, ctx: &ValidationContext) -> bool {
        (self.check)(value, ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
