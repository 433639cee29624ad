//! Record listing filter.
//!
//! Turns the loosely-typed query parameters of `GET /records` into a
//! [`Predicate`] tree. The tree is store-agnostic; `records-db` compiles it
//! into parameterized SQL.
//!
//! Absent parameters contribute no clause at all. Present conditions are
//! AND-ed together, except `contains`, which becomes a nested OR over the
//! record's name and content.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Raw parameters
// ---------------------------------------------------------------------------

/// Query parameters accepted by `GET /records`, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct RecordFilterParams {
    /// Substring matched against `name` or `content`.
    pub contains: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub edited_from: Option<String>,
    pub edited_to: Option<String>,
    /// Comma-separated category ids.
    pub category: Option<String>,
    /// Comma-separated type ids.
    pub record_type: Option<String>,
}

impl RecordFilterParams {
    /// Collect parameters from decoded query pairs. Unknown keys are ignored.
    ///
    /// A repeated `category` or `type` key imposes no constraint. Any other
    /// repeated key is rejected, since there is no single value to apply.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        let mut repeated_category = false;
        let mut repeated_type = false;

        for (key, value) in pairs {
            let (slot, repeated) = match key.as_str() {
                "contains" => (&mut params.contains, None),
                "createdFrom" => (&mut params.created_from, None),
                "createdTo" => (&mut params.created_to, None),
                "editedFrom" => (&mut params.edited_from, None),
                "editedTo" => (&mut params.edited_to, None),
                "category" => (&mut params.category, Some(&mut repeated_category)),
                "type" => (&mut params.record_type, Some(&mut repeated_type)),
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
                continue;
            }
            match repeated {
                Some(flag) => *flag = true,
                None => {
                    return Err(CoreError::Validation(format!(
                        "'{key}' must be given at most once"
                    )));
                }
            }
        }

        if repeated_category {
            params.category = None;
        }
        if repeated_type {
            params.record_type = None;
        }
        Ok(params)
    }
}

// ---------------------------------------------------------------------------
// Id lists
// ---------------------------------------------------------------------------

/// One comma-separated segment of an id list parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSegment {
    Id(DbId),
    /// A segment that is not an integer. Matches no row.
    Invalid(String),
}

impl IdSegment {
    pub fn id(&self) -> Option<DbId> {
        match self {
            IdSegment::Id(id) => Some(*id),
            IdSegment::Invalid(_) => None,
        }
    }
}

/// Parse a comma-separated id list.
///
/// `None` or a blank string means "no constraint". Each segment is parsed on
/// its own, so one bad segment never hides the others.
pub fn parse_id_list(raw: Option<&str>) -> Option<Vec<IdSegment>> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    let segments = raw
        .split(',')
        .map(|segment| {
            let trimmed = segment.trim();
            match trimmed.parse::<DbId>() {
                Ok(id) => IdSegment::Id(id),
                Err(_) => IdSegment::Invalid(trimmed.to_string()),
            }
        })
        .collect();
    Some(segments)
}

/// The ids of a segment list that can match anything. Invalid segments are
/// dropped; an all-invalid list yields an empty set.
fn matchable_ids(segments: &[IdSegment]) -> Vec<DbId> {
    segments.iter().filter_map(IdSegment::id).collect()
}

// ---------------------------------------------------------------------------
// Date bounds
// ---------------------------------------------------------------------------

/// Parse a date bound parameter.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) or a
/// bare `YYYY-MM-DD` (midnight UTC). Absent or empty input is `Ok(None)`.
pub fn parse_date_bound(name: &str, raw: Option<&str>) -> Result<Option<Timestamp>, CoreError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }

    Err(CoreError::Validation(format!(
        "'{name}' must be a date (YYYY-MM-DD) or an RFC 3339 timestamp, got '{raw}'"
    )))
}

// ---------------------------------------------------------------------------
// Predicate tree
// ---------------------------------------------------------------------------

/// Text columns searchable by `contains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Content,
}

/// Timestamp columns usable as range bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Created,
    Edited,
}

/// A composable condition over records.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// All children hold. An empty conjunction matches every record.
    And(Vec<Predicate>),
    /// At least one child holds.
    Or(Vec<Predicate>),
    Contains { field: TextField, value: String },
    AtLeast { field: TimeField, bound: Timestamp },
    AtMost { field: TimeField, bound: Timestamp },
    /// The record's type id is in the set. An empty set matches nothing.
    TypeIn(Vec<DbId>),
    /// Some category of the record has an id in the set. An empty set
    /// matches nothing.
    AnyCategoryIn(Vec<DbId>),
}

impl Predicate {
    /// `true` for the empty conjunction, i.e. no filtering at all.
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Predicate::And(clauses) if clauses.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Typed filter
// ---------------------------------------------------------------------------

/// Parsed form of [`RecordFilterParams`]. Every field is optional; `None`
/// imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub contains: Option<String>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
    pub edited_from: Option<Timestamp>,
    pub edited_to: Option<Timestamp>,
    pub categories: Option<Vec<IdSegment>>,
    pub types: Option<Vec<IdSegment>>,
}

impl RecordFilter {
    /// Parse raw query parameters.
    ///
    /// Fails only on a malformed date bound. Malformed id segments are kept
    /// as [`IdSegment::Invalid`] and never fail the parse.
    pub fn from_params(params: &RecordFilterParams) -> Result<Self, CoreError> {
        Ok(Self {
            contains: params.contains.clone().filter(|s| !s.is_empty()),
            created_from: parse_date_bound("createdFrom", params.created_from.as_deref())?,
            created_to: parse_date_bound("createdTo", params.created_to.as_deref())?,
            edited_from: parse_date_bound("editedFrom", params.edited_from.as_deref())?,
            edited_to: parse_date_bound("editedTo", params.edited_to.as_deref())?,
            categories: parse_id_list(params.category.as_deref()),
            types: parse_id_list(params.record_type.as_deref()),
        })
    }

    /// Build the composite predicate. Clause order is stable: date bounds,
    /// categories, type, then the `contains` disjunction.
    pub fn predicate(&self) -> Predicate {
        let mut clauses = Vec::new();

        let bounds = [
            (TimeField::Created, self.created_from, self.created_to),
            (TimeField::Edited, self.edited_from, self.edited_to),
        ];
        for (field, from, to) in bounds {
            if let Some(bound) = from {
                clauses.push(Predicate::AtLeast { field, bound });
            }
            if let Some(bound) = to {
                clauses.push(Predicate::AtMost { field, bound });
            }
        }

        if let Some(segments) = &self.categories {
            clauses.push(Predicate::AnyCategoryIn(matchable_ids(segments)));
        }
        if let Some(segments) = &self.types {
            clauses.push(Predicate::TypeIn(matchable_ids(segments)));
        }

        if let Some(needle) = &self.contains {
            clauses.push(Predicate::Or(vec![
                Predicate::Contains {
                    field: TextField::Content,
                    value: needle.clone(),
                },
                Predicate::Contains {
                    field: TextField::Name,
                    value: needle.clone(),
                },
            ]));
        }

        Predicate::And(clauses)
    }
}
