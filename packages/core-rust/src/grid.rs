//! Admin grid page metadata and URL-driven grid filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Title and description of an admin page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub description: String,
}

impl PageInfo {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Comparison applied by a grid filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    Eq,
    Neq,
    Gt,
    Gteq,
    Lt,
    Lteq,
    Like,
    Nlike,
    In,
    Nin,
}

impl FilterOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gteq => "gteq",
            Self::Lt => "lt",
            Self::Lteq => "lteq",
            Self::Like => "like",
            Self::Nlike => "nlike",
            Self::In => "in",
            Self::Nin => "nin",
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter operation name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for FilterOperation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gteq" => Ok(Self::Gteq),
            "lt" => Ok(Self::Lt),
            "lteq" => Ok(Self::Lteq),
            "like" => Ok(Self::Like),
            "nlike" => Ok(Self::Nlike),
            "in" => Ok(Self::In),
            "nin" => Ok(Self::Nin),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// A single column filter requested through the grid URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFilter {
    pub key: String,
    pub operation: FilterOperation,
    pub value: String,
}

/// Builds grid filters from decoded URL query pairs.
///
/// `name=value` becomes an `eq` filter on `name`. `name[op]=value` uses the
/// bracketed operation. Pairs with an empty key or an unknown operation are
/// skipped. Query order is preserved.
pub fn build_filters_from_query<I, K, V>(pairs: I) -> Vec<GridFilter>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .filter_map(|(raw_key, value)| {
            let (key, operation) = split_key(raw_key.as_ref())?;
            Some(GridFilter {
                key: key.to_string(),
                operation,
                value: value.into(),
            })
        })
        .collect()
}

/// Splits `name[op]` into its column name and operation.
fn split_key(raw: &str) -> Option<(&str, FilterOperation)> {
    let (key, operation) = match raw.strip_suffix(']').and_then(|s| s.split_once('[')) {
        Some((key, op)) => (key, op.parse().ok()?),
        None => (raw, FilterOperation::Eq),
    };

    if key.is_empty() {
        None
    } else {
        Some((key, operation))
    }
}
