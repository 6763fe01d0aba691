#![forbid(unsafe_code)]

//! Filter field naming.
//!
//! Report filters are plain form inputs whose `name` is a Django lookup:
//! `<field>__<lookup>`, e.g. `quantity__gte`. Next to each input sits an
//! operator span (`id="operator_quantity"`) showing the current comparison;
//! the input itself has the same id with `operator` replaced by `filter`.
//! Picking another operator rewrites only the lookup suffix of the name.

use core::fmt;

const LOOKUP_SEPARATOR: &str = "__";

/// Lookups the report backend accepts in filter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterLookup {
    Exact,
    In,
    StartsWith,
    EndsWith,
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterLookup {
    pub const ALL: [Self; 9] = [
        Self::Exact,
        Self::In,
        Self::StartsWith,
        Self::EndsWith,
        Self::Contains,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
    ];

    /// Lookup suffix as written in the field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::In => "in",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Contains => "contains",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    /// Two-letter operator code of the report grid.
    #[must_use]
    pub const fn grid_op(self) -> &'static str {
        match self {
            Self::Exact => "eq",
            Self::In => "in",
            Self::StartsWith => "bw",
            Self::EndsWith => "ew",
            Self::Contains => "cn",
            Self::Gt => "gt",
            Self::Gte => "ge",
            Self::Lt => "lt",
            Self::Lte => "le",
        }
    }

    #[must_use]
    pub fn parse(lookup: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == lookup)
    }
}

impl fmt::Display for FilterLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter input `name`, split at its last `__`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFieldName<'a> {
    prefix: &'a str,
    lookup: Option<&'a str>,
}

impl<'a> FilterFieldName<'a> {
    #[must_use]
    pub fn parse(name: &'a str) -> Self {
        match name.rsplit_once(LOOKUP_SEPARATOR) {
            Some((prefix, lookup)) => Self {
                prefix,
                lookup: Some(lookup),
            },
            None => Self {
                prefix: name,
                lookup: None,
            },
        }
    }

    /// Everything before the last `__`.
    #[must_use]
    pub const fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Raw suffix after the last `__`, if the name has one.
    #[must_use]
    pub const fn lookup(&self) -> Option<&'a str> {
        self.lookup
    }

    /// The name with its lookup suffix replaced by `operator`.
    ///
    /// A name without `__` gets one appended.
    #[must_use]
    pub fn with_operator(&self, operator: &str) -> String {
        format!("{}{LOOKUP_SEPARATOR}{operator}", self.prefix)
    }
}

/// Id of the filter input paired with an operator span.
///
/// Returns `None` when the span id does not follow the `operator` naming.
#[must_use]
pub fn filter_field_id(operator_id: &str) -> Option<String> {
    operator_id
        .contains("operator")
        .then(|| operator_id.replacen("operator", "filter", 1))
}
