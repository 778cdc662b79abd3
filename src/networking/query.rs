//! Conversion of structured parameter sets into ordered query items.
//!
//! Parameter types implement [`QueryParameters`] by listing their fields in
//! declaration order through a [`QueryItems`] builder. The builder owns the
//! encoding rules:
//!
//! - absent optional values are omitted entirely;
//! - lists are joined with `,` (an empty list still emits an empty value);
//! - scalars use their `Display` form, so booleans render as `true`/`false`
//!   and numbers in plain decimal;
//! - nested parameter blocks render as `parent[child]=value`.

use std::fmt::Display;

/// A single `name=value` query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    name: String,
    value: String,
}

impl QueryItem {
    /// Creates a query item.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the parameter value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// A structured value that encodes itself as query items.
pub trait QueryParameters {
    /// Returns the query items for this value, in field declaration order.
    fn query_items(&self) -> Vec<QueryItem>;
}

/// Ordered builder applying the query encoding rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryItems {
    items: Vec<QueryItem>,
}

impl QueryItems {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a value that is always present.
    #[must_use]
    pub fn value(mut self, name: &str, value: impl Display) -> Self {
        self.items.push(QueryItem::new(name, value.to_string()));
        self
    }

    /// Appends a value when present and skips it otherwise.
    #[must_use]
    pub fn optional<T: Display>(self, name: &str, value: Option<T>) -> Self {
        let Some(present) = value else {
            return self;
        };
        self.value(name, present)
    }

    /// Appends a list as one comma-joined value when present.
    #[must_use]
    pub fn list<T: Display>(self, name: &str, values: Option<&[T]>) -> Self {
        let Some(elements) = values else {
            return self;
        };
        let joined = elements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.value(name, joined)
    }

    /// Appends a nested parameter block as `parent[child]` items when present.
    #[must_use]
    pub fn nested<P: QueryParameters>(mut self, parent: &str, nested: Option<&P>) -> Self {
        let Some(block) = nested else {
            return self;
        };
        self.items.extend(block.query_items().into_iter().map(|item| {
            QueryItem::new(format!("{parent}[{name}]", name = item.name), item.value)
        }));
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Vec<QueryItem> {
        self.items
    }
}
