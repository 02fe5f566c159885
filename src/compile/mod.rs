//! Compile populated filters into predicates
//!
//! Every function here is pure. An absent filter, or a filter with no
//! conditions set, compiles to [`Expr::AlwaysTrue`], which [`combine`] and
//! [`Expr::and`] drop from conjunctions. Conditions of one filter are emitted
//! in a fixed order: equals, notEquals, specified, in, notIn, greaterThan,
//! greaterThanOrEqual, lessThan, lessThanOrEqual, like, contains,
//! doesNotContain.

mod conditions;

use log::debug;

use crate::predicate::{Expr, FieldPath};

/// A filter that knows how to turn its populated conditions into predicates
pub trait FieldFilter {
    /// One predicate per populated condition, applied to `path`
    fn conditions(&self, path: &FieldPath) -> Vec<Expr>;
}

/// Compile a filter against the field at `path`
pub fn path_predicate<F>(path: &FieldPath, filter: Option<&F>) -> Expr
where
    F: FieldFilter + ?Sized,
{
    match filter {
        Some(filter) => Expr::all(filter.conditions(path)),
        None => Expr::AlwaysTrue,
    }
}

/// Compile a filter against a field stored directly on the record
///
/// # Examples
///
/// ```
/// use criteria_filter::compile::field_predicate;
/// use criteria_filter::filter::{BaseConditions, LongFilter, RangeConditions};
///
/// let mut filter = LongFilter::new();
/// filter.set_greater_than(10).set_not_equals(12);
///
/// let expr = field_predicate("id", Some(&filter));
/// assert_eq!(expr.to_string(), "id <> 12 AND id > 10");
/// ```
pub fn field_predicate<F>(field: &str, filter: Option<&F>) -> Expr
where
    F: FieldFilter + ?Sized,
{
    path_predicate(&FieldPath::field(field), filter)
}

/// Compile a filter against a field reached through one relationship
pub fn join_field_predicate<F>(relation: &str, filter: Option<&F>, nested_field: &str) -> Expr
where
    F: FieldFilter + ?Sized,
{
    path_predicate(&FieldPath::join(relation, nested_field), filter)
}

/// AND together per-field predicates
///
/// Nothing to combine yields [`Expr::AlwaysTrue`]; a single predicate is
/// returned unchanged.
pub fn combine<I>(predicates: I) -> Expr
where
    I: IntoIterator<Item = Expr>,
{
    let expr = Expr::all(predicates);
    debug!("Compiled predicate: {expr}");
    expr
}

/// Accumulates per-field predicates for a criteria object
///
/// Absent filters contribute nothing, so a criteria object with every field
/// unset builds [`Expr::AlwaysTrue`].
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    predicates: Vec<Expr>,
}

impl PredicateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the predicate for a direct field when `filter` is present
    #[must_use]
    pub fn field<F>(self, field: &str, filter: Option<&F>) -> Self
    where
        F: FieldFilter + ?Sized,
    {
        self.push_if_present(filter.map(|f| field_predicate(field, Some(f))))
    }

    /// Add the predicate for a one-hop field when `filter` is present
    #[must_use]
    pub fn join<F>(self, relation: &str, nested_field: &str, filter: Option<&F>) -> Self
    where
        F: FieldFilter + ?Sized,
    {
        self.push_if_present(filter.map(|f| join_field_predicate(relation, Some(f), nested_field)))
    }

    /// Add an already compiled predicate, skipping `None`
    #[must_use]
    pub fn push_if_present(mut self, predicate: Option<Expr>) -> Self {
        if let Some(predicate) = predicate {
            self.predicates.push(predicate);
        }
        self
    }

    /// Number of predicates collected so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The conjunction of every collected predicate
    #[must_use]
    pub fn build(self) -> Expr {
        combine(self.predicates)
    }
}
