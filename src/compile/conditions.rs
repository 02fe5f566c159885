use chrono::NaiveDateTime;

use crate::filter::{
    BaseConditions, BaseFilter, DateTimeFilter, FilterLeaf, FilterValue, RangeConditions,
    RangeFilter, StringFilter, TextConditions,
};
use crate::predicate::{Expr, FieldPath, LiteralValue};

use super::FieldFilter;

fn literals<T: FilterLeaf>(values: &[FilterValue<T>]) -> Vec<LiteralValue> {
    values.iter().map(|v| v.value().to_literal()).collect()
}

/// Emit equals, notEquals, specified, in and notIn conditions
pub(crate) fn base_conditions<T, F>(filter: &F, path: &FieldPath, out: &mut Vec<Expr>)
where
    T: FilterLeaf,
    F: BaseConditions<T> + ?Sized,
{
    if let Some(value) = filter.equals() {
        out.push(Expr::Eq(path.clone(), value.to_literal()));
    }
    if let Some(value) = filter.not_equals() {
        out.push(Expr::NotEq(path.clone(), value.to_literal()));
    }
    match filter.specified() {
        Some(true) => out.push(Expr::IsNotNull(path.clone())),
        Some(false) => out.push(Expr::IsNull(path.clone())),
        None => {}
    }
    // an empty list constrains nothing, same as an absent one
    if let Some(values) = filter.in_values().filter(|v| !v.is_empty()) {
        out.push(Expr::In(path.clone(), literals(values)));
    }
    if let Some(values) = filter.not_in_values().filter(|v| !v.is_empty()) {
        out.push(Expr::NotIn(path.clone(), literals(values)));
    }
}

/// Emit the four bounds and like
pub(crate) fn range_conditions<T, F>(filter: &F, path: &FieldPath, out: &mut Vec<Expr>)
where
    T: FilterLeaf,
    F: RangeConditions<T> + ?Sized,
{
    if let Some(value) = filter.greater_than() {
        out.push(Expr::Gt(path.clone(), value.to_literal()));
    }
    if let Some(value) = filter.greater_than_or_equal() {
        out.push(Expr::GtEq(path.clone(), value.to_literal()));
    }
    if let Some(value) = filter.less_than() {
        out.push(Expr::Lt(path.clone(), value.to_literal()));
    }
    if let Some(value) = filter.less_than_or_equal() {
        out.push(Expr::LtEq(path.clone(), value.to_literal()));
    }
    if let Some(value) = filter.like() {
        out.push(Expr::Like(
            path.clone(),
            format!("%{}%", value.to_pattern_text()),
        ));
    }
}

/// Emit contains and doesNotContain, both lower-cased
pub(crate) fn text_conditions<F>(filter: &F, path: &FieldPath, out: &mut Vec<Expr>)
where
    F: TextConditions + ?Sized,
{
    if let Some(needle) = filter.contains() {
        out.push(Expr::ContainsCi(path.clone(), needle.to_lowercase()));
    }
    if let Some(needle) = filter.does_not_contain() {
        out.push(Expr::ContainsCi(path.clone(), needle.to_lowercase()).not());
    }
}

impl<T: FilterLeaf> FieldFilter for BaseFilter<T> {
    fn conditions(&self, path: &FieldPath) -> Vec<Expr> {
        let mut out = Vec::new();
        base_conditions::<T, _>(self, path, &mut out);
        out
    }
}

impl<T: FilterLeaf> FieldFilter for RangeFilter<T> {
    fn conditions(&self, path: &FieldPath) -> Vec<Expr> {
        let mut out = Vec::new();
        base_conditions::<T, _>(self, path, &mut out);
        range_conditions::<T, _>(self, path, &mut out);
        out
    }
}

impl FieldFilter for DateTimeFilter {
    fn conditions(&self, path: &FieldPath) -> Vec<Expr> {
        let mut out = Vec::new();
        base_conditions::<NaiveDateTime, _>(self, path, &mut out);
        range_conditions::<NaiveDateTime, _>(self, path, &mut out);
        out
    }
}

impl FieldFilter for StringFilter {
    fn conditions(&self, path: &FieldPath) -> Vec<Expr> {
        let mut out = Vec::new();
        base_conditions::<String, _>(self, path, &mut out);
        range_conditions::<String, _>(self, path, &mut out);
        text_conditions(self, path, &mut out);
        out
    }
}
