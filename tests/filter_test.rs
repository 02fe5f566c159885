mod utils;

use criteria_filter::filter::{
    BaseConditions, BooleanFilter, DateFilter, DateTimeFilter, FilterValue, IntegerFilter,
    LongFilter, RangeConditions, StringFilter, TextConditions,
};
use utils::{at, date};

#[test]
fn test_copy_is_equal_and_independent() {
    let mut original = LongFilter::new();
    original
        .set_equals(5)
        .set_in([1, 2, 3])
        .set_greater_than(0);

    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.set_in([9]);
    copy.set_greater_than(100);

    assert_eq!(
        original.in_values(),
        Some(&[FilterValue::new(1), FilterValue::new(2), FilterValue::new(3)][..])
    );
    assert_eq!(original.greater_than(), Some(&0));
    assert_ne!(copy, original);
}

#[test]
fn test_single_condition_difference_breaks_equality() {
    let mut a = StringFilter::new();
    a.set_equals("Dune".to_string()).set_contains("du");
    let mut b = a.clone();
    assert_eq!(a, b);

    b.set_does_not_contain("x");
    assert_ne!(a, b);

    a.set_does_not_contain("x");
    assert_eq!(a, b);
}

#[test]
fn test_hash_follows_equality() {
    use std::collections::HashSet;

    let mut a = IntegerFilter::new();
    a.set_less_than_or_equal(10);
    let mut b = IntegerFilter::new();
    b.set_less_than_or_equal(10);

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_display_renders_all_populated_conditions_in_order() {
    let mut filter = StringFilter::new();
    filter
        .set_does_not_contain("z")
        .set_like("ne".to_string())
        .set_less_than("M".to_string())
        .set_not_in(["x".to_string()])
        .set_equals("Dune".to_string());

    assert_eq!(
        filter.to_string(),
        "StringFilter [equals=Dune, notIn=[x], lessThan=M, like=ne, doesNotContain=z]"
    );
}

#[test]
fn test_display_names_leaf_variants() {
    let mut long = LongFilter::new();
    long.set_equals(1);
    assert_eq!(long.to_string(), "LongFilter [equals=1]");

    let mut flag = BooleanFilter::new();
    flag.set_not_equals(false);
    assert_eq!(flag.to_string(), "BooleanFilter [notEquals=false]");

    let mut published = DateFilter::new();
    published.set_greater_than(date(1900, 1, 1));
    assert_eq!(
        published.to_string(),
        "DateFilter [greaterThan=1900-01-01]"
    );
}

#[test]
fn test_datetime_bounds_widen_to_whole_day() {
    let mut filter = DateTimeFilter::new();
    filter
        .set_greater_than_or_equal(at(2024, 3, 5, 14, 30, 0))
        .set_less_than_or_equal(at(2024, 3, 5, 9, 0, 0));

    assert_eq!(
        filter.greater_than_or_equal(),
        Some(&at(2024, 3, 5, 0, 0, 0))
    );
    let end = filter.less_than_or_equal().copied().unwrap();
    assert_eq!(end.date(), date(2024, 3, 5));
    assert!(end > at(2024, 3, 5, 23, 59, 59));
    assert!(end < at(2024, 3, 6, 0, 0, 0));
}

#[test]
fn test_absent_conditions_read_as_none() {
    let filter = StringFilter::new();
    assert_eq!(filter.equals(), None);
    assert_eq!(filter.specified(), None);
    assert_eq!(filter.in_values(), None);
    assert_eq!(filter.like(), None);
    assert_eq!(filter.contains(), None);
    assert_eq!(filter, StringFilter::default());
}

#[test]
fn test_filters_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LongFilter>();
    assert_send_sync::<StringFilter>();
    assert_send_sync::<DateTimeFilter>();
}
