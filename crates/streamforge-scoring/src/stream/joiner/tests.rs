use super::*;
use crate::fact::FactRef;
use crate::index::Side;

fn facts(value: i32) -> Vec<FactRef> {
    vec![FactRef::value(value)]
}

#[test]
fn test_joiner_types_follow_declaration_order() {
    let joiner = less_than(|a: &i32| *a, |b: &i32| *b)
        .and(equal_bi(|a: &i32| *a % 10, |b: &i32| *b % 10))
        .and(filtering(|a: &i32, b: &i32| a != b));
    assert_eq!(
        joiner.joiner_types(),
        vec![JoinerType::LessThan, JoinerType::Equal, JoinerType::Filtering]
    );
    assert_eq!(joiner.len(), 3);
}

#[test]
fn test_compiled_indexes_equal_and_first_comparison() {
    let joiner = equal_bi(|a: &i32| *a % 10, |b: &i32| *b % 10)
        .and(less_than(|a: &i32| *a, |b: &i32| *b))
        .and(greater_than(|a: &i32| *a, |b: &i32| *b - 100));
    let compiled = CompiledJoiner::compile(joiner.into_parts());

    assert_eq!(compiled.comparison(), Some(JoinerType::LessThan));
    let left = compiled.entry(Side::Left, &facts(15)).unwrap();
    let right = compiled.entry(Side::Right, &facts(25)).unwrap();
    assert_eq!(left.equal, right.equal);
    assert!(left.ordered.is_some());

    // 15 > 125 - 100 fails the residual comparison
    assert!(compiled.residual_matches(&facts(15), &facts(25)).unwrap());
    assert!(!compiled.residual_matches(&facts(15), &facts(125)).unwrap());
}

#[test]
fn test_filtering_is_residual() {
    let joiner: Joiner<(i32,), i32> = filtering(|a: &i32, b: &i32| a + b == 10);
    let compiled = CompiledJoiner::compile(joiner.into_parts());
    assert_eq!(compiled.comparison(), None);
    assert!(compiled.residual_matches(&facts(3), &facts(7)).unwrap());
    assert!(!compiled.residual_matches(&facts(3), &facts(8)).unwrap());
}

#[test]
fn test_tri_joiner_reads_both_left_facts() {
    let joiner = tri::filtering(|a: &i32, b: &i32, c: &i32| a + b == *c);
    let compiled = CompiledJoiner::compile(joiner.into_parts());
    let left = vec![FactRef::value(2), FactRef::value(3)];
    assert!(compiled.residual_matches(&left, &facts(5)).unwrap());
    assert!(!compiled.residual_matches(&left, &facts(6)).unwrap());
}

#[test]
fn test_all_of_nothing_is_empty() {
    let joiner: Joiner<(i32,), i32> = Joiner::all(Vec::new());
    assert!(joiner.is_empty());
}

#[test]
fn test_zero_sized_mappings_share_params() {
    fn by_value() -> Joiner<(i32,), i32> {
        equal(|a: &i32| *a)
    }
    assert_eq!(by_value().sharing_params(), by_value().sharing_params());

    let offset = 3;
    let capturing = || equal(move |a: &i32| *a + offset);
    assert_ne!(capturing().sharing_params(), capturing().sharing_params());
}

#[test]
fn test_joiner_type_display_and_matches() {
    assert_eq!(JoinerType::LessThanOrEqual.to_string(), "LESS_THAN_OR_EQUAL");
    assert!(JoinerType::GreaterThanOrEqual.matches(&3, &3));
    assert!(!JoinerType::GreaterThan.matches(&3, &3));
    assert!(JoinerType::Filtering.matches(&1, &2));
}
