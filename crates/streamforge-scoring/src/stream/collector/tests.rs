use super::*;

fn run<In, R: Clone + 'static>(collector: Collector<In, R>, inserted: &[i64], retracted: &[i64]) -> R {
    let supplier = collector.into_parts().1;
    let mut accumulator = supplier();
    for value in inserted {
        accumulator.insert(&[FactRef::value(*value)]).unwrap();
    }
    for value in retracted {
        accumulator.retract(&[FactRef::value(*value)]).unwrap();
    }
    accumulator.result().downcast_ref::<R>().cloned().unwrap()
}

#[test]
fn test_count() {
    assert_eq!(run(count::<(i64,)>(), &[1, 2, 3], &[2]), 2);
}

#[test]
fn test_count_distinct() {
    assert_eq!(run(count_distinct(|v: &i64| v % 3), &[1, 4, 7, 2], &[]), 2);
    assert_eq!(run(count_distinct(|v: &i64| v % 3), &[1, 4, 2], &[2]), 1);
}

#[test]
fn test_sum() {
    assert_eq!(run(sum(|v: &i64| *v), &[5, 3, 7], &[3]), 12);
}

#[test]
fn test_min_max_follow_retraction() {
    assert_eq!(run(min(|v: &i64| *v), &[5, 3, 3, 7], &[3]), Some(3));
    assert_eq!(run(min(|v: &i64| *v), &[5, 3, 7], &[3]), Some(5));
    assert_eq!(run(max(|v: &i64| *v), &[5, 3, 7], &[7]), Some(5));
    assert_eq!(run(max(|v: &i64| *v), &[5], &[5]), None);
}

#[test]
fn test_to_list_keeps_insertion_order() {
    assert_eq!(run(to_list(|v: &i64| *v), &[3, 1, 2, 1], &[1]), vec![3, 2, 1]);
}

#[test]
fn test_bi_collectors_read_both_facts() {
    let collector: Collector<(i64, i64), i64> = bi::sum(|a: &i64, b: &i64| a * b);
    let mut accumulator = (collector.into_parts().1)();
    accumulator.insert(&[FactRef::value(2i64), FactRef::value(3i64)]).unwrap();
    accumulator.insert(&[FactRef::value(4i64), FactRef::value(5i64)]).unwrap();
    assert_eq!(accumulator.result().downcast_ref::<i64>(), Some(&26));
}

#[test]
fn test_retracting_unknown_value_fails() {
    let mut accumulator = (to_list(|v: &i64| *v).into_parts().1)();
    accumulator.insert(&[FactRef::value(1i64)]).unwrap();
    assert!(accumulator.retract(&[FactRef::value(2i64)]).is_err());

    let mut counter = (count::<(i64,)>().into_parts().1)();
    assert!(counter.retract(&[FactRef::value(2i64)]).is_err());
}
