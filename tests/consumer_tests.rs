use lazy_seq::*;

#[test]
fn test_for_each_visits_every_element_in_order() {
    let mut seen = Vec::new();
    let result = for_each(slice(vec![3, 1, 2]), |x| seen.push(x));
    assert!(result.is_ok());
    assert_eq!(seen, vec![3, 1, 2]);
}

#[test]
fn test_for_each_on_source_without_error_capability() {
    let mut count = 0;
    for_each(range(0, 5, 1).unwrap(), |_| count += 1).unwrap();
    assert_eq!(count, 5);
}

#[test]
fn test_for_each_returns_terminal_error() {
    let seq = slice(vec![1, 2, 3]).map(|x| {
        if x == 3 {
            Err(SeqError::custom("three"))
        } else {
            Ok(x * 2)
        }
    });

    let mut seen = Vec::new();
    let result = seq.for_each(|x| seen.push(x));
    assert_eq!(seen, vec![2, 4]);
    assert!(matches!(result, Err(SeqError::Custom(ref m)) if m == "three"));
}

#[test]
fn test_reduce_sum() {
    let (sum, err) = reduce(slice((1..=10).collect::<Vec<i32>>()), 0, |acc, v| acc + v);
    assert_eq!(sum, 55);
    assert!(err.is_none());
}

#[test]
fn test_reduce_range() {
    let (sum, err) = reduce(range(10, 100, 5).unwrap(), 0, |acc, v| acc + v);
    assert_eq!(sum, 1045);
    assert!(err.is_none());
}

#[test]
fn test_reduce_keeps_partial_accumulator() {
    let seq = slice(vec![1, 2, 3, 4]).filter(|x| {
        if *x == 4 {
            Err(SeqError::custom("stop"))
        } else {
            Ok(true)
        }
    });
    let (sum, err) = seq.reduce(100, |acc, v| acc + v);
    assert_eq!(sum, 106);
    assert_eq!(err.unwrap().to_string(), "Sequence error: stop");
}

#[test]
fn test_reduce_into_different_type() {
    let (joined, err) = slice(vec!['a', 'b', 'c']).reduce(String::new(), |mut acc, c| {
        acc.push(c);
        acc
    });
    assert_eq!(joined, "abc");
    assert!(err.is_none());
}

#[test]
fn test_reduce_empty_returns_seed() {
    let (v, err) = reduce(empty::<i32>(), 7, |a, b| a * b);
    assert_eq!(v, 7);
    assert!(err.is_none());
}

#[test]
fn test_collect() {
    assert_eq!(collect(from_iter(0..4)).unwrap(), vec![0, 1, 2, 3]);

    let failing = slice(vec![1]).map(|_| Err::<i32, _>(SeqError::custom("nope")));
    assert!(collect(failing).is_err());
}

#[test]
fn test_consume_through_mutable_reference() {
    let mut seq = slice(vec![1, 2, 3]);
    let mut first = None;
    for_each(&mut seq, |x| {
        if first.is_none() {
            first = Some(x);
        }
    })
    .unwrap();
    assert_eq!(first, Some(1));
    // Already drained through the borrow
    assert_eq!(seq.next(), None);
}
