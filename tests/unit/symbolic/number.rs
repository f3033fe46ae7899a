use super::*;

fn q(n: i64, d: i64) -> Number {
    Number::rational(n, d).unwrap()
}

#[test]
fn rationals_are_reduced_with_positive_denominator() {
    assert_eq!(q(2, 4), q(1, 2));
    assert_eq!(q(3, -6), q(-1, 2));
    assert_eq!(q(0, 7), Number::zero());
    assert!(Number::rational(1, 0).is_none());
}

#[test]
fn arithmetic_is_exact() {
    assert_eq!(q(1, 2).add(q(1, 3)), q(5, 6));
    assert_eq!(q(2, 3).mul(q(3, 4)), q(1, 2));
    assert_eq!(q(-2, 3).recip(), Some(q(-3, 2)));
    assert_eq!(Number::zero().recip(), None);
    assert_eq!(q(2, 3).pow_int(-2), Some(q(9, 4)));
    assert_eq!(Number::zero().pow_int(-1), None);
}

#[test]
fn overflow_degrades_to_float() {
    let big = Number::int(i64::MAX);
    match big.mul(Number::int(4)) {
        Number::Float(v) => assert!(v > 1e19),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn exact_roots_only_for_perfect_powers() {
    assert_eq!(q(9, 4).exact_root(2), Some(q(3, 2)));
    assert_eq!(Number::int(27).exact_root(3), Some(Number::int(3)));
    assert_eq!(Number::int(2).exact_root(2), None);
    assert_eq!(Number::int(-4).exact_root(2), None);
}

#[test]
fn floats_never_equal_exact_values() {
    assert_ne!(Number::float(2.0), Number::int(2));
    assert!(!Number::float(1.0).is_one());
    assert!(Number::float(0.0).is_zero());
}

#[test]
fn display_matches_plain_notation() {
    assert_eq!(Number::int(-3).to_string(), "-3");
    assert_eq!(q(1, 2).to_string(), "1/2");
    assert_eq!(Number::float(0.5).to_string(), "0.5");
    assert_eq!(Number::float(2.0).to_string(), "2.0");
}

#[test]
fn total_order_sorts_by_value() {
    let mut v = vec![Number::int(3), q(1, 2), Number::float(-1.5), Number::int(0)];
    v.sort_by(Number::total_cmp);
    assert_eq!(
        v,
        vec![Number::float(-1.5), Number::int(0), q(1, 2), Number::int(3)]
    );
}
