use super::*;

#[test]
fn endpoints_are_stable() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(ease_out_cubic(-3.0), 0.0);
    assert_eq!(ease_out_cubic(7.0), 1.0);
}

#[test]
fn monotonic_spot_check() {
    let a = ease_out_cubic(0.25);
    let b = ease_out_cubic(0.5);
    let c = ease_out_cubic(0.75);
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn reference_values() {
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    assert!((ease_out_cubic(0.25) - 0.578125).abs() < 1e-12);
}
