/// Assert that two `f64` expressions agree to within one epsilon, scaled by the larger of their
/// magnitudes once those exceed 1
#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {{
        let (l, r): (f64, f64) = ($l, $r);
        assert!(
            (l - r).abs() <= f64::EPSILON * l.abs().max(r.abs()).max(1.),
            "assertion failed: {} !~ {}",
            l,
            r
        )
    }};
    ($l:expr, $r:expr, $msg:expr) => {{
        let (l, r): (f64, f64) = ($l, $r);
        assert!(
            (l - r).abs() <= f64::EPSILON * l.abs().max(r.abs()).max(1.),
            "assertion failed: {} !~ {}: {}",
            l,
            r,
            $msg
        )
    }};
}
