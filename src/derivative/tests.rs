// src/derivative/tests.rs

use super::*;
use crate::geometry::Point2D;

fn square(x: f64) -> Result<f64, CurveError> {
    Ok(x * x)
}

fn cube(x: f64) -> Result<f64, CurveError> {
    Ok(x * x * x)
}

#[test_log::test]
fn order_zero_returns_the_function_value() {
    let f = |s: f64| -> Result<Point2D, CurveError> { Ok(Point2D::new(s.cos(), s * 3.0)) };
    for &s in &[-2.0, 0.0, 0.7, 10.0] {
        for &ds in &[0.5, 1e-3, 0.0, -1.0] {
            assert_eq!(derivative(f, s, ds, 0).unwrap(), f(s).unwrap());
        }
    }
}

#[test_log::test]
fn first_order_is_the_backward_difference_of_a_square() {
    for &(s, ds) in &[(3.0, 0.5), (-1.25, 0.25), (0.0, 2.0), (4.0, -0.5)] {
        let expected = (s * s - (s - ds) * (s - ds)) / ds;
        assert_eq!(derivative(square, s, ds, 1), Ok(expected));
    }
}

#[test_log::test]
fn first_order_of_a_square_converges_to_two_s() {
    let s = 1.7;
    let mut previous_error = f64::INFINITY;
    for &ds in &[1e-1, 1e-2, 1e-3, 1e-4] {
        let d = derivative(square, s, ds, 1).unwrap();
        let error = (d - 2.0 * s).abs();
        assert!(error < previous_error, "error did not shrink at ds={}", ds);
        previous_error = error;
    }
    assert!(previous_error < 1e-3);
}

#[test_log::test]
fn second_order_is_the_symmetric_second_difference_of_a_cube() {
    for &(s, ds) in &[(2.0, 0.25), (-0.5, 0.5), (1.0, 0.125)] {
        let expected = (cube(s + ds).unwrap() + cube(s - ds).unwrap() - 2.0 * cube(s).unwrap())
            / (ds * ds);
        assert_eq!(derivative(cube, s, ds, 2), Ok(expected));
    }
}

#[test_log::test]
fn second_order_of_a_cube_converges_to_six_s() {
    let s = 0.9;
    for &ds in &[1e-2, 1e-3] {
        let d = derivative(cube, s, ds, 2).unwrap();
        assert!((d - 6.0 * s).abs() < 1e-3, "ds={} gave {}", ds, d);
    }
}

#[test_log::test]
fn derivatives_of_a_plane_curve_are_component_wise() {
    let f = |s: f64| -> Result<Point2D, CurveError> { Ok(Point2D::new(s * s, 3.0 * s)) };
    let d1: Point2D = derivative(f, 2.0, 0.5, 1).unwrap();
    assert_eq!(d1, Point2D::new((4.0 - 2.25) / 0.5, 3.0));
    let d2: Point2D = derivative(f, 2.0, 0.5, 2).unwrap();
    assert_eq!(d2, Point2D::new(2.0, 0.0));
}

#[test_log::test]
fn derivatives_work_for_curves_in_higher_dimensions() {
    let f = |s: f64| -> Result<[f64; 3], CurveError> { Ok([s, s * s, 1.0]) };
    let d1 = derivative(f, 1.0, 0.5, 1).unwrap();
    assert_eq!(d1, [1.0, 1.5, 0.0]);
}

#[test_log::test]
fn third_order_of_a_cube_is_six() {
    let d3 = derivative(cube, 1.0, 0.25, 3).unwrap();
    assert!((d3 - 6.0).abs() < 1e-9);
}

#[test_log::test]
fn negative_order_is_rejected() {
    assert_eq!(
        derivative(square, 1.0, 0.1, -1),
        Err(DerivativeError::InvalidOrder(-1))
    );
}

#[test_log::test]
fn zero_step_is_rejected_for_positive_orders() {
    assert_eq!(
        derivative(square, 1.0, 0.0, 1),
        Err(DerivativeError::InvalidStep(0.0))
    );
    assert_eq!(
        derivative(square, 1.0, 0.0, 2),
        Err(DerivativeError::InvalidStep(0.0))
    );
    assert!(matches!(
        derivative(square, 1.0, f64::NAN, 1),
        Err(DerivativeError::InvalidStep(_))
    ));
}

#[test_log::test]
fn curve_errors_propagate_with_the_failing_parameter() {
    let f = |s: f64| -> Result<f64, CurveError> {
        if s < 1.0 {
            Err(CurveError::Domain("below one".to_string()))
        } else {
            Ok(s)
        }
    };
    assert_eq!(
        derivative(f, 1.0, 0.5, 1),
        Err(DerivativeError::CurveEvaluation {
            s: 0.5,
            source: CurveError::Domain("below one".to_string()),
        })
    );
}

#[test_log::test]
fn evaluation_count_doubles_with_each_order() {
    use std::cell::Cell;

    let calls = Cell::new(0u32);
    let f = |s: f64| -> Result<f64, CurveError> {
        calls.set(calls.get() + 1);
        Ok(s)
    };
    for order in 0..4 {
        calls.set(0);
        derivative(&f, 0.0, 0.5, order).unwrap();
        assert_eq!(calls.get(), 1 << order);
    }
}
