/// Asserts that two floating-point values are approximately equal.
///
/// The tolerance defaults to [`crate::test::DEFAULT_TOLERANCE`] and is scaled by the
/// magnitude of the values; see [`crate::test::is_close`].
///
/// # Syntax
/// ```text
/// assert_close!(a, b [, tol = <f64>] [, "message" [, args…]])
/// ```
///
/// # Panics
/// If the values differ by more than the tolerance, or either is NaN.
///
/// # Example
/// ```
/// # use approximator::assert_close;
/// assert_close!(2.0_f64.sqrt().powi(2), 2.0);
/// assert_close!(100.0, 100.5, tol = 1e-2, "within {}%", 1);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $($fmt:tt)+)?) => {{
        let (a, b) = ($a, $b);
        let tol: f64 = $tol;

        if !$crate::test::is_close(a, b, tol) {
            #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
            $( msg = format!($($fmt)+); )?
            panic!("{msg}: {a} != {b} (tol = {tol:e})");
        }
    }};

    ($a:expr, $b:expr $(, $($fmt:tt)+)?) => {
        $crate::assert_close!($a, $b, tol = $crate::test::DEFAULT_TOLERANCE $(, $($fmt)+)?)
    };
}

/// Asserts that two sequences of floating-point values are approximately equal element-wise.
///
/// Works with anything that has `len()` and `iter()`: vectors, arrays and slices.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements is not [`crate::assert_close`].
///
/// # Example
/// ```
/// # use approximator::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// assert_all_close!(a, [1.0 + 1e-12, 2.0, 3.0]);
/// assert_all_close!(a, [1.1, 2.0, 3.0], tol = 0.1, "loose");
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr, tol = $tol:expr $(, $($fmt:tt)+)?) => {{
        let (src, dst) = (&$src, &$dst);
        let tol: f64 = $tol;

        #[allow(unused_mut, unused_assignments)] let mut msg = format!("{} elements", src.len());
        $( msg = format!($($fmt)+); )?

        assert_eq!(src.len(), dst.len(), "{msg} - length mismatch");
        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, tol = tol, "{msg} - [{i}]");
        }
    }};

    ($src:expr, $dst:expr $(, $($fmt:tt)+)?) => {
        $crate::assert_all_close!($src, $dst, tol = $crate::test::DEFAULT_TOLERANCE $(, $($fmt)+)?)
    };
}

/// Asserts that a curve produces an expected `y` value at a given `x`.
///
/// Accepts a [`crate::Polynomial`] or a [`crate::CurveFit`].
///
/// # Example
/// ```
/// # use approximator::{Polynomial, assert_y};
/// let poly = Polynomial::borrowed(&[1.0, 0.0, 2.0]);
/// assert_y!(poly, 3.0, 19.0);
/// ```
#[macro_export]
macro_rules! assert_y {
    ($function:expr, $x:expr, $expected:expr $(, $($fmt:tt)+)?) => {{
        let function = &$function;
        let function: &$crate::Polynomial<_> = function.as_ref();
        let x = $x;
        let expected = $expected;

        #[allow(unused_mut, unused_assignments)] let mut msg = format!("y({x}) != {expected}");
        $( msg = format!("{msg}: {}", format!($($fmt)+)); )?

        $crate::assert_close!(function.y(x), expected, "{msg}");
    }};
}

/// Asserts that a curve passes through every `(x, y)` point of a dataset.
///
/// # Syntax
/// ```text
/// assert_passes_through!(curve, data [, tol = <f64>])
/// ```
///
/// # Example
/// ```
/// # use approximator::{CurveFit, assert_passes_through};
/// let data = [(0.0, 1.0), (1.0, -1.0), (2.0, 4.0)];
/// let fit = CurveFit::new(&data[..], 2).unwrap();
/// assert_passes_through!(fit, &data, tol = 1e-8);
/// ```
#[macro_export]
macro_rules! assert_passes_through {
    ($function:expr, $data:expr, tol = $tol:expr) => {{
        let function = &$function;
        let function: &$crate::Polynomial<_> = function.as_ref();
        let tol: f64 = $tol;

        for (i, &(x, y)) in $data.iter().enumerate() {
            $crate::assert_close!(function.y(x), y, tol = tol, "point {i} at x = {x}");
        }
    }};

    ($function:expr, $data:expr) => {
        $crate::assert_passes_through!($function, $data, tol = $crate::test::DEFAULT_TOLERANCE)
    };
}
