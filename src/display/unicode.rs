//! Unicode formatting utilities
use std::ops::Range;

use crate::value::Value;

/// Format a floating point number as a string
///
/// # Parameters
/// - `n`: The number to format
/// - `fixed_range`: An optional range specifying the values that will not be formatted in scientific notation
/// - `precision`: The number of decimal places to include
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => format!("{n:.precision$}"),
        _ => format!("{n:.precision$e}"),
    }
}

/// Convert a string into a superscript string, ignoring invalid characters
pub fn superscript(s: &str) -> String {
    s.chars().filter_map(to_superscript).collect()
}

fn to_superscript(c: char) -> Option<char> {
    match c {
        '0' => Some('⁰'),
        '1' => Some('¹'),
        '2' => Some('²'),
        '3' => Some('³'),
        '4' => Some('⁴'),
        '5' => Some('⁵'),
        '6' => Some('⁶'),
        '7' => Some('⁷'),
        '8' => Some('⁸'),
        '9' => Some('⁹'),
        '+' => Some('⁺'),
        '-' => Some('⁻'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superscripts() {
        assert_eq!(superscript("10"), "¹⁰");
        assert_eq!(superscript("-2"), "⁻²");
        assert_eq!(superscript("x2"), "²");
    }

    #[test]
    fn fixed_or_scientific() {
        assert_eq!(float(12.345, Some(0.001..1000.0), 1), "12.3");
        assert_eq!(float(12340.0, Some(0.001..1000.0), 2), "1.23e4");
        assert_eq!(float(0.5, None, 2), "5.00e-1");
    }
}
