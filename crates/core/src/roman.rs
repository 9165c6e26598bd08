//! Roman-numeral rendering of stock counts.

/// Sentinel returned for zero or negative counts. A display placeholder, not
/// an error.
pub const NO_STOCK: &str = "N/A";

/// Value table scanned largest-first for greedy subtractive encoding.
const NUMERALS: [(i32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Convert a stock count to its Roman-numeral display form.
///
/// Counts above 3999 simply accumulate `M`s; there is no upper bound.
pub fn to_roman(number: i32) -> String {
    if number <= 0 {
        return NO_STOCK.to_string();
    }

    let mut result = String::new();
    let mut remaining = number;
    for (value, symbol) in NUMERALS {
        while remaining >= value {
            result.push_str(symbol);
            remaining -= value;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_render_the_sentinel() {
        assert_eq!(to_roman(0), "N/A");
        assert_eq!(to_roman(-5), "N/A");
    }

    #[test]
    fn encodes_subtractive_forms() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(49), "XLIX");
        assert_eq!(to_roman(1994), "MCMXCIV");
    }

    #[test]
    fn large_counts_accumulate_ms() {
        assert_eq!(to_roman(4000), "MMMM");
        assert_eq!(to_roman(5001), "MMMMMI");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: output only ever contains the seven Roman symbols.
            #[test]
            fn output_uses_roman_alphabet_only(n in 1i32..10_000) {
                let encoded = to_roman(n);
                prop_assert!(!encoded.is_empty());
                prop_assert!(encoded.chars().all(|c| "IVXLCDM".contains(c)));
            }

            /// Property: greedy encoding is order-preserving in length terms
            /// for pure-M multiples (decoding back is out of scope).
            #[test]
            fn thousands_encode_as_repeated_m(k in 1i32..20) {
                let encoded = to_roman(k * 1000);
                prop_assert_eq!(encoded, "M".repeat(k as usize));
            }
        }
    }
}
