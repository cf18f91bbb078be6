//! Property-based tests for the expression engine and history log

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use surprise_calc::prelude::*;

// ===== Strategy definitions =====

/// Arbitrary buffer text, valid or not
fn buffer_strategy() -> impl Strategy<Value = String> {
    "[0-9+*/().-]{0,16}"
}

/// Buffers whose sign toggling is reversible: no doubled leading minus
fn signed_buffer_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "-?[0-9(][0-9+*/().-]{0,14}"]
}

/// Operators the keypad can append
fn operator_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
    ]
}

/// `a/b` with `0 < a < b`, so the quotient is well inside `f64` precision
fn proper_fraction_strategy() -> impl Strategy<Value = (i64, i64)> {
    (2i64..1000).prop_flat_map(|b| (1..b, Just(b)))
}

/// Renders `n / 10^10` without trailing zeros
fn ten_digit_decimal(n: i64) -> String {
    let int = n / 10_000_000_000;
    let frac = format!("{:010}", n % 10_000_000_000);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    }
}

fn engine() -> ExpressionEngine {
    engine_with(&MemoryStorage::new())
}

fn engine_with(storage: &MemoryStorage) -> ExpressionEngine {
    ExpressionEngine::new(HistoryStore::load(
        Box::new(storage.clone()),
        "calculatorHistory",
        HistoryStore::DEFAULT_CAPACITY,
    ))
}

proptest! {
    /// Toggling the sign twice restores the buffer
    #[test]
    fn prop_toggle_sign_is_involution(buffer in signed_buffer_strategy()) {
        let mut e = engine();
        e.append(&buffer);
        e.toggle_sign();
        e.toggle_sign();
        prop_assert_eq!(e.expression(), buffer.as_str());
    }

    /// Backspacing once per character empties any buffer, and further
    /// backspaces change nothing
    #[test]
    fn prop_backspace_empties(buffer in buffer_strategy(), extra in 0usize..5) {
        let mut e = engine();
        e.append(&buffer);
        for _ in 0..buffer.chars().count() {
            e.backspace();
        }
        prop_assert_eq!(e.expression(), "");
        for _ in 0..extra {
            e.backspace();
        }
        prop_assert_eq!(e.expression(), "");
        prop_assert_eq!(e.display().primary.as_str(), "0");
    }

    /// Integer arithmetic renders exactly
    #[test]
    fn prop_integer_arithmetic(
        a in -10_000i64..10_000,
        b in -10_000i64..10_000,
        op in operator_strategy(),
    ) {
        let expected = match op {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            _ => a * b,
        };
        let mut e = engine();
        e.append(&format!("{a}{}{b}", op.symbol()));
        prop_assert_eq!(e.calculate(), Ok(expected.to_string()));
        let expected_str = expected.to_string();
        prop_assert_eq!(e.last_result(), expected_str.as_str());
    }

    /// Proper fractions render as the nearest ten-digit decimal, trailing
    /// zeros trimmed
    #[test]
    fn prop_fraction_rounds_to_nearest((a, b) in proper_fraction_strategy()) {
        let mut e = engine();
        e.append(&format!("{a}/{b}"));
        let result = e.calculate().unwrap();

        let scaled = a * 10_000_000_000;
        let (quotient, remainder) = (scaled / b, scaled % b);
        if 2 * remainder == b {
            // Exact decimal tie: the binary value decides the side
            let candidates = [ten_digit_decimal(quotient), ten_digit_decimal(quotient + 1)];
            prop_assert!(candidates.contains(&result), "{}/{} gave {}", a, b, result);
        } else {
            let nearest = if 2 * remainder > b { quotient + 1 } else { quotient };
            prop_assert_eq!(result, ten_digit_decimal(nearest));
        }
    }

    /// Huge magnitudes use two-digit scientific notation
    #[test]
    fn prop_large_results_are_scientific(a in 100_000_000i64..1_000_000_000) {
        let mut e = engine();
        e.append(&format!("{a}*{a}*{a}"));
        let result = e.calculate().unwrap();
        let (mantissa, exponent) = result.split_once("e+").unwrap();
        prop_assert_eq!(mantissa.len(), 4);
        prop_assert!(exponent.parse::<u32>().unwrap() >= 15);
    }

    /// A failed evaluation leaves buffer, last result and history alone
    #[test]
    fn prop_failure_leaves_state(prefix in "[1-9][0-9]{0,5}", op in operator_strategy()) {
        let mut e = engine();
        let buffer = format!("{prefix}{}", op.symbol());
        e.append(&buffer);
        prop_assert!(e.calculate().is_err());
        prop_assert_eq!(e.expression(), buffer.as_str());
        prop_assert_eq!(e.last_result(), "0");
        prop_assert_eq!(e.display().primary.as_str(), "Error");
        prop_assert!(e.history().is_empty());
    }

    /// History keeps the newest ten entries, evicting from the front, and
    /// a reload sees the same list
    #[test]
    fn prop_history_bounded(count in 0usize..30) {
        let storage = MemoryStorage::new();
        let mut e = engine_with(&storage);
        for i in 0..count {
            e.append(&i.to_string());
            e.calculate().unwrap();
            e.clear();
        }

        let entries = e.history().entries();
        prop_assert_eq!(entries.len(), count.min(10));
        let first = count.saturating_sub(10);
        for (offset, entry) in entries.iter().enumerate() {
            let i = first + offset;
            prop_assert_eq!(entry, &format!("{i} = {i}"));
        }

        prop_assert_eq!(engine_with(&storage).history().entries(), entries);
    }

    /// The detector never remembers more than its capacity
    #[test]
    fn prop_detector_buffer_bounded(keys in prop::collection::vec("[0-9a-zA-Z]{1,9}", 0..40)) {
        let mut detector = EasterEggDetector::new(InputGate::new(), 10);
        for key in &keys {
            detector.feed(key);
        }
        prop_assert!(detector.buffer().chars().count() <= 10);
    }
}
