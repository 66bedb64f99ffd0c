//! Property-based tests for name combination and message state.

use std::collections::HashSet;

use namedlog::{combine_names, Level, LogMessage, MemorySink, ORIGINAL_FORMAT};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn names_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]{1,2}", 0..max)
}

fn all_unique(names: &[String]) -> bool {
    let mut seen = HashSet::new();
    names.iter().all(|name| seen.insert(name))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Combination succeeds exactly when the concatenation has no repeats,
    /// and then returns the concatenation unchanged.
    #[test]
    fn combine_is_concatenation_or_error(
        formatted in names_strategy(5),
        unformatted in names_strategy(5),
    ) {
        let mut expected = formatted.clone();
        expected.extend(unformatted.iter().cloned());

        match combine_names(&formatted, &unformatted) {
            Ok(names) => {
                prop_assert!(all_unique(&expected));
                prop_assert_eq!(names, expected);
            }
            Err(_) => prop_assert!(!all_unique(&expected)),
        }
    }

    /// A three-value message always yields four pairs, template last, and
    /// renders its formatted values in order.
    #[test]
    fn state_has_values_then_template(
        a in "[a-z0-9]{0,6}",
        b in any::<i64>(),
        c in any::<bool>(),
        unformatted in 0usize..=3,
    ) {
        let all = ["first", "second", "third"];
        let split = 3 - unformatted;
        let template: String = all[..split]
            .iter()
            .map(|name| format!("<{{{name}}}>"))
            .collect();

        let message = LogMessage::<(&str, i64, bool)>::define(
            Level::Info,
            0,
            &template,
            &all[split..],
        )
        .unwrap();
        let sink = MemorySink::new();
        message.log(&sink, (a.as_str(), b, c), None);

        let entry = &sink.entries()[0];
        prop_assert_eq!(entry.names(), ["first", "second", "third", ORIGINAL_FORMAT]);
        prop_assert_eq!(entry.original_format(), Some(template.as_str()));

        let rendered: Vec<String> = [a.clone(), b.to_string(), c.to_string()][..split]
            .iter()
            .map(|value| format!("<{value}>"))
            .collect();
        prop_assert_eq!(entry.message.clone(), Some(rendered.concat()));
    }
}
