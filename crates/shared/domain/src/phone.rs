//! Phone number set reconciliation.

use std::collections::HashMap;

/// Changes needed to turn one list of phone numbers into another.
///
/// Numbers are compared by value and counted, so duplicates are kept
/// as long as the desired list still contains them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneDiff {
    /// Numbers to drop, in the order they appear in the current list
    pub removals: Vec<String>,
    /// Numbers to write, in the order they appear in the desired list
    pub additions: Vec<String>,
}

impl PhoneDiff {
    /// Compute the difference between stored and desired numbers
    pub fn between(current: &[String], desired: &[String]) -> Self {
        let mut wanted: HashMap<&str, usize> = HashMap::new();
        for number in desired {
            *wanted.entry(number.as_str()).or_default() += 1;
        }

        let mut removals = Vec::new();
        for number in current {
            match wanted.get_mut(number.as_str()) {
                Some(count) if *count > 0 => *count -= 1,
                _ => removals.push(number.clone()),
            }
        }

        // What remains in `wanted` is not stored yet
        let mut additions = Vec::new();
        for number in desired {
            if let Some(count) = wanted.get_mut(number.as_str()) {
                if *count > 0 {
                    *count -= 1;
                    additions.push(number.clone());
                }
            }
        }

        Self {
            removals,
            additions,
        }
    }

    /// Check if both lists already hold the same numbers
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.additions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_full_replacement() {
        let diff = PhoneDiff::between(&numbers(&["111", "222"]), &numbers(&["333"]));

        assert_eq!(diff.removals, numbers(&["111", "222"]));
        assert_eq!(diff.additions, numbers(&["333"]));
    }

    #[test]
    fn test_unchanged_numbers_are_kept() {
        let diff = PhoneDiff::between(&numbers(&["111", "222"]), &numbers(&["222", "111"]));

        assert!(diff.is_empty());
    }

    #[test]
    fn test_partial_overlap() {
        let diff = PhoneDiff::between(&numbers(&["111", "222"]), &numbers(&["222", "444"]));

        assert_eq!(diff.removals, numbers(&["111"]));
        assert_eq!(diff.additions, numbers(&["444"]));
    }

    #[test]
    fn test_duplicates_are_counted() {
        let diff = PhoneDiff::between(&numbers(&["111", "111"]), &numbers(&["111"]));
        assert_eq!(diff.removals, numbers(&["111"]));
        assert!(diff.additions.is_empty());

        let diff = PhoneDiff::between(&numbers(&["111"]), &numbers(&["111", "111"]));
        assert!(diff.removals.is_empty());
        assert_eq!(diff.additions, numbers(&["111"]));
    }

    #[test]
    fn test_clear_all() {
        let diff = PhoneDiff::between(&numbers(&["111"]), &[]);

        assert_eq!(diff.removals, numbers(&["111"]));
        assert!(diff.additions.is_empty());
    }
}
