//! Dotted numeric version comparison.
//!
//! `"1.2.0" < "1.10.0"`: components compare as integers, never as strings. Missing
//! trailing components count as `0`, so `"2" == "2.0.0"`. A leading `v` and any
//! pre-release or build suffix (`-rc.1`, `+sha`) are ignored; a component without leading
//! digits counts as `0`.

use std::cmp::Ordering;

/// Compare two version strings component by component.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = components(a);
    let right = components(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Returns `true` when `running` is at least `minimum`.
pub fn satisfies_minimum(running: &str, minimum: &str) -> bool {
    compare_versions(running, minimum) != Ordering::Less
}

fn components(version: &str) -> Vec<u64> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    let core = trimmed
        .split(['-', '+'])
        .next()
        .unwrap_or_default();

    if core.is_empty() {
        return Vec::new();
    }

    core.split('.').map(leading_number).collect()
}

fn leading_number(component: &str) -> u64 {
    let digits: String = component
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail here.
    digits.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.2.0"), Ordering::Greater);
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(compare_versions("2", "2.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.0.1", "2"), Ordering::Greater);
        assert_eq!(compare_versions("", "0.0"), Ordering::Equal);
    }

    #[test]
    fn prefixes_and_suffixes_are_ignored() {
        assert_eq!(compare_versions("v3.1.0", "3.1"), Ordering::Equal);
        assert_eq!(compare_versions("3.1.0-rc.2", "3.1.0"), Ordering::Equal);
        assert_eq!(compare_versions("3.1.0+build.7", "3.0.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.x.3", "1.0.3"), Ordering::Equal);
    }

    #[test]
    fn overflowing_component_saturates() {
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.5"),
            Ordering::Greater
        );
    }

    #[test]
    fn minimum_check() {
        assert!(satisfies_minimum("2.4.0", "2.4"));
        assert!(!satisfies_minimum("2.3.9", "2.4"));
    }

    proptest! {
        #[test]
        fn comparison_is_antisymmetric(a in prop::collection::vec(0u32..50, 0..5),
                                       b in prop::collection::vec(0u32..50, 0..5)) {
            let va = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            let vb = b.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            prop_assert_eq!(compare_versions(&va, &vb), compare_versions(&vb, &va).reverse());
        }

        #[test]
        fn trailing_zeros_never_matter(
            a in prop::collection::vec(0u32..1000, 1..5),
            zeros in 0usize..4,
        ) {
            let base = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            let padded = format!("{base}{}", ".0".repeat(zeros));
            prop_assert_eq!(compare_versions(&base, &padded), Ordering::Equal);
        }
    }
}
