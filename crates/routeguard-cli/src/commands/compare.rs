//! `routeguard compare`

use routeguard_core::compare_versions;
use std::cmp::Ordering;

/// `<`, `=` or `>` for `a` against `b`.
pub fn run(a: &str, b: &str) -> &'static str {
    match compare_versions(a, b) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}
