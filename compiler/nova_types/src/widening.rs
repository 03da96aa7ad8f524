//! Numeric widening (spec §4.5 "Binary operators", §4.7 "Assignability",
//! §8: `Int ≤ Long ≤ Float ≤ Double`).

/// Canonical numeric primitive names, ordered from narrowest to widest.
/// `Byte`/`Short` widen into `Int` but never appear as a promotion target
/// themselves (mirrors the spec's explicit chain, which only names
/// `Int→Long→Float→Double`).
const WIDENING_CHAIN: &[&str] = &["Byte", "Short", "Int", "Long", "Float", "Double"];

pub fn numeric_rank(name: &str) -> Option<usize> {
    WIDENING_CHAIN.iter().position(|n| *n == name)
}

pub fn is_numeric(name: &str) -> bool {
    numeric_rank(name).is_some()
}

/// `a` widens to `b` (`a ≤ b` in the widening chain), including `a == b`.
pub fn widens_to(a: &str, b: &str) -> bool {
    match (numeric_rank(a), numeric_rank(b)) {
        (Some(ra), Some(rb)) => ra <= rb,
        _ => false,
    }
}

/// The promoted type name of two numeric operands: the wider of the two.
pub fn promote<'a>(a: &'a str, b: &'a str) -> Option<&'a str> {
    match (numeric_rank(a), numeric_rank(b)) {
        (Some(ra), Some(rb)) => Some(if ra >= rb { a } else { b }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_matches_spec() {
        assert!(widens_to("Int", "Long"));
        assert!(widens_to("Long", "Float"));
        assert!(widens_to("Float", "Double"));
        assert!(!widens_to("Double", "Int"));
    }

    #[test]
    fn promotion_picks_wider() {
        assert_eq!(promote("Int", "Double"), Some("Double"));
        assert_eq!(promote("Long", "Int"), Some("Long"));
    }

    #[test]
    fn non_numeric_rejected() {
        assert!(!is_numeric("String"));
        assert_eq!(promote("Int", "String"), None);
    }
}
