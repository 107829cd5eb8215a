//! Sort keys and their comparison
//!
//! A key is a tagged value: text, a number, or a sequence of keys compared
//! lexicographically. Rules build keys; the executor never inspects them
//! beyond [`SortKey::compare`].

use crate::types::SortOrder;
use std::cmp::Ordering;

/// Comparable sort key produced by a rule for one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Text, compared case-folded
    Text(String),
    /// Number, compared numerically
    Num(i64),
    /// Sequence, compared element-wise; a missing element reads as empty text
    Seq(Vec<SortKey>),
}

impl SortKey {
    /// Text key
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Numeric key
    #[must_use]
    pub fn num(n: i64) -> Self {
        Self::Num(n)
    }

    /// Sequence key
    #[must_use]
    pub fn seq(items: Vec<SortKey>) -> Self {
        Self::Seq(items)
    }

    /// Compare two keys under the given direction
    #[must_use]
    pub fn compare(&self, other: &SortKey, order: SortOrder) -> Ordering {
        let ordering = self.compare_raw(other);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    fn compare_raw(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (Self::Seq(a), Self::Seq(b)) => {
                let empty = Self::Text(String::new());
                for i in 0..a.len().max(b.len()) {
                    let left = a.get(i).unwrap_or(&empty);
                    let right = b.get(i).unwrap_or(&empty);
                    let ordering = left.compare_raw(right);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            }
            (Self::Text(a), Self::Text(b)) => cmp_folded(a, b),
            (Self::Num(a), Self::Num(b)) => a.cmp(b),
            // Mixed shapes: both sides rendered as text
            (a, b) => cmp_folded(&a.render(), &b.render()),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Num(n) => n.to_string(),
            Self::Seq(items) => items
                .iter()
                .map(SortKey::render)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Case-folded text ordering with a raw tiebreak so the result is a total
/// order even for strings that fold to the same sequence.
fn cmp_folded(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_compares_case_folded() {
        let a = SortKey::text("Apple");
        let b = SortKey::text("banana");
        assert_eq!(a.compare(&b, SortOrder::Asc), Ordering::Less);
        assert_eq!(b.compare(&a, SortOrder::Asc), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically_not_textually() {
        let a = SortKey::num(9);
        let b = SortKey::num(10);
        assert_eq!(a.compare(&b, SortOrder::Asc), Ordering::Less);
    }

    #[test]
    fn sequences_short_circuit_on_first_difference() {
        let a = SortKey::seq(vec![SortKey::text("aaa"), SortKey::text("zzz")]);
        let b = SortKey::seq(vec![SortKey::text("bbb"), SortKey::text("aaa")]);
        assert_eq!(a.compare(&b, SortOrder::Asc), Ordering::Less);
    }

    #[test]
    fn missing_elements_read_as_empty_text() {
        let short = SortKey::seq(vec![SortKey::text("a")]);
        let long = SortKey::seq(vec![SortKey::text("a"), SortKey::text("b")]);
        assert_eq!(short.compare(&long, SortOrder::Asc), Ordering::Less);

        let padded = SortKey::seq(vec![SortKey::text("a"), SortKey::text("")]);
        assert_eq!(padded.compare(&short, SortOrder::Asc), Ordering::Equal);
    }

    #[test]
    fn desc_is_the_exact_reverse_of_asc() {
        let cases = [
            (SortKey::text("a"), SortKey::text("b")),
            (SortKey::num(3), SortKey::num(1)),
            (
                SortKey::seq(vec![SortKey::text("x"), SortKey::num(1)]),
                SortKey::seq(vec![SortKey::text("x"), SortKey::num(2)]),
            ),
            (SortKey::text("same"), SortKey::text("same")),
        ];
        for (a, b) in &cases {
            assert_eq!(
                a.compare(b, SortOrder::Asc),
                a.compare(b, SortOrder::Desc).reverse()
            );
        }
    }

    #[test]
    fn comparison_is_antisymmetric() {
        let a = SortKey::seq(vec![SortKey::text("google.com"), SortKey::text("mail")]);
        let b = SortKey::seq(vec![SortKey::text("google.com"), SortKey::text("docs")]);
        assert_eq!(
            a.compare(&b, SortOrder::Asc),
            b.compare(&a, SortOrder::Asc).reverse()
        );
    }

    #[test]
    fn mixed_shapes_fall_back_to_text_rendering() {
        // 100 renders as "100" which sorts before "2" textually.
        let num = SortKey::num(100);
        let text = SortKey::text("2");
        assert_eq!(num.compare(&text, SortOrder::Asc), Ordering::Less);
    }
}
