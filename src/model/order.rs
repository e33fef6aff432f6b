use std::cmp::Ordering;

/// Where an absent value sorts relative to a present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrder {
    /// `None` is less than any `Some`.
    First,
    /// `None` is greater than any `Some`.
    Last,
}

/// Compare two optional values.
///
/// Both absent compare equal, exactly one absent resolves by `nulls`, and two
/// present values use their natural order. Every comparator over an optional
/// field goes through here; `Option`'s derived `Ord` always puts `None` first,
/// which is wrong for most of the orders in this crate.
pub fn compare_nullable<T: Ord>(a: Option<T>, b: Option<T>, nulls: NullOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match nulls {
            NullOrder::First => Ordering::Less,
            NullOrder::Last => Ordering::Greater,
        },
        (Some(_), None) => match nulls {
            NullOrder::First => Ordering::Greater,
            NullOrder::Last => Ordering::Less,
        },
        (Some(a), Some(b)) => a.cmp(&b),
    }
}
