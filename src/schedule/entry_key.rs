/// A total-order key for `f64` using IEEE-754 total order (`total_cmp`).
/// This lets us use `f64`-backed times as `BTreeMap` keys.
///
/// For scheduling, NaN is nonsense, so we reject NaNs on insert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F64Key(pub(crate) f64);

impl F64Key {
    /// Returns the raw minute value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for F64Key {}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
