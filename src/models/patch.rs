/// One field of a partial update.
///
/// `Absent` leaves the stored value alone, `Null` clears it, `Value` replaces it.
/// An empty string is a real value, not a clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Apply to a nullable column.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *current = None,
            Patch::Value(v) => *current = Some(v),
        }
    }

    /// Collapse to the value used on insert, where absent and null mean the same.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Absent | Patch::Null => None,
        }
    }
}

impl Patch<String> {
    /// Insert semantics for optional text: empty strings are stored as NULL.
    pub fn into_non_empty(self) -> Option<String> {
        self.into_option().filter(|s| !s.is_empty())
    }
}
