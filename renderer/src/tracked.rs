/// A value that remembers whether it was written since it was last taken.
///
/// Writes always mark the value as changed, even when the new value equals the old one.
pub struct Tracked<T> {
    value: T,
    changed: bool,
}

impl<T> Tracked<T> {
    /// Create a new value with a changed status.
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    /// Returns true if the value was written since the last call to [Tracked::take_changed].
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Replace the value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changed = true;
    }

    /// Modify the value in place.
    pub fn modify(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.changed = true;
    }

    /// Returns the value if it was changed and resets the status to unchanged.
    pub fn take_changed(&mut self) -> Option<&T> {
        if std::mem::replace(&mut self.changed, false) {
            Some(&self.value)
        } else {
            None
        }
    }
}

impl<T> std::ops::Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_changed() {
        let mut tracked = Tracked::new(5);
        assert!(tracked.changed());
        assert_eq!(tracked.take_changed(), Some(&5));
        assert!(!tracked.changed());
        assert_eq!(tracked.take_changed(), None);
    }

    #[test]
    fn modify() {
        let mut tracked = Tracked::new(5);
        tracked.take_changed();

        tracked.modify(|value| *value += 1);
        assert_eq!(*tracked, 6);
        assert_eq!(tracked.take_changed(), Some(&6));
    }

    #[test]
    fn same_value_still_changes() {
        let mut tracked = Tracked::new(5);
        tracked.take_changed();

        tracked.set(5);
        assert!(tracked.changed());
    }
}
