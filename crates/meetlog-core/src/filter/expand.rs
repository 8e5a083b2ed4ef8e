use std::collections::HashSet;

use crate::domain::MeetingId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandSet {
    ids: HashSet<MeetingId>,
}

impl ExpandSet {
    /// Returns true if `id` is expanded after the toggle.
    pub fn toggle(&mut self, id: MeetingId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: MeetingId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ExpandSet;
    use crate::domain::MeetingId;

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = ExpandSet::default();
        let id = MeetingId::new();
        assert!(set.toggle(id));
        assert!(set.contains(id));
        assert!(!set.toggle(id));
        assert!(!set.contains(id));
    }

    #[test]
    fn double_toggle_restores_prior_contents() {
        let mut set = ExpandSet::default();
        let kept = MeetingId::new();
        set.toggle(kept);
        let before = set.clone();

        let other = MeetingId::new();
        set.toggle(other);
        set.toggle(other);
        assert_eq!(set, before);

        set.toggle(kept);
        set.toggle(kept);
        assert_eq!(set, before);
        assert_eq!(set.len(), 1);
    }
}
