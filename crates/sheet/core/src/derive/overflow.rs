//! Capacity-exceeded warning latch.

/// Whether a record had dropped units before and after a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InventoryStatus {
    pub had_dropped_before: bool,
    pub has_dropped_after: bool,
}

/// Latch that fires once per overflow episode.
///
/// The warning is raised when a pass takes the record from "nothing dropped"
/// to "something dropped". It re-arms only after a pass leaves nothing
/// dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverflowWatch {
    warned: bool,
}

impl OverflowWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_warned(&self) -> bool {
        self.warned
    }

    /// Records one pass. Returns `true` if the warning should be raised now.
    pub fn observe(&mut self, status: InventoryStatus) -> bool {
        if !status.has_dropped_after {
            self.warned = false;
            return false;
        }

        if !status.had_dropped_before && !self.warned {
            self.warned = true;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: InventoryStatus = InventoryStatus {
        had_dropped_before: false,
        has_dropped_after: true,
    };
    const STILL: InventoryStatus = InventoryStatus {
        had_dropped_before: true,
        has_dropped_after: true,
    };
    const CLEAR: InventoryStatus = InventoryStatus {
        had_dropped_before: true,
        has_dropped_after: false,
    };

    #[test]
    fn fires_once_per_episode() {
        let mut watch = OverflowWatch::new();
        assert!(watch.observe(START));
        assert!(!watch.observe(STILL));
        assert!(!watch.observe(START));
        assert!(watch.is_warned());
    }

    #[test]
    fn rearms_after_everything_is_picked_up() {
        let mut watch = OverflowWatch::new();
        assert!(watch.observe(START));
        assert!(!watch.observe(CLEAR));
        assert!(!watch.is_warned());
        assert!(watch.observe(START));
    }

    #[test]
    fn existing_drops_do_not_warn() {
        let mut watch = OverflowWatch::new();
        assert!(!watch.observe(STILL));
    }
}
