use std::collections::BTreeSet;

/// Read-only view of the host's selection state
///
/// The board engine consults the selection exactly once, at gesture start, to
/// decide between a single- and multi-item drag. How modifier-key clicks grow
/// or shrink the selection is the host's business.
pub trait SelectionModel {
    /// Whether the item at `index` is currently selected
    fn is_selected(&self, index: usize) -> bool;

    /// The live selection, as item indices in ascending order
    fn current_selection(&self) -> Vec<usize>;
}

/// Minimal index-set selection, enough to drive the board without a host
#[derive(Debug, Default, Clone)]
pub struct IndexSelection {
    indices: BTreeSet<usize>,
}

impl IndexSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with a single index
    pub fn select(&mut self, index: usize) {
        self.indices.clear();
        self.indices.insert(index);
    }

    /// Adds or removes one index, leaving the rest untouched
    pub fn toggle(&mut self, index: usize) {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    /// Selects the contiguous range between `anchor` and `index`, inclusive
    pub fn extend_to(&mut self, anchor: usize, index: usize) {
        let (lo, hi) = if anchor <= index {
            (anchor, index)
        } else {
            (index, anchor)
        };
        self.indices.extend(lo..=hi);
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl SelectionModel for IndexSelection {
    fn is_selected(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    fn current_selection(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }
}
