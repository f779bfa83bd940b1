/// Outside-click deselection coordinator
///
/// A click landing outside every item surface and control clears the
/// selection, unless that click is the tail end of a drag gesture. Because
/// the synthetic click fires after pointer-up, a drag library's "active" flag
/// has usually reset by then; the coordinator instead sequences the raw
/// events itself: it latches movement past a small threshold during the
/// down-to-up window, and whether a drag session was still active at release,
/// and suppresses the one click that follows.
///
/// The coordinator is armed only while the selection is non-empty; the host
/// registers its global listeners on arm and releases them on disarm and on
/// teardown. Disarming resets all latched state.
#[derive(Debug)]
pub struct DeselectCoordinator {
    threshold: f64,
    armed: bool,
    down_pos: Option<(f64, f64)>,
    moved: bool,
    drag_at_release: bool,
}

impl Default for DeselectCoordinator {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            armed: false,
            down_pos: None,
            moved: false,
            drag_at_release: false,
        }
    }
}

impl DeselectCoordinator {
    /// Minimum pointer travel, in manhattan distance, that marks the
    /// down-to-up window as a drag rather than a click
    pub const DEFAULT_THRESHOLD: f64 = 4.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Arms while the selection is non-empty; disarming drops latched state
    pub fn set_selection_count(&mut self, count: usize) {
        self.armed = count > 0;
        if !self.armed {
            self.reset();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.down_pos = Some((x, y));
        self.moved = false;
        self.drag_at_release = false;
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let Some((dx, dy)) = self.down_pos {
            if (x - dx).abs() + (y - dy).abs() >= self.threshold {
                self.moved = true;
            }
        }
    }

    /// `drag_active` is the session machine's state at the moment of release
    pub fn on_pointer_up(&mut self, drag_active: bool) {
        self.down_pos = None;
        self.drag_at_release = drag_active;
    }

    /// The synthetic click that follows pointer-up
    ///
    /// Returns true when the host should clear its selection. `outside` means
    /// the click landed outside every item surface and interactive control.
    pub fn on_click(&mut self, outside: bool) -> bool {
        if !self.armed || !outside {
            return false;
        }
        if self.moved || self.drag_at_release {
            // Tail of a drag gesture: swallow this one click.
            self.moved = false;
            self.drag_at_release = false;
            return false;
        }
        true
    }

    fn reset(&mut self) {
        self.down_pos = None;
        self.moved = false;
        self.drag_at_release = false;
    }
}
