use minegrid_core::Coord2;
use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

/// Pause between two mines shown after a loss.
pub(crate) const MINE_REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Shows the mines of a lost game one at a time.
///
/// The engine reveals every mine at once; until a mine's turn comes the view keeps
/// drawing it as it was before the loss, hidden or flagged.
#[derive(Debug, Default)]
pub(crate) struct MineRevealAnimation {
    pending: VecDeque<Coord2>,
    flagged: BTreeSet<Coord2>,
    next_step: Option<Instant>,
}

impl MineRevealAnimation {
    pub(crate) fn start(&mut self, mines: &[Coord2], flagged: BTreeSet<Coord2>, now: Instant) {
        self.pending = mines.iter().copied().collect();
        self.flagged = flagged;
        self.next_step = (!self.pending.is_empty()).then_some(now);
        log::debug!("animating {} mines", self.pending.len());
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
        self.flagged.clear();
        self.next_step = None;
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether `coords` is a mine still waiting for its turn.
    pub(crate) fn is_pending(&self, coords: Coord2) -> bool {
        self.pending.contains(&coords)
    }

    /// Whether `coords` is a pending mine that carried a flag when the game was lost.
    pub(crate) fn is_pending_flag(&self, coords: Coord2) -> bool {
        self.flagged.contains(&coords) && self.is_pending(coords)
    }

    /// Shows every mine whose turn has come, returning them.
    pub(crate) fn tick(&mut self, now: Instant) -> Vec<Coord2> {
        let mut shown = Vec::new();
        while let Some(step) = self.next_step.filter(|&step| step <= now) {
            let Some(coords) = self.pending.pop_front() else {
                break;
            };
            shown.push(coords);
            self.next_step = (!self.pending.is_empty()).then(|| step + MINE_REVEAL_DELAY);
        }
        if self.pending.is_empty() {
            self.next_step = None;
        }
        shown
    }

    /// How long the event loop may block before the next step is due.
    pub(crate) fn time_to_next_step(&self, now: Instant) -> Option<Duration> {
        self.next_step
            .map(|step| step.saturating_duration_since(now))
    }
}
