//! Natural-end handling
//!
//! The engine keeps `did_just_finish` raised for as long as it sits at the end
//! of the track, so the dispatcher reacts to the rising edge only.

use cadence_core::LoopMode;

/// What to do after the active track finished on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    /// Engine loops the track itself
    Ignore,

    /// Start the authoritative order again from index 0
    Restart,

    /// Move to the next track as `next` would
    Advance,

    /// End of playback
    Halt,
}

/// Edge detector plus loop-mode policy for the "track finished" signal
#[derive(Debug, Clone, Default)]
pub struct NaturalEndDispatcher {
    finished: bool,
}

impl NaturalEndDispatcher {
    /// Create a dispatcher with the finished flag low
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the engine's finished flag; true exactly on a rising edge
    pub fn observe(&mut self, did_just_finish: bool) -> bool {
        let rising = did_just_finish && !self.finished;
        self.finished = did_just_finish;
        rising
    }

    /// Forget the last observed flag
    pub fn reset(&mut self) {
        self.finished = false;
    }

    /// Pick the action for a finished track
    ///
    /// `position` is the finished track's index in the authoritative order
    /// (`None` when it is not in the order) and `len` is the order's length.
    pub fn decide(
        loop_mode: LoopMode,
        shuffled: bool,
        position: Option<usize>,
        len: usize,
    ) -> EndAction {
        match loop_mode {
            LoopMode::One => EndAction::Ignore,
            LoopMode::All => match position {
                Some(index) if index + 1 == len => EndAction::Restart,
                _ => EndAction::Advance,
            },
            LoopMode::None if shuffled => EndAction::Advance,
            LoopMode::None => EndAction::Halt,
        }
    }
}
