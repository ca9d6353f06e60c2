//! Listening-time accumulation
//!
//! Tracks how many seconds of the active track were actually heard since the
//! last flush. Position ticks that advance by a small positive amount count as
//! continuous playback; anything else (seek, loop, restart, stalled clock) is a
//! discontinuity and is ignored.

/// Outcome of feeding one position tick to the accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Delta counted as continuous playback
    Accumulated(f64),

    /// Delta counted and the threshold was reached; carries the flushed amount
    Flush(f64),

    /// Delta was a discontinuity and was not counted
    Discontinuity,
}

/// Per-track listening ledger
///
/// `accumulated_secs` only grows through deltas strictly between zero and
/// `max_tick_delta_secs`, and is handed out and zeroed in one step by
/// [`take`](Self::take).
#[derive(Debug, Clone)]
pub struct ListeningAccumulator {
    accumulated_secs: f64,
    last_position_secs: f64,
    flush_threshold_secs: f64,
    max_tick_delta_secs: f64,
}

impl ListeningAccumulator {
    /// Create an empty ledger with the given thresholds
    pub fn new(flush_threshold_secs: f64, max_tick_delta_secs: f64) -> Self {
        Self {
            accumulated_secs: 0.0,
            last_position_secs: 0.0,
            flush_threshold_secs,
            max_tick_delta_secs,
        }
    }

    /// Feed one transport position tick
    ///
    /// `last_position_secs` is updated regardless of the outcome. When the
    /// soft-flush threshold is reached the accumulated amount is returned in
    /// [`TickOutcome::Flush`] and the ledger is zeroed; the caller is
    /// responsible for sending it to the gateway.
    pub fn tick(&mut self, position_secs: f64) -> TickOutcome {
        let delta = position_secs - self.last_position_secs;
        self.last_position_secs = position_secs;

        if delta.is_nan() || delta <= 0.0 || delta >= self.max_tick_delta_secs {
            return TickOutcome::Discontinuity;
        }

        self.accumulated_secs += delta;

        if self.accumulated_secs >= self.flush_threshold_secs {
            TickOutcome::Flush(self.take())
        } else {
            TickOutcome::Accumulated(delta)
        }
    }

    /// Hand out everything accumulated so far and zero the counter
    pub fn take(&mut self) -> f64 {
        std::mem::take(&mut self.accumulated_secs)
    }

    /// Move the reference position without counting the jump
    pub fn reanchor(&mut self, position_secs: f64) {
        self.last_position_secs = position_secs;
    }

    /// Forget everything (active track changed)
    ///
    /// Callers must have flushed via [`take`](Self::take) first if the
    /// outgoing track's seconds should be kept.
    pub fn reset(&mut self) {
        self.accumulated_secs = 0.0;
        self.last_position_secs = 0.0;
    }

    /// Seconds accumulated since the last flush
    pub fn accumulated_secs(&self) -> f64 {
        self.accumulated_secs
    }

    /// Last observed transport position
    pub fn last_position_secs(&self) -> f64 {
        self.last_position_secs
    }

    /// Whether there is anything unflushed
    pub fn has_pending(&self) -> bool {
        self.accumulated_secs > 0.0
    }
}
