//! Shuffled playback order
//!
//! Produces an index permutation over the primary playlist (Fisher-Yates via
//! `rand`). The active track is pinned at position 0 so enabling shuffle never
//! interrupts what is playing.

use cadence_core::{LocalTrackId, Track};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Build a shuffled order for `tracks`, pinning `pinned` at the front
///
/// Only the first track matching `pinned` is pinned; duplicates of it are
/// shuffled with the rest. If `pinned` is not in the playlist every index is
/// shuffled; [`Playlist`](crate::Playlist) places such a track ahead of them.
pub fn shuffled_order(tracks: &[Track], pinned: Option<&LocalTrackId>) -> Vec<usize> {
    shuffled_order_with(tracks, pinned, &mut thread_rng())
}

/// Same as [`shuffled_order`] with a caller-provided RNG
pub fn shuffled_order_with<R: Rng + ?Sized>(
    tracks: &[Track],
    pinned: Option<&LocalTrackId>,
    rng: &mut R,
) -> Vec<usize> {
    let pinned_index = pinned.and_then(|id| tracks.iter().position(|t| &t.id == id));

    let mut rest: Vec<usize> = (0..tracks.len())
        .filter(|&i| Some(i) != pinned_index)
        .collect();
    rest.shuffle(rng);

    let mut order = Vec::with_capacity(tracks.len());
    order.extend(pinned_index);
    order.extend(rest);
    order
}
