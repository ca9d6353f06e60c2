//! Primary playlist with an optional shuffled view
//!
//! One canonical track list plus an index permutation:
//! ```text
//! tracks:   [A, B, C, D]        primary view (caller order)
//! shuffled: [2, 0, 3, 1]        shuffled view -> C, A, D, B
//! ```
//! The shuffled view is never stored as a second list of tracks, so replacing
//! the tracks cannot leave the two views disagreeing. An active track that is
//! not part of the primary tracks is held in a separate slot at the head of
//! the shuffled view.

use crate::shuffle::shuffled_order;
use cadence_core::Track;

/// Playlist backing next/previous navigation
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Tracks in caller order
    tracks: Vec<Track>,

    /// Permutation of `tracks` indices while shuffled
    shuffled: Option<Vec<usize>>,

    /// Pinned track missing from `tracks`, first in the shuffled view
    head: Option<Track>,
}

impl Playlist {
    /// Create an unshuffled playlist
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            shuffled: None,
            head: None,
        }
    }

    /// Replace the primary tracks
    ///
    /// If the playlist is shuffled, a fresh shuffled view is built around
    /// `pinned`.
    pub fn replace(&mut self, tracks: Vec<Track>, pinned: Option<&Track>) {
        self.tracks = tracks;
        if self.shuffled.is_some() {
            self.shuffle(pinned);
        }
    }

    /// Build a new shuffled view with `pinned` first
    ///
    /// A pinned track that is not among the primary tracks still leads the
    /// view; every primary track follows in shuffled order.
    pub fn shuffle(&mut self, pinned: Option<&Track>) {
        self.head = pinned
            .filter(|p| !self.tracks.iter().any(|t| t.is_same(p)))
            .cloned();
        self.shuffled = Some(shuffled_order(&self.tracks, pinned.map(|t| &t.id)));
    }

    /// Drop the shuffled view
    pub fn unshuffle(&mut self) {
        self.shuffled = None;
        self.head = None;
    }

    /// Remove every track and the shuffled view
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.shuffled = None;
        self.head = None;
    }

    /// Whether a shuffled view exists
    pub fn is_shuffled(&self) -> bool {
        self.shuffled.is_some()
    }

    /// Tracks in primary (caller) order
    pub fn primary(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks in the authoritative order: shuffled view if present, else primary
    pub fn ordered(&self) -> Vec<&Track> {
        match &self.shuffled {
            Some(order) => self
                .head
                .iter()
                .chain(order.iter().map(|&i| &self.tracks[i]))
                .collect(),
            None => self.tracks.iter().collect(),
        }
    }

    /// Number of primary tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::TrackMetadata;

    fn create_test_track(id: &str) -> Track {
        Track::new(
            id,
            format!("file:///music/{}.mp3", id),
            180.0,
            TrackMetadata::new(format!("Track {}", id), "Artist", "Album"),
        )
    }

    fn ids(tracks: &[&Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn unshuffled_order_is_primary_order() {
        let playlist = Playlist::new(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
        ]);

        assert!(!playlist.is_shuffled());
        assert_eq!(ids(&playlist.ordered()), vec!["a", "b", "c"]);
    }

    #[test]
    fn shuffle_pins_and_unshuffle_restores() {
        let mut playlist = Playlist::new((0..6).map(|i| create_test_track(&i.to_string())).collect());

        playlist.shuffle(Some(&create_test_track("4")));
        assert!(playlist.is_shuffled());
        assert_eq!(playlist.ordered()[0].id.as_str(), "4");
        assert_eq!(playlist.ordered().len(), 6);

        playlist.unshuffle();
        assert_eq!(ids(&playlist.ordered()), vec!["0", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn replace_while_shuffled_rebuilds_view() {
        let mut playlist = Playlist::new(vec![create_test_track("a"), create_test_track("b")]);
        playlist.shuffle(None);

        playlist.replace(
            vec![create_test_track("x"), create_test_track("y"), create_test_track("z")],
            Some(&create_test_track("z")),
        );

        let ordered = playlist.ordered();
        assert_eq!(ordered.len(), 3);
        assert_eq!(ordered[0].id.as_str(), "z");
        assert!(playlist.is_shuffled());
    }

    #[test]
    fn replace_while_unshuffled_keeps_caller_order() {
        let mut playlist = Playlist::new(vec![create_test_track("a")]);
        playlist.replace(vec![create_test_track("b"), create_test_track("c")], None);
        assert_eq!(ids(&playlist.ordered()), vec!["b", "c"]);
        assert!(!playlist.is_shuffled());
    }

    #[test]
    fn pinned_track_outside_playlist_leads_shuffled_view() {
        let mut playlist = Playlist::new(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("c"),
        ]);
        let stranger = create_test_track("x");

        playlist.shuffle(Some(&stranger));

        let ordered = playlist.ordered();
        assert_eq!(ordered.len(), 4);
        assert_eq!(ordered[0].id.as_str(), "x");
        let mut rest = ids(&ordered[1..]);
        rest.sort();
        assert_eq!(rest, vec!["a", "b", "c"]);
        assert_eq!(playlist.len(), 3);

        playlist.unshuffle();
        assert_eq!(ids(&playlist.ordered()), vec!["a", "b", "c"]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut playlist = Playlist::new(vec![create_test_track("a")]);
        playlist.shuffle(None);
        playlist.clear();
        assert!(playlist.is_empty());
        assert!(!playlist.is_shuffled());
    }
}
