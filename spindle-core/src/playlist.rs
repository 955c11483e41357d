//! Playlist engine
//!
//! Ordered collection of songs with a "current" cursor and a
//! playback-intent flag. Entries live in a contiguous arena (`Vec`) with the
//! cursor held as a separate index, so there is no prev/next pointer
//! bookkeeping to get wrong: the neighbor of entry `i` is `i - 1` / `i + 1`
//! by construction.
//!
//! Shuffle and sort share one `rebuild_from` primitive: materialize the
//! entries, permute, rebuild. Each entry carries a stable `entry_id`, and the
//! cursor is re-derived from that id after a rebuild, so "which song is
//! current" survives any permutation even when the playlist contains
//! duplicate songs.

use crate::song::{Song, SortKey};
use crate::state::PlaybackState;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

/// One playlist slot: a song plus the identity that survives reordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Stable identity of this slot, assigned at insertion
    pub entry_id: Uuid,

    /// The song occupying this slot
    pub song: Song,
}

impl PlaylistEntry {
    fn new(song: Song) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            song,
        }
    }
}

/// Ordered playlist with a current-song cursor
///
/// Single-threaded by design: every operation is called from one logical
/// caller (a UI callback) and runs to completion. Operations either succeed
/// or report a guarded no-op with `false`/`None`; nothing here panics.
#[derive(Debug, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    current: Option<usize>,
    state: PlaybackState,
}

impl Playlist {
    /// Create an empty playlist in the paused state
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a song at the tail
    ///
    /// The first song added also becomes the current song. Never fails;
    /// growth is unbounded.
    pub fn add_song(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        path: impl Into<String>,
    ) {
        let entry = PlaylistEntry::new(Song::new(title, artist, path));
        debug!("Adding {} at position {}", entry.song, self.entries.len());
        self.entries.push(entry);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    /// Number of songs in the playlist
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate songs head-to-tail
    ///
    /// Non-destructive and restartable; the basis for UI display and for
    /// shuffle/sort materialization. Reversible for tail-to-head traversal.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Song> + ExactSizeIterator {
        self.entries.iter().map(|e| &e.song)
    }

    /// Snapshot of all songs in head-to-tail order
    pub fn songs(&self) -> Vec<Song> {
        self.iter().cloned().collect()
    }

    /// All entries in order, with their stable ids
    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Replace the entire ordering with the given entries
    ///
    /// Re-derives the cursor by entry id, so the entry that was current
    /// before the rebuild stays current if it is still present; otherwise
    /// the cursor clears. This is the primitive shuffle and sort are built
    /// on.
    pub fn rebuild_from(&mut self, entries: Vec<PlaylistEntry>) {
        let current_id = self
            .current
            .and_then(|i| self.entries.get(i).map(|e| e.entry_id));
        self.set_entries(entries, current_id);
    }

    /// Install `entries` and point the cursor at `current_id`, if present
    fn set_entries(&mut self, entries: Vec<PlaylistEntry>, current_id: Option<Uuid>) {
        self.entries = entries;
        self.current = current_id
            .and_then(|id| self.entries.iter().position(|e| e.entry_id == id));
    }

    /// Randomly reorder the playlist
    ///
    /// Returns `false` without mutating anything when there are fewer than
    /// two songs. Uses the thread-local RNG; see [`shuffle_with`] for a
    /// seedable variant.
    ///
    /// [`shuffle_with`]: Playlist::shuffle_with
    pub fn shuffle(&mut self) -> bool {
        self.shuffle_with(&mut rand::thread_rng())
    }

    /// Shuffle with a caller-supplied RNG
    ///
    /// Uniform permutation (Fisher-Yates via `SliceRandom::shuffle`); the
    /// current song is unchanged afterwards.
    pub fn shuffle_with(&mut self, rng: &mut impl Rng) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }

        // Capture the cursor's entry id before taking the entries out
        let current_id = self.current.map(|i| self.entries[i].entry_id);
        let mut entries = std::mem::take(&mut self.entries);
        entries.shuffle(rng);
        self.set_entries(entries, current_id);
        debug!("Shuffled {} songs", self.entries.len());
        true
    }

    /// Sort the playlist by the given key
    ///
    /// Title and artist sort ascending; play count sorts descending
    /// (most-played first). All three are stable, so songs comparing equal
    /// keep their relative order. Returns `false` on playlists of fewer
    /// than two songs. The current song is unchanged afterwards.
    pub fn sort_by(&mut self, key: SortKey) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }

        let current_id = self.current.map(|i| self.entries[i].entry_id);
        let mut entries = std::mem::take(&mut self.entries);
        match key {
            SortKey::Title => entries.sort_by(|a, b| a.song.title.cmp(&b.song.title)),
            SortKey::Artist => entries.sort_by(|a, b| a.song.artist.cmp(&b.song.artist)),
            // Reversed comparison keeps the sort stable while ordering
            // highest play count first.
            SortKey::PlayCount => {
                entries.sort_by(|a, b| b.song.play_count.cmp(&a.song.play_count))
            }
        }
        self.set_entries(entries, current_id);
        debug!("Sorted {} songs by {}", self.entries.len(), key);
        true
    }

    /// Remove the song at a 0-based position
    ///
    /// Returns `false` and leaves the playlist untouched when `index` is out
    /// of range. When the removed song was current, the cursor moves to its
    /// former next neighbor, falling back to the former previous neighbor,
    /// falling back to nothing.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }

        let removed = self.entries.remove(index);
        debug!("Removed {} from position {}", removed.song, index);

        self.current = match self.current {
            Some(cur) if cur == index => {
                if index < self.entries.len() {
                    // Former next neighbor now occupies the removed slot
                    Some(index)
                } else if index > 0 {
                    Some(index - 1)
                } else {
                    None
                }
            }
            // Entries before the cursor shifted down by one
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        true
    }

    /// Move the cursor to the next song
    ///
    /// Returns `false` when there is no current song or it is already the
    /// tail. Does not wrap around.
    pub fn advance(&mut self) -> bool {
        match self.current {
            Some(i) if i + 1 < self.entries.len() => {
                self.current = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor to the previous song
    ///
    /// Returns `false` when there is no current song or it is already the
    /// head. Does not wrap around.
    pub fn retreat(&mut self) -> bool {
        match self.current {
            Some(i) if i > 0 => {
                self.current = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor directly to the song at `index`
    ///
    /// Returns `false` when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// The current song, if any
    pub fn current_song(&self) -> Option<&Song> {
        self.current_entry().map(|e| &e.song)
    }

    /// The current entry with its stable id, if any
    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.current.map(|i| &self.entries[i])
    }

    /// 0-based position of the current song, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Record one "play" action on the current song
    ///
    /// Increments the current song's play count and raises the
    /// playback-intent flag. Every call counts as one play, including
    /// resuming from pause. Returns `false` when there is no current song.
    pub fn mark_playing(&mut self) -> bool {
        let Some(i) = self.current else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.song.play_count += 1;
        debug!(
            "Playing {} (play count {})",
            entry.song, entry.song.play_count
        );
        self.state = PlaybackState::Playing;
        true
    }

    /// Lower the playback-intent flag
    ///
    /// Returns `false` when playback was not marked as playing.
    pub fn mark_paused(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    /// Current playback-intent state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check whether playback intent is raised
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Remove every song and clear the cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
        self.state = PlaybackState::Paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playlist_of(titles: &[&str]) -> Playlist {
        let mut playlist = Playlist::new();
        for title in titles {
            playlist.add_song(*title, "artist", format!("{}.mp3", title));
        }
        playlist
    }

    fn titles(playlist: &Playlist) -> Vec<String> {
        playlist.iter().map(|s| s.title.clone()).collect()
    }

    /// Forward and reverse traversals must visit the same songs
    fn assert_traversal_consistent(playlist: &Playlist) {
        let forward: Vec<_> = playlist.iter().collect();
        let mut reverse: Vec<_> = playlist.iter().rev().collect();
        reverse.reverse();
        assert_eq!(forward.len(), playlist.len());
        assert_eq!(forward, reverse);
        if let Some(i) = playlist.current_index() {
            assert!(i < playlist.len());
        }
    }

    #[test]
    fn test_empty_playlist() {
        let playlist = Playlist::new();
        assert!(playlist.is_empty());
        assert_eq!(playlist.len(), 0);
        assert!(playlist.current_song().is_none());
        assert!(!playlist.is_playing());
    }

    #[test]
    fn test_add_preserves_call_order() {
        let playlist = playlist_of(&["A", "B", "C"]);
        assert_eq!(playlist.len(), 3);
        assert_eq!(titles(&playlist), ["A", "B", "C"]);
        assert_traversal_consistent(&playlist);
    }

    #[test]
    fn test_first_song_becomes_current() {
        let mut playlist = Playlist::new();
        playlist.add_song("A", "X", "p1");
        assert_eq!(playlist.current_song().unwrap().title, "A");

        // Later additions leave the cursor alone
        playlist.add_song("B", "Y", "p2");
        assert_eq!(playlist.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut playlist = playlist_of(&["A", "B", "C"]);

        assert!(playlist.advance());
        assert_eq!(playlist.current_song().unwrap().title, "B");
        assert!(playlist.advance());
        assert_eq!(playlist.current_song().unwrap().title, "C");

        // At tail: no wraparound
        assert!(!playlist.advance());
        assert_eq!(playlist.current_song().unwrap().title, "C");

        assert!(playlist.retreat());
        assert!(playlist.retreat());
        assert_eq!(playlist.current_song().unwrap().title, "A");

        // At head: no wraparound
        assert!(!playlist.retreat());
        assert_eq!(playlist.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_advance_on_empty_playlist() {
        let mut playlist = Playlist::new();
        assert!(!playlist.advance());
        assert!(!playlist.retreat());
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut playlist = playlist_of(&["A", "B"]);
        assert!(!playlist.remove_at(2));
        assert!(!playlist.remove_at(usize::MAX));
        assert_eq!(playlist.len(), 2);
        assert_eq!(titles(&playlist), ["A", "B"]);
    }

    #[test]
    fn test_remove_before_current_shifts_cursor() {
        let mut playlist = playlist_of(&["A", "B", "C"]);
        playlist.advance();
        playlist.advance(); // current = C

        assert!(playlist.remove_at(0));
        assert_eq!(titles(&playlist), ["B", "C"]);
        assert_eq!(playlist.current_song().unwrap().title, "C");
        assert_traversal_consistent(&playlist);
    }

    #[test]
    fn test_remove_current_moves_to_former_next() {
        let mut playlist = playlist_of(&["X", "Y"]);
        assert_eq!(playlist.current_song().unwrap().title, "X");

        assert!(playlist.remove_at(0));
        assert_eq!(playlist.current_song().unwrap().title, "Y");
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_remove_current_at_tail_moves_to_former_prev() {
        let mut playlist = playlist_of(&["A", "B", "C"]);
        playlist.advance();
        playlist.advance(); // current = C

        assert!(playlist.remove_at(2));
        assert_eq!(playlist.current_song().unwrap().title, "B");
    }

    #[test]
    fn test_remove_last_song_clears_cursor() {
        let mut playlist = playlist_of(&["A"]);
        assert!(playlist.remove_at(0));
        assert!(playlist.is_empty());
        assert!(playlist.current_song().is_none());
    }

    #[test]
    fn test_shuffle_too_small_is_noop() {
        let mut empty = Playlist::new();
        assert!(!empty.shuffle());

        let mut single = playlist_of(&["A"]);
        assert!(!single.shuffle());
        assert_eq!(single.len(), 1);
        assert_eq!(single.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_shuffle_and_sort_with_untouched_cursor() {
        // Fresh playlist: the cursor still sits on the first song added
        let mut playlist = playlist_of(&["B", "A"]);
        assert_eq!(playlist.current_index(), Some(0));

        let mut rng = StdRng::seed_from_u64(3);
        assert!(playlist.shuffle_with(&mut rng));
        assert_eq!(playlist.current_song().unwrap().title, "B");

        assert!(playlist.sort_by(SortKey::Title));
        assert_eq!(titles(&playlist), ["A", "B"]);
        assert_eq!(playlist.current_song().unwrap().title, "B");
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn test_shuffle_preserves_songs_and_current() {
        let mut playlist = playlist_of(&["A", "B", "C", "D", "E"]);
        playlist.advance();
        playlist.advance(); // current = C

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(playlist.shuffle_with(&mut rng));

            let mut sorted = titles(&playlist);
            sorted.sort();
            assert_eq!(sorted, ["A", "B", "C", "D", "E"]);
            assert_eq!(playlist.current_song().unwrap().title, "C");
            assert_traversal_consistent(&playlist);
        }
    }

    #[test]
    fn test_shuffle_with_duplicate_songs_tracks_entry() {
        // Two identical songs: the cursor must stay on the same entry, not
        // jump to the first value match.
        let mut playlist = Playlist::new();
        playlist.add_song("Same", "Same", "same.mp3");
        playlist.add_song("Same", "Same", "same.mp3");
        playlist.add_song("Other", "Other", "other.mp3");
        playlist.advance(); // current = second "Same"
        let current_id = playlist.entries()[1].entry_id;

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert!(playlist.shuffle_with(&mut rng));
            let i = playlist.current_index().unwrap();
            assert_eq!(playlist.entries()[i].entry_id, current_id);
        }
    }

    #[test]
    fn test_sort_by_title_ascending() {
        let mut playlist = playlist_of(&["C", "A", "B"]);
        assert!(playlist.sort_by(SortKey::Title));
        assert_eq!(titles(&playlist), ["A", "B", "C"]);
        assert_traversal_consistent(&playlist);
    }

    #[test]
    fn test_sort_by_artist_ascending() {
        let mut playlist = Playlist::new();
        playlist.add_song("1", "Zed", "1.mp3");
        playlist.add_song("2", "Abe", "2.mp3");
        playlist.add_song("3", "Mia", "3.mp3");

        assert!(playlist.sort_by(SortKey::Artist));
        let artists: Vec<_> = playlist.iter().map(|s| s.artist.clone()).collect();
        assert_eq!(artists, ["Abe", "Mia", "Zed"]);
    }

    #[test]
    fn test_sort_by_play_count_descending() {
        let mut playlist = playlist_of(&["A", "B", "C"]);
        // Give B two plays and C one
        playlist.advance();
        playlist.mark_playing();
        playlist.mark_playing();
        playlist.advance();
        playlist.mark_playing();

        assert!(playlist.sort_by(SortKey::PlayCount));
        assert_eq!(titles(&playlist), ["B", "C", "A"]);
        let counts: Vec<_> = playlist.iter().map(|s| s.play_count).collect();
        assert_eq!(counts, [2, 1, 0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut playlist = Playlist::new();
        playlist.add_song("Same", "First", "1.mp3");
        playlist.add_song("Same", "Second", "2.mp3");
        playlist.add_song("Aaa", "Third", "3.mp3");

        assert!(playlist.sort_by(SortKey::Title));
        let artists: Vec<_> = playlist.iter().map(|s| s.artist.clone()).collect();
        // The two "Same" titles keep their original relative order
        assert_eq!(artists, ["Third", "First", "Second"]);

        // Equal play counts (all zero): order untouched
        assert!(playlist.sort_by(SortKey::PlayCount));
        let artists: Vec<_> = playlist.iter().map(|s| s.artist.clone()).collect();
        assert_eq!(artists, ["Third", "First", "Second"]);
    }

    #[test]
    fn test_sort_preserves_current() {
        let mut playlist = playlist_of(&["C", "A", "B"]);
        playlist.advance(); // current = A
        assert!(playlist.sort_by(SortKey::Title));
        assert_eq!(playlist.current_song().unwrap().title, "A");
        assert_eq!(playlist.current_index(), Some(0));
    }

    #[test]
    fn test_sort_too_small_is_noop() {
        let mut single = playlist_of(&["A"]);
        assert!(!single.sort_by(SortKey::Title));
    }

    #[test]
    fn test_select() {
        let mut playlist = playlist_of(&["A", "B", "C"]);
        assert!(playlist.select(2));
        assert_eq!(playlist.current_song().unwrap().title, "C");
        assert!(!playlist.select(3));
        assert_eq!(playlist.current_song().unwrap().title, "C");
    }

    #[test]
    fn test_mark_playing_increments_play_count() {
        let mut playlist = playlist_of(&["A"]);
        assert!(playlist.mark_playing());
        assert!(playlist.is_playing());
        assert_eq!(playlist.current_song().unwrap().play_count, 1);

        // Resume counts as another play
        assert!(playlist.mark_paused());
        assert!(playlist.mark_playing());
        assert_eq!(playlist.current_song().unwrap().play_count, 2);
    }

    #[test]
    fn test_mark_playing_without_current() {
        let mut playlist = Playlist::new();
        assert!(!playlist.mark_playing());
        assert!(!playlist.is_playing());
    }

    #[test]
    fn test_mark_paused_requires_playing() {
        let mut playlist = playlist_of(&["A"]);
        assert!(!playlist.mark_paused());

        playlist.mark_playing();
        assert!(playlist.mark_paused());
        assert!(!playlist.is_playing());
        assert!(!playlist.mark_paused());
    }

    #[test]
    fn test_clear() {
        let mut playlist = playlist_of(&["A", "B"]);
        playlist.mark_playing();
        playlist.clear();
        assert!(playlist.is_empty());
        assert!(playlist.current_song().is_none());
        assert!(!playlist.is_playing());
    }

    #[test]
    fn test_rebuild_from_reversed_entries() {
        let mut playlist = playlist_of(&["A", "B", "C"]);
        playlist.advance(); // current = B

        let mut entries = playlist.entries().to_vec();
        entries.reverse();
        playlist.rebuild_from(entries);

        assert_eq!(titles(&playlist), ["C", "B", "A"]);
        assert_eq!(playlist.current_song().unwrap().title, "B");
        assert_eq!(playlist.current_index(), Some(1));
    }
}
