//! The frontier: every room an event has queued, in the order it was queued.

use std::collections::HashMap;

use world_graph::RoomId;

/// Ordered (room, strength) list with O(1) lookup and a drain cursor.
///
/// Entries before the cursor have been visited and are frozen; entries at or
/// after it may still have their strength raised.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: Vec<(RoomId, f64)>,
    index: HashMap<RoomId, usize>,
    cursor: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `room` at `strength`.
    ///
    /// A room already queued but not yet drained keeps the stronger of the two
    /// offers. A drained room is never touched again.
    pub fn add_visit(&mut self, room: RoomId, strength: f64) {
        match self.index.get(&room) {
            Some(&i) if i >= self.cursor => {
                let entry = &mut self.entries[i];
                entry.1 = entry.1.max(strength);
            }
            Some(_) => {}
            None => {
                self.index.insert(room, self.entries.len());
                self.entries.push((room, strength));
            }
        }
    }

    /// True once a room has been queued, whether or not it was drained yet.
    pub fn has_been_visited(&self, room: RoomId) -> bool {
        self.index.contains_key(&room)
    }

    /// Take the entry at the cursor and advance past it.
    pub(crate) fn advance(&mut self) -> Option<(RoomId, f64)> {
        let entry = self.entries.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(entry)
    }

    pub fn strength_of(&self, room: RoomId) -> Option<f64> {
        self.index.get(&room).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries already drained.
    pub fn drained(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    pub fn entries(&self) -> &[(RoomId, f64)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_append_order() {
        let mut frontier = Frontier::new();
        frontier.add_visit(RoomId(3), 1.0);
        frontier.add_visit(RoomId(1), 0.5);
        frontier.add_visit(RoomId(2), 0.7);

        let order: Vec<_> = frontier.entries().iter().map(|(r, _)| *r).collect();
        assert_eq!(order, vec![RoomId(3), RoomId(1), RoomId(2)]);
    }

    #[test]
    fn test_undrained_entry_takes_maximum() {
        let mut frontier = Frontier::new();
        frontier.add_visit(RoomId(0), 0.4);
        frontier.add_visit(RoomId(0), 0.9);
        frontier.add_visit(RoomId(0), 0.2);

        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.strength_of(RoomId(0)), Some(0.9));
    }

    #[test]
    fn test_drained_entry_is_frozen() {
        let mut frontier = Frontier::new();
        frontier.add_visit(RoomId(0), 0.4);
        assert_eq!(frontier.advance(), Some((RoomId(0), 0.4)));

        frontier.add_visit(RoomId(0), 0.9);
        assert_eq!(frontier.strength_of(RoomId(0)), Some(0.4));
        assert_eq!(frontier.len(), 1);
        assert!(frontier.has_been_visited(RoomId(0)));
    }

    #[test]
    fn test_advance_sees_entries_added_mid_drain() {
        let mut frontier = Frontier::new();
        frontier.add_visit(RoomId(0), 1.0);

        let mut seen = Vec::new();
        while let Some((room, _)) = frontier.advance() {
            seen.push(room);
            if room.0 < 3 {
                frontier.add_visit(RoomId(room.0 + 1), 0.5);
            }
        }

        assert_eq!(seen, vec![RoomId(0), RoomId(1), RoomId(2), RoomId(3)]);
        assert!(frontier.is_exhausted());
        assert_eq!(frontier.drained(), 4);
    }
}
