//! Value interning.
//!
//! Repeated attribute values (class names, style references, layer ids)
//! are deduplicated into a dense id space. The table is a flat sorted
//! index rather than a hash map: lookups are O(log n), but the layout is
//! compact and iteration order is deterministic.
//!
//! # Example
//!
//! ```
//! use saxattr_core::intern::{InternHandler, InternId};
//! use saxattr_core::ProcessAttribute;
//!
//! let mut seen = Vec::new();
//! let mut handler = InternHandler::new(|_text: &str, _id: InternId| {}, |id: InternId| {
//!     seen.push(id.index())
//! });
//! handler.process("layer", "top").unwrap();
//! handler.process("layer", "bottom").unwrap();
//! handler.process("layer", "top").unwrap();
//! drop(handler);
//!
//! assert_eq!(seen, vec![0, 1, 0]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;
use crate::handler::ProcessAttribute;

/// Stable id of an interned value.
///
/// Ids are assigned from 0 in order of first occurrence. An id is the
/// position of its text in the table, so the id space is as wide as the
/// table can grow and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InternId(usize);

impl InternId {
    /// Position of the canonical text in [`InternTable::texts`].
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Content-keyed table of canonical texts.
///
/// `texts[id]` owns the canonical copy; `sorted` holds every id once,
/// ordered by the content of its text (bytewise, which for UTF-8 is
/// code point order).
#[derive(Debug, Clone, Default)]
pub struct InternTable {
    texts: Vec<Box<str>>,
    sorted: Vec<InternId>,
}

impl InternTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with room for `capacity` distinct values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            texts: Vec::with_capacity(capacity),
            sorted: Vec::with_capacity(capacity),
        }
    }

    /// Binary search the sorted index by content.
    ///
    /// `Ok(pos)` is the position of the matching id, `Err(pos)` is where
    /// a new id for `text` belongs.
    fn search(&self, text: &str) -> std::result::Result<usize, usize> {
        self.sorted
            .binary_search_by(|id| self.compare(*id, text))
    }

    #[inline]
    fn compare(&self, id: InternId, text: &str) -> Ordering {
        self.texts[id.index()].as_ref().cmp(text)
    }

    /// Intern `text`, copying it if it has not been seen before.
    ///
    /// Returns the id and whether it was newly assigned.
    pub fn intern(&mut self, text: &str) -> (InternId, bool) {
        match self.search(text) {
            Ok(pos) => (self.sorted[pos], false),
            Err(pos) => {
                let id = InternId(self.texts.len());
                self.texts.push(Box::from(text));
                self.sorted.insert(pos, id);
                (id, true)
            }
        }
    }

    /// Id of `text`, if interned.
    pub fn lookup(&self, text: &str) -> Option<InternId> {
        self.search(text).ok().map(|pos| self.sorted[pos])
    }

    /// Canonical text for `id`.
    #[inline]
    pub fn get(&self, id: InternId) -> Option<&str> {
        self.texts.get(id.index()).map(AsRef::as_ref)
    }

    /// Number of distinct values, which is also the next id to assign.
    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Canonical texts in id order.
    pub fn texts(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.texts.iter().map(AsRef::as_ref)
    }

    /// `(text, id)` pairs in content order.
    pub fn iter_sorted(&self) -> impl ExactSizeIterator<Item = (&str, InternId)> + '_ {
        self.sorted
            .iter()
            .map(move |&id| (self.texts[id.index()].as_ref(), id))
    }

    /// Take the canonical texts, indexed by id.
    pub fn into_texts(self) -> Vec<Box<str>> {
        self.texts
    }
}

/// Callback for a value seen for the first time.
pub type NewValueNotifier<'h> = Box<dyn FnMut(&str, InternId) + 'h>;

/// Callback for every value occurrence.
pub type ValueNotifier<'h> = Box<dyn FnMut(InternId) + 'h>;

/// Handler that interns attribute values.
///
/// On first sight of a value the new-value notifier receives the
/// canonical text and its id; every occurrence, new or repeated, then
/// reaches the value notifier with the id.
pub struct InternHandler<'h> {
    table: InternTable,
    new_value: NewValueNotifier<'h>,
    value: ValueNotifier<'h>,
}

impl<'h> InternHandler<'h> {
    pub fn new<N, V>(new_value: N, value: V) -> Self
    where
        N: FnMut(&str, InternId) + 'h,
        V: FnMut(InternId) + 'h,
    {
        Self::with_table(InternTable::new(), new_value, value)
    }

    /// Continue interning into an existing table, e.g. one kept from a
    /// previous parse via [`InternHandler::into_table`].
    pub fn with_table<N, V>(table: InternTable, new_value: N, value: V) -> Self
    where
        N: FnMut(&str, InternId) + 'h,
        V: FnMut(InternId) + 'h,
    {
        Self {
            table,
            new_value: Box::new(new_value),
            value: Box::new(value),
        }
    }

    #[inline]
    pub fn table(&self) -> &InternTable {
        &self.table
    }

    /// Drop the notifiers and keep the table.
    pub fn into_table(self) -> InternTable {
        self.table
    }
}

impl ProcessAttribute for InternHandler<'_> {
    fn process(&mut self, name: &str, value: &str) -> Result<()> {
        let (id, inserted) = self.table.intern(value);
        if inserted {
            let canonical = self.table.texts[id.index()].as_ref();
            tracing::debug!(attribute = name, value = canonical, %id, "new table value");
            (self.new_value)(canonical, id);
        }
        (self.value)(id);
        Ok(())
    }
}

impl fmt::Debug for InternHandler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternHandler")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_follow_first_occurrence() {
        let mut table = InternTable::new();
        assert_eq!(table.intern("m"), (InternId(0), true));
        assert_eq!(table.intern("a"), (InternId(1), true));
        assert_eq!(table.intern("z"), (InternId(2), true));
        assert_eq!(table.intern("a"), (InternId(1), false));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_id_is_table_position() {
        let mut table = InternTable::with_capacity(70_000);
        for i in 0..70_000usize {
            let text = format!("v{}", (i * 40_503) % 70_000);
            let before = table.len();
            let (id, inserted) = table.intern(&text);
            if inserted {
                assert_eq!(id.index(), before);
            }
            assert_eq!(table.get(id), Some(text.as_str()));
        }
        assert_eq!(table.len(), 70_000);
        assert_eq!(table.texts().len(), table.iter_sorted().len());
    }

    #[test]
    fn test_sorted_iteration() {
        let mut table = InternTable::new();
        for text in ["pear", "apple", "fig", "apple"] {
            table.intern(text);
        }
        let sorted: Vec<_> = table.iter_sorted().collect();
        assert_eq!(
            sorted,
            vec![("apple", InternId(1)), ("fig", InternId(2)), ("pear", InternId(0))]
        );
        let texts: Vec<_> = table.texts().collect();
        assert_eq!(texts, vec!["pear", "apple", "fig"]);
    }

    #[test]
    fn test_lookup_and_get() {
        let mut table = InternTable::with_capacity(4);
        let (id, _) = table.intern("layer-1");
        assert_eq!(table.lookup("layer-1"), Some(id));
        assert_eq!(table.lookup("layer-2"), None);
        assert_eq!(table.get(id), Some("layer-1"));
        assert_eq!(table.get(InternId(7)), None);
    }

    #[test]
    fn test_empty_and_prefix_values_are_distinct() {
        let mut table = InternTable::new();
        let (empty, _) = table.intern("");
        let (a, _) = table.intern("a");
        let (ab, _) = table.intern("ab");
        assert_ne!(empty, a);
        assert_ne!(a, ab);
        assert_eq!(table.intern("").0, empty);
    }

    #[test]
    fn test_handler_notifies() {
        let mut new_values = Vec::new();
        let mut occurrences = Vec::new();
        {
            let mut handler = InternHandler::new(
                |text: &str, id: InternId| new_values.push((text.to_string(), id.index())),
                |id: InternId| occurrences.push(id.index()),
            );
            for value in ["b", "a", "b", "b", "c"] {
                handler.process("class", value).unwrap();
            }
            assert_eq!(handler.table().len(), 3);
        }
        assert_eq!(
            new_values,
            vec![("b".to_string(), 0), ("a".to_string(), 1), ("c".to_string(), 2)]
        );
        assert_eq!(occurrences, vec![0, 1, 0, 0, 2]);
    }

    #[test]
    fn test_table_survives_handler() {
        let mut handler = InternHandler::new(|_: &str, _: InternId| {}, |_: InternId| {});
        handler.process("id", "x").unwrap();
        let table = handler.into_table();

        let mut ids = Vec::new();
        let mut handler = InternHandler::with_table(table, |_: &str, _: InternId| {}, |id: InternId| {
            ids.push(id)
        });
        handler.process("id", "y").unwrap();
        handler.process("id", "x").unwrap();
        drop(handler);
        assert_eq!(ids, vec![InternId(1), InternId(0)]);
    }
}
