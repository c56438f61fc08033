//! Atom interning.
//!
//! Atom names and failure messages are interned once per arena so that leaves hash
//! and compare as small integers.

use hashbrown::HashMap;

use crate::handle::AtomId;

/// Names interned by an arena, in first-seen order.
#[derive(Debug, Default)]
pub struct AtomTable {
    ids: HashMap<Box<str>, AtomId>,
    names: Vec<Box<str>>,
}

impl AtomTable {
    /// Returns the id of `name`, interning it on first sight.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn intern(&mut self, name: &str) -> AtomId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        assert!(
            self.names.len() < u32::MAX as usize,
            "atom table capacity exceeded"
        );
        #[allow(clippy::cast_possible_truncation)]
        let id = AtomId::new(self.names.len() as u32);
        self.ids.insert(name.into(), id);
        self.names.push(name.into());
        id
    }

    /// The name behind `id`, if it came from this table.
    #[must_use]
    pub fn name(&self, id: AtomId) -> Option<&str> {
        self.names.get(id.index() as usize).map(AsRef::as_ref)
    }
}
