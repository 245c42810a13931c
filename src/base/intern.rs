//! Per-environment name interning.
//!
//! Every environment owns exactly one [`Interner`]. A [`Name`] is only
//! meaningful next to the interner that produced it: the same spelling
//! interned in two environments yields two unrelated handles, which is why
//! the import cache has to translate names explicitly.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;

/// Canonical name of a declaration inside one environment.
///
/// Just a `u32` handle. Comparing two names is only meaningful when both
/// came from the same [`Interner`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub(crate) const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Naming table of a single environment.
///
/// Interning goes through `&self` so that a parent environment handed out
/// as a shared reference can still learn spellings it has never seen.
#[derive(Default)]
pub struct Interner {
    table: RwLock<NameTable>,
}

#[derive(Default)]
struct NameTable {
    ids: FxHashMap<SmolStr, u32>,
    spellings: Vec<SmolStr>,
}

impl Interner {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning the existing handle when it is already known.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(name) = self.find(text) {
            return name;
        }

        let mut table = self.table.write();
        // Another caller may have won the race between the two locks.
        if let Some(&index) = table.ids.get(text) {
            return Name::from_raw(index);
        }

        let spelling = SmolStr::new(text);
        let index = table.spellings.len() as u32;
        table.spellings.push(spelling.clone());
        table.ids.insert(spelling, index);
        Name::from_raw(index)
    }

    /// Look up `text` without interning it.
    pub fn find(&self, text: &str) -> Option<Name> {
        self.table.read().ids.get(text).copied().map(Name::from_raw)
    }

    /// Spelling of `name`, or `None` when it was minted by another interner.
    pub fn text(&self, name: Name) -> Option<SmolStr> {
        self.table.read().spellings.get(name.0 as usize).cloned()
    }

    /// Number of distinct spellings.
    pub fn len(&self) -> usize {
        self.table.read().spellings.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("names", &self.len())
            .finish()
    }
}
