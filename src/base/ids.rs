//! Identifiers for environments and the declarations they own.

use std::fmt;

use uuid::Uuid;

/// Identity of one symbol environment.
///
/// Random, so two independently constructed environments never collide
/// even if they live in different processes or were built in any order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EnvId(Uuid);

impl EnvId {
    /// Mint a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EnvId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first group is plenty to tell environments apart in logs.
        let simple = self.0.simple().to_string();
        write!(f, "EnvId({})", &simple[..8])
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "env#{}", self.0)
    }
}

/// Slot of a declaration in its environment's declaration vector.
///
/// The root scope always sits in slot 0. Each declaration takes the next
/// slot, and slots are never freed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDeclId(pub u32);

impl LocalDeclId {
    /// Handle for slot `id`.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The slot number.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalDeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDeclId({})", self.0)
    }
}

impl From<u32> for LocalDeclId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A declaration handle that is unique across environments.
///
/// Carrying the owning [`EnvId`] lets the import machinery reject a handle
/// from the wrong side of a parent/child pair instead of silently indexing
/// into the other environment's storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DeclId {
    pub env: EnvId,
    pub local: LocalDeclId,
}

impl DeclId {
    #[inline]
    pub const fn new(env: EnvId, local: LocalDeclId) -> Self {
        Self { env, local }
    }

    /// Whether this declaration is owned by `env`.
    #[inline]
    pub fn belongs_to(&self, env: EnvId) -> bool {
        self.env == env
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({:?}:{})", self.env, self.local.0)
    }
}
