//! Player identity and the attributes equip rules look at.
//!
//! The host owns the real player object. Dispatch only needs a read-only
//! snapshot of the values the eligibility evaluator checks, captured in
//! [`PlayerAttrs`] at the moment of the equip attempt.

use serde::{Deserialize, Serialize};

/// Player identifier, as assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Vocation (character class) identifier.
///
/// Vocation names are resolved to ids through
/// [`MoveEventsConfig`](super::MoveEventsConfig) when specs are loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VocationId(pub u16);

impl VocationId {
    /// Create a new vocation ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for VocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vocation({})", self.0)
    }
}

/// Snapshot of the player attributes relevant to equipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAttrs {
    pub id: PlayerId,
    pub level: u32,
    pub magic_level: u32,
    pub premium: bool,
    pub vocation: VocationId,

    /// Skips level, magic level, premium and vocation checks.
    /// Set for staff characters; slot compatibility still applies.
    pub ignore_wield_requirements: bool,
}

impl PlayerAttrs {
    /// Create a free-account level 1 player of the given vocation.
    pub fn new(id: PlayerId, vocation: VocationId) -> Self {
        Self {
            id,
            level: 1,
            magic_level: 0,
            premium: false,
            vocation,
            ignore_wield_requirements: false,
        }
    }

    /// Set the level (builder pattern).
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the magic level (builder pattern).
    #[must_use]
    pub fn with_magic_level(mut self, magic_level: u32) -> Self {
        self.magic_level = magic_level;
        self
    }

    /// Mark the account as premium (builder pattern).
    #[must_use]
    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }

    /// Bypass wield requirements (builder pattern).
    #[must_use]
    pub fn ignoring_wield_requirements(mut self) -> Self {
        self.ignore_wield_requirements = true;
        self
    }
}
