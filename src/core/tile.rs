//! Tiles as seen by the dispatcher.
//!
//! The host world keeps its own tile representation. Dispatch only needs the
//! tile's position and the items on it, in stack order (ground first), which
//! is what [`TileView`] exposes. [`Tile`] is a plain owned implementation for
//! hosts that build a snapshot per call, and for tests.

use super::{ItemRef, Position};

/// Read-only view of a tile.
pub trait TileView {
    /// Where the tile is.
    fn position(&self) -> Position;

    /// Items on the tile, ground first.
    fn items(&self) -> &[ItemRef];
}

/// An owned tile snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub position: Position,
    pub items: Vec<ItemRef>,
}

impl Tile {
    /// Create an empty tile.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            items: Vec::new(),
        }
    }

    /// Put an item on top of the stack (builder pattern).
    #[must_use]
    pub fn with_item(mut self, item: ItemRef) -> Self {
        self.items.push(item);
        self
    }
}

impl TileView for Tile {
    fn position(&self) -> Position {
        self.position
    }

    fn items(&self) -> &[ItemRef] {
        &self.items
    }
}
