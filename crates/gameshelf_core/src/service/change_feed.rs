//! In-process change notifications for game mutations.
//!
//! # Responsibility
//! - Keep the list of observers interested in store mutations.
//! - Deliver one `GameChange` per committed save or delete.
//!
//! # Invariants
//! - Listeners are notified synchronously, in subscription order.
//! - Nothing is published for a mutation that failed.

use crate::model::game::GameId;
use log::debug;
use std::sync::Arc;

/// One committed mutation of the game store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChange {
    Saved { game_id: GameId },
    Deleted { game_id: GameId },
}

impl GameChange {
    pub fn game_id(&self) -> GameId {
        match self {
            Self::Saved { game_id } | Self::Deleted { game_id } => *game_id,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::Deleted { .. } => "deleted",
        }
    }
}

/// Observer of committed game mutations (e.g. a list that must refresh).
pub trait ChangeListener: Send + Sync {
    fn on_game_changed(&self, change: &GameChange);
}

/// Ordered set of listeners the editor publishes to.
#[derive(Default)]
pub struct ChangeFeed {
    listeners: Vec<Arc<dyn ChangeListener>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&self, change: GameChange) {
        debug!(
            "event=game_changed module=service status={} listeners={}",
            change.label(),
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.on_game_changed(&change);
        }
    }
}
