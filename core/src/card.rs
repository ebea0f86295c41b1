use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque face value of a card. Two cards match when their symbols are equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    revealed: bool,
    matched: bool,
}

impl Card {
    pub(crate) fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face up but not yet part of a pair.
    pub fn is_pending(&self) -> bool {
        self.revealed && !self.matched
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}
