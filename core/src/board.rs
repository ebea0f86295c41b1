use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Phase of a single board. The "locked" and "won" flags, the pending first pick and the
/// pending mismatch are all read off this one value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// No card is face up without its pair.
    Idle,
    /// One card is face up, waiting for the second pick.
    OneRevealed(CardId),
    /// Two different cards are face up until the mismatch is resolved.
    Mismatch(CardId, CardId),
    Won,
}

impl BoardState {
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Mismatch(..))
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn first_pick(self) -> Option<CardId> {
        match self {
            Self::OneRevealed(id) => Some(id),
            _ => None,
        }
    }

    pub const fn pending_mismatch(self) -> Option<(CardId, CardId)> {
        match self {
            Self::Mismatch(first, second) => Some((first, second)),
            _ => None,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Revealed,
    Matched,
    Mismatched,
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    NoChange,
    Hidden,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Cards of one stage and the flip/match state machine over them.
///
/// Transitions come in two flavours: `apply_*` mutate in place and report what happened,
/// while [`Board::flip`] and [`Board::resolve_timeout`] leave `self` untouched and return
/// the next snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: Coord2,
    cards: Array2<Card>,
    state: BoardState,
    move_count: u32,
    matched_pairs: CellCount,
    seed: u32,
}

#[derive(Deserialize)]
struct RawBoard {
    size: Coord2,
    cards: Array2<Card>,
    state: BoardState,
    move_count: u32,
    matched_pairs: CellCount,
    seed: u32,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let board = Self {
            size: raw.size,
            cards: raw.cards,
            state: raw.state,
            move_count: raw.move_count,
            matched_pairs: raw.matched_pairs,
            seed: raw.seed,
        };
        board.check_consistency()?;
        Ok(board)
    }
}

fn rejected(reason: &str) -> GameError {
    log::warn!("Rejected board snapshot: {}", reason);
    GameError::InvalidConfig
}

impl Board {
    /// Deals a `size` board: the first `rows * cols / 2` symbols, each twice, shuffled with
    /// `seed`.
    pub fn new(size: Coord2, symbols: &[Symbol], seed: u32) -> Result<Self> {
        let pairs = validate_layout(size, symbols)?;
        let chosen = &symbols[..pairs];
        let doubled: Vec<Symbol> = chosen.iter().chain(chosen).cloned().collect();

        let cards: Vec<Card> = shuffle(&doubled, seed)
            .into_iter()
            .zip(0..)
            .map(|(symbol, id)| Card::new(id, symbol))
            .collect();
        let cards = Array2::from_shape_vec(size.to_nd_index(), cards)
            .map_err(|_| GameError::InvalidConfig)?;

        log::trace!("dealt {}x{} board with seed {}", size.0, size.1, seed);
        Ok(Self {
            size,
            cards,
            state: BoardState::default(),
            move_count: 0,
            matched_pairs: 0,
            seed,
        })
    }

    pub fn from_stage(stage: &StageConfig, seed: u32) -> Result<Self> {
        Self::new(stage.size(), stage.symbols(), seed)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn cols(&self) -> Coord {
        self.size.1
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn matched_pairs(&self) -> CellCount {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> CellCount {
        mult(self.size.0, self.size.1) / 2
    }

    pub fn card_count(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    pub fn first_pick(&self) -> Option<CardId> {
        self.state.first_pick()
    }

    pub fn pending_mismatch(&self) -> Option<(CardId, CardId)> {
        self.state.pending_mismatch()
    }

    /// Cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        let index = self.validate_id(id)?;
        Ok(&self.cards[index])
    }

    /// Card at `(row, col)`.
    pub fn card_at(&self, (row, col): Coord2) -> Result<&Card> {
        if row < self.size.0 && col < self.size.1 {
            Ok(&self.cards[(row, col).to_nd_index()])
        } else {
            Err(GameError::OutOfRange)
        }
    }

    fn card_at_id(&self, id: CardId) -> &Card {
        &self.cards[id_to_nd_index(id, self.size.1)]
    }

    pub fn validate_id(&self, id: CardId) -> Result<[usize; 2]> {
        if id < self.card_count() {
            Ok(id_to_nd_index(id, self.size.1))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    /// Checks a board that did not come out of [`Board::new`] and the transitions, such as
    /// a deserialized snapshot.
    fn check_consistency(&self) -> Result<()> {
        let total = self.card_count();
        if self.cards.dim() != (usize::from(self.size.0), usize::from(self.size.1)) {
            return Err(rejected("size does not match the card grid"));
        }
        if total == 0 || total % 2 != 0 {
            return Err(rejected("odd or empty card count"));
        }
        if self.cards.iter().zip(0..).any(|(card, id)| card.id() != id) {
            return Err(rejected("card ids are not their positions"));
        }

        let mut pairs: BTreeMap<&Symbol, (u8, u8)> = BTreeMap::new();
        for card in self.cards.iter() {
            if card.is_matched() && !card.is_revealed() {
                return Err(rejected("matched card is face down"));
            }
            let (count, matched) = pairs.entry(card.symbol()).or_default();
            *count = count.saturating_add(1);
            *matched = matched.saturating_add(u8::from(card.is_matched()));
        }
        if pairs.values().any(|&(count, matched)| count != 2 || matched % 2 != 0) {
            return Err(rejected("symbols are not dealt as matched pairs"));
        }

        let matched_cards: usize = pairs.values().map(|&(_, matched)| usize::from(matched)).sum();
        if matched_cards != 2 * usize::from(self.matched_pairs) {
            return Err(rejected("matched pair count disagrees with the cards"));
        }
        if self.state.is_won() != (self.matched_pairs == self.pair_count()) {
            return Err(rejected("won state disagrees with the matched cards"));
        }

        let mut expected: Vec<CardId> = match self.state {
            BoardState::Idle | BoardState::Won => Vec::new(),
            BoardState::OneRevealed(id) => Vec::from([id]),
            BoardState::Mismatch(first, second) => Vec::from([first, second]),
        };
        if expected.iter().any(|&id| id >= total) {
            return Err(rejected("board state points off the board"));
        }
        if let BoardState::Mismatch(first, second) = self.state {
            let symbol_of = |id| self.card_at_id(id).symbol();
            if symbol_of(first) == symbol_of(second) {
                return Err(rejected("pending mismatch holds a matching pair"));
            }
        }

        let mut pending: Vec<CardId> = self
            .cards()
            .filter(|card| card.is_pending())
            .map(Card::id)
            .collect();
        pending.sort_unstable();
        expected.sort_unstable();
        if pending != expected {
            return Err(rejected("face-up cards disagree with the board state"));
        }

        Ok(())
    }

    /// Returns the board after flipping card `id`, leaving `self` untouched.
    pub fn flip(&self, id: CardId) -> Result<Self> {
        let mut next = self.clone();
        next.apply_flip(id)?;
        Ok(next)
    }

    /// Returns the board with any pending mismatch turned face down again.
    pub fn resolve_timeout(&self) -> Self {
        let mut next = self.clone();
        next.apply_resolve_timeout();
        next
    }

    pub fn apply_flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        let index = self.validate_id(id)?;

        let first_pick = match self.state {
            BoardState::Mismatch(..) | BoardState::Won => return Ok(NoChange),
            BoardState::Idle => None,
            BoardState::OneRevealed(first) => Some(first),
        };

        let card = &self.cards[index];
        if card.is_revealed() || card.is_matched() {
            return Ok(NoChange);
        }
        self.cards[index].reveal();

        let Some(first) = first_pick else {
            log::trace!("flip {}: first pick", id);
            self.state = BoardState::OneRevealed(id);
            return Ok(Revealed);
        };

        self.move_count = self.move_count.saturating_add(1);
        let first_index = id_to_nd_index(first, self.size.1);

        if self.cards[first_index].symbol() == self.cards[index].symbol() {
            self.cards[first_index].mark_matched();
            self.cards[index].mark_matched();
            self.matched_pairs += 1;

            if self.matched_pairs == self.pair_count() {
                log::trace!("flip {}: matched {}, board won", id, first);
                self.state = BoardState::Won;
                Ok(Won)
            } else {
                log::trace!("flip {}: matched {}", id, first);
                self.state = BoardState::Idle;
                Ok(Matched)
            }
        } else {
            log::trace!("flip {}: mismatch with {}", id, first);
            self.state = BoardState::Mismatch(first, id);
            Ok(Mismatched)
        }
    }

    pub fn apply_resolve_timeout(&mut self) -> ResolveOutcome {
        let Some((first, second)) = self.state.pending_mismatch() else {
            return ResolveOutcome::NoChange;
        };

        for id in [first, second] {
            self.cards[id_to_nd_index(id, self.size.1)].hide();
        }
        self.state = BoardState::Idle;
        log::trace!("resolved mismatch {} / {}", first, second);
        ResolveOutcome::Hidden
    }
}
