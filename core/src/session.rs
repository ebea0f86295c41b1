use alloc::string::String;
use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

/// Delay before a mismatched pair is turned face down again.
pub const MISMATCH_DELAY_MS: u32 = 800;

/// Interval between two [`SessionEvent::Tick`] events in timed mode.
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Countdown used by timed sessions unless configured otherwise.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 90;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    /// Hard mode: the whole progression must be cleared before the countdown runs out.
    Timed,
}

impl GameMode {
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Timed)
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    TimedOut,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::TimedOut)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Playing
    }
}

/// Input fed into a session by the surrounding event loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The player picked card `id` on the current board.
    Flip(CardId),
    /// The mismatch delay elapsed.
    ResolveTimeout,
    /// One second elapsed.
    Tick,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    NoChange,
    Updated,
    /// A mismatch is pending and a [`SessionEvent::ResolveTimeout`] should be scheduled.
    Mismatched,
    /// The current board was won and the next stage has been dealt.
    StageCleared,
    Won,
    TimedOut,
}

impl SessionOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub player_name: String,
    pub mode: GameMode,
    pub seed: u32,
    pub time_limit_secs: u32,
    pub stages: Vec<StageConfig>,
}

impl SessionConfig {
    pub fn new(player_name: impl Into<String>, mode: GameMode, seed: u32) -> Self {
        Self {
            player_name: player_name.into(),
            mode,
            seed,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            stages: standard_stages(),
        }
    }

    pub fn with_stages(self, stages: Vec<StageConfig>) -> Self {
        Self { stages, ..self }
    }

    pub fn with_time_limit(self, time_limit_secs: u32) -> Self {
        Self {
            time_limit_secs,
            ..self
        }
    }
}

/// A run through every stage of the progression, with counters carried across boards.
///
/// The first board is dealt with the configured seed. Each later stage takes the next seed of
/// an LCG stream started from that same seed, so a whole session replays identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct Session {
    player_name: String,
    mode: GameMode,
    stages: Vec<StageConfig>,
    stage_index: usize,
    board: Board,
    completed_boards: Vec<Board>,
    total_moves: u32,
    total_matches: u32,
    remaining_seconds: Option<u32>,
    state: SessionState,
    seeds: Lcg,
}

#[derive(Deserialize)]
struct RawSession {
    player_name: String,
    mode: GameMode,
    stages: Vec<StageConfig>,
    stage_index: usize,
    board: Board,
    completed_boards: Vec<Board>,
    total_moves: u32,
    total_matches: u32,
    remaining_seconds: Option<u32>,
    state: SessionState,
    seeds: Lcg,
}

impl TryFrom<RawSession> for Session {
    type Error = GameError;

    fn try_from(raw: RawSession) -> Result<Self> {
        let session = Self {
            player_name: raw.player_name,
            mode: raw.mode,
            stages: raw.stages,
            stage_index: raw.stage_index,
            board: raw.board,
            completed_boards: raw.completed_boards,
            total_moves: raw.total_moves,
            total_matches: raw.total_matches,
            remaining_seconds: raw.remaining_seconds,
            state: raw.state,
            seeds: raw.seeds,
        };
        session.check_consistency()?;
        Ok(session)
    }
}

fn rejected(reason: &str) -> GameError {
    log::warn!("Rejected session snapshot: {}", reason);
    GameError::InvalidConfig
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let SessionConfig {
            player_name,
            mode,
            seed,
            time_limit_secs,
            stages,
        } = config;

        let Some(first_stage) = stages.first() else {
            log::warn!("Cannot start a session without stages");
            return Err(GameError::InvalidConfig);
        };
        if mode.is_timed() && time_limit_secs == 0 {
            log::warn!("Cannot start a timed session without time");
            return Err(GameError::InvalidConfig);
        }

        let board = Board::from_stage(first_stage, seed)?;
        log::debug!(
            "session for {:?} started: {:?} mode, {} stages, seed {}",
            player_name,
            mode,
            stages.len(),
            seed
        );

        Ok(Self {
            player_name,
            mode,
            stages,
            stage_index: 0,
            board,
            completed_boards: Vec::new(),
            total_moves: 0,
            total_matches: 0,
            remaining_seconds: mode.is_timed().then_some(time_limit_secs),
            state: SessionState::default(),
            seeds: Lcg::new(seed),
        })
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn stages(&self) -> &[StageConfig] {
        &self.stages
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn current_stage(&self) -> &StageConfig {
        &self.stages[self.stage_index]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn completed_boards(&self) -> &[Board] {
        &self.completed_boards
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn total_matches(&self) -> u32 {
        self.total_matches
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    /// Cross-field checks for a deserialized snapshot. Each board is checked on its own.
    fn check_consistency(&self) -> Result<()> {
        let Some(stage) = self.stages.get(self.stage_index) else {
            return Err(rejected("stage index is past the last stage"));
        };
        if self.board.size() != stage.size() {
            return Err(rejected("board does not match its stage"));
        }
        if self.remaining_seconds.is_some() != self.mode.is_timed() {
            return Err(rejected("countdown does not match the mode"));
        }

        let archived = match self.state {
            SessionState::Won => self.stage_index + 1,
            SessionState::Playing | SessionState::TimedOut => self.stage_index,
        };
        if self.completed_boards.len() != archived
            || !self.completed_boards.iter().all(Board::is_won)
        {
            return Err(rejected("completed boards disagree with the stage index"));
        }
        let finished_on_last = self.state == SessionState::Won
            && self.board.is_won()
            && self.stage_index + 1 == self.stages.len();
        if self.board.is_won() && !finished_on_last {
            return Err(rejected("won board was not archived"));
        }
        let timed_out = self.remaining_seconds == Some(0);
        if timed_out != (self.state == SessionState::TimedOut) {
            return Err(rejected("countdown disagrees with the session state"));
        }

        let played = || self.completed_boards.iter().chain(core::iter::once(&self.board));
        let moves: u32 = played().map(Board::move_count).sum();
        let matches: u32 = played().map(|board| u32::from(board.matched_pairs())).sum();
        // a won session archives its last board as well as keeping it current
        let (moves, matches) = if self.state == SessionState::Won {
            (
                moves - self.board.move_count(),
                matches - u32::from(self.board.matched_pairs()),
            )
        } else {
            (moves, matches)
        };
        if moves != self.total_moves || matches != self.total_matches {
            return Err(rejected("totals disagree with the boards"));
        }

        Ok(())
    }

    /// Returns the session after `event`, leaving `self` untouched.
    pub fn update(&self, event: SessionEvent) -> Result<Self> {
        let mut next = self.clone();
        next.apply(event)?;
        Ok(next)
    }

    pub fn flip(&self, id: CardId) -> Result<Self> {
        self.update(SessionEvent::Flip(id))
    }

    pub fn resolve_timeout(&self) -> Self {
        let mut next = self.clone();
        next.apply_resolve_timeout();
        next
    }

    pub fn tick(&self) -> Self {
        let mut next = self.clone();
        next.apply_tick();
        next
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionOutcome> {
        match event {
            SessionEvent::Flip(id) => self.apply_flip(id),
            SessionEvent::ResolveTimeout => Ok(self.apply_resolve_timeout()),
            SessionEvent::Tick => Ok(self.apply_tick()),
        }
    }

    pub fn apply_flip(&mut self, id: CardId) -> Result<SessionOutcome> {
        if self.is_finished() {
            return Ok(SessionOutcome::NoChange);
        }

        let moves_before = self.board.move_count();
        let matches_before = self.board.matched_pairs();
        let outcome = self.board.apply_flip(id)?;
        self.total_moves += self.board.move_count() - moves_before;
        self.total_matches += u32::from(self.board.matched_pairs() - matches_before);

        Ok(match outcome {
            FlipOutcome::NoChange => SessionOutcome::NoChange,
            FlipOutcome::Revealed | FlipOutcome::Matched => SessionOutcome::Updated,
            FlipOutcome::Mismatched => SessionOutcome::Mismatched,
            FlipOutcome::Won => self.advance_stage()?,
        })
    }

    pub fn apply_resolve_timeout(&mut self) -> SessionOutcome {
        if self.is_finished() {
            return SessionOutcome::NoChange;
        }

        match self.board.apply_resolve_timeout() {
            ResolveOutcome::NoChange => SessionOutcome::NoChange,
            ResolveOutcome::Hidden => SessionOutcome::Updated,
        }
    }

    pub fn apply_tick(&mut self) -> SessionOutcome {
        if self.is_finished() {
            return SessionOutcome::NoChange;
        }

        let Some(remaining) = self.remaining_seconds.as_mut() else {
            return SessionOutcome::NoChange;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return SessionOutcome::Updated;
        }

        log::debug!(
            "time is up for {:?} on stage {}",
            self.player_name,
            self.stage_index
        );
        self.state = SessionState::TimedOut;
        SessionOutcome::TimedOut
    }

    fn advance_stage(&mut self) -> Result<SessionOutcome> {
        let next_index = self.stage_index + 1;

        let Some(next_stage) = self.stages.get(next_index) else {
            log::debug!(
                "{:?} cleared all {} stages in {} moves",
                self.player_name,
                self.stages.len(),
                self.total_moves
            );
            let last = self.board.clone();
            self.completed_boards.push(last);
            self.state = SessionState::Won;
            return Ok(SessionOutcome::Won);
        };

        let next_board = Board::from_stage(next_stage, self.seeds.next_seed())?;
        let cleared = mem::replace(&mut self.board, next_board);
        log::debug!(
            "stage {} cleared in {} moves",
            self.stage_index,
            cleared.move_count()
        );
        self.completed_boards.push(cleared);
        self.stage_index = next_index;
        Ok(SessionOutcome::StageCleared)
    }
}
