use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Symbols used by the standard stages, enough for the largest one.
pub const STANDARD_SYMBOLS: [&str; 12] = [
    "🥔", "🍒", "🥑", "🌽", "🥕", "🍇", "🍉", "🍌", "🍎", "🍍", "🥝", "🍓",
];

/// Board sizes of the standard progression, as `(rows, cols)`.
pub const STANDARD_SIZES: [Coord2; 4] = [(2, 2), (2, 4), (4, 4), (4, 6)];

/// Checks that a `size` board can be dealt from `symbols` and returns its pair count.
///
/// The board must be non-empty with an even card count, and the first `pairs` symbols must
/// be present and distinct.
pub fn validate_layout(size: Coord2, symbols: &[Symbol]) -> Result<usize> {
    let total = usize::from(mult(size.0, size.1));
    if total == 0 || total % 2 != 0 {
        log::warn!("Board {}x{} has an odd or empty card count", size.0, size.1);
        return Err(GameError::InvalidConfig);
    }

    let pairs = total / 2;
    if symbols.len() < pairs {
        log::warn!(
            "Board {}x{} needs {} symbols but only {} were given",
            size.0,
            size.1,
            pairs,
            symbols.len()
        );
        return Err(GameError::InvalidConfig);
    }

    let distinct: BTreeSet<&Symbol> = symbols[..pairs].iter().collect();
    if distinct.len() != pairs {
        log::warn!("Board {}x{} symbols are not distinct", size.0, size.1);
        return Err(GameError::InvalidConfig);
    }

    Ok(pairs)
}

/// One stage of a session: board dimensions plus the symbols its pairs are drawn from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStageConfig")]
pub struct StageConfig {
    rows: Coord,
    cols: Coord,
    symbols: Vec<Symbol>,
}

#[derive(Deserialize)]
struct RawStageConfig {
    rows: Coord,
    cols: Coord,
    symbols: Vec<Symbol>,
}

impl TryFrom<RawStageConfig> for StageConfig {
    type Error = GameError;

    fn try_from(raw: RawStageConfig) -> Result<Self> {
        Self::new((raw.rows, raw.cols), raw.symbols)
    }
}

impl StageConfig {
    /// Builds a stage, keeping only the symbols the board will use.
    pub fn new(size: Coord2, symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Result<Self> {
        let mut symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let pairs = validate_layout(size, &symbols)?;
        symbols.truncate(pairs);
        Ok(Self {
            rows: size.0,
            cols: size.1,
            symbols,
        })
    }

    /// Builds a stage whose symbols are drawn at random from a larger `pool`.
    pub fn sample(size: Coord2, pool: &[Symbol], seed: u32) -> Result<Self> {
        let pairs = usize::from(mult(size.0, size.1)) / 2;
        Self::new(size, pick_random(pool, pairs, seed)?)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// The four stage progression: `2x2`, `2x4`, `4x4` and `4x6`.
pub fn standard_stages() -> Vec<StageConfig> {
    STANDARD_SIZES
        .iter()
        .map(|&size| {
            let pairs = usize::from(mult(size.0, size.1)) / 2;
            StageConfig {
                rows: size.0,
                cols: size.1,
                symbols: STANDARD_SYMBOLS[..pairs].iter().map(|&s| s.into()).collect(),
            }
        })
        .collect()
}

/// Parses a JSON list of `{ "rows", "cols", "symbols" }` records into a stage progression.
pub fn stages_from_json(json: &str) -> Result<Vec<StageConfig>> {
    let stages: Vec<StageConfig> = serde_json::from_str(json).map_err(|err| {
        log::warn!("Could not parse stage list: {}", err);
        GameError::InvalidConfig
    })?;

    if stages.is_empty() {
        log::warn!("Stage list is empty");
        return Err(GameError::InvalidConfig);
    }

    Ok(stages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn standard_stages_are_valid_and_ordered() {
        let stages = standard_stages();
        let sizes: Vec<Coord2> = stages.iter().map(StageConfig::size).collect();
        assert_eq!(sizes, STANDARD_SIZES);

        for stage in &stages {
            assert_eq!(
                validate_layout(stage.size(), stage.symbols()),
                Ok(stage.pair_count())
            );
        }
        assert_eq!(stages[3].pair_count(), 12);
    }

    #[test]
    fn new_truncates_extra_symbols() {
        let stage = StageConfig::new((2, 2), ["a", "b", "c"]).unwrap();
        assert_eq!(stage.symbols(), [Symbol::from("a"), Symbol::from("b")]);
        assert_eq!(stage.total_cards(), 4);
    }

    #[test]
    fn odd_or_empty_boards_are_rejected() {
        assert_eq!(
            StageConfig::new((3, 3), STANDARD_SYMBOLS),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            StageConfig::new((0, 4), STANDARD_SYMBOLS),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn missing_or_repeated_symbols_are_rejected() {
        assert_eq!(
            StageConfig::new((2, 4), ["a", "b", "c"]),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            StageConfig::new((2, 2), ["a", "a", "b"]),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn sample_draws_from_pool() {
        let pool: Vec<Symbol> = STANDARD_SYMBOLS.iter().map(|&s| s.into()).collect();
        let stage = StageConfig::sample((2, 4), &pool, 7).unwrap();
        assert_eq!(stage.pair_count(), 4);
        assert!(stage.symbols().iter().all(|s| pool.contains(s)));
        assert_eq!(stage, StageConfig::sample((2, 4), &pool, 7).unwrap());

        assert_eq!(
            StageConfig::sample((4, 6), &pool[..4], 7),
            Err(GameError::InvalidArgument)
        );
    }

    #[test]
    fn stages_load_from_json() {
        let stages = stages_from_json(
            r#"[
                {"rows": 2, "cols": 2, "symbols": ["x", "y"]},
                {"rows": 2, "cols": 3, "symbols": ["a", "b", "c", "d"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            stages,
            vec![
                StageConfig::new((2, 2), ["x", "y"]).unwrap(),
                StageConfig::new((2, 3), ["a", "b", "c"]).unwrap(),
            ]
        );
    }

    #[test]
    fn invalid_json_stages_are_rejected() {
        assert_eq!(stages_from_json("[]"), Err(GameError::InvalidConfig));
        assert_eq!(stages_from_json("{"), Err(GameError::InvalidConfig));
        assert_eq!(
            stages_from_json(r#"[{"rows": 1, "cols": 3, "symbols": ["a", "b"]}]"#),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn stage_json_round_trips() {
        let json = serde_json::to_string(&standard_stages()).unwrap();
        assert_eq!(stages_from_json(&json), Ok(standard_stages()));
    }
}
