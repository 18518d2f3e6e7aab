//! Sliding-tile game model
//!
//! A 4x4 board where each move slides every tile toward one wall. Two equal tiles that
//! meet merge into one tile of twice the value (at most once per tile per move), the
//! merged value is added to the score, and a new 2 or 4 tile appears on a free slot.

use crate::state::keyboard::Direction;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::fmt;

pub const BOARD_DIMENSION: usize = 4;

/// Largest value a new tile may start at
pub const MAX_TILE_CHOICE: u32 = 1 << 16;
const NUM_TILES: usize = BOARD_DIMENSION * BOARD_DIMENSION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub value: u32,
    pub id: u8,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "value: {} id: {} row: {} col: {}", self.value, self.id, self.row, self.col)
    }
}

/// Choices for new tiles and the weights they are drawn with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTileParams {
    pub tile_choices: [u32; 2],
    pub tile_weights: [u8; 2],
}

impl NewTileParams {
    /// Index of the parameters for 2-tiles in `tile_choices` and `tile_weights`
    pub const TWO: usize = 0;

    /// Index of the parameters for 4-tiles in `tile_choices` and `tile_weights`
    pub const FOUR: usize = 1;

    pub fn new(tile_choices: [u32; 2], tile_weights: [u8; 2]) -> Result<Self, String> {
        for choice in tile_choices {
            if !choice.is_power_of_two() || choice > MAX_TILE_CHOICE {
                return Err(format!(
                    "Tile choices must be powers of two up to {}, got {:?}",
                    MAX_TILE_CHOICE,
                    tile_choices
                ));
            }
        }
        if tile_weights.iter().all(|weight| *weight == 0) {
            return Err("At least one tile weight must be non-zero".to_string());
        }
        Ok(Self { tile_choices, tile_weights })
    }
}

impl Default for NewTileParams {
    /// 2-tiles appear four times as often as 4-tiles
    fn default() -> Self {
        Self {
            tile_choices: [2, 4],
            tile_weights: [4, 1],
        }
    }
}

/// Returned when a move leaves the board unchanged or the key is not a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMove;

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "move does not change the board")
    }
}

impl std::error::Error for InvalidMove {}

#[derive(Debug, Clone)]
pub struct Game {
    pub board: [[Option<Tile>; BOARD_DIMENSION]; BOARD_DIMENSION],
    pub score: u64,
    new_tile_params: NewTileParams,
    tile_ids: VecDeque<u8>,
    rng: StdRng,
}

impl Game {
    /// New game with the default tile parameters
    pub fn new() -> Self {
        Self::with_params(NewTileParams::default(), StdRng::from_rng(&mut rand::rng()))
    }

    /// New game in a ready-to-play state: empty save for two starting tiles
    ///
    /// The two tiles are either both 2s or one 2 and one 4, in random positions.
    pub fn with_params(new_tile_params: NewTileParams, rng: StdRng) -> Self {
        const EMPTY_ROW: [Option<Tile>; BOARD_DIMENSION] = [None, None, None, None];

        let mut game = Game {
            board: [EMPTY_ROW; BOARD_DIMENSION],
            score: 0,
            new_tile_params,
            tile_ids: (0..NUM_TILES as u8).collect(),
            rng,
        };

        // A first 4-tile forces a 2-tile second
        let first = game.generate_tile();
        let second = if first == game.new_tile_params.tile_choices[NewTileParams::FOUR] {
            game.new_tile_params.tile_choices[NewTileParams::TWO]
        } else {
            game.generate_tile()
        };

        game.spawn_tile(first);
        game.spawn_tile(second);
        game
    }

    /// Draws 2 or 4 according to `new_tile_params`
    fn generate_tile(&mut self) -> u32 {
        match WeightedIndex::new(self.new_tile_params.tile_weights) {
            Ok(dist) => self.new_tile_params.tile_choices[dist.sample(&mut self.rng)],
            Err(e) => {
                crate::debug_eprint!("⚠️ Invalid tile weights {:?}: {}", self.new_tile_params.tile_weights, e);
                self.new_tile_params.tile_choices[NewTileParams::TWO]
            }
        }
    }

    /// Places a tile of `value` on a random free slot; false when the board is full
    fn spawn_tile(&mut self, value: u32) -> bool {
        let Some((row, col)) = self.random_free_slot() else {
            return false;
        };
        let Some(id) = self.tile_ids.pop_front() else {
            return false;
        };
        self.board[row][col] = Some(Tile { value, id, row, col });
        true
    }

    /// Coordinates of every empty slot, row-major
    pub fn free_slots(&self) -> Vec<(usize, usize)> {
        let mut slots = Vec::with_capacity(NUM_TILES);
        for row in 0..BOARD_DIMENSION {
            for col in 0..BOARD_DIMENSION {
                if self.board[row][col].is_none() {
                    slots.push((row, col));
                }
            }
        }
        slots
    }

    /// A free slot chosen at random, `None` when the board is full
    pub fn random_free_slot(&mut self) -> Option<(usize, usize)> {
        let slots = self.free_slots();
        slots.choose(&mut self.rng).copied()
    }

    /// All current tiles, row-major
    pub fn tiles(&self) -> Vec<&Tile> {
        self.board.iter().flatten().flatten().collect()
    }

    /// Applies the move bound to a key code (arrows, hjkl, wasd)
    pub fn receive_input(&mut self, code: &str) -> Result<Vec<&Tile>, InvalidMove> {
        let direction = Direction::from_key_code(code).ok_or(InvalidMove)?;
        self.slide(direction)
    }

    /// Slides every tile toward `direction`, merging and spawning a new tile on success
    pub fn slide(&mut self, direction: Direction) -> Result<Vec<&Tile>, InvalidMove> {
        let mut move_occurred = false;

        for line in 0..BOARD_DIMENSION {
            let positions = line_positions(direction, line);
            move_occurred |= self.slide_line(&positions);
        }

        if !move_occurred {
            return Err(InvalidMove);
        }

        let value = self.generate_tile();
        self.spawn_tile(value);
        Ok(self.tiles())
    }

    /// Packs one line toward `positions[0]`; true if anything moved or merged
    fn slide_line(&mut self, positions: &[(usize, usize); BOARD_DIMENSION]) -> bool {
        let mut changed = false;
        let mut packed: Vec<Tile> = Vec::with_capacity(BOARD_DIMENSION);
        let mut last_merged = false;

        for &(row, col) in positions {
            let Some(tile) = self.board[row][col].take() else {
                continue;
            };

            // A merge that would overflow the tile value is treated as no merge
            let merged_value = packed
                .last()
                .filter(|last| !last_merged && last.value == tile.value)
                .and_then(|last| last.value.checked_mul(2));

            if let Some((last, value)) = packed.last_mut().zip(merged_value) {
                last.value = value;
                self.score += u64::from(value);
                self.tile_ids.push_back(tile.id);
                last_merged = true;
                changed = true;
            } else {
                packed.push(tile);
                last_merged = false;
            }
        }

        for (mut tile, &(row, col)) in packed.into_iter().zip(positions) {
            if (tile.row, tile.col) != (row, col) {
                changed = true;
            }
            tile.row = row;
            tile.col = col;
            self.board[row][col] = Some(tile);
        }

        changed
    }

    /// True when the board is full and no two neighbours share a value
    pub fn is_over(&self) -> bool {
        if !self.free_slots().is_empty() {
            return false;
        }

        for row in 0..BOARD_DIMENSION {
            for col in 0..BOARD_DIMENSION {
                let value = self.value_at(row, col);
                if row + 1 < BOARD_DIMENSION && self.value_at(row + 1, col) == value {
                    return false;
                }
                if col + 1 < BOARD_DIMENSION && self.value_at(row, col + 1) == value {
                    return false;
                }
            }
        }
        true
    }

    fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        self.board[row][col].as_ref().map(|tile| tile.value)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Slots of one row or column, ordered from the wall the tiles slide toward
fn line_positions(direction: Direction, line: usize) -> [(usize, usize); BOARD_DIMENSION] {
    std::array::from_fn(|i| {
        let far = BOARD_DIMENSION - 1 - i;
        match direction {
            Direction::Up => (i, line),
            Direction::Down => (far, line),
            Direction::Left => (line, i),
            Direction::Right => (line, far),
        }
    })
}

impl fmt::Display for Game {
    /// Text board, `-` for empty slots
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.board {
            for slot in row {
                match slot {
                    Some(tile) => write!(f, "{:^6}", tile.value)?,
                    None => write!(f, "{:^6}", '-')?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Game {
        Game::with_params(NewTileParams::default(), StdRng::seed_from_u64(seed))
    }

    /// Game with an exact board layout; 0 marks an empty slot
    fn from_values(values: [[u32; BOARD_DIMENSION]; BOARD_DIMENSION]) -> Game {
        let mut game = seeded(7);
        game.board = Default::default();
        game.tile_ids = (0..NUM_TILES as u8).collect();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    let id = game.tile_ids.pop_front().unwrap();
                    game.board[row][col] = Some(Tile { value, id, row, col });
                }
            }
        }
        game
    }

    fn values(game: &Game) -> [[u32; BOARD_DIMENSION]; BOARD_DIMENSION] {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| game.value_at(row, col).unwrap_or(0))
        })
    }

    #[test]
    /// A new game is empty save for two tiles: one 4 and one 2, or two 2s
    fn test_new_game() {
        for seed in 0..100 {
            let game = seeded(seed);
            let tiles = game.tiles();

            assert_eq!(tiles.len(), 2);
            assert_eq!(game.free_slots().len(), NUM_TILES - 2);
            for tile in &tiles {
                assert!(game.new_tile_params.tile_choices.contains(&tile.value));
            }
            assert!(!(tiles[0].value == 4 && tiles[1].value == 4));
            assert_ne!(tiles[0].id, tiles[1].id);
        }
    }

    #[test]
    /// 2-tiles outnumber 4-tiles about 4:1 over a large sample
    fn test_new_tile_rng() {
        let mut game = seeded(42);
        const SAMPLE_SIZE: u32 = 20_000;

        let mut two_count = 0u32;
        let mut four_count = 0u32;
        for _ in 0..SAMPLE_SIZE {
            match game.generate_tile() {
                2 => two_count += 1,
                4 => four_count += 1,
                other => panic!("unexpected tile {other}"),
            }
        }

        let expected_ratio = game.new_tile_params.tile_weights[NewTileParams::TWO] as f32;
        let actual_ratio = two_count as f32 / four_count as f32;
        let error_margin = expected_ratio * 0.2;
        assert!(
            (expected_ratio - error_margin..=expected_ratio + error_margin).contains(&actual_ratio),
            "ratio {actual_ratio}"
        );
    }

    #[test]
    fn full_board_has_no_free_slot() {
        let mut game = from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(game.free_slots().is_empty());
        assert_eq!(game.random_free_slot(), None);
        assert!(game.is_over());
    }

    #[test]
    fn full_board_with_equal_neighbours_is_not_over() {
        let game = from_values([[2, 2, 4, 8], [4, 8, 16, 32], [8, 16, 32, 64], [16, 32, 64, 128]]);
        assert!(!game.is_over());
    }

    #[test]
    fn slide_left_merges_once_per_tile() {
        let mut game = from_values([[2, 2, 2, 2], [4, 0, 4, 8], [0, 0, 0, 2], [2, 4, 8, 16]]);
        game.slide(Direction::Left).unwrap();

        let board = values(&game);
        assert_eq!(&board[0][..2], &[4, 4]);
        assert_eq!(&board[1][..2], &[8, 8]);
        assert_eq!(board[2][0], 2);
        assert_eq!(board[3], [2, 4, 8, 16]);
        assert_eq!(game.score, 4 + 4 + 8);
    }

    #[test]
    fn slide_right_merges_nearest_the_wall_first() {
        let mut game = from_values([[0, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
        game.slide(Direction::Right).unwrap();

        assert_eq!(&values(&game)[0][2..], &[2, 4]);
        assert_eq!(game.score, 4);
    }

    #[test]
    fn slide_up_and_down_work_on_columns() {
        let mut game = from_values([[2, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]]);
        game.slide(Direction::Up).unwrap();
        let board = values(&game);
        assert_eq!((board[0][0], board[1][0]), (4, 4));

        let mut game = from_values([[4, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        game.slide(Direction::Down).unwrap();
        assert_eq!(values(&game)[3][0], 8);
    }

    #[test]
    fn successful_move_spawns_one_tile() {
        let mut game = from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let tiles = game.slide(Direction::Right).unwrap();
        assert_eq!(tiles.len(), 2);
    }

    #[test]
    fn tile_coordinates_follow_their_slot() {
        let mut game = from_values([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        game.slide(Direction::Down).unwrap();
        for tile in game.tiles() {
            assert_eq!(game.value_at(tile.row, tile.col), Some(tile.value));
        }
    }

    #[test]
    fn merged_tile_ids_return_to_pool() {
        let mut game = from_values([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let pool_before = game.tile_ids.len();
        game.slide(Direction::Left).unwrap();
        // one id freed by the merge, one taken by the spawned tile
        assert_eq!(game.tile_ids.len(), pool_before);
    }

    #[test]
    fn blocked_move_is_invalid() {
        let mut game = from_values([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(game.slide(Direction::Left), Err(InvalidMove));
        assert_eq!(game.slide(Direction::Up).map(|tiles| tiles.len()), Err(InvalidMove));
        assert_eq!(game.score, 0);
        assert_eq!(game.tiles().len(), 3);
    }

    #[test]
    fn key_codes_drive_moves() {
        let mut game = from_values([[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        assert!(game.receive_input("KeyA").is_ok());
        assert_eq!(game.receive_input("KeyQ"), Err(InvalidMove));
    }

    #[test]
    fn display_marks_empty_slots() {
        let game = from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        let text = game.to_string();
        assert_eq!(text.lines().count(), BOARD_DIMENSION);
        assert!(text.lines().next().unwrap().contains('2'));
        assert!(text.contains("1024"));
        assert!(text.contains('-'));
    }

    #[test]
    fn equal_tiles_at_the_value_limit_do_not_merge() {
        let top = 1 << 31;
        let mut game = from_values([[top, top, 0, 0], [0; 4], [0; 4], [0; 4]]);

        assert_eq!(game.slide(Direction::Left), Err(InvalidMove));
        assert_eq!(game.slide(Direction::Right).map(|tiles| tiles.len()), Ok(3));
        assert_eq!(&values(&game)[0][2..], &[top, top]);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn oversized_tile_choices_from_config_fall_back_to_defaults() {
        let mut config = crate::state::config::AppConfig::default();
        config.tile_choices = [3_000_000_000, 4];
        config.tile_weights = [1, 0];

        let mut game = Game::with_params(config.new_tile_params(), StdRng::seed_from_u64(3));
        for _ in 0..50 {
            for direction in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
                let _ = game.slide(direction);
            }
        }
        assert!(game.tiles().iter().all(|tile| tile.value.is_power_of_two()));
    }

    #[test]
    fn tile_params_validation() {
        assert!(NewTileParams::new([2, 4], [0, 0]).is_err());
        assert!(NewTileParams::new([0, 4], [4, 1]).is_err());
        assert!(NewTileParams::new([3, 4], [4, 1]).is_err());
        assert!(NewTileParams::new([2, MAX_TILE_CHOICE * 2], [4, 1]).is_err());
        assert!(NewTileParams::new([2, MAX_TILE_CHOICE], [4, 1]).is_ok());
        assert_eq!(NewTileParams::new([2, 4], [4, 1]), Ok(NewTileParams::default()));
    }
}
