use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    AwaitingFirstMove,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Per-game state besides the cells themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub flag_mode: bool,
    pub hint_mode: bool,
}

impl GameState {
    pub const fn is_first_move(&self) -> bool {
        matches!(self.phase, Phase::AwaitingFirstMove)
    }
}

/// Owns the grid and every transition of a single game.
///
/// Bombs are only placed on the first [`activate`](GridEngine::activate), so that the clicked cell and its neighbors
/// are always safe.
#[derive(Clone, Debug)]
pub struct GridEngine {
    config: GameConfig,
    cells: Array2<Cell>,
    state: GameState,
    flags_placed: CellCount,
    triggered_bomb: Option<Coord2>,
    hinted_bomb: Option<Coord2>,
    rng: SmallRng,
}

impl GridEngine {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "New {}x{} grid with {} bombs",
            config.cols,
            config.rows,
            config.bombs
        );
        Ok(Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            state: GameState::default(),
            flags_placed: 0,
            triggered_bomb: None,
            hinted_bomb: None,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Starts a game in progress with bombs at `mines`, skipping first-click placement.
    ///
    /// Placement after a [`restart`](GridEngine::restart) is random again, seeded with zero.
    pub fn from_mine_coords(config: GameConfig, mines: &[Coord2]) -> Result<Self> {
        let mut engine = Self::new(config, 0)?;
        for &coords in mines {
            let coords = engine.validate_coords(coords)?;
            engine.cells[coords.to_nd_index()].is_bomb = true;
        }

        let placed = engine.cells.iter().filter(|cell| cell.is_bomb).count();
        if placed != usize::from(config.bombs) {
            return Err(ConfigIssue::BombCount(placed.try_into().unwrap_or(CellCount::MAX)).into());
        }

        engine.state.phase = Phase::InProgress;
        Ok(engine)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_finished()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Every cell with its coordinates, x outer and y inner.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Bomb count minus placed flags, negative when the player over-flags.
    pub fn bombs_remaining(&self) -> i32 {
        i32::from(self.config.bombs) - i32::from(self.flags_placed)
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    /// The bomb currently shown by hint mode, if any.
    pub fn hinted_bomb(&self) -> Option<Coord2> {
        self.hinted_bomb.filter(|_| self.state.hint_mode)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn activate(&mut self, coords: Coord2) -> Result<Activation> {
        let coords = self.validate_coords(coords)?;

        match self.state.phase {
            Phase::AwaitingFirstMove => return Ok(self.first_activation(coords)),
            Phase::Won | Phase::Lost => return Ok(Activation::NoOp),
            Phase::InProgress => {}
        }

        if self.state.flag_mode {
            return Ok(Activation::Toggled(self.toggle_flag_at(coords)));
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_flagged || cell.is_cleared {
            return Ok(Activation::NoOp);
        }

        if cell.is_bomb {
            log::debug!("Bomb hit at {:?}", coords);
            self.triggered_bomb = Some(coords);
            self.state.phase = Phase::Lost;
            return Ok(Activation::Lost(coords));
        }

        let count = self.count_adjacent(coords);
        let revealed = if count == 0 {
            self.flood_fill(coords)
        } else {
            self.clear_cell(coords, count);
            vec![Reveal { coords, count }]
        };

        Ok(if self.check_victory() {
            Activation::Won(revealed)
        } else if count == 0 {
            Activation::RevealedEmpty(revealed)
        } else {
            Activation::RevealedNumber { coords, count }
        })
    }

    fn first_activation(&mut self, coords: Coord2) -> Activation {
        let bombs = place_bombs(self.config, coords, &mut self.rng);
        for &bomb in &bombs {
            self.cells[bomb.to_nd_index()].is_bomb = true;
        }
        log::debug!("Placed {} bombs, first click at {:?}", bombs.len(), coords);

        self.state.phase = Phase::InProgress;
        let revealed = self.flood_fill(coords);

        if self.check_victory() {
            Activation::Won(revealed)
        } else {
            Activation::RevealedEmpty(revealed)
        }
    }

    /// Clears the zero-count region around `start` and its numbered border.
    ///
    /// Visits cells in the same order as a recursive depth-first walk over the neighbor offsets, using the cleared
    /// flag as the visited set. Safe cells reached here lose their flag.
    fn flood_fill(&mut self, start: Coord2) -> Vec<Reveal> {
        let mut revealed = Vec::new();
        let mut stack = vec![start];

        while let Some(coords) = stack.pop() {
            let cell = self.cells[coords.to_nd_index()];
            if cell.is_bomb || cell.is_cleared {
                continue;
            }

            let count = self.count_adjacent(coords);
            self.clear_cell(coords, count);
            revealed.push(Reveal { coords, count });

            if count == 0 {
                let neighbors: Vec<_> = NeighborIter::new(coords, self.size()).collect();
                stack.extend(neighbors.into_iter().rev());
            }
        }

        log::trace!("Flood fill from {:?} cleared {} cells", start, revealed.len());
        revealed
    }

    fn clear_cell(&mut self, coords: Coord2, count: u8) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_cleared = true;
        cell.adjacent_bombs = count;
        if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_placed = self.flags_placed.saturating_sub(1);
        }
    }

    pub fn count_adjacent_bombs(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent(coords))
    }

    fn count_adjacent(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self.cells[pos.to_nd_index()].is_bomb)
            .count() as u8
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagToggle> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(FlagToggle::NoOp);
        }

        Ok(self.toggle_flag_at(coords))
    }

    fn toggle_flag_at(&mut self, coords: Coord2) -> FlagToggle {
        let marker = if self.state.flag_mode {
            Marker::FlagIndicator
        } else {
            Marker::Blank
        };

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_cleared {
            FlagToggle::NoOp
        } else if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_placed = self.flags_placed.saturating_sub(1);
            FlagToggle::Unflagged(marker)
        } else {
            cell.is_flagged = true;
            self.flags_placed = self.flags_placed.saturating_add(1);
            FlagToggle::Flagged
        }
    }

    /// Every safe cell has been cleared.
    pub fn is_grid_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_bomb || cell.is_cleared)
    }

    /// Moves an in-progress game to [`Phase::Won`] once the grid is cleared.
    pub fn check_victory(&mut self) -> bool {
        match self.state.phase {
            Phase::Won => true,
            Phase::InProgress if self.is_grid_cleared() => {
                log::debug!("Grid cleared");
                self.state.phase = Phase::Won;
                true
            }
            _ => false,
        }
    }

    /// Enters or leaves hint mode.
    ///
    /// Entering returns the first unflagged bomb in scan order, leaving returns every unflagged bomb so their hint
    /// can be hidden. Returns nothing when the mode does not change.
    pub fn set_hint_mode(&mut self, enabled: bool) -> Vec<Coord2> {
        if self.state.hint_mode == enabled {
            return Vec::new();
        }
        self.state.hint_mode = enabled;

        if enabled {
            let first = self.unflagged_bombs().next();
            self.hinted_bomb = first;
            first.into_iter().collect()
        } else {
            self.hinted_bomb = None;
            self.unflagged_bombs().collect()
        }
    }

    fn unflagged_bombs(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_unflagged_bomb())
            .map(|(coords, _)| coords)
    }

    /// Enters or leaves flag mode, returning every cell whose flag indicator should be shown or removed.
    pub fn set_flag_mode(&mut self, enabled: bool) -> Vec<Coord2> {
        if self.state.flag_mode == enabled {
            return Vec::new();
        }
        self.state.flag_mode = enabled;

        self.iter_cells()
            .filter(|(_, cell)| cell.is_flaggable())
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Unflagged bombs and misplaced flags to show after a loss.
    pub fn exposed_after_loss(&self) -> Vec<(Coord2, Exposure)> {
        if self.state.phase != Phase::Lost {
            return Vec::new();
        }

        self.iter_cells()
            .filter_map(|(coords, cell)| match (cell.is_bomb, cell.is_flagged) {
                (true, false) if self.triggered_bomb != Some(coords) => {
                    Some((coords, Exposure::Bomb))
                }
                (false, true) => Some((coords, Exposure::FalseFlag)),
                _ => None,
            })
            .collect()
    }

    /// Same grid and bomb count, fresh cells and state.
    pub fn restart(&mut self) {
        log::debug!("Restarting {}x{} grid", self.config.cols, self.config.rows);
        self.cells.fill(Cell::default());
        self.state = GameState::default();
        self.flags_placed = 0;
        self.triggered_bomb = None;
        self.hinted_bomb = None;
    }
}
