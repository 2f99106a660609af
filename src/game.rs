use crate::direction::Direction;
use crate::grid::{Grid, Position};
use crate::history::{Action, MoveLog};
use crate::levels::{LevelCatalog, LevelError};
use crate::tile::Tile;
use rand::Rng;
use std::fmt;
use tracing::{debug, info};

/// Result of a single directional action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Stepped,
    Pushed,
    /// Wall, immovable box or grid edge; nothing changed except facing.
    Blocked,
}

/// Notification sent to the listener after every state-changing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Loaded { index: usize },
    /// Sent for every `attempt_move`, including blocked ones.
    Moved(MoveOutcome),
    Undone(Action),
}

/// Observer for rendering collaborators. The game is passed in so the
/// listener can re-query whatever it needs to redraw.
pub trait ChangeListener {
    fn changed(&mut self, game: &GameState<'_>, change: &Change);
}

/// The live puzzle session for one catalog.
///
/// The agent position is never stored; it is found by scanning the grid so
/// there is exactly one source of truth for where the agent stands.
pub struct GameState<'c> {
    catalog: &'c LevelCatalog,
    level_index: usize,
    grid: Grid,
    agent_facing: Direction,
    pushing: bool,
    log: MoveLog,
    push_count: usize,
    // Sticky: set once the grid is solved, never cleared by undo.
    completed: bool,
    listener: Option<Box<dyn ChangeListener + 'c>>,
}

impl<'c> GameState<'c> {
    /// Start a session on the first level of the catalog.
    pub fn new(catalog: &'c LevelCatalog) -> Result<Self, LevelError> {
        let grid = catalog.get(0)?.to_grid()?;
        info!(
            index = 0,
            width = grid.width(),
            height = grid.height(),
            "level loaded"
        );

        Ok(GameState {
            catalog,
            level_index: 0,
            grid,
            agent_facing: Direction::Up,
            pushing: false,
            log: MoveLog::new(),
            push_count: 0,
            completed: false,
            listener: None,
        })
    }

    pub fn set_listener(&mut self, listener: impl ChangeListener + 'c) {
        self.listener = Some(Box::new(listener));
    }

    /// Replace the session with a fresh copy of level `index`.
    ///
    /// Fails without touching the current session if the index is outside
    /// the catalog or the level template is malformed.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let grid = self.catalog.get(index)?.to_grid()?;
        info!(
            index,
            width = grid.width(),
            height = grid.height(),
            "level loaded"
        );

        self.level_index = index;
        self.grid = grid;
        self.agent_facing = Direction::Up;
        self.pushing = false;
        self.log.clear();
        self.push_count = 0;
        self.completed = false;

        self.notify(Change::Loaded { index });
        Ok(())
    }

    pub fn next_level(&mut self) -> Result<(), LevelError> {
        let count = self.catalog.count();
        self.load_level((self.level_index + 1) % count)
    }

    pub fn previous_level(&mut self) -> Result<(), LevelError> {
        let count = self.catalog.count();
        self.load_level((self.level_index + count - 1) % count)
    }

    pub fn random_level<R: Rng>(&mut self, rng: &mut R) -> Result<(), LevelError> {
        let index = rng.gen_range(0..self.catalog.count());
        self.load_level(index)
    }

    pub fn restart(&mut self) -> Result<(), LevelError> {
        self.load_level(self.level_index)
    }

    /// Try to walk or push in `direction`.
    ///
    /// Illegal moves leave the grid and counters untouched. The agent turns
    /// to face `direction` either way.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        self.agent_facing = direction;

        let outcome = self.apply_move(direction);
        if outcome == MoveOutcome::Blocked {
            debug!(%direction, "move blocked");
        } else {
            self.completed |= self.grid.is_solved();
            debug!(
                %direction,
                ?outcome,
                moves = self.log.len(),
                pushes = self.push_count,
                solved = self.completed,
                "move applied"
            );
        }

        self.notify(Change::Moved(outcome));
        outcome
    }

    fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let Some(origin) = self.grid.find_agent() else {
            return MoveOutcome::Blocked;
        };
        let Some(target) = self.grid.neighbour(origin, direction) else {
            return MoveOutcome::Blocked;
        };

        let target_tile = self.tile(target);
        if target_tile.is_walkable() {
            self.move_agent(origin, target);
            self.log.record(Action::step(direction));
            self.pushing = false;
            return MoveOutcome::Stepped;
        }

        if !target_tile.is_box() {
            return MoveOutcome::Blocked;
        }

        // Only one box at a time: whatever sits beyond must be free floor
        match self.grid.neighbour(target, direction) {
            Some(beyond) if self.tile(beyond).is_walkable() => {
                self.move_box(target, beyond);
                self.move_agent(origin, target);
                self.log.record(Action::push(direction));
                self.push_count += 1;
                self.pushing = true;
                MoveOutcome::Pushed
            }
            _ => MoveOutcome::Blocked,
        }
    }

    /// Revert the most recent successful action.
    /// Returns the undone action, or None if the history is empty.
    pub fn undo(&mut self) -> Option<Action> {
        let action = *self.log.actions().last()?;
        let origin = self.grid.find_agent()?;
        let back = self.grid.neighbour(origin, action.direction.opposite())?;
        let pushed_box = if action.push {
            Some(self.grid.neighbour(origin, action.direction)?)
        } else {
            None
        };

        self.log.pop();
        self.move_agent(origin, back);
        if let Some(box_pos) = pushed_box {
            self.move_box(box_pos, origin);
            self.push_count -= 1;
        }
        self.agent_facing = action.direction;
        self.pushing = action.push;

        debug!(%action, moves = self.log.len(), pushes = self.push_count, "move undone");
        self.notify(Change::Undone(action));
        Some(action)
    }

    /// Apply each action's direction in order. Returns how many were legal.
    pub fn replay(&mut self, actions: &[Action]) -> usize {
        actions
            .iter()
            .filter(|action| self.attempt_move(action.direction) != MoveOutcome::Blocked)
            .count()
    }

    fn tile(&self, pos: Position) -> Tile {
        self.grid.get(pos).unwrap_or(Tile::Wall)
    }

    // Callers vacate the box cell before the agent enters it.
    fn move_agent(&mut self, from: Position, to: Position) {
        let (left, entered) = (self.tile(from).without_agent(), self.tile(to).with_agent());
        self.grid.set(from, left);
        self.grid.set(to, entered);
    }

    fn move_box(&mut self, from: Position, to: Position) {
        let (left, entered) = (self.tile(from).without_box(), self.tile(to).with_box());
        self.grid.set(from, left);
        self.grid.set(to, entered);
    }

    fn notify(&mut self, change: Change) {
        if let Some(mut listener) = self.listener.take() {
            listener.changed(self, &change);
            self.listener = Some(listener);
        }
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_info(&self) -> Option<&'c str> {
        self.catalog
            .get(self.level_index)
            .ok()
            .and_then(|level| level.info())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_dimensions(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<Tile> {
        self.grid.get((x, y))
    }

    pub fn agent_position(&self) -> Option<Position> {
        self.grid.find_agent()
    }

    /// Live check of the current grid, independent of `completed`.
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Whether the level has been solved at any point since it was loaded.
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn move_count(&self) -> usize {
        self.log.len()
    }

    pub fn push_count(&self) -> usize {
        self.push_count
    }

    pub fn history(&self) -> &[Action] {
        self.log.actions()
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.log
    }

    pub fn agent_facing(&self) -> Direction {
        self.agent_facing
    }

    pub fn is_pushing(&self) -> bool {
        self.pushing
    }
}

impl fmt::Display for GameState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
