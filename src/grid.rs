use crate::direction::Direction;
use crate::tile::Tile;
use std::fmt;

/// `(x, y)` with `x` the column and `y` the row.
pub type Position = (usize, usize);

/// Rectangular tile grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from already-decoded rows, padding short rows with floor
    /// up to the widest row.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            tiles.extend_from_slice(row);
            tiles.extend(std::iter::repeat_n(Tile::Floor, width - row.len()));
        }

        Grid {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, (x, y): Position) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite a cell. Panics if `pos` is outside the grid.
    pub fn set(&mut self, (x, y): Position, tile: Tile) {
        assert!(
            x < self.width && y < self.height,
            "Position ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.tiles[y * self.width + x] = tile;
    }

    /// Step from `pos` in the given direction.
    /// Returns None if the new position falls outside the grid.
    pub fn neighbour(&self, (x, y): Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let new_x = x as i64 + dx as i64;
        let new_y = y as i64 + dy as i64;

        if new_x >= 0 && new_y >= 0 && new_x < self.width as i64 && new_y < self.height as i64 {
            Some((new_x as usize, new_y as usize))
        } else {
            None
        }
    }

    /// Scan for the agent. Returns the first agent cell in row-major order.
    pub fn find_agent(&self) -> Option<Position> {
        self.positions().find(|&pos| self.tiles[self.offset(pos)].is_agent())
    }

    pub fn count(&self, pred: impl Fn(Tile) -> bool) -> usize {
        self.tiles.iter().filter(|&&tile| pred(tile)).count()
    }

    /// Every storage cell holds a box: no bare storage and no bare box remain.
    pub fn is_solved(&self) -> bool {
        !self
            .tiles
            .iter()
            .any(|&tile| tile == Tile::Storage || tile == Tile::Box)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    fn offset(&self, (x, y): Position) -> usize {
        y * self.width + x
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            let line: String = row.iter().map(Tile::symbol).collect();
            // Trim trailing floor to match the template format
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(rows: &[&str]) -> Vec<Vec<Tile>> {
        rows.iter()
            .map(|row| row.chars().map(|ch| Tile::from_symbol(ch).unwrap()).collect())
            .collect()
    }

    #[test]
    fn test_padding() {
        let grid = Grid::from_rows(&decode(&["###", "#.###", "#*$ #", "#  @#", "#####"]));

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.get((3, 0)), Some(Tile::Floor));
        assert_eq!(grid.get((4, 0)), Some(Tile::Floor));
        assert_eq!(grid.get((4, 1)), Some(Tile::Wall));
        assert_eq!(grid.get((5, 0)), None);
        assert_eq!(grid.get((0, 5)), None);
    }

    #[test]
    fn test_find_agent() {
        let grid = Grid::from_rows(&decode(&["#####", "#. +#", "#####"]));
        assert_eq!(grid.find_agent(), Some((3, 1)));

        let grid = Grid::from_rows(&decode(&["####", "#  #", "####"]));
        assert_eq!(grid.find_agent(), None);
    }

    #[test]
    fn test_neighbour_bounds() {
        let grid = Grid::from_rows(&decode(&["@ ", "  "]));

        assert_eq!(grid.neighbour((0, 0), Direction::Up), None);
        assert_eq!(grid.neighbour((0, 0), Direction::Left), None);
        assert_eq!(grid.neighbour((0, 0), Direction::Right), Some((1, 0)));
        assert_eq!(grid.neighbour((0, 0), Direction::Down), Some((0, 1)));
        assert_eq!(grid.neighbour((1, 1), Direction::Right), None);
        assert_eq!(grid.neighbour((1, 1), Direction::Down), None);
    }

    #[test]
    fn test_is_solved() {
        let solved = Grid::from_rows(&decode(&["####", "#*@#", "####"]));
        assert!(solved.is_solved());

        let bare_storage = Grid::from_rows(&decode(&["#####", "#*.@#", "#####"]));
        assert!(!bare_storage.is_solved());

        let bare_box = Grid::from_rows(&decode(&["#####", "#$*@#", "#####"]));
        assert!(!bare_box.is_solved());
    }

    #[test]
    fn test_display() {
        let rows = ["  ######", "  #.   #", "### ##$###", "#@ $   . #", "#    ####*", "######"];
        let grid = Grid::from_rows(&decode(&rows));
        let output = grid.to_string();
        assert_eq!(output.trim_end(), rows.join("\n"));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::from_rows(&decode(&["@"]));
        grid.set((1, 0), Tile::Wall);
    }
}
