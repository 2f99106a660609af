use crate::grid::Grid;
use crate::tile::Tile;
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for catalog lookups and level validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// Index outside `[0, count)`; navigation must normalize before calling.
    #[error("level index {index} out of range (catalog holds {count} levels)")]
    IndexOutOfRange { index: usize, count: usize },
    /// Malformed level template
    #[error("invalid level: {0}")]
    InvalidLevel(String),
}

/// An immutable level definition: template rows and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    rows: Vec<String>,
    info: Option<String>,
}

impl Level {
    pub fn new<S: AsRef<str>>(rows: &[S], info: Option<&str>) -> Self {
        Level {
            rows: rows.iter().map(|row| row.as_ref().to_string()).collect(),
            info: info.map(str::to_string),
        }
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// `(width, height)`: the longest template row and the row count.
    pub fn dimensions(&self) -> (usize, usize) {
        let width = self
            .rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        (width, self.rows.len())
    }

    /// Decode the template into tiles without padding.
    fn decode(&self) -> Result<Vec<Vec<Tile>>, LevelError> {
        if self.rows.is_empty() {
            return Err(LevelError::InvalidLevel("Empty level".to_string()));
        }

        let mut decoded = Vec::with_capacity(self.rows.len());
        for (y, row) in self.rows.iter().enumerate() {
            let mut tiles = Vec::with_capacity(row.len());
            for (x, ch) in row.chars().enumerate() {
                let tile = Tile::from_symbol(ch).ok_or_else(|| {
                    LevelError::InvalidLevel(format!(
                        "Invalid character '{}' at position ({}, {})",
                        ch, x, y
                    ))
                })?;
                tiles.push(tile);
            }
            decoded.push(tiles);
        }

        Ok(decoded)
    }

    /// Check the template for unknown symbols and for exactly one agent.
    pub fn validate(&self) -> Result<(), LevelError> {
        self.to_grid().map(|_| ())
    }

    /// Build the live grid, padding short rows with floor.
    pub fn to_grid(&self) -> Result<Grid, LevelError> {
        let grid = Grid::from_rows(&self.decode()?);

        match grid.count(|tile| tile.is_agent()) {
            0 => Err(LevelError::InvalidLevel("No agent found".to_string())),
            1 => Ok(grid),
            n => Err(LevelError::InvalidLevel(format!(
                "Multiple agents found ({})",
                n
            ))),
        }
    }
}

/// An ordered, immutable collection of levels.
#[derive(Debug)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        LevelCatalog { levels }
    }

    /// The built-in level set, initialized on first use.
    pub fn builtin() -> &'static LevelCatalog {
        static BUILTIN: OnceLock<LevelCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            LevelCatalog::new(
                BUILTIN_LEVELS
                    .iter()
                    .map(|&(plan, info)| Level::new(plan, info))
                    .collect(),
            )
        })
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Result<&Level, LevelError> {
        self.levels.get(index).ok_or(LevelError::IndexOutOfRange {
            index,
            count: self.levels.len(),
        })
    }

    pub fn dimensions_of(&self, level: &Level) -> (usize, usize) {
        level.dimensions()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

const BUILTIN_LEVELS: [(&[&str], Option<&str>); 10] = [
    (
        &["###", "#.#", "# #", "#$#", "#@#", "###"],
        Some("Push box onto storage!"),
    ),
    (
        &["#########", "#. $@$ .#", "#########"],
        Some("Multiple boxes..."),
    ),
    (
        &["#########", "# .$@$. #", "#########"],
        Some("Don't push too far!"),
    ),
    (
        &["######", "#   .#", "#  ###", "##$#", " #@#", " ###"],
        Some("Around the corner."),
    ),
    (
        &[
            "  ######",
            "  #.   #",
            "### ##$###",
            "#@ $   . #",
            "#    ####*",
            "######",
        ],
        None,
    ),
    (
        &["#####", "#  @#", "#*$ #", "#.###", "###"],
        Some("Easy going!"),
    ),
    (
        &[
            "#######", "#.@ # #", "#$* $ #", "#   $ #", "# ..  #", "#  *  #", "#######",
        ],
        Some("Not so easy..."),
    ),
    (
        &[" #####", "##   #", "#@$  #", "#. $##", "#.  #", "#####"],
        Some("On the other side"),
    ),
    (
        &[
            "    #####",
            "    #   #",
            "    #$  #",
            "  ###  $###",
            "  #  $  $ #",
            "### # # # #*#####",
            "#   # ### ##  ..#",
            "# $  $      @ ..#",
            "##### #### #  ..#",
            "    #      *#####",
            "    ########",
        ],
        Some("Moderate challenge"),
    ),
    (
        &[
            "*####        ####*",
            "##  ##########  ##",
            "#                #",
            "#  *###########  #",
            "## #*  #  #   # ##",
            " # #      #   # #",
            " # #  ##$ #  ## #",
            " # ## #  $#$ #  #",
            " # *# #      ## #",
            " # ## #  ##   # ##",
            "##*#  #########  #",
            "# .#             #",
            "#@..#  #######  ##",
            "*#######     ####*",
        ],
        Some("A long way..."),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.count(), 10);

        for (index, level) in catalog.iter().enumerate() {
            assert!(
                level.validate().is_ok(),
                "Level {} failed validation: {:?}",
                index,
                level.validate()
            );
        }
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(LevelCatalog::builtin(), LevelCatalog::builtin()));
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = LevelCatalog::builtin();
        assert!(catalog.get(9).is_ok());
        assert_eq!(
            catalog.get(10).unwrap_err(),
            LevelError::IndexOutOfRange {
                index: 10,
                count: 10
            }
        );
    }

    #[test]
    fn test_info() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.get(0).unwrap().info(), Some("Push box onto storage!"));
        assert_eq!(catalog.get(4).unwrap().info(), None);
    }

    #[test]
    fn test_dimensions_irregular_rows() {
        let catalog = LevelCatalog::builtin();
        let level = catalog.get(5).unwrap();
        assert_eq!(catalog.dimensions_of(level), (5, 5));

        let level = catalog.get(8).unwrap();
        assert_eq!(catalog.dimensions_of(level), (17, 11));
    }

    #[test]
    fn test_to_grid_pads_rows() {
        let level = Level::new(&["#####", "#@ #", "##"], None);
        let grid = level.to_grid().unwrap();

        assert_eq!((grid.width(), grid.height()), level.dimensions());
        assert_eq!(grid.get((4, 1)), Some(Tile::Floor));
        assert_eq!(grid.get((2, 2)), Some(Tile::Floor));
        assert_eq!(grid.get((1, 2)), Some(Tile::Wall));
    }

    #[test]
    fn test_invalid_levels() {
        let empty: [&str; 0] = [];
        let no_rows = Level::new(&empty, None);
        assert!(matches!(no_rows.validate(), Err(LevelError::InvalidLevel(_))));

        let no_agent = Level::new(&["####", "#$.#", "####"], None);
        assert!(matches!(no_agent.validate(), Err(LevelError::InvalidLevel(_))));

        let two_agents = Level::new(&["####", "#@+#", "####"], None);
        assert!(matches!(two_agents.validate(), Err(LevelError::InvalidLevel(_))));

        let bad_symbol = Level::new(&["####", "#@x#", "####"], None);
        assert_eq!(
            bad_symbol.validate(),
            Err(LevelError::InvalidLevel(
                "Invalid character 'x' at position (2, 1)".to_string()
            ))
        );
    }
}
