/// Contents of a single grid cell.
///
/// The composite variants fold "this cell is storage" and "this cell is
/// occupied" into one value, so a cell never holds two overlapping objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Floor,
    Wall,
    Box,
    Agent,
    Storage,
    BoxOnStorage,
    AgentOnStorage,
}

impl Tile {
    /// Parse a level symbol.
    ///
    /// Characters:
    /// - ` ` = Floor
    /// - `#` = Wall
    /// - `$` = Box
    /// - `@` = Agent
    /// - `.` = Storage
    /// - `*` = Box on storage
    /// - `+` = Agent on storage
    pub fn from_symbol(ch: char) -> Option<Tile> {
        match ch {
            ' ' => Some(Tile::Floor),
            '#' => Some(Tile::Wall),
            '$' => Some(Tile::Box),
            '@' => Some(Tile::Agent),
            '.' => Some(Tile::Storage),
            '*' => Some(Tile::BoxOnStorage),
            '+' => Some(Tile::AgentOnStorage),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Tile::Floor => ' ',
            Tile::Wall => '#',
            Tile::Box => '$',
            Tile::Agent => '@',
            Tile::Storage => '.',
            Tile::BoxOnStorage => '*',
            Tile::AgentOnStorage => '+',
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Tile::Storage | Tile::BoxOnStorage | Tile::AgentOnStorage
        )
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, Tile::Agent | Tile::AgentOnStorage)
    }

    pub fn is_box(&self) -> bool {
        matches!(self, Tile::Box | Tile::BoxOnStorage)
    }

    /// Free cell that an agent may step on or a box may be pushed onto.
    pub fn is_walkable(&self) -> bool {
        matches!(self, Tile::Floor | Tile::Storage)
    }

    /// The tile left behind when the agent walks off this cell.
    pub fn without_agent(self) -> Tile {
        match self {
            Tile::AgentOnStorage => Tile::Storage,
            Tile::Agent => Tile::Floor,
            other => other,
        }
    }

    /// The tile after the agent walks onto this (free) cell.
    pub fn with_agent(self) -> Tile {
        if self.is_storage() {
            Tile::AgentOnStorage
        } else {
            Tile::Agent
        }
    }

    /// The tile left behind when a box is pushed off this cell.
    pub fn without_box(self) -> Tile {
        match self {
            Tile::BoxOnStorage => Tile::Storage,
            Tile::Box => Tile::Floor,
            other => other,
        }
    }

    /// The tile after a box lands on this (free) cell.
    pub fn with_box(self) -> Tile {
        if self.is_storage() {
            Tile::BoxOnStorage
        } else {
            Tile::Box
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TILES: [Tile; 7] = [
        Tile::Floor,
        Tile::Wall,
        Tile::Box,
        Tile::Agent,
        Tile::Storage,
        Tile::BoxOnStorage,
        Tile::AgentOnStorage,
    ];

    #[test]
    fn test_symbols() {
        for tile in ALL_TILES {
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
        assert_eq!(Tile::from_symbol('x'), None);
        assert_eq!(Tile::from_symbol('-'), None);
    }

    #[test]
    fn test_agent_occupancy() {
        assert_eq!(Tile::Floor.with_agent(), Tile::Agent);
        assert_eq!(Tile::Storage.with_agent(), Tile::AgentOnStorage);
        assert_eq!(Tile::Agent.without_agent(), Tile::Floor);
        assert_eq!(Tile::AgentOnStorage.without_agent(), Tile::Storage);
    }

    #[test]
    fn test_box_occupancy() {
        assert_eq!(Tile::Floor.with_box(), Tile::Box);
        assert_eq!(Tile::Storage.with_box(), Tile::BoxOnStorage);
        assert_eq!(Tile::Box.without_box(), Tile::Floor);
        assert_eq!(Tile::BoxOnStorage.without_box(), Tile::Storage);
    }

    #[test]
    fn test_walkable() {
        let walkable: Vec<Tile> = ALL_TILES
            .iter()
            .copied()
            .filter(Tile::is_walkable)
            .collect();
        assert_eq!(walkable, vec![Tile::Floor, Tile::Storage]);
    }
}
