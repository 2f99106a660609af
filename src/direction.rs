use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

struct DirectionInfo {
    delta: (i8, i8),
    move_code: char,
    push_code: char,
    opposite: Direction,
}

// Indexed by `Direction::index`.
const DIRECTION_TABLE: [DirectionInfo; 4] = [
    DirectionInfo {
        delta: (0, -1),
        move_code: 'u',
        push_code: 'U',
        opposite: Direction::Down,
    },
    DirectionInfo {
        delta: (0, 1),
        move_code: 'd',
        push_code: 'D',
        opposite: Direction::Up,
    },
    DirectionInfo {
        delta: (-1, 0),
        move_code: 'l',
        push_code: 'L',
        opposite: Direction::Right,
    },
    DirectionInfo {
        delta: (1, 0),
        move_code: 'r',
        push_code: 'R',
        opposite: Direction::Left,
    },
];

impl Direction {
    fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    fn info(&self) -> &'static DirectionInfo {
        &DIRECTION_TABLE[self.index()]
    }

    /// Unit offset as `(dx, dy)`, with `y` growing downwards.
    pub fn delta(&self) -> (i8, i8) {
        self.info().delta
    }

    /// Lowercase code recorded for a plain step.
    pub fn move_code(&self) -> char {
        self.info().move_code
    }

    /// Uppercase code recorded for a push.
    pub fn push_code(&self) -> char {
        self.info().push_code
    }

    pub fn opposite(&self) -> Direction {
        self.info().opposite
    }

    /// Resolve a move or push code back to its direction.
    /// Returns the direction and whether the code denotes a push.
    pub fn from_code(code: char) -> Option<(Direction, bool)> {
        ALL_DIRECTIONS.iter().find_map(|&dir| {
            if dir.move_code() == code {
                Some((dir, false))
            } else if dir.push_code() == code {
                Some((dir, true))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for dir in ALL_DIRECTIONS {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0), "Failed for {:?}", dir);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(Direction::Up.move_code(), 'u');
        assert_eq!(Direction::Up.push_code(), 'U');
        assert_eq!(Direction::Left.move_code(), 'l');
        assert_eq!(Direction::Right.push_code(), 'R');
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Direction::from_code('d'), Some((Direction::Down, false)));
        assert_eq!(Direction::from_code('D'), Some((Direction::Down, true)));
        assert_eq!(Direction::from_code('x'), None);

        for dir in ALL_DIRECTIONS {
            assert_eq!(Direction::from_code(dir.move_code()), Some((dir, false)));
            assert_eq!(Direction::from_code(dir.push_code()), Some((dir, true)));
        }
    }
}
