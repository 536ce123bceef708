//! Horizontal drag directions.

use std::fmt;

/// Classification of a signed horizontal value.
///
/// Positive values are [`Direction::Right`], negative values are
/// [`Direction::Left`] and zero is [`Direction::None`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// No drag, or the view is closed.
    #[default]
    None,
    /// Dragged right to left, or opened towards the left.
    Left,
    /// Dragged left to right, or opened towards the right.
    Right,
}

impl Direction {
    /// Classify a signed value by its sign.
    pub fn of(value: f32) -> Self {
        if value > 0.0 {
            Direction::Right
        } else if value < 0.0 {
            Direction::Left
        } else {
            Direction::None
        }
    }

    /// The unit sign of this direction: `-1.0`, `0.0` or `1.0`.
    pub fn sign(self) -> f32 {
        match self {
            Direction::None => 0.0,
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    /// The side this direction opens, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Direction::None => None,
            Direction::Left => Some(Side::Left),
            Direction::Right => Some(Side::Right),
        }
    }
}

/// One of the two sides a module can live on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides in the order modules are built.
    pub const ALL: [Side; 2] = [Side::Right, Side::Left];

    pub fn direction(self) -> Direction {
        match self {
            Side::Left => Direction::Left,
            Side::Right => Direction::Right,
        }
    }

    pub fn sign(self) -> f32 {
        self.direction().sign()
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Whether the signed value `x` lies on this side.
    pub fn contains(self, x: f32) -> bool {
        Direction::of(x) == self.direction()
    }
}

impl From<Side> for Direction {
    fn from(side: Side) -> Self {
        side.direction()
    }
}

impl TryFrom<Direction> for Side {
    type Error = DirectionError;

    fn try_from(direction: Direction) -> Result<Self, Self::Error> {
        direction.side().ok_or(DirectionError::Unsupported(direction))
    }
}

/// Raised when a computation that only handles left or right receives another direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionError {
    Unsupported(Direction),
}

impl fmt::Display for DirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionError::Unsupported(direction) => {
                write!(f, "unsupported drag direction: {direction:?}")
            }
        }
    }
}

impl std::error::Error for DirectionError {}
