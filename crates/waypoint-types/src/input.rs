//! Platform-agnostic directional input types.
//!
//! Every host maps its remote-control, D-pad or keyboard input to these
//! types. The navigator never sees raw platform key codes.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A remote / d-pad button pressed.
    ButtonPress(Button),
    /// A remote / d-pad button released.
    ButtonRelease(Button),
    /// The hosting surface gained focus.
    FocusGained,
    /// The hosting surface lost focus.
    FocusLost,
}

/// Buttons that map across all remotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Back,
    Menu,
}

impl Button {
    /// The cursor direction this button drives, if it is a d-pad button.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Confirm | Self::Back | Self::Menu => None,
        }
    }
}

/// One of the four cursor directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector in screen coordinates (y grows downwards).
    pub fn unit(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::Down => 1 << 1,
            Self::Left => 1 << 2,
            Self::Right => 1 << 3,
        }
    }
}

/// Set of currently held directions.
///
/// Stored as a 4-bit mask, so diagonals (e.g. `Up | Right`) are just two
/// bits set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a direction. Returns `true` if it was not already present.
    pub fn insert(&mut self, dir: Direction) -> bool {
        let was_present = self.contains(dir);
        self.0 |= dir.bit();
        !was_present
    }

    /// Remove a direction. Returns `true` if it was present.
    pub fn remove(&mut self, dir: Direction) -> bool {
        let was_present = self.contains(dir);
        self.0 &= !dir.bit();
        was_present
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Iterate the held directions in `Direction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }

    /// Vector sum of the held directions. Opposite directions cancel.
    pub fn vector(&self) -> (i32, i32) {
        self.iter().fold((0, 0), |(x, y), d| {
            let (dx, dy) = d.unit();
            (x + dx, y + dy)
        })
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}
