use core::{fmt, str::FromStr};
use std::error;

/// The number of squares along each edge of the board
pub const SIZE: i8 = 8;

/// A square on the board, as a file (`x`) and a rank (`y`)
///
/// Both are counted from zero, so `a1` is `(0, 0)` and `h8` is `(7, 7)`. Coordinates outside of
/// the board can be represented (so requests for them can be turned down), but they never hold a
/// piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i8,
    pub y: i8,
}

impl Coordinate {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Returns if this square is on the board
    ///
    /// ```
    /// # use board::Coordinate;
    /// assert!(Coordinate::new(0, 7).is_valid());
    /// assert!(!Coordinate::new(8, 0).is_valid());
    /// assert!(!Coordinate::new(3, -1).is_valid());
    /// ```
    pub const fn is_valid(self) -> bool {
        0 <= self.x && self.x < SIZE && 0 <= self.y && self.y < SIZE
    }

    /// Offset the given number of files and ranks.
    ///
    /// ```rust
    /// use board::Coordinate;
    /// assert_eq!(Coordinate::new(3, 1), Coordinate::new(0, 0).offset(3, 1));
    /// assert_eq!(Coordinate::new(0, 0), Coordinate::new(3, 1).offset(-3, -1));
    /// assert!(!Coordinate::new(3, 0).offset(0, -1).is_valid());
    /// assert!(!Coordinate::new(7, 4).offset(1, 0).is_valid());
    /// ```
    pub const fn offset(self, x: i8, y: i8) -> Self {
        Self {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
        }
    }

    /// The index of this square in a rank-major array of the board, if it is on the board
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.y as usize * SIZE as usize + self.x as usize)
        } else {
            None
        }
    }

    /// Converts self to the algebraic name of the square, if on the board
    pub const fn as_str_legal(self) -> Option<&'static str> {
        /// Names of the squares, rank-major
        const NAMES: [&str; 64] = [
            "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", //
            "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
            "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
            "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
            "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
            "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
            "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
            "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", //
        ];
        match self.index() {
            Some(idx) => Some(NAMES[idx]),
            None => None,
        }
    }

    /// Converts self to the algebraic name of the square, or `"XX"` if off the board
    pub const fn as_str(self) -> &'static str {
        match self.as_str_legal() {
            Some(s) => s,
            None => "XX",
        }
    }

    /// An iterator over all squares on the board, file by file
    ///
    /// ```
    /// assert_eq!(board::Coordinate::all_squares().count(), 64);
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..SIZE).flat_map(|x| (0..SIZE).map(move |y| Self::new(x, y)))
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinate")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("readable", &self.as_str_legal().unwrap_or("illegal"))
            .finish()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateFromStrErr;

impl fmt::Display for CoordinateFromStrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("square name was invalid")
    }
}

impl error::Error for CoordinateFromStrErr {}

impl FromStr for Coordinate {
    type Err = CoordinateFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(CoordinateFromStrErr);
        };
        let x = match file {
            b'a'..=b'h' => (file - b'a') as i8,
            _ => return Err(CoordinateFromStrErr),
        };
        let y = match rank {
            b'1'..=b'8' => (rank - b'1') as i8,
            _ => return Err(CoordinateFromStrErr),
        };
        Ok(Self::new(x, y))
    }
}
