use core::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::{Coordinate, SIZE};

/// A set of squares, one bit per square (rank-major, `a1` is the lowest bit)
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Create an empty bitboard
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Produce a bitboard holding only the given square.
    ///
    /// If the square is off the board, this returns the empty bitboard, which makes it the
    /// clipping step of every movement pattern.
    pub const fn from_coordinate(square: Coordinate) -> Self {
        match square.index() {
            Some(idx) => Self(1 << idx),
            None => Self::empty(),
        }
    }

    /// The squares reached by stepping repeatedly from `start` until leaving the board, not
    /// including `start` itself
    ///
    /// ```
    /// use board::{Bitboard, Coordinate};
    /// assert_eq!(Bitboard::ray(Coordinate::new(0, 0), 1, 1).num_set(), 7);
    /// assert!(Bitboard::ray(Coordinate::new(7, 3), 1, 0).is_empty());
    /// ```
    pub const fn ray(start: Coordinate, x_step: i8, y_step: i8) -> Self {
        if x_step == 0 && y_step == 0 {
            return Self::empty();
        }
        let mut board = Self::empty();
        let mut square = start.offset(x_step, y_step);
        while square.is_valid() {
            board = board.union(Self::from_coordinate(square));
            square = square.offset(x_step, y_step);
        }
        board
    }

    /// Gets the squares strictly between two squares on a shared rank or file.
    ///
    /// This does not contain the start or end squares, and is empty when the squares don't
    /// share a rank or file (or either is off the board).
    pub const fn orthogonal_between(start: Coordinate, end: Coordinate) -> Self {
        if !start.is_valid() || !end.is_valid() {
            return Self::empty();
        }
        if start.x != end.x && start.y != end.y {
            return Self::empty();
        }
        Self::walk_between(start, end)
    }

    /// Gets the squares strictly between two squares on a shared diagonal.
    ///
    /// This does not contain the start or end squares, and is empty when the squares aren't
    /// diagonal to each other (or either is off the board).
    pub const fn diagonal_between(start: Coordinate, end: Coordinate) -> Self {
        if !start.is_valid() || !end.is_valid() {
            return Self::empty();
        }
        if start.x.abs_diff(end.x) != start.y.abs_diff(end.y) {
            return Self::empty();
        }
        Self::walk_between(start, end)
    }

    /// Steps from `start` towards `end` one square at a time, which is only meaningful for
    /// squares on a shared line
    const fn walk_between(start: Coordinate, end: Coordinate) -> Self {
        let x_step = (end.x - start.x).signum();
        let y_step = (end.y - start.y).signum();
        let mut board = Self::empty();
        let mut square = start.offset(x_step, y_step);
        while square.is_valid() && (square.x != end.x || square.y != end.y) {
            board = board.union(Self::from_coordinate(square));
            square = square.offset(x_step, y_step);
        }
        board
    }

    /// Returns true if no squares are selected
    ///
    /// ```
    /// use board::Bitboard;
    /// assert!(Bitboard::empty().is_empty());
    /// assert!(!Bitboard(0x01).is_empty());
    /// ```
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `self & other` is not empty
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if `self & other == other`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the given square is selected (never true for off-board squares)
    pub const fn has(self, square: Coordinate) -> bool {
        match square.index() {
            Some(idx) => self.0 & (1 << idx) != 0,
            None => false,
        }
    }

    /// Produce an iterator of all selected squares, rank by rank from `a1`
    ///
    /// ```
    /// use board::{Bitboard, Coordinate};
    /// assert_eq!(Bitboard::empty().squares_iter().count(), 0);
    /// assert_eq!(
    ///     (Bitboard::from(Coordinate::new(7, 0)) | Coordinate::new(0, 0))
    ///         .squares_iter()
    ///         .collect::<Vec<_>>(),
    ///     vec![Coordinate::new(0, 0), Coordinate::new(7, 0)],
    /// );
    /// assert_eq!(Bitboard(!0).squares_iter().count(), 64);
    /// ```
    pub fn squares_iter(self) -> impl Iterator<Item = Coordinate> {
        (0..64)
            .filter(move |&offset| self.0 & (1 << offset) != 0)
            .map(|offset| Coordinate::new(offset % SIZE, offset / SIZE))
    }

    /// Returns the number of bits which are set
    pub fn num_set(self) -> u32 {
        self.0.count_ones()
    }
}

/// Bit-wise operations for combining things
///
/// These are `const` equivalents to `&`, `|`, `!`
impl Bitboard {
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn negation(self) -> Self {
        Self(!self.0)
    }
}

impl BitOr<Bitboard> for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
impl BitOr<Coordinate> for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Coordinate) -> Self::Output {
        self.union(Self::from(rhs))
    }
}
impl<T> BitOrAssign<T> for Bitboard
where
    Bitboard: BitOr<T, Output = Bitboard>,
{
    fn bitor_assign(&mut self, rhs: T) {
        *self = *self | rhs
    }
}
impl BitAnd<Bitboard> for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}
impl<T> BitAndAssign<T> for Bitboard
where
    Bitboard: BitAnd<T, Output = Bitboard>,
{
    fn bitand_assign(&mut self, rhs: T) {
        *self = *self & rhs
    }
}
impl Not for Bitboard {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.negation()
    }
}

impl From<Coordinate> for Bitboard {
    fn from(value: Coordinate) -> Self {
        Self::from_coordinate(value)
    }
}

impl FromIterator<Coordinate> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |board, square| board | square)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bitboard")
            .field(&format_args!("{:X}", self.0))
            .finish()
    }
}

/// Display as a TUI version of a grid, rank 8 on top
///
/// ```
/// use board::{Bitboard, Coordinate};
///
/// assert_eq!(
///     Bitboard::from(Coordinate::new(0, 0)).to_string(),
///     "        \n        \n        \n        \n        \n        \n        \nX       \n",
/// );
/// assert_eq!(
///     Bitboard::from(Coordinate::new(7, 7)).to_string(),
///     "       X\n        \n        \n        \n        \n        \n        \n        \n",
/// );
/// ```
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for y in (0..SIZE).rev() {
            for x in 0..SIZE {
                f.write_char(if self.has(Coordinate::new(x, y)) { 'X' } else { ' ' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
