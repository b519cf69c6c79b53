use core::fmt;

use crate::{Bitboard, BoardState, Color, Coordinate, Move, Piece, PieceKind, SIZE};

/// The square a pawn skipped over while advancing two ranks
///
/// This is only ever present for the single reply that may capture the pawn en passant. It is not
/// a piece: it never blocks a path and never moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnPassantTarget {
    pub square: Coordinate,
    /// The color of the pawn that skipped the square
    pub color: Color,
}
impl EnPassantTarget {
    /// Where the pawn that skipped `square` ended up
    pub const fn pawn_square(self) -> Coordinate {
        self.square.offset(0, self.color.forward())
    }
}

/// What is standing where: one piece or none per square, plus the en-passant target
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; 64],
    en_passant: Option<EnPassantTarget>,
}

impl Position {
    /// A position with nothing on it
    pub const EMPTY: Self = Self {
        squares: [None; 64],
        en_passant: None,
    };

    /// The piece on the given square, never anything for squares off the board
    pub fn piece_at(&self, square: Coordinate) -> Option<Piece> {
        square.index().and_then(|idx| self.squares[idx])
    }

    /// Put the given piece (or nothing) on the square.
    ///
    /// Squares off the board can't hold anything, so setting one does nothing.
    pub fn set_piece_at(&mut self, piece: Option<Piece>, square: Coordinate) {
        if let Some(idx) = square.index() {
            self.squares[idx] = piece;
        }
    }

    /// Remove and return the piece on the given square
    pub fn take_piece_at(&mut self, square: Coordinate) -> Option<Piece> {
        square.index().and_then(|idx| self.squares[idx].take())
    }

    pub fn is_vacant(&self, square: Coordinate) -> bool {
        self.piece_at(square).is_none()
    }

    pub const fn en_passant(&self) -> Option<EnPassantTarget> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, target: Option<EnPassantTarget>) {
        self.en_passant = target;
    }

    /// The squares holding a piece of either color
    pub fn occupied(&self) -> Bitboard {
        self.occupied_squares().map(|(square, _)| square).collect()
    }

    /// Every piece of the given color, with its square
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        self.occupied_squares()
            .filter(move |(_, piece)| piece.color == color)
    }

    /// Every piece on the board, with its square
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Coordinate, Piece)> + '_ {
        Coordinate::all_squares()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// The square of the king of the given color, if there is one
    pub fn find_king(&self, color: Color) -> Option<Coordinate> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Lists only the occupied squares
        struct Pieces<'a>(&'a Position);

        impl fmt::Debug for Pieces<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .occupied_squares()
                            .map(|(square, piece)| (square.as_str(), piece.letter())),
                    )
                    .finish()
            }
        }

        f.debug_struct("Position")
            .field("pieces", &Pieces(self))
            .field("en_passant", &self.en_passant)
            .finish()
    }
}

/// A board being played on: its position, every move made so far and the state of the side to
/// move
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    position: Position,
    history: Vec<Move>,
    state: BoardState,
}

impl Board {
    /// An empty board, to be filled in with [`Board::set_piece_at`]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A board with the given position and no history
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            history: Vec::new(),
            state: BoardState::Regular,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub fn piece_at(&self, square: Coordinate) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn set_piece_at(&mut self, piece: Option<Piece>, square: Coordinate) {
        self.position.set_piece_at(piece, square);
    }

    /// Every move made on this board, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Append a move to the history without touching the position.
    ///
    /// This is for setting up positions whose past matters (whose turn it is, or which pieces
    /// have moved).
    pub fn record(&mut self, mv: Move) {
        self.history.push(mv);
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn set_state(&mut self, state: BoardState) {
        self.state = state;
    }

    /// White moves after an even number of moves, black after an odd number
    pub fn side_to_move(&self) -> Color {
        if self.history.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Whether any move so far started on the given square, which is how a king or rook loses
    /// its right to castle
    pub fn was_moved_from(&self, square: Coordinate) -> bool {
        self.history.iter().any(|mv| mv.from == square)
    }
}

/// Display as a grid with rank 8 on top
///
/// White pieces are upper case, black pieces lower case, the en-passant target is `*` and empty
/// squares are `.`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        let en_passant = self.position.en_passant().map(|target| target.square);
        for y in (0..SIZE).rev() {
            write!(f, "{} ", y + 1)?;
            for x in 0..SIZE {
                let square = Coordinate::new(x, y);
                let symbol = match self.piece_at(square) {
                    Some(piece) => piece.letter(),
                    None if en_passant == Some(square) => '*',
                    None => '.',
                };
                f.write_char(' ')?;
                f.write_char(symbol)?;
            }
            f.write_char('\n')?;
        }
        f.write_str("   a b c d e f g h\n")
    }
}
