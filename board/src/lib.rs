use core::fmt;
use std::error;

mod bitboard;
mod board;
mod coordinate;

pub use crate::{
    bitboard::Bitboard,
    board::{Board, EnPassantTarget, Position},
    coordinate::{Coordinate, CoordinateFromStrErr, SIZE},
};

/// The types of pieces there are
///
/// A pawn starts as [`PieceKind::Pawn`] and is replaced by [`PieceKind::PawnAfterFirstMove`]
/// once it has moved, which is what takes away its two-square advance.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    PawnAfterFirstMove,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 7] = [
        Self::Pawn,
        Self::PawnAfterFirstMove,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// The capitalized letter used for this kind of piece
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn | Self::PawnAfterFirstMove => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Whether this is either of the pawn kinds
    pub const fn is_pawn(self) -> bool {
        matches!(self, Self::Pawn | Self::PawnAfterFirstMove)
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn is_black(self) -> bool {
        match self {
            Color::White => false,
            Color::Black => true,
        }
    }

    pub const fn is_white(self) -> bool {
        match self {
            Color::White => true,
            Color::Black => false,
        }
    }

    /// The direction pawns of this color advance in, as a rank offset
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank this color's pieces (other than pawns) start on
    pub const fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => SIZE - 1,
        }
    }

    /// The rank this color's pawns promote on
    pub const fn last_rank(self) -> i8 {
        self.other().home_rank()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A raw color value that is neither white nor black
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidColor(pub u8);

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the color of the piece is invalid ({})", self.0)
    }
}

impl error::Error for InvalidColor {}

impl TryFrom<u8> for Color {
    type Error = InvalidColor;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            _ => Err(InvalidColor(value)),
        }
    }
}

/// A piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// The letter for this piece, upper case for white and lower case for black
    pub const fn letter(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub const fn is_pawn(self) -> bool {
        self.kind.is_pawn()
    }

    /// Returns an iterator of all pieces that exist
    pub fn all_pieces() -> impl Iterator<Item = Self> {
        [Color::White, Color::Black]
            .into_iter()
            .flat_map(|color| PieceKind::KINDS.into_iter().map(move |kind| Self::new(kind, color)))
    }
}

/// How a move interacts with the rest of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A move onto an empty square
    Attack,
    /// A move onto a square holding an enemy piece, which gets removed
    Capture,
    /// A king moving two files, taking the rook of that side along
    Castling,
    /// A pawn capturing a pawn that just skipped past it
    EnPassant,
}
impl MoveKind {
    /// Whether a move of this kind can never be undone, which bounds the window of positions
    /// that can repeat
    pub const fn is_irreversible(self) -> bool {
        !matches!(self, Self::Attack)
    }
}

/// A move, as it was validated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
    /// The piece that moved, as it was before moving
    pub piece: Piece,
    pub kind: MoveKind,
}
impl Move {
    pub const fn new(kind: MoveKind, from: Coordinate, to: Coordinate, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            kind,
        }
    }

    /// Whether this is a castle towards the `a` file
    pub const fn is_queenside_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castling) && self.to.x < self.from.x
    }
}

/// Display in long algebraic notation, with castles written out as `O-O` and `O-O-O`
///
/// ```
/// use board::{Color, Coordinate, Move, MoveKind, Piece, PieceKind};
///
/// let queen = Piece::new(PieceKind::Queen, Color::White);
/// let mv = Move::new(MoveKind::Capture, Coordinate::new(5, 5), Coordinate::new(3, 3), queen);
/// assert_eq!(mv.to_string(), "Qf6xd4");
/// let pawn = Piece::new(PieceKind::Pawn, Color::Black);
/// let mv = Move::new(MoveKind::Attack, Coordinate::new(4, 6), Coordinate::new(4, 4), pawn);
/// assert_eq!(mv.to_string(), "e7-e5");
/// ```
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Castling if self.is_queenside_castle() => return f.write_str("O-O-O"),
            MoveKind::Castling => return f.write_str("O-O"),
            _ => {}
        }
        if !self.piece.is_pawn() {
            write!(f, "{}", self.piece.kind.letter())?;
        }
        let separator = match self.kind {
            MoveKind::Capture | MoveKind::EnPassant => 'x',
            MoveKind::Attack | MoveKind::Castling => '-',
        };
        write!(f, "{}{separator}{}", self.from, self.to)?;
        if self.kind == MoveKind::EnPassant {
            f.write_str(" e.p.")?;
        }
        Ok(())
    }
}

/// The state of the side to move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoardState {
    #[default]
    Regular,
    Check,
    CheckMate,
    StaleMate,
}
impl BoardState {
    /// Whether the side to move has no legal moves left
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::CheckMate | Self::StaleMate)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regular => "regular",
            Self::Check => "check",
            Self::CheckMate => "checkmate",
            Self::StaleMate => "stalemate",
        })
    }
}

/// The possible outcomes of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// The given color checkmated the other
    Checkmate { winner: Color },
    /// Draw because the side to move couldn't make any moves
    Stalemate,
    /// Draw because the same position came up for the third time
    ThreefoldRepetition,
    /// Draw because of fifty moves by each side without a capture or a pawn move
    FiftyMoveRule,
}

/// Functionality belonging to anything that referees a game
pub trait Game: Sized {
    /// An error type that can be returned
    type Err: fmt::Debug + fmt::Display;

    /// Get the state at the start of a chess game
    fn initial_state() -> Self;

    /// Take over an arbitrary board, such as a custom setup
    fn from_board(board: Board) -> Self;

    /// Make the game after the given sequence of moves, trusting them to be legal
    fn from_move_sequence(moves: impl IntoIterator<Item = Move>) -> Self;

    /// The board being played on
    fn board(&self) -> &Board;

    /// Every legal move for the side to move
    fn legal_moves(&self) -> Result<Vec<Move>, Self::Err>;

    /// Move the piece on `from` to `to`, if that is legal
    fn perform_move(&mut self, from: Coordinate, to: Coordinate) -> Result<Move, Self::Err>;

    /// Work out whether the side to move is in check, checkmated or stalemated
    fn update_board_state(&mut self) -> Result<BoardState, Self::Err>;

    fn check_threefold_repetition_rule(&self) -> bool;

    fn check_fifty_move_rule(&self) -> bool;

    /// Returns how the game ended, or `None` if it is still going
    fn outcome(&mut self) -> Result<Option<GameOutcome>, Self::Err> {
        let outcome = match self.update_board_state()? {
            BoardState::CheckMate => Some(GameOutcome::Checkmate {
                winner: self.board().side_to_move().other(),
            }),
            BoardState::StaleMate => Some(GameOutcome::Stalemate),
            BoardState::Regular | BoardState::Check => {
                if self.check_threefold_repetition_rule() {
                    Some(GameOutcome::ThreefoldRepetition)
                } else if self.check_fifty_move_rule() {
                    Some(GameOutcome::FiftyMoveRule)
                } else {
                    None
                }
            }
        };
        Ok(outcome)
    }
}
