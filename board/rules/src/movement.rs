//! Where each kind of piece may go, ignoring everything else on the board

use board::{Bitboard, Coordinate, Piece, PieceKind, Position};

/// The squares a knight jumps to, as (file, rank) offsets
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The squares next to a king, as (file, rank) offsets
const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const DIAGONAL_STEPS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// How many files a king travels when castling
pub const CASTLING_DISTANCE: i8 = 2;

/// The movement patterns of a piece
///
/// The patterns only clip to the edges of the board. Whether the squares in between are free is
/// answered separately by [`Movement::is_the_way_free`], and everything else about the board
/// (occupancy of the destination, check, history) is up to the move being validated.
pub trait Movement {
    /// Squares this piece can advance to without capturing
    fn possible_attack_moves(self, from: Coordinate) -> Bitboard;

    /// Squares this piece can capture on
    fn possible_capture_moves(self, from: Coordinate) -> Bitboard;

    /// Squares this piece can advance to if it hasn't moved yet
    fn possible_attack_moves_for_first_move(self, from: Coordinate) -> Bitboard;

    /// Squares this piece can castle to
    fn castling_moves(self, from: Coordinate) -> Bitboard;

    /// Whether nothing stands on the squares this piece passes on its way from `from` to `to`
    fn is_the_way_free(self, position: &Position, from: Coordinate, to: Coordinate) -> bool;
}

/// Union of the squares reached from `from` by each of the offsets
fn jumps(from: Coordinate, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .map(|&(x, y)| Bitboard::from_coordinate(from.offset(x, y)))
        .fold(Bitboard::empty(), |board, new| board | new)
}

/// Union of the rays leaving `from` in each of the directions
fn slides(from: Coordinate, steps: &[(i8, i8)]) -> Bitboard {
    steps
        .iter()
        .map(|&(x, y)| Bitboard::ray(from, x, y))
        .fold(Bitboard::empty(), |board, new| board | new)
}

impl Movement for Piece {
    fn possible_attack_moves(self, from: Coordinate) -> Bitboard {
        match self.kind {
            PieceKind::Pawn | PieceKind::PawnAfterFirstMove => {
                Bitboard::from_coordinate(from.offset(0, self.color.forward()))
            }
            PieceKind::Knight => jumps(from, &KNIGHT_OFFSETS),
            PieceKind::Bishop => slides(from, &DIAGONAL_STEPS),
            PieceKind::Rook => slides(from, &ORTHOGONAL_STEPS),
            PieceKind::Queen => slides(from, &DIAGONAL_STEPS) | slides(from, &ORTHOGONAL_STEPS),
            PieceKind::King => jumps(from, &KING_OFFSETS),
        }
    }

    fn possible_capture_moves(self, from: Coordinate) -> Bitboard {
        if self.is_pawn() {
            let forward = self.color.forward();
            jumps(from, &[(-1, forward), (1, forward)])
        } else {
            self.possible_attack_moves(from)
        }
    }

    fn possible_attack_moves_for_first_move(self, from: Coordinate) -> Bitboard {
        match self.kind {
            PieceKind::Pawn => {
                self.possible_attack_moves(from)
                    | from.offset(0, 2 * self.color.forward())
            }
            _ => self.possible_attack_moves(from),
        }
    }

    fn castling_moves(self, from: Coordinate) -> Bitboard {
        match self.kind {
            PieceKind::King => jumps(from, &[(-CASTLING_DISTANCE, 0), (CASTLING_DISTANCE, 0)]),
            _ => Bitboard::empty(),
        }
    }

    fn is_the_way_free(self, position: &Position, from: Coordinate, to: Coordinate) -> bool {
        let passed = match self.kind {
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => return true,
            PieceKind::PawnAfterFirstMove | PieceKind::Rook => {
                Bitboard::orthogonal_between(from, to)
            }
            PieceKind::Bishop => Bitboard::diagonal_between(from, to),
            PieceKind::Queen => {
                Bitboard::orthogonal_between(from, to) | Bitboard::diagonal_between(from, to)
            }
        };
        !passed.intersects(position.occupied())
    }
}
