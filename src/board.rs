// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::{self, Write};

use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

/// The 8x8 grid of square contents. Boards are plain values: copying one is
/// the way to get a scratch board for simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

static BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard starting arrangement.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for &file in &FILES {
            let kind = BACK_RANK[file.as_index()];
            board.set(Square::of(Rank::One, file), Piece::new(kind, Color::White));
            board.set(Square::of(Rank::Two, file), Piece::new(PieceKind::Pawn, Color::White));
            board.set(Square::of(Rank::Seven, file), Piece::new(PieceKind::Pawn, Color::Black));
            board.set(Square::of(Rank::Eight, file), Piece::new(kind, Color::Black));
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.as_index()] = Some(piece);
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()].take()
    }

    /// Every occupied square with its piece, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |&(_, piece)| piece.color == color)
    }

    /// The square holding the given side's king, or None if it has none.
    /// Boards produced by the engine always have exactly one king per side.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }

    /// Applies a structurally validated move to this board exactly as a
    /// commit would, without touching any game state. A move that requires
    /// promotion with no (or an invalid) choice promotes to a queen.
    pub fn apply_move(&mut self, mov: &Move, promotion: Option<PieceKind>) {
        if let Some(target) = self.piece_at(mov.destination()) {
            assert!(
                target.kind != PieceKind::King,
                "invariant violated: move {} captures a king",
                mov
            );
        }

        self.clear(mov.source());
        if mov.is_en_passant() {
            let capture_square = mov
                .capture_square()
                .expect("invalid move: en passant without capture square");
            self.clear(capture_square);
        } else if let Some((rook_from, rook_to)) = mov.castle_rook_squares() {
            let rook = self
                .clear(rook_from)
                .expect("invalid move: castle without rook");
            self.set(rook_to, rook);
        }

        let placed = if mov.requires_promotion() {
            let kind = promotion
                .filter(|kind| kind.is_promotion_choice())
                .unwrap_or(PieceKind::Queen);
            Piece::new(kind, mov.color())
        } else {
            mov.piece()
        };

        self.set(mov.destination(), placed);
    }

    /// The piece-placement field of FEN: ranks eight to one, empty squares
    /// run-length encoded.
    pub fn placement(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

/// File a rook starts on for the given castle side.
pub(crate) fn rook_file(kingside: bool) -> File {
    if kingside {
        File::H
    } else {
        File::A
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::moves::Move;
    use crate::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn initial_placement() {
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            Board::initial().placement()
        );
    }

    #[test]
    fn initial_is_deterministic() {
        assert_eq!(Board::initial(), Board::initial());
    }

    #[test]
    fn find_king_on_initial_board() {
        let board = Board::initial();
        assert_eq!(Some(Square::E1), board.find_king(Color::White));
        assert_eq!(Some(Square::E8), board.find_king(Color::Black));
    }

    #[test]
    fn find_king_missing() {
        assert_eq!(None, Board::empty().find_king(Color::White));
    }

    #[test]
    fn apply_promotion_defaults_to_queen() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        board.set(Square::B7, pawn);
        let mov = Move::normal(Square::B7, Square::B8, pawn, None).requiring_promotion();
        board.apply_move(&mov, None);
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            board.piece_at(Square::B8)
        );
        assert!(board.is_empty(Square::B7));
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn capturing_a_king_is_fatal() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let king = Piece::new(PieceKind::King, Color::Black);
        board.set(Square::A1, rook);
        board.set(Square::A8, king);
        let mov = Move::normal(Square::A1, Square::A8, rook, Some(king));
        board.apply_move(&mov, None);
    }
}
