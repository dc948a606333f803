// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! FEN import and export for `GameState`.
//!
//! A FEN record has six space-separated fields: piece placement, side to
//! move, castling rights, en passant target, halfmove clock and fullmove
//! number. The two clocks may be omitted, in which case they default to 0
//! and 1. Imported positions start with an empty undo history and count
//! their own position once for repetition purposes.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::board::Board;
use crate::game::GameState;
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece(char),
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    InvalidHalfmove,
    InvalidFullmove,
    TrailingInput,
    /// Each side must have exactly one king.
    KingCount(Color, usize),
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square digits must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight files"),
            FenParseError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant field"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
            FenParseError::TrailingInput => write!(f, "trailing input after fullmove number"),
            FenParseError::KingCount(color, count) => {
                let name = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                write!(f, "{} has {} kings, expected exactly one", name, count)
            }
        }
    }
}

impl Error for FenParseError {}

fn parse_placement(field: &str) -> Result<Board, FenParseError> {
    let mut board = Board::empty();
    let iter = &mut field.chars().peekable();
    for &rank in RANKS.iter().rev() {
        let mut file = 0usize;
        while file < 8 {
            let c = iter.next().ok_or(FenParseError::UnexpectedEnd)?;
            if let Some(run) = c.to_digit(10) {
                if run < 1 || run > 8 {
                    return Err(FenParseError::InvalidDigit);
                }

                file += run as usize;
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                continue;
            }

            if c == '/' {
                return Err(FenParseError::FileDoesNotSumToEight);
            }

            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            board.set(Square::of(rank, File::from_index(file)), piece);
            file += 1;
        }

        if rank != Rank::One {
            match iter.next() {
                Some('/') => {}
                Some(c) => return Err(FenParseError::UnexpectedChar(c)),
                None => return Err(FenParseError::UnexpectedEnd),
            }
        }
    }

    if let Some(c) = iter.next() {
        return Err(FenParseError::UnexpectedChar(c));
    }

    for &color in &COLORS {
        let kings = board.count(Piece::new(PieceKind::King, color));
        if kings != 1 {
            return Err(FenParseError::KingCount(color, kings));
        }
    }

    Ok(board)
}

fn parse_side_to_move(field: &str) -> Result<Color, FenParseError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenParseError::InvalidSideToMove),
    }
}

fn parse_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
    if field == "-" {
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => CastleStatus::WHITE_KINGSIDE,
            'Q' => CastleStatus::WHITE_QUEENSIDE,
            'k' => CastleStatus::BLACK_KINGSIDE,
            'q' => CastleStatus::BLACK_QUEENSIDE,
            _ => return Err(FenParseError::InvalidCastle),
        };

        if status.contains(flag) {
            return Err(FenParseError::InvalidCastle);
        }

        status |= flag;
    }

    if status.is_empty() {
        return Err(FenParseError::InvalidCastle);
    }

    Ok(status)
}

fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenParseError> {
    if field == "-" {
        return Ok(None);
    }

    let mut chars = field.chars();
    let file = chars.next().and_then(|c| File::try_from(c).ok());
    let rank = chars.next().and_then(|c| Rank::try_from(c).ok());
    match (file, rank, chars.next()) {
        // the target always sits behind the pawn that just double-stepped,
        // on the mover's opponent's third rank.
        (Some(file), Some(rank), None) if rank == ep_rank(side_to_move) => {
            Ok(Some(Square::of(rank, file)))
        }
        _ => Err(FenParseError::InvalidEnPassant),
    }
}

fn ep_rank(side_to_move: Color) -> Rank {
    match side_to_move {
        Color::White => Rank::Six,
        Color::Black => Rank::Three,
    }
}

fn parse_clock(field: Option<&str>, default: u32, err: FenParseError) -> Result<u32, FenParseError> {
    match field {
        None => Ok(default),
        Some(text) if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) => {
            text.parse::<u32>().map_err(|_| err)
        }
        Some(_) => Err(err),
    }
}

//
// FEN parsing and generation
//

impl GameState {
    /// Constructs a new game from a FEN representation of a position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        let mut fields = fen.as_ref().split_whitespace();
        let mut next_field = || fields.next().ok_or(FenParseError::UnexpectedEnd);

        let board = parse_placement(next_field()?)?;
        let side_to_move = parse_side_to_move(next_field()?)?;
        let castle_status = parse_castle_status(next_field()?)?;
        let en_passant_square = parse_en_passant(next_field()?, side_to_move)?;
        let halfmove_clock = parse_clock(next_field().ok(), 0, FenParseError::InvalidHalfmove)?;
        let fullmove_number = parse_clock(next_field().ok(), 1, FenParseError::InvalidFullmove)?;
        if next_field().is_ok() {
            return Err(FenParseError::TrailingInput);
        }

        debug!("parsed FEN into {} to move", side_to_move);
        Ok(GameState::from_parts(
            board,
            side_to_move,
            castle_status,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
        ))
    }

    /// The FEN record of the current position. The en passant field shows the
    /// target square whenever the last move was a double step, whether or not
    /// a capture is actually available.
    pub fn as_fen(&self) -> String {
        let mut buf = self.board().placement();
        write!(&mut buf, " {} {}", self.side_to_move(), self.castle_status()).unwrap();
        match self.en_passant_square() {
            Some(square) => write!(&mut buf, " {}", square).unwrap(),
            None => buf.push_str(" -"),
        }

        write!(
            &mut buf,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        )
        .unwrap();
        buf
    }
}
