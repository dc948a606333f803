// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ply-by-ply game records, for self-play data.
use std::io::Write;

use csv::Writer;

use crate::game::GameState;
use crate::search::Selection;

/// One committed ply: the position it was played from and how it was chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub ply: u32,
    pub fen: String,
    pub token: String,
    pub provenance: String,
    pub side: String,
}

impl PlyRecord {
    /// A record for `selection`, played from `game` before it is committed.
    pub fn new(ply: u32, game: &GameState, selection: &Selection) -> PlyRecord {
        PlyRecord {
            ply,
            fen: game.as_fen(),
            token: selection.token.clone(),
            provenance: selection.provenance.to_string(),
            side: game.side_to_move().to_string(),
        }
    }
}

pub trait GameRecorder {
    fn record(&mut self, rec: &PlyRecord) -> Result<(), csv::Error>;
}

pub struct NullGameRecorder;

impl GameRecorder for NullGameRecorder {
    fn record(&mut self, _rec: &PlyRecord) -> Result<(), csv::Error> {
        Ok(())
    }
}

/// Writes one CSV row per ply, with a header row first.
pub struct CsvGameRecorder<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvGameRecorder<W> {
    pub fn new(writer: W) -> CsvGameRecorder<W> {
        CsvGameRecorder {
            writer: Writer::from_writer(writer),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))
    }
}

impl<W: Write> GameRecorder for CsvGameRecorder<W> {
    fn record(&mut self, rec: &PlyRecord) -> Result<(), csv::Error> {
        self.writer.serialize(rec)?;
        self.writer.flush()?;
        Ok(())
    }
}
