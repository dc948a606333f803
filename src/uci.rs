// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `MoveDelegate` backed by an external UCI engine process.
//!
//! The engine is started fresh for every suggestion, told the skill level and
//! position, and given a fixed think time. Anything that goes wrong along the
//! way (the binary is missing, the pipe closes, the engine answers
//! `bestmove (none)` or never answers before its deadline) is logged and
//! reported as "no suggestion".
use std::env;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::search::{Budget, MoveDelegate};

/// Environment variable naming the engine binary.
pub const ENGINE_PATH_VAR: &str = "GAMBIT_ENGINE_PATH";
pub const DEFAULT_ENGINE_PATH: &str = "stockfish";

const STARTUP_SLACK: Duration = Duration::from_millis(1000);

pub struct UciEngineDelegate {
    path: String,
}

impl UciEngineDelegate {
    pub fn new<S: Into<String>>(path: S) -> UciEngineDelegate {
        UciEngineDelegate { path: path.into() }
    }

    /// Uses `GAMBIT_ENGINE_PATH`, or `stockfish` on the `PATH` if unset.
    pub fn from_env() -> UciEngineDelegate {
        let path = env::var(ENGINE_PATH_VAR).unwrap_or_else(|_| DEFAULT_ENGINE_PATH.to_string());
        UciEngineDelegate::new(path)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn run(&self, fen: &str, budget: &Budget) -> io::Result<Option<String>> {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let (mut stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "engine pipes unavailable",
                ));
            }
        };

        let (tx, rx) = mpsc::channel();
        let fen = fen.to_string();
        let budget = *budget;
        thread::spawn(move || {
            let mut reader = BufReader::new(stdout);
            let answer = exchange(&mut reader, &mut stdin, &fen, &budget);
            let _ = writeln!(stdin, "quit");
            let _ = tx.send(answer);
        });

        let result = match rx.recv_timeout(deadline(&budget)) {
            Ok(answer) => answer,
            Err(RecvTimeoutError::Timeout) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "engine missed its deadline",
            )),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "engine conversation ended without an answer",
            )),
        };

        // Killing the child closes its stdout, which unblocks the worker.
        if result.is_err() {
            let _ = child.kill();
        }

        let _ = child.wait();
        result
    }
}

/// How long to wait for `bestmove`: twice the think time, plus slack for
/// process startup and the handshake.
fn deadline(budget: &Budget) -> Duration {
    Duration::from_millis(budget.think_time_ms.saturating_mul(2)) + STARTUP_SLACK
}

impl Default for UciEngineDelegate {
    fn default() -> Self {
        UciEngineDelegate::from_env()
    }
}

impl MoveDelegate for UciEngineDelegate {
    fn suggest(&self, fen: &str, budget: &Budget) -> Option<String> {
        match self.run(fen, budget) {
            Ok(answer) => answer,
            Err(err) => {
                warn!("UCI engine {} failed: {}", self.path, err);
                None
            }
        }
    }
}

/// Drives one UCI conversation: handshake, skill level, position, a timed
/// search, and the `bestmove` answer. Returns None if the engine has no move.
pub fn exchange<R, W>(reader: &mut R, writer: &mut W, fen: &str, budget: &Budget) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    send(writer, "uci")?;
    wait_for(reader, "uciok")?;
    send(writer, &format!("setoption name Skill Level value {}", budget.skill))?;
    send(writer, "isready")?;
    wait_for(reader, "readyok")?;
    send(writer, &format!("position fen {}", fen))?;
    send(writer, &format!("go movetime {}", budget.think_time_ms))?;

    let line = wait_for(reader, "bestmove")?;
    let best = line.split_whitespace().nth(1);
    debug!("UCI engine answered {:?}", best);
    Ok(match best {
        Some("(none)") | Some("0000") | None => None,
        Some(token) => Some(token.to_string()),
    })
}

fn send<W: Write>(writer: &mut W, command: &str) -> io::Result<()> {
    trace!("uci > {}", command);
    writeln!(writer, "{}", command)?;
    writer.flush()
}

/// Reads lines until one starts with `keyword` and returns it.
fn wait_for<R: BufRead>(reader: &mut R, keyword: &str) -> io::Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("engine closed before {}", keyword),
            ));
        }

        trace!("uci < {}", line.trim_end());
        if line.split_whitespace().next() == Some(keyword) {
            return Ok(line.trim_end().to_string());
        }
    }
}
