// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::fs::File;
use std::process;
use std::time::Instant;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gambit::record::{CsvGameRecorder, GameRecorder, NullGameRecorder, PlyRecord};
use gambit::report::GameReport;
use gambit::search::{choose_move, Level, MoveDelegate, SelectorConfig};
use gambit::uci::UciEngineDelegate;
use gambit::{perft, Color, GameState};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn seed_arg() -> Arg<'static, 'static> {
    Arg::with_name("seed")
        .help("Seed for tie-breaking; random if absent")
        .value_name("SEED")
        .long("seed")
        .takes_value(true)
}

fn delegate_arg() -> Arg<'static, 'static> {
    Arg::with_name("delegate")
        .help("Consult the UCI engine named by GAMBIT_ENGINE_PATH first")
        .long("delegate")
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .takes_value(true)
                        .default_value("3"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves of a board position")
                .arg(fen_arg()),
        )
        .subcommand(
            SubCommand::with_name("choose")
                .about("Choose a move for the side to move")
                .arg(fen_arg())
                .arg(
                    Arg::with_name("level")
                        .help("easy, hard or very_hard")
                        .value_name("LEVEL")
                        .long("level")
                        .takes_value(true)
                        .default_value("hard"),
                )
                .arg(
                    Arg::with_name("skill")
                        .help("Delegate skill level, 0 to 20")
                        .value_name("SKILL")
                        .long("skill")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("movetime")
                        .help("Delegate think time in milliseconds")
                        .value_name("MS")
                        .long("movetime")
                        .takes_value(true),
                )
                .arg(seed_arg())
                .arg(delegate_arg()),
        )
        .subcommand(
            SubCommand::with_name("selfplay")
                .about("Play the selector against itself")
                .arg(
                    Arg::with_name("white")
                        .help("Level for White")
                        .value_name("LEVEL")
                        .long("white")
                        .takes_value(true)
                        .default_value("hard"),
                )
                .arg(
                    Arg::with_name("black")
                        .help("Level for Black")
                        .value_name("LEVEL")
                        .long("black")
                        .takes_value(true)
                        .default_value("hard"),
                )
                .arg(
                    Arg::with_name("max-plies")
                        .help("Stop after this many plies")
                        .value_name("N")
                        .long("max-plies")
                        .takes_value(true)
                        .default_value("200"),
                )
                .arg(
                    Arg::with_name("csv")
                        .help("Write one row per ply to this file")
                        .value_name("FILE")
                        .long("csv")
                        .takes_value(true),
                )
                .arg(seed_arg())
                .arg(delegate_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("choose", Some(matches)) => run_choose(matches),
        ("selfplay", Some(matches)) => run_selfplay(matches),
        _ => unreachable!(),
    }
}

fn parse_fen(matches: &ArgMatches) -> GameState {
    let fen = matches.value_of("FEN").unwrap();
    match GameState::from_fen(fen) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn make_rng(matches: &ArgMatches) -> StdRng {
    if matches.is_present("seed") {
        StdRng::seed_from_u64(value_t_or_exit!(matches, "seed", u64))
    } else {
        StdRng::from_entropy()
    }
}

fn make_delegate(matches: &ArgMatches) -> Option<UciEngineDelegate> {
    if matches.is_present("delegate") {
        let delegate = UciEngineDelegate::from_env();
        info!("using UCI delegate at {}", delegate.path());
        Some(delegate)
    } else {
        None
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let game = parse_fen(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);

    println!("fen:   {}", game.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", game.board());
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&game, i);
        let ms = start.elapsed().as_millis();
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let game = parse_fen(matches);
    for legal in game.legal_moves() {
        println!("{}", legal);
    }

    process::exit(0);
}

fn run_choose(matches: &ArgMatches) -> ! {
    let game = parse_fen(matches);
    let level = Level::from_name(matches.value_of("level").unwrap_or("hard"));
    let skill = if matches.is_present("skill") {
        Some(value_t_or_exit!(matches, "skill", i64))
    } else {
        None
    };
    let movetime = if matches.is_present("movetime") {
        Some(value_t_or_exit!(matches, "movetime", u64))
    } else {
        None
    };

    let delegate = make_delegate(matches);
    let config = SelectorConfig::new(level)
        .with_budget(skill, movetime)
        .with_delegate(delegate.is_some());
    let mut rng = make_rng(matches);
    let delegate_ref = delegate.as_ref().map(|d| d as &dyn MoveDelegate);
    match choose_move(&game, &config, delegate_ref, &mut rng) {
        Some(selection) => {
            println!("{}", serde_json::to_string(&selection).unwrap());
            process::exit(0);
        }
        None => {
            eprintln!("no legal moves");
            process::exit(1);
        }
    }
}

fn run_selfplay(matches: &ArgMatches) -> ! {
    let white = SelectorConfig::new(Level::from_name(matches.value_of("white").unwrap_or("hard")));
    let black = SelectorConfig::new(Level::from_name(matches.value_of("black").unwrap_or("hard")));
    let max_plies = value_t_or_exit!(matches, "max-plies", u32);
    let delegate = make_delegate(matches);
    let delegate_ref = delegate.as_ref().map(|d| d as &dyn MoveDelegate);
    let mut rng = make_rng(matches);

    let mut recorder: Box<dyn GameRecorder> = match matches.value_of("csv") {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(CsvGameRecorder::new(file)),
            Err(err) => {
                eprintln!("cannot create {}: {}", path, err);
                process::exit(1);
            }
        },
        None => Box::new(NullGameRecorder),
    };

    let mut game = GameState::new();
    let mut ply = 0;
    while ply < max_plies && !game.is_game_over() {
        let config = match game.side_to_move() {
            Color::White => white,
            Color::Black => black,
        }
        .with_delegate(delegate.is_some());

        let selection = match choose_move(&game, &config, delegate_ref, &mut rng) {
            Some(selection) => selection,
            None => break,
        };

        ply += 1;
        if let Err(err) = recorder.record(&PlyRecord::new(ply, &game, &selection)) {
            eprintln!("failed to record ply {}: {}", ply, err);
            process::exit(1);
        }

        if let Err(err) = game.apply_uci_move(&selection.token) {
            eprintln!("selected move {} rejected: {}", selection.token, err);
            process::exit(1);
        }
    }

    let report = GameReport::new(&game);
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    process::exit(0);
}
