// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    error::Error,
    fmt,
    io::{self, BufRead, Write},
    str::FromStr,
};

use clap::{value_t, App, Arg, ArgMatches, ErrorKind};
use log::info;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;

use soloship::{
    board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE},
    BoardSize, Cell, FleetPlacer, GameConfig, GameState, GameStatus, HitOutcome, Mark,
    TurnBudget,
};

use crate::logging::init_logging;

mod logging;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let matches = cli().get_matches();

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());

    println!(
        "
**********************
** Battleship Game! **
**********************
"
    );

    let size = match optional_arg::<usize>(&matches, "size") {
        Some(size) => BoardSize::try_new(size)?,
        None => choose_board_size(&mut input)?,
    };
    let mut config = GameConfig::new(size.get());
    if let Some(ships) = optional_arg(&matches, "ships") {
        config = config.with_ship_count(ships);
    }
    let placer = FleetPlacer::new(&config)?;

    let mut rng = match optional_arg::<u64>(&matches, "seed") {
        Some(seed) => {
            println!("Using fixed seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    println!("\nCreating board....");
    let mut game = GameState::new(placer.place_fleet(&mut rng)?);
    let mut turns = optional_arg(&matches, "turns")
        .map_or_else(|| TurnBudget::for_game(&game), TurnBudget::new);

    if matches.is_present("reveal") {
        println!("\nEnemy fleet:");
        show_revealed_board(&game);
    }

    play(&mut game, &mut turns, &mut input)?;
    Ok(())
}

/// Command line interface of the game.
fn cli<'a, 'b>() -> App<'a, 'b> {
    App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Sink a randomly placed enemy fleet before your turns run out.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("N")
                .help("board dimension, between 5 and 26 (prompted for if omitted)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ships")
                .long("ships")
                .value_name("COUNT")
                .help("number of enemy ships (defaults to the board dimension)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("turns")
                .short("t")
                .long("turns")
                .value_name("TURNS")
                .help("override the turn budget (defaults to fleet cells + board dimension)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("fix the RNG seed for a reproducible fleet")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("reveal")
                .long("reveal")
                .help("show the enemy fleet before the first turn"),
        )
}

/// Get an optional argument parsed as `T`. Exits with clap's usage message if the value
/// does not parse.
fn optional_arg<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    match value_t!(matches, name, T) {
        Ok(value) => Some(value),
        Err(ref err) if err.kind == ErrorKind::ArgumentNotFound => None,
        Err(err) => err.exit(),
    }
}

/// Ask for the board dimension until a supported one is entered.
fn choose_board_size<B: BufRead>(input: &mut InputReader<B>) -> io::Result<BoardSize> {
    let prompt = format!(
        "Enter the desired dimension of the board (between {} and {})\nE.g. Enter 5 for a 5x5 board:",
        MIN_BOARD_SIZE, MAX_BOARD_SIZE
    );
    input.read_input(&prompt, |input| match input.parse() {
        Err(_) => {
            println!("\nInvalid input, try again.\n");
            None
        }
        Ok(size) => match BoardSize::try_new(size) {
            Ok(size) => Some(size),
            Err(err) => {
                println!("\n{}.\n", err);
                None
            }
        },
    })
}

/// Run turns until the game is won or the budget runs out.
fn play<B: BufRead>(
    game: &mut GameState,
    turns: &mut TurnBudget,
    input: &mut InputReader<B>,
) -> Result<(), Box<dyn Error>> {
    if turns.is_exhausted() {
        game.exhaust_turns();
    }
    show_hidden_board(game);
    while !game.status().is_over() {
        println!("Turns = {}", turns.remaining());
        let cell = choose_target(game.size(), input)?;
        match turns.play(game, cell)? {
            HitOutcome::Repeat => {
                println!("\nYou have already chosen this position, choose another one.\n");
                continue;
            }
            HitOutcome::Miss => println!("\nMiss."),
            HitOutcome::Hit(_) => println!("\nYou have scored a hit!"),
            HitOutcome::HitAndSunk(ship) => {
                println!("\nYou have scored a hit!");
                println!("\nYou have sunken ship {}!", ship);
            }
            HitOutcome::HitAndGameWon(ship) => {
                println!("\nYou have scored a hit!");
                println!("\nYou have sunken ship {}!", ship);
                println!("\nYou have sunken all ships!");
            }
        }
        show_hidden_board(game);
    }

    match game.status() {
        GameStatus::Won => println!("\nCongratulations! You have won the game!\n"),
        GameStatus::LostByTurnExhaustion => {
            println!("\nGame over! You have failed to sink all ships.\n");
            show_revealed_board(game);
        }
        GameStatus::InProgress => unreachable!(),
    }
    info!(
        "game finished: {:?} with {} turn(s) left",
        game.status(),
        turns.remaining()
    );
    Ok(())
}

/// Read the next target cell from the player.
fn choose_target<B: BufRead>(size: BoardSize, input: &mut InputReader<B>) -> io::Result<Cell> {
    let prompt = format!(
        "Choose your next move (A1 - {}):",
        Cell::new(size.get() - 1, size.get() - 1)
    );
    input.read_input_lower(&prompt, |input| parse_target(input, size))
}

/// Parse a target like `b3`, `b 3` or `b,3`: column letter, then 1-based row. Prints why
/// the input was rejected and returns `None` if it is not a cell on the board.
fn parse_target(input: &str, size: BoardSize) -> Option<Cell> {
    /// Column letter followed by row number.
    static TARGET: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<col>[a-z])\s*(?:,\s*)?(?P<row>[0-9]+)$").unwrap()
    });

    let captures = match TARGET.captures(input) {
        Some(captures) => captures,
        None => {
            println!("\nInput must be a letter followed by a number, try again.\n");
            return None;
        }
    };
    let letter = captures["col"].as_bytes()[0];
    let col = (letter - b'a') as usize;
    if col >= size.get() {
        println!(
            "\nColumn {} is outside range, try again.\n",
            letter.to_ascii_uppercase() as char
        );
        return None;
    }
    let row = match captures["row"].parse::<usize>() {
        Ok(row) if (1..=size.get()).contains(&row) => row - 1,
        _ => {
            println!(
                "\nRow must be between 1 and {}, try again.\n",
                size.get()
            );
            return None;
        }
    };
    Some(Cell::new(row, col))
}

/// Print the board as the player knows it.
fn show_hidden_board(game: &GameState) {
    enum HiddenCell {
        NotShot,
        Miss,
        Hit(soloship::ShipId),
    }
    impl fmt::Display for HiddenCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                HiddenCell::NotShot => f.pad("~~"),
                HiddenCell::Miss => f.pad("*"),
                HiddenCell::Hit(ship) => f.pad(&ship.to_string()),
            }
        }
    }
    show_board(
        game.size(),
        game.iter_rows().map(|row| {
            row.map(|cell| match cell.mark() {
                Mark::Unknown => HiddenCell::NotShot,
                Mark::Miss => HiddenCell::Miss,
                Mark::Hit(ship) => HiddenCell::Hit(ship),
            })
        }),
    )
}

/// Print out the fully-revealed board.
fn show_revealed_board(game: &GameState) {
    enum RevealedCell {
        Empty,
        Shot,
        NotShot(soloship::ShipId),
        Hit(soloship::ShipId),
    }
    impl fmt::Display for RevealedCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                RevealedCell::Empty => f.pad("~~"),
                RevealedCell::Shot => f.pad("*"),
                RevealedCell::NotShot(ship) => f.pad(&ship.to_string()),
                RevealedCell::Hit(ship) => f.pad(&format!("x{}", ship)),
            }
        }
    }
    show_board(
        game.size(),
        game.iter_rows().map(|row| {
            row.map(|cell| match (cell.owner(), cell.mark()) {
                (None, Mark::Unknown) => RevealedCell::Empty,
                (None, _) => RevealedCell::Shot,
                (Some(ship), Mark::Unknown) => RevealedCell::NotShot(ship),
                (Some(ship), _) => RevealedCell::Hit(ship),
            })
        }),
    )
}

/// Show the board by printing the grid with column letters and 1-based row numbers.
/// Takes an iterator over the rows of iterators over the items.
fn show_board(
    size: BoardSize,
    rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>,
) {
    println!();
    print!("   ");
    for col in 0..size.get() {
        print!("{:^4}", (b'A' + col as u8) as char);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i + 1);
        for cell in row {
            print!("{:^4}", cell);
        }
        println!();
    }
    println!();
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Running out
    /// of input is reported as [`io::ErrorKind::UnexpectedEof`].
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the game finished",
            ));
        }
        Ok(())
    }
}
