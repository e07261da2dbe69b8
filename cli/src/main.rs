use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};
use std::process::ExitCode;

use clap::Parser;
use minefield_core::{Board, BoardConfig, Cell, CellPos, RandomMines};

/// Terminal Minesweeper on the minefield engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Options {
    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    rows: u8,
    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    cols: u8,
    /// Number of mines to place
    #[arg(long, default_value_t = 10)]
    mines: u16,
    /// Seed for reproducible mine placement (omit for OS entropy)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Reveal(CellPos),
    Chord(CellPos),
    Flag(CellPos),
    New,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let mut pos = || -> Option<CellPos> {
        let row = words.next()?.parse().ok()?;
        let col = words.next()?.parse().ok()?;
        Some((row, col))
    };
    match verb {
        "r" => Some(Command::Reveal(pos()?)),
        "c" => Some(Command::Chord(pos()?)),
        "f" => Some(Command::Flag(pos()?)),
        "n" => Some(Command::New),
        "q" => Some(Command::Quit),
        _ => None,
    }
}

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Hidden => '.',
        Cell::Flagged => 'F',
        Cell::Revealed(0) => ' ',
        Cell::Revealed(count) => (b'0' + count) as char,
        Cell::Exploded => 'X',
        Cell::Mine => '*',
    }
}

fn render(board: &Board) -> String {
    let (rows, cols) = board.size();
    let mut out = String::new();

    let _ = write!(out, "   ");
    for col in 0..cols {
        let _ = write!(out, "{:>2}", col % 10);
    }
    let _ = writeln!(out);
    for row in 0..rows {
        let _ = write!(out, "{row:>2} ");
        for col in 0..cols {
            let _ = write!(out, " {}", glyph(board.cell((row, col))));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "[{}] mines left: {}",
        board.status(),
        board.mines_left()
    );
    out
}

fn new_board(config: BoardConfig, seed: Option<u64>, round: u64) -> Board {
    match seed {
        Some(seed) => Board::generate(config, RandomMines::from_seed(seed.wrapping_add(round))),
        None => Board::generate(config, RandomMines::from_entropy()),
    }
}

fn main() -> ExitCode {
    let options = Options::parse();
    let config = match BoardConfig::new(options.rows, options.cols, options.mines) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = run(config, options.seed) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(config: BoardConfig, seed: Option<u64>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut round = 0;
    let mut board = new_board(config, seed, round);

    stdout.write_all(render(&board).as_bytes())?;
    println!("commands: r ROW COL, c ROW COL, f ROW COL, n (new game), q (quit)");

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            println!("unrecognized command: {}", line.trim());
            continue;
        };

        let changed = match command {
            Command::Reveal(pos) => match board.reveal(pos) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
            Command::Chord(pos) => match board.chord_reveal(pos) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
            Command::Flag(pos) => match board.toggle_flag(pos) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
            Command::New => {
                round += 1;
                board = new_board(config, seed, round);
                true
            }
            Command::Quit => break,
        };

        if changed {
            stdout.write_all(render(&board).as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::MineField;

    #[test]
    fn parses_the_command_vocabulary() {
        assert_eq!(parse_command("r 1 2"), Some(Command::Reveal((1, 2))));
        assert_eq!(parse_command("f 0 0"), Some(Command::Flag((0, 0))));
        assert_eq!(parse_command("  c 3 4 "), Some(Command::Chord((3, 4))));
        assert_eq!(parse_command("n"), Some(Command::New));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("r one 2"), None);
        assert_eq!(parse_command("r 1"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn renders_the_snapshot() {
        let mut board = Board::new(MineField::with_mines(2, 2, &[(0, 0)]).unwrap());
        board.toggle_flag((0, 0)).unwrap();
        board.reveal((1, 1)).unwrap();

        let text = render(&board);
        assert!(text.contains('F'));
        assert!(text.contains('1'));
        assert!(text.contains("in progress"));
        assert!(text.contains("mines left: 0"));
    }
}
