//! Line-oriented text protocol for driving the engine from a front end.
//!
//! The format follows GTP conventions: each request is one line with an
//! optional numeric id, and each response is `=id message` on success or
//! `?id message` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (2)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `clear_board` - Start a new game on an empty board
//! - `play <color> <x,y>` - Place a stone
//! - `genmove <color>` - Search, place and return a move as `x,y`
//! - `victory <color>` - Report a five as `x,y direction`, or `none`
//! - `draw` - Report whether no admissible cell is left
//! - `showboard` - Print the board
//! - `move_time <ms>` - Set the time budget per move
//! - `max_depth <n>` - Set the deepest search pass
//!
//! Colors are `black`/`b`/`x` and `white`/`w`/`o`.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::board::{Color, Point};
use crate::search::Engine;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "draw",
    "genmove",
    "known_command",
    "list_commands",
    "max_depth",
    "move_time",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
    "victory",
];

/// Protocol session state.
pub struct TextEngine {
    engine: Engine,
}

impl TextEngine {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_color(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "b" | "black" | "x" => Some(Color::Black),
            "w" | "white" | "o" => Some(Color::White),
            _ => None,
        }
    }

    /// Parse a vertex written as `x,y`.
    fn parse_vertex(s: &str) -> Option<Point> {
        let (x, y) = s.split_once(',')?;
        Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "gomoku-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.engine.reset_for_new_game();
                (true, String::new())
            }

            "play" => {
                let (Some(color), Some(vertex)) = (
                    args.first().and_then(|s| Self::parse_color(s)),
                    args.get(1).and_then(|s| Self::parse_vertex(s)),
                ) else {
                    return (false, "syntax error: expected play <color> <x,y>".to_string());
                };
                match self.engine.place_stone(color, vertex.0, vertex.1) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|s| Self::parse_color(s)) else {
                    return (false, "syntax error: expected genmove <color>".to_string());
                };
                let (x, y) = match self.engine.get_best_move(color) {
                    Ok(pt) => pt,
                    Err(e) => return (false, e.to_string()),
                };
                match self.engine.place_stone(color, x, y) {
                    Ok(()) => (true, format!("{x},{y}")),
                    Err(e) => (false, e.to_string()),
                }
            }

            "victory" => {
                let Some(color) = args.first().and_then(|s| Self::parse_color(s)) else {
                    return (false, "syntax error: expected victory <color>".to_string());
                };
                match self.engine.is_victory(color) {
                    Some(v) => (
                        true,
                        format!("{},{} {}", v.anchor.0, v.anchor.1, v.direction.code()),
                    ),
                    None => (true, "none".to_string()),
                }
            }

            "draw" => (true, self.engine.is_draw().to_string()),

            "showboard" => (true, format!("\n{}", self.engine.board())),

            "move_time" => match args.first().map(|s| s.parse::<u64>()) {
                Some(Ok(ms)) => {
                    self.engine.set_move_time(Duration::from_millis(ms));
                    (true, String::new())
                }
                _ => (false, "invalid time".to_string()),
            },

            "max_depth" => match args.first().map(|s| s.parse::<usize>()) {
                Some(Ok(depth)) if depth > 0 => {
                    self.engine.set_max_depth(depth);
                    (true, String::new())
                }
                _ => (false, "invalid depth".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
