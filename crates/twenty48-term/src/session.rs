use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::debug;
use twenty48_core::engine::TileSource;
use twenty48_core::{GameEngine, Status};

use crate::config::KeyBindings;
use crate::input::{parse_command, Command};

/// Terminal front-end around one [`GameEngine`]: decodes input, forwards it
/// and re-renders after every command.
pub struct Session<R> {
    game: GameEngine<R>,
    keys: KeyBindings,
    started: bool,
}

impl<R: TileSource> Session<R> {
    pub fn new(game: GameEngine<R>, keys: KeyBindings) -> Self {
        Self {
            game,
            keys,
            started: false,
        }
    }

    pub fn game(&self) -> &GameEngine<R> {
        &self.game
    }

    /// Apply one command. Returns false once the player asked to quit.
    ///
    /// Directional input is ignored unless the game is in progress, so a
    /// won or lost board stays on screen until the next start.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return false,
            Command::Start => {
                self.game.start();
                self.started = true;
            }
            Command::Move(dir) => {
                if self.game.status() != Status::Playing {
                    debug!("ignoring {:?} while {}", dir, self.game.status());
                    return true;
                }
                self.game.apply(dir);
            }
        }
        true
    }

    /// Full frame: score, grid, status message and key hints.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Score: {}\n\n", self.game.score()));
        out.push_str(&self.game.board().to_string());
        out.push('\n');
        match self.game.status() {
            Status::Idle if !self.started => {
                out.push_str(&format!("Press {} to start\n", self.keys.start));
            }
            Status::Win => out.push_str("You win! 2048 reached.\n"),
            Status::Lose => out.push_str("Game over. No moves left.\n"),
            _ => {}
        }
        let label = if self.started { "restart" } else { "start" };
        out.push_str(&format!(
            "[{}/{}/{}/{}] move  [{}] {}  [{}] quit\n",
            self.keys.up,
            self.keys.left,
            self.keys.down,
            self.keys.right,
            self.keys.start,
            label,
            self.keys.quit
        ));
        out
    }

    /// Read commands line by line until quit or EOF.
    pub fn run<I: BufRead, W: Write>(&mut self, input: I, mut output: W) -> Result<()> {
        write!(output, "{}", self.render()).context("failed to write frame")?;
        output.flush().context("failed to flush output")?;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let Some(cmd) = parse_command(&line, &self.keys) else {
                debug!("unrecognised input {:?}", line);
                continue;
            };
            if !self.handle(cmd) {
                break;
            }
            write!(output, "{}", self.render()).context("failed to write frame")?;
            output.flush().context("failed to flush output")?;
        }
        Ok(())
    }
}
