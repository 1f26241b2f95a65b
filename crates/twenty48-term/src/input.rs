use twenty48_core::Move;

use crate::config::KeyBindings;

/// One line of player input, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Start,
    Quit,
}

/// Map a line of input to a command.
///
/// Arrow-key escape sequences and the words `left`/`right`/`up`/`down`/
/// `start`/`restart`/`quit` always work; the configured keys are checked
/// first.
pub fn parse_command(line: &str, keys: &KeyBindings) -> Option<Command> {
    let token = line.trim();
    if token.is_empty() {
        return None;
    }
    let bound = [
        (&keys.left, Command::Move(Move::Left)),
        (&keys.right, Command::Move(Move::Right)),
        (&keys.up, Command::Move(Move::Up)),
        (&keys.down, Command::Move(Move::Down)),
        (&keys.start, Command::Start),
        (&keys.quit, Command::Quit),
    ];
    if let Some((_, cmd)) = bound.iter().find(|(key, _)| key.eq_ignore_ascii_case(token)) {
        return Some(*cmd);
    }

    match token.to_ascii_lowercase().as_str() {
        "\x1b[d" | "left" => Some(Command::Move(Move::Left)),
        "\x1b[c" | "right" => Some(Command::Move(Move::Right)),
        "\x1b[a" | "up" => Some(Command::Move(Move::Up)),
        "\x1b[b" | "down" => Some(Command::Move(Move::Down)),
        "start" | "restart" => Some(Command::Start),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}
