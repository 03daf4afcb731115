//! Command-line parsing for a single shell level

use super::level::{LevelKind, Listing};

/// What one input line asks the current level to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line: re-render the last listing
    Repeat,
    /// Re-render a listing and remember it as the last one
    Refresh(Listing),
    /// Enter the child level with the given id
    Descend(String),
    /// Post a comment on the current card
    Comment(String),
    /// Required argument missing; print the message, call nothing
    Usage(String),
    Help,
    Exit,
}

/// Parse a whitespace-delimited line for a level of kind `kind`.
///
/// Unrecognized words map to [`Command::Help`].
pub fn parse(kind: LevelKind, line: &str) -> Command {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((&word, args)) = fields.split_first() else {
        return Command::Repeat;
    };

    match word {
        "exit" => Command::Exit,
        "help" => Command::Help,
        word if word == kind.listing().command() => Command::Refresh(kind.listing()),
        "comment" if kind == LevelKind::Card => {
            if args.is_empty() {
                Command::Usage("usage: comment text...".to_string())
            } else {
                Command::Comment(args.join(" "))
            }
        }
        word => match kind.child() {
            Some(child) if child.noun() == word => match args.first() {
                Some(id) => Command::Descend(id.to_string()),
                None => Command::Usage(format!("missing {} argument", child.noun())),
            },
            _ => Command::Help,
        },
    }
}
