//! Navigation levels
//!
//! The shell has four levels: top → board → list → card. Each level is
//! described by a [`LevelKind`], which names its primary listing, the level
//! below it and its help text. A [`Frame`] is one live level on the stack.

use trello_core::{Board, Card, List, Member};

/// Nesting level of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Top,
    Board,
    List,
    Card,
}

/// A listing a level can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Boards,
    Lists,
    Cards,
    Actions,
}

impl Listing {
    /// Command word that refreshes this listing
    pub fn command(self) -> &'static str {
        match self {
            Listing::Boards => "boards",
            Listing::Lists => "lists",
            Listing::Cards => "cards",
            Listing::Actions => "actions",
        }
    }
}

impl LevelKind {
    /// Listing shown on entry and on refresh
    pub fn listing(self) -> Listing {
        match self {
            LevelKind::Top => Listing::Boards,
            LevelKind::Board => Listing::Lists,
            LevelKind::List => Listing::Cards,
            LevelKind::Card => Listing::Actions,
        }
    }

    /// Level entered by this level's descend command
    pub fn child(self) -> Option<LevelKind> {
        match self {
            LevelKind::Top => Some(LevelKind::Board),
            LevelKind::Board => Some(LevelKind::List),
            LevelKind::List => Some(LevelKind::Card),
            LevelKind::Card => None,
        }
    }

    /// Word that names this level in prompts, descend commands and errors
    pub fn noun(self) -> &'static str {
        match self {
            LevelKind::Top => "trellosh",
            LevelKind::Board => "board",
            LevelKind::List => "list",
            LevelKind::Card => "card",
        }
    }

    /// Commands listed by `help`
    pub fn commands(self) -> &'static [&'static str] {
        match self {
            LevelKind::Top => &["boards", "board id", "help", "exit"],
            LevelKind::Board => &["lists", "list id", "help", "exit"],
            LevelKind::List => &["cards", "card id", "help", "exit"],
            LevelKind::Card => &["actions", "comment text", "help", "exit"],
        }
    }
}

/// The entity a level is browsing
#[derive(Debug, Clone)]
pub enum Entity {
    Member(Member),
    Board(Board),
    List(List),
    Card(Card),
}

impl Entity {
    pub fn kind(&self) -> LevelKind {
        match self {
            Entity::Member(_) => LevelKind::Top,
            Entity::Board(_) => LevelKind::Board,
            Entity::List(_) => LevelKind::List,
            Entity::Card(_) => LevelKind::Card,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Member(m) => &m.username,
            Entity::Board(b) => &b.name,
            Entity::List(l) => &l.name,
            Entity::Card(c) => &c.name,
        }
    }
}

/// One level on the navigation stack
#[derive(Debug, Clone)]
pub struct Frame {
    pub entity: Entity,
    /// Listing re-rendered on an empty line
    pub last: Listing,
}

impl Frame {
    pub fn new(entity: Entity) -> Self {
        let last = entity.kind().listing();
        Self { entity, last }
    }

    pub fn kind(&self) -> LevelKind {
        self.entity.kind()
    }

    /// `trellosh> ` at the top, `<noun> <name>> ` below it
    pub fn prompt(&self) -> String {
        match self.kind() {
            LevelKind::Top => "trellosh> ".to_string(),
            kind => format!("{} {}> ", kind.noun(), self.entity.name()),
        }
    }
}
