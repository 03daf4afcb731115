//! Interactive navigation shell
//!
//! The shell reads one command per line and keeps a stack of levels
//! (top → board → list → card). Descending pushes a level and `exit` pops
//! one; popping the top level ends the session, as does end of input.
//!
//! Remote failures are printed as `<context> error: <message>` and the
//! shell re-prompts at the same level. Only I/O errors on the input or
//! output streams are returned to the caller.

mod command;
mod level;

pub use command::{parse, Command};
pub use level::{Entity, Frame, LevelKind, Listing};

use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};
use trello_core::TrelloApi;

use crate::format::{
    format_actions, format_boards, format_cards, format_error, format_lists, format_success,
    OutputFormat,
};

/// Interactive shell over a [`TrelloApi`]
pub struct Shell<'a> {
    api: &'a dyn TrelloApi,
    format: OutputFormat,
}

impl<'a> Shell<'a> {
    pub fn new(api: &'a dyn TrelloApi, format: OutputFormat) -> Self {
        Self { api, format }
    }

    /// Run a session for `member_id`, reading commands from `input` and
    /// writing prompts, listings and errors to `out`.
    ///
    /// Returns when the top level exits or `input` ends.
    pub async fn run<R, W>(&self, member_id: &str, mut input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let member = match self.api.member(member_id).await {
            Ok(member) => member,
            Err(e) => {
                warn!(member = member_id, error = %e, "cannot load member");
                writeln!(out, "{}", format_error("load member", &e))?;
                return Ok(());
            }
        };

        let mut stack = vec![Frame::new(Entity::Member(member))];
        self.render(&stack[0], out).await?;

        let mut buf = Vec::new();
        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            write!(out, "{}", frame.prompt())?;
            out.flush()?;

            let Some(line) = read_line(&mut input, &mut buf).await? else {
                break;
            };

            match parse(frame.kind(), &line) {
                Command::Repeat => self.render(frame, out).await?,
                Command::Refresh(listing) => {
                    frame.last = listing;
                    self.render(frame, out).await?;
                }
                Command::Descend(id) => {
                    if let Some(child) = self.descend(frame, &id, out).await? {
                        self.render(&child, out).await?;
                        stack.push(child);
                    }
                }
                Command::Comment(text) => self.comment(frame, &text, out).await?,
                Command::Usage(message) => writeln!(out, "{}", message)?,
                Command::Help => {
                    writeln!(out, "commands:")?;
                    for command in frame.kind().commands() {
                        writeln!(out, "  {}", command)?;
                    }
                }
                Command::Exit => {
                    if let Some(frame) = stack.pop() {
                        debug!(level = frame.kind().noun(), "leaving level");
                    }
                }
            }
        }

        Ok(())
    }

    /// Fetch and print the frame's last listing
    async fn render<W: Write>(&self, frame: &Frame, out: &mut W) -> io::Result<()> {
        let listing = frame.last;
        let rendered = match (&frame.entity, listing) {
            (Entity::Member(member), Listing::Boards) => self
                .api
                .member_boards(member)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|boards| format_boards(&boards, &self.format)),
            (Entity::Board(board), Listing::Lists) => self
                .api
                .board_lists(board)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|lists| format_lists(&lists, &self.format)),
            (Entity::List(list), Listing::Cards) => self
                .api
                .list_cards(list)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|cards| format_cards(&cards, &self.format)),
            (Entity::Card(card), Listing::Actions) => self
                .api
                .card_actions(card)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|actions| format_actions(&actions, &self.format)),
            // A level only ever records its own listing
            (entity, listing) => {
                debug!(level = entity.kind().noun(), ?listing, "listing not available");
                return Ok(());
            }
        };

        match rendered {
            Ok(text) => writeln!(out, "{}", text),
            Err(e) => {
                warn!(listing = listing.command(), error = %e, "listing failed");
                writeln!(out, "{}", format_error(listing.command(), &e))
            }
        }
    }

    /// Fetch the child entity `id` below `parent`.
    ///
    /// Prints the failure and returns `None` when the fetch fails.
    async fn descend<W: Write>(
        &self,
        parent: &Frame,
        id: &str,
        out: &mut W,
    ) -> io::Result<Option<Frame>> {
        let Some(kind) = parent.kind().child() else {
            return Ok(None);
        };

        let entity = match kind {
            LevelKind::Board => self.api.board(id).await.map(Entity::Board),
            LevelKind::List => self.api.list(id).await.map(Entity::List),
            LevelKind::Card => self.api.card(id).await.map(Entity::Card),
            LevelKind::Top => return Ok(None),
        };

        match entity {
            Ok(entity) => {
                debug!(level = kind.noun(), id, "entering level");
                Ok(Some(Frame::new(entity)))
            }
            Err(e) => {
                warn!(level = kind.noun(), id, error = %e, "cannot enter level");
                let context = format!("load {}", kind.noun());
                writeln!(out, "{}", format_error(&context, &e))?;
                Ok(None)
            }
        }
    }

    async fn comment<W: Write>(&self, frame: &Frame, text: &str, out: &mut W) -> io::Result<()> {
        let Entity::Card(card) = &frame.entity else {
            return Ok(());
        };

        match self.api.add_comment(card, text).await {
            Ok(action) => {
                debug!(card = %card.id, action = %action.id, "comment posted");
                let message = format!("Comment added to card {}", card.name);
                writeln!(out, "{}", format_success(&message))
            }
            Err(e) => {
                warn!(card = %card.id, error = %e, "comment failed");
                writeln!(out, "{}", format_error("comment", &e))
            }
        }
    }
}

/// Read one line without its terminator. Bytes that are not UTF-8 are
/// replaced, so a garbled line parses as an unknown command.
async fn read_line<R>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if input.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
