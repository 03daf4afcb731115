//! Trello REST endpoints and the adapter trait the shell consumes
//!
//! [`TrelloApi`] is the whole capability surface the shell needs. The
//! production implementation lives in the `trellosh` crate; tests plug in
//! in-memory fakes.

use crate::error::Result;
use crate::types::{Action, Board, Card, List, Member};
use async_trait::async_trait;

/// REST resources used by the shell, relative to the API base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Member(&'a str),
    MemberBoards(&'a str),
    Board(&'a str),
    BoardLists(&'a str),
    List(&'a str),
    ListCards(&'a str),
    Card(&'a str),
    CardActions(&'a str),
    CardComments(&'a str),
}

impl Endpoint<'_> {
    /// Path relative to the API base, with the id encoded as one segment
    pub fn path(&self) -> String {
        let (resource, id, child) = match *self {
            Endpoint::Member(id) => ("members", id, None),
            Endpoint::MemberBoards(id) => ("members", id, Some("boards")),
            Endpoint::Board(id) => ("boards", id, None),
            Endpoint::BoardLists(id) => ("boards", id, Some("lists")),
            Endpoint::List(id) => ("lists", id, None),
            Endpoint::ListCards(id) => ("lists", id, Some("cards")),
            Endpoint::Card(id) => ("cards", id, None),
            Endpoint::CardActions(id) => ("cards", id, Some("actions")),
            Endpoint::CardComments(id) => ("cards", id, Some("actions/comments")),
        };

        let id = urlencoding::encode(id);
        match child {
            Some(child) => format!("{}/{}/{}", resource, id, child),
            None => format!("{}/{}", resource, id),
        }
    }
}

/// Remote operations the shell delegates to.
///
/// Every call may fail with a transport or API error; callers decide how to
/// report it.
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// Fetch a member by id or username (`me` for the token owner)
    async fn member(&self, id: &str) -> Result<Member>;

    /// Boards the member belongs to
    async fn member_boards(&self, member: &Member) -> Result<Vec<Board>>;

    /// Fetch a board by id
    async fn board(&self, id: &str) -> Result<Board>;

    /// Lists on a board
    async fn board_lists(&self, board: &Board) -> Result<Vec<List>>;

    /// Fetch a list by id
    async fn list(&self, id: &str) -> Result<List>;

    /// Cards in a list
    async fn list_cards(&self, list: &List) -> Result<Vec<Card>>;

    /// Fetch a card by id
    async fn card(&self, id: &str) -> Result<Card>;

    /// Actions recorded on a card
    async fn card_actions(&self, card: &Card) -> Result<Vec<Action>>;

    /// Post a comment on a card, returning the created action
    async fn add_comment(&self, card: &Card, text: &str) -> Result<Action>;
}
