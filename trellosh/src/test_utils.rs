//! Test utilities for shell testing
//!
//! Provides a fixture Trello workspace, an axum mock of the Trello REST API
//! and an in-memory [`TrelloApi`] fake that records every call.

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use trello_core::{
    Action, ActionData, Board, Card, List, Member, TrelloApi, TrelloError, CURRENT_MEMBER,
};

/// Token the mock server accepts
pub const TEST_TOKEN: &str = "test-token";

/// A small Trello workspace: one member, two boards, three lists, three cards
#[derive(Debug, Clone)]
pub struct Fixture {
    pub member: Member,
    pub boards: Vec<Board>,
    pub lists: Vec<List>,
    pub cards: Vec<Card>,
    /// Card id to actions, newest first
    pub actions: HashMap<String, Vec<Action>>,
    next_action: u32,
}

impl Default for Fixture {
    fn default() -> Self {
        let member = Member {
            id: "M1".to_string(),
            username: "alice".to_string(),
            full_name: "Alice Example".to_string(),
        };

        let board = |id: &str, name: &str| Board {
            id: id.to_string(),
            name: name.to_string(),
            short_url: format!("https://trello.com/b/{}", id.to_lowercase()),
            closed: false,
        };
        let list = |id: &str, name: &str, board: &str| List {
            id: id.to_string(),
            name: name.to_string(),
            id_board: board.to_string(),
            closed: false,
        };
        let card = |id: &str, name: &str, list: &str| Card {
            id: id.to_string(),
            name: name.to_string(),
            id_list: list.to_string(),
            short_url: format!("https://trello.com/c/{}", id.to_lowercase()),
        };

        let mut actions = HashMap::new();
        actions.insert(
            "C1".to_string(),
            vec![
                Action {
                    id: "A1".to_string(),
                    kind: "commentCard".to_string(),
                    data: ActionData {
                        text: Some("first!".to_string()),
                    },
                    date: None,
                },
                Action {
                    id: "A2".to_string(),
                    kind: "createCard".to_string(),
                    data: ActionData::default(),
                    date: None,
                },
            ],
        );

        Self {
            member,
            boards: vec![
                board("B1", "Roadmap"),
                board("B2", "A board with a rather long name"),
            ],
            lists: vec![
                list("L1", "Backlog", "B1"),
                list("L2", "Done", "B1"),
                list("L3", "Ideas", "B2"),
            ],
            cards: vec![
                card("C1", "Write docs", "L1"),
                card("C2", "Ship it", "L1"),
                card("C3", "Set up CI", "L2"),
            ],
            actions,
            next_action: 3,
        }
    }
}

impl Fixture {
    pub fn member(&self, id: &str) -> Option<Member> {
        let m = &self.member;
        (id == CURRENT_MEMBER || id == m.id || id == m.username).then(|| m.clone())
    }

    pub fn board(&self, id: &str) -> Option<Board> {
        self.boards.iter().find(|b| b.id == id).cloned()
    }

    pub fn list(&self, id: &str) -> Option<List> {
        self.lists.iter().find(|l| l.id == id).cloned()
    }

    pub fn card(&self, id: &str) -> Option<Card> {
        self.cards.iter().find(|c| c.id == id).cloned()
    }

    pub fn lists_on(&self, board_id: &str) -> Vec<List> {
        self.lists
            .iter()
            .filter(|l| l.id_board == board_id)
            .cloned()
            .collect()
    }

    pub fn cards_in(&self, list_id: &str) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|c| c.id_list == list_id)
            .cloned()
            .collect()
    }

    pub fn actions_on(&self, card_id: &str) -> Vec<Action> {
        self.actions.get(card_id).cloned().unwrap_or_default()
    }

    /// Record a comment as the newest action on a card
    pub fn comment(&mut self, card_id: &str, text: &str) -> Action {
        let action = Action {
            id: format!("A{}", self.next_action),
            kind: "commentCard".to_string(),
            data: ActionData {
                text: Some(text.to_string()),
            },
            date: None,
        };
        self.next_action += 1;
        self.actions
            .entry(card_id.to_string())
            .or_default()
            .insert(0, action.clone());
        action
    }
}

/// Mock server state
#[derive(Debug, Clone, Default)]
pub struct MockTrelloState {
    pub fixture: Arc<Mutex<Fixture>>,
    /// Posted comments as (card id, text)
    pub comments: Arc<Mutex<Vec<(String, String)>>>,
}

/// Mock of the Trello REST API
#[derive(Debug, Default)]
pub struct MockTrello {
    state: MockTrelloState,
    port: u16,
}

impl MockTrello {
    /// Create a new mock server
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the mock server and return the base URL
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        self.port = listener.local_addr()?.port();

        let server_url = format!("http://127.0.0.1:{}/1", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock server error: {}", e);
            }
        });

        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Comments posted so far, oldest first
    pub fn comments(&self) -> Vec<(String, String)> {
        self.state.comments.lock().unwrap().clone()
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/1/members/:id", get(member_handler))
            .route("/1/members/:id/boards", get(member_boards_handler))
            .route("/1/boards/:id", get(board_handler))
            .route("/1/boards/:id/lists", get(board_lists_handler))
            .route("/1/lists/:id", get(list_handler))
            .route("/1/lists/:id/cards", get(list_cards_handler))
            .route("/1/cards/:id", get(card_handler))
            .route("/1/cards/:id/actions", get(card_actions_handler))
            .route("/1/cards/:id/actions/comments", post(add_comment_handler))
            .with_state(self.state.clone())
    }
}

type Params = Query<HashMap<String, String>>;

/// Trello answers bad tokens with 401 and unknown ids with 400 `invalid id`
fn authorize(params: &HashMap<String, String>) -> std::result::Result<(), Response> {
    match params.get("token") {
        Some(token) if token == TEST_TOKEN => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "invalid token").into_response()),
    }
}

fn respond<T: serde::Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    }
}

macro_rules! fixture_handler {
    ($name:ident, |$fixture:ident, $id:ident| $body:expr) => {
        async fn $name(
            Path($id): Path<String>,
            Query(params): Params,
            State(state): State<MockTrelloState>,
        ) -> Response {
            if let Err(denied) = authorize(&params) {
                return denied;
            }
            let $fixture = state.fixture.lock().unwrap();
            respond($body)
        }
    };
}

fixture_handler!(member_handler, |f, id| f.member(&id));
fixture_handler!(member_boards_handler, |f, id| f.member(&id).map(|_| f.boards.clone()));
fixture_handler!(board_handler, |f, id| f.board(&id));
fixture_handler!(board_lists_handler, |f, id| f.board(&id).map(|b| f.lists_on(&b.id)));
fixture_handler!(list_handler, |f, id| f.list(&id));
fixture_handler!(list_cards_handler, |f, id| f.list(&id).map(|l| f.cards_in(&l.id)));
fixture_handler!(card_handler, |f, id| f.card(&id));
fixture_handler!(card_actions_handler, |f, id| f.card(&id).map(|c| f.actions_on(&c.id)));

async fn add_comment_handler(
    Path(id): Path<String>,
    Query(params): Params,
    State(state): State<MockTrelloState>,
) -> Response {
    if let Err(denied) = authorize(&params) {
        return denied;
    }

    let text = match params.get("text") {
        Some(text) if !text.is_empty() => text.clone(),
        _ => return (StatusCode::BAD_REQUEST, "invalid value for text").into_response(),
    };

    let mut fixture = state.fixture.lock().unwrap();
    if fixture.card(&id).is_none() {
        return respond::<Action>(None);
    }

    state.comments.lock().unwrap().push((id.clone(), text.clone()));
    Json(fixture.comment(&id, &text)).into_response()
}

/// In-memory [`TrelloApi`] that records each call as `"<method> <id>"`
#[derive(Debug, Default)]
pub struct FakeTrello {
    fixture: Mutex<Fixture>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakeTrello {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `method` fail with a transport error
    pub fn fail(self, method: &'static str) -> Self {
        self.failing.lock().unwrap().insert(method);
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls to `method`
    pub fn count(&self, method: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(' ').next() == Some(method))
            .count()
    }

    pub fn fixture(&self) -> Fixture {
        self.fixture.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, id: &str) -> trello_core::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", method, id));
        if self.failing.lock().unwrap().contains(method) {
            return Err(TrelloError::Transport(format!("{} unavailable", method)));
        }
        Ok(())
    }

    fn lookup<T>(&self, value: Option<T>, id: &str) -> trello_core::Result<T> {
        value.ok_or_else(|| TrelloError::Api {
            status: 400,
            endpoint: id.to_string(),
            message: "invalid id".to_string(),
        })
    }
}

#[async_trait]
impl TrelloApi for FakeTrello {
    async fn member(&self, id: &str) -> trello_core::Result<Member> {
        self.record("member", id)?;
        self.lookup(self.fixture.lock().unwrap().member(id), id)
    }

    async fn member_boards(&self, member: &Member) -> trello_core::Result<Vec<Board>> {
        self.record("member_boards", &member.id)?;
        Ok(self.fixture.lock().unwrap().boards.clone())
    }

    async fn board(&self, id: &str) -> trello_core::Result<Board> {
        self.record("board", id)?;
        self.lookup(self.fixture.lock().unwrap().board(id), id)
    }

    async fn board_lists(&self, board: &Board) -> trello_core::Result<Vec<List>> {
        self.record("board_lists", &board.id)?;
        Ok(self.fixture.lock().unwrap().lists_on(&board.id))
    }

    async fn list(&self, id: &str) -> trello_core::Result<List> {
        self.record("list", id)?;
        self.lookup(self.fixture.lock().unwrap().list(id), id)
    }

    async fn list_cards(&self, list: &List) -> trello_core::Result<Vec<Card>> {
        self.record("list_cards", &list.id)?;
        Ok(self.fixture.lock().unwrap().cards_in(&list.id))
    }

    async fn card(&self, id: &str) -> trello_core::Result<Card> {
        self.record("card", id)?;
        self.lookup(self.fixture.lock().unwrap().card(id), id)
    }

    async fn card_actions(&self, card: &Card) -> trello_core::Result<Vec<Action>> {
        self.record("card_actions", &card.id)?;
        Ok(self.fixture.lock().unwrap().actions_on(&card.id))
    }

    async fn add_comment(&self, card: &Card, text: &str) -> trello_core::Result<Action> {
        self.record("add_comment", &format!("{} {}", card.id, text))?;
        Ok(self.fixture.lock().unwrap().comment(&card.id, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_startup() {
        let (server, url) = MockTrello::new().start().await.unwrap();

        assert!(server.port() > 0);
        assert!(url.contains(&server.port().to_string()));

        let response = reqwest::Client::new()
            .get(format!("{}/members/me?token={}", url, TEST_TOKEN))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    #[tokio::test]
    async fn test_mock_server_rejects_missing_token() {
        let (_, url) = MockTrello::new().start().await.unwrap();

        let response = reqwest::Client::new()
            .get(format!("{}/boards/B1", url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_fake_records_calls() {
        let fake = FakeTrello::new();
        let board = fake.board("B1").await.unwrap();
        fake.board_lists(&board).await.unwrap();

        assert_eq!(fake.calls(), vec!["board B1", "board_lists B1"]);
        assert_eq!(fake.count("board"), 1);
    }

    #[tokio::test]
    async fn test_fake_failure_injection() {
        let fake = FakeTrello::new().fail("card_actions");
        let card = fake.card("C1").await.unwrap();

        assert!(fake.card_actions(&card).await.is_err());
    }
}
