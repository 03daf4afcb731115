//! HTTP client for the Trello REST API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use trello_core::{
    Action, Board, Card, Credentials, Endpoint, List, Member, TrelloApi, TrelloError,
};

/// Default Trello REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.trello.com/1";

/// Normalize a base URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the Trello REST API.
///
/// Authenticates every request with the `key` and `token` query parameters.
/// Requests are issued one at a time and never retried; a failed call is
/// reported to the caller as a [`TrelloError`].
///
/// # Examples
///
/// ```no_run
/// use trellosh::client::TrelloClient;
/// use trello_core::{Credentials, TrelloApi};
///
/// # async fn example() -> anyhow::Result<()> {
/// let credentials = Credentials::default().with_application_key();
/// let client = TrelloClient::with_config("https://api.trello.com/1", 10, &credentials)?;
///
/// let me = client.member("me").await?;
/// for board in client.member_boards(&me).await? {
///     println!("{}", board.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TrelloClient {
    client: Client,
    base_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    /// Create a client for `base_url` authenticating with `credentials`.
    ///
    /// No request is made here, so bad credentials only surface on the
    /// first call.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(base_url: &str, timeout_secs: u64, credentials: &Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("trellosh/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(base_url),
            key: credentials.key.clone(),
            token: credentials.token.clone(),
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> trello_core::Result<T> {
        let path = endpoint.path();
        let url = format!("{}/{}", self.base_url, path);
        debug!(endpoint = %path, "GET");

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| TrelloError::Transport(format!("{}: {}", path, e)))?;

        Self::handle_response(response, &path).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        query: &[(&str, &str)],
    ) -> trello_core::Result<T> {
        let path = endpoint.path();
        let url = format!("{}/{}", self.base_url, path);
        debug!(endpoint = %path, "POST");

        let response = self
            .request(self.client.post(&url))
            .query(query)
            .send()
            .await
            .map_err(|e| TrelloError::Transport(format!("{}: {}", path, e)))?;

        Self::handle_response(response, &path).await
    }

    /// Process an HTTP response and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The JSON cannot be deserialized
    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> trello_core::Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TrelloError::Transport(format!("{}: {}", endpoint, e)))?;

        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "request failed");
            let message = text.trim().to_string();
            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    TrelloError::Unauthorized(format!("{} ({})", endpoint, message))
                }
                StatusCode::NOT_FOUND => TrelloError::NotFound(endpoint.to_string()),
                _ => TrelloError::Api {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message,
                },
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            TrelloError::Serialization(format!("invalid JSON from {}: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl TrelloApi for TrelloClient {
    async fn member(&self, id: &str) -> trello_core::Result<Member> {
        self.get(Endpoint::Member(id)).await
    }

    async fn member_boards(&self, member: &Member) -> trello_core::Result<Vec<Board>> {
        self.get(Endpoint::MemberBoards(&member.id)).await
    }

    async fn board(&self, id: &str) -> trello_core::Result<Board> {
        self.get(Endpoint::Board(id)).await
    }

    async fn board_lists(&self, board: &Board) -> trello_core::Result<Vec<List>> {
        self.get(Endpoint::BoardLists(&board.id)).await
    }

    async fn list(&self, id: &str) -> trello_core::Result<List> {
        self.get(Endpoint::List(id)).await
    }

    async fn list_cards(&self, list: &List) -> trello_core::Result<Vec<Card>> {
        self.get(Endpoint::ListCards(&list.id)).await
    }

    async fn card(&self, id: &str) -> trello_core::Result<Card> {
        self.get(Endpoint::Card(id)).await
    }

    async fn card_actions(&self, card: &Card) -> trello_core::Result<Vec<Action>> {
        self.get(Endpoint::CardActions(&card.id)).await
    }

    async fn add_comment(&self, card: &Card, text: &str) -> trello_core::Result<Action> {
        if text.trim().is_empty() {
            return Err(TrelloError::InvalidInput(
                "comment text cannot be empty".to_string(),
            ));
        }

        self.post(Endpoint::CardComments(&card.id), &[("text", text)])
            .await
    }
}
