//! Trello entities as returned by the REST API
//!
//! These are pass-through records: the shell fetches them fresh for every
//! listing and never keeps them beyond the level that requested them.

use serde::{Deserialize, Serialize};

/// Member alias Trello resolves to the owner of the token
pub const CURRENT_MEMBER: &str = "me";

/// A Trello account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

/// Top-level container for lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub closed: bool,
}

/// An ordered column of cards within a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_board: String,
    #[serde(default)]
    pub closed: bool,
}

/// A single task within a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub short_url: String,
}

/// A recorded event on a card, such as a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    /// Trello action type tag, e.g. `commentCard`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: ActionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Payload attached to an action. Only the free-text body is modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Action {
    /// Free-text body, empty for actions that carry none
    pub fn text(&self) -> &str {
        self.data.text.as_deref().unwrap_or("")
    }
}
