//! Route handlers and their wire types.
//!
//! Response shapes mirror the ledger's JSON vocabulary: camelCase keys,
//! hex-encoded hashes, and a `formattedTime` convenience field on blocks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use userchain_core::{Block, User};
use userchain_ledger::{LedgerInfo, SearchKind};

use crate::app::AppState;
use crate::errors::ApiError;

/// A block plus a human-readable render of its timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    #[serde(flatten)]
    block: Block,
    formatted_time: String,
}

impl From<Block> for BlockView {
    fn from(block: Block) -> Self {
        let formatted_time = DateTime::from_timestamp_millis(block.timestamp)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default();
        Self {
            block,
            formatted_time,
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    success: bool,
    user: User,
    message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    is_valid: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    users: Vec<User>,
    blocks: Vec<BlockView>,
    #[serde(rename = "type")]
    kind: Option<SearchKind>,
}

pub async fn info(State(state): State<AppState>) -> Result<Json<LedgerInfo>, ApiError> {
    Ok(Json(state.ledger.info()?))
}

pub async fn list_blocks(State(state): State<AppState>) -> Json<Vec<BlockView>> {
    Json(state.ledger.blocks().into_iter().map(BlockView::from).collect())
}

pub async fn get_block(
    State(state): State<AppState>,
    Path(index): Path<u64>,
) -> Result<Json<BlockView>, ApiError> {
    Ok(Json(state.ledger.block(index)?.into()))
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.ledger.users())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.ledger.user(&username)?))
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (Some(username), Some(email)) = (req.username, req.email) else {
        return Err(ApiError::MissingFields);
    };

    let user = state.ledger.register(&username, &email)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user,
            message: "user created",
        }),
    ))
}

pub async fn validate(State(state): State<AppState>) -> Json<ValidateResponse> {
    let is_valid = state.ledger.is_valid();
    Json(ValidateResponse {
        is_valid,
        message: if is_valid {
            "chain integrity verified"
        } else {
            "chain has been tampered with"
        },
    })
}

pub async fn search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state.ledger.search(&query);
    if results.is_empty() {
        return Err(ApiError::NothingMatched);
    }

    Ok(Json(SearchResponse {
        kind: results.kind(),
        users: results.users,
        blocks: results.blocks.into_iter().map(BlockView::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use userchain_ledger::Ledger;

    fn state() -> AppState {
        AppState {
            ledger: Arc::new(Ledger::new()),
        }
    }

    fn register_req(username: &str, email: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
        })
    }

    #[tokio::test]
    async fn test_register_then_read_back() {
        let state = state();

        let (status, Json(body)) = register_user(State(state.clone()), register_req("alice", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.user.username, "alice");

        let Json(user) = get_user(State(state.clone()), Path("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(user.id, body.user.id);

        let Json(info) = info(State(state)).await.unwrap();
        assert_eq!(info.total_blocks, 2);
        assert_eq!(info.total_users, 1);
        assert!(info.is_valid);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let err = register_user(
            State(state()),
            Json(RegisterRequest {
                username: Some("alice".to_string()),
                email: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_bad_request() {
        let state = state();
        register_user(State(state.clone()), register_req("alice", "a@x.com"))
            .await
            .unwrap();

        let err = register_user(State(state), register_req("alice", "b@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_lookups_are_not_found() {
        let state = state();

        let err = get_block(State(state.clone()), Path(42)).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = get_user(State(state.clone()), Path("ghost".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = search(State(state), Path("nothing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_block_view_wire_shape() {
        let state = state();
        register_user(State(state.clone()), register_req("alice", "a@x.com"))
            .await
            .unwrap();

        let blocks = list_blocks(State(state)).await;
        let json = serde_json::to_value(&blocks.0).unwrap();

        assert_eq!(json[0]["index"], 0);
        assert_eq!(json[0]["data"]["type"], "GENESIS");
        assert_eq!(json[1]["data"]["type"], "USER_REGISTRATION");
        assert!(json[1].get("previousHash").is_some());
        assert!(json[1].get("formattedTime").is_some());
    }

    #[tokio::test]
    async fn test_validate_reports_ok() {
        let resp = validate(State(state())).await;
        let json = serde_json::to_value(&resp.0).unwrap();
        assert_eq!(json["isValid"], true);
    }

    #[tokio::test]
    async fn test_search_mixes_users_and_blocks() {
        let state = state();
        register_user(State(state.clone()), register_req("1", "one@x.com"))
            .await
            .unwrap();

        let resp = search(State(state), Path("1".to_string())).await.unwrap();
        let json = serde_json::to_value(&resp.0).unwrap();
        assert_eq!(json["type"], "mixed");
        assert_eq!(json["users"].as_array().unwrap().len(), 1);
        assert_eq!(json["blocks"].as_array().unwrap().len(), 1);
    }
}
