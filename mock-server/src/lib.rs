use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const TOKEN_HEADER: &str = "x-chatworktoken";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: u64,
    pub body: String,
}

#[derive(Deserialize)]
pub struct PostMessage {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Posted {
    pub message_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

#[derive(Default)]
struct Store {
    last_id: u64,
    rooms: HashMap<String, Vec<Message>>,
}

type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    token: Arc<str>,
    db: Db,
}

type Rejection = (StatusCode, Json<ErrorBody>);

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Db::default(),
    };
    Router::new()
        .route("/v1/rooms/{room_id}/messages", get(list_messages).post(post_message))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    (
        status,
        Json(ErrorBody {
            errors: vec![message.to_string()],
        }),
    )
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Rejection> {
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if token == &*state.token => Ok(()),
        _ => Err(reject(StatusCode::UNAUTHORIZED, "Invalid API token")),
    }
}

async fn post_message(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
    Form(input): Form<PostMessage>,
) -> Result<Json<Posted>, Rejection> {
    authorize(&state, &headers)?;
    if input.body.is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Parameter [body] is required"));
    }

    let mut store = state.db.write().await;
    store.last_id += 1;
    let message = Message {
        message_id: store.last_id,
        body: input.body,
    };
    info!(room_id = %room_id, message_id = message.message_id, "message posted");
    store.rooms.entry(room_id).or_default().push(message.clone());
    Ok(Json(Posted {
        message_id: message.message_id,
    }))
}

async fn list_messages(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Vec<Message>>, Rejection> {
    authorize(&state, &headers)?;
    let store = state.db.read().await;
    let messages = store.rooms.get(&room_id).cloned().unwrap_or_default();
    debug!(room_id = %room_id, count = messages.len(), "listing messages");
    Ok(Json(messages))
}
