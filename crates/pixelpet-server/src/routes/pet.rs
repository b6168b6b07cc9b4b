//! Pet endpoints. All require a bearer token.
//!
//! - `GET /pet` → the caller's [`PetRecord`]
//! - `GET /pet/mood` → `{mood, message}`
//! - `POST /feed|/play|/sleep|/reset` → the updated [`PetRecord`]

use axum::extract::State;
use axum::Json;
use pixelpet_logic::{apply_action, mood, Mood, PetAction, PetRecord};
use serde::Serialize;

use super::blocking;
use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::state::ServerState;

/// Current pet: `GET /pet`
pub async fn get_pet(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<PetRecord>> {
    let store = state.store.clone();
    let account = blocking(move || Ok(store.load(&username)?)).await?;
    Ok(Json(account.pet))
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub mood: Mood,
    pub message: &'static str,
}

/// Status-line mood: `GET /pet/mood`
pub async fn get_mood(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<MoodResponse>> {
    let store = state.store.clone();
    let pet = blocking(move || Ok(store.load(&username)?)).await?.pet;
    let mood = mood(&pet);
    Ok(Json(MoodResponse {
        mood,
        message: mood.message(),
    }))
}

/// Load, transition, save. The record is written back even when the
/// action was refused. Blocking; handlers call it through [`blocking`].
pub fn perform_action(
    state: &ServerState,
    username: &str,
    action: PetAction,
) -> AppResult<PetRecord> {
    let mut account = state.store.load(username)?;
    let transition = apply_action(&mut account.pet, action);
    state.store.save(&account)?;

    if transition.died {
        log::info!("pet {:?} of {username} died after {action}", account.pet.name);
    }
    for name in &transition.unlocked {
        log::info!("{username} unlocked {name:?}");
    }
    Ok(account.pet)
}

async fn act(
    state: ServerState,
    username: String,
    action: PetAction,
) -> AppResult<Json<PetRecord>> {
    blocking(move || perform_action(&state, &username, action))
        .await
        .map(Json)
}

/// `POST /feed`
pub async fn feed(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<PetRecord>> {
    act(state, username, PetAction::Feed).await
}

/// `POST /play`
pub async fn play(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<PetRecord>> {
    act(state, username, PetAction::Play).await
}

/// `POST /sleep`
pub async fn sleep(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<PetRecord>> {
    act(state, username, PetAction::Sleep).await
}

/// `POST /reset`
pub async fn reset(
    State(state): State<ServerState>,
    AuthUser(username): AuthUser,
) -> AppResult<Json<PetRecord>> {
    act(state, username, PetAction::Reset).await
}
