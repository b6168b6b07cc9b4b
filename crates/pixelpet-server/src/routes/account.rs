//! Registration and login.
//!
//! - `POST /register {username, password, petName?}` → `201 {message}`
//! - `POST /login {username, password}` → `200 {token, pet}`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pixelpet_logic::constants::DEFAULT_PET_NAME;
use pixelpet_logic::PetRecord;
use serde::{Deserialize, Serialize};

use super::blocking;
use crate::auth::{hash_password, verify_password, AuthError};
use crate::error::{AppError, AppResult};
use crate::state::ServerState;
use crate::store::{is_valid_username, StoreError, UserAccount};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub pet_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub pet: PetRecord,
}

/// Create an account with a fresh pet: `POST /register`
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".into(),
        ));
    }
    if !is_valid_username(username) {
        return Err(StoreError::InvalidUsername(username.to_string()).into());
    }

    let pet_name = req
        .pet_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PET_NAME)
        .to_string();

    let store = state.store.clone();
    let username = username.to_string();
    let password = req.password;
    let account = blocking(move || {
        let account = UserAccount {
            username,
            password_hash: hash_password(&password)?,
            pet: PetRecord::new(pet_name),
        };
        store.create(&account)?;
        Ok(account)
    })
    .await?;

    log::info!(
        "registered {} with pet {:?}",
        account.username,
        account.pet.name
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

/// Check credentials and issue a token: `POST /login`
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let username = req.username.trim().to_string();
    let store = state.store.clone();
    let account = blocking(move || {
        let account = match store.load(&username) {
            Ok(a) => a,
            // Unknown and malformed usernames look the same as a bad password.
            Err(StoreError::NotFound(_) | StoreError::InvalidUsername(_)) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e.into()),
        };
        if !verify_password(&account.password_hash, &req.password) {
            log::warn!("failed login for {username}");
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(account)
    })
    .await?;

    let token = state.tokens.issue(&account.username)?;
    Ok(Json(LoginResponse {
        token,
        pet: account.pet,
    }))
}
