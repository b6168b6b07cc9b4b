//! PixelPet Server
//!
//! Axum web service around the pure rules in `pixelpet-logic`. Each
//! request loads one user's record, applies a transition, and writes the
//! record back; a background task applies passive decay on a timer.
//!
//! # Modules
//!
//! - [`app`]: router, CORS and tracing layers
//! - [`auth`]: Argon2 password hashes, HS256 bearer tokens
//! - [`config`]: environment-driven [`ServerConfig`]
//! - [`error`]: [`AppError`] with HTTP status mapping
//! - [`routes`]: HTTP handlers
//! - [`state`]: shared handler state
//! - [`store`]: one-JSON-file-per-user record storage
//! - [`ticker`]: periodic decay pass

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod ticker;

pub use app::create_app;
pub use auth::TokenKeys;
pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use state::ServerState;
pub use store::{FileStore, UserAccount, UserStore};
pub use ticker::{run_decay_pass, spawn_decay_ticker, DecayReport};
