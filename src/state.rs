use sqlx::PgPool;

use crate::auth::TokenVerifier;

/// Shared context handed to every request handler.
///
/// Cloned per request; both members are cheap to clone (the pool is
/// reference-counted, the verifier holds a small decoding key).
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(pool: PgPool, verifier: TokenVerifier) -> Self {
        Self { pool, verifier }
    }
}
