//! Shared application state handed to every handler

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::service::music::MusicService;
use crate::service::promo::PromoCodes;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub storage: Arc<dyn Storage>,
    pub music: MusicService,
    pub promo_codes: Arc<PromoCodes>,
    /// Largest request body accepted, uploads included
    pub max_body_bytes: usize,
    /// Directory served under `/uploads` when uploads are stored locally
    pub uploads_dir: Option<PathBuf>,
}
