//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{FindUserByIdRepository, UpdateUserUseCase};

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub update_user: Arc<dyn UpdateUserUseCase>,
    pub users: Arc<dyn FindUserByIdRepository>,
}

impl AppState {
    pub fn new(
        update_user: Arc<dyn UpdateUserUseCase>,
        users: Arc<dyn FindUserByIdRepository>,
    ) -> Self {
        Self { update_user, users }
    }
}
