use std::sync::Arc;

use crate::auth::credentials::CredentialCheck;
use crate::config::Config;
use crate::pagination::{PageParams, PageRequest};
use crate::store::{ProjectStore, UserStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub config: Config,
    pub credentials: Option<Arc<dyn CredentialCheck>>,
}

impl AppState {
    pub fn page_request(&self, params: &PageParams) -> PageRequest {
        params.resolve(self.config.default_page_size, self.config.max_page_size)
    }
}
