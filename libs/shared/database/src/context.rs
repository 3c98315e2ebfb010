use std::sync::Arc;

use shared_config::AppConfig;
use shared_models::auth::User;

use crate::store::TableStore;
use crate::supabase::SupabaseClient;

/// Who is acting and through which store. Handed to every workflow constructor
/// so nothing reaches for a global session.
#[derive(Clone)]
pub struct SessionContext {
    user: User,
    auth_token: String,
    store: Arc<dyn TableStore>,
}

impl SessionContext {
    pub fn new(user: User, auth_token: impl Into<String>, store: Arc<dyn TableStore>) -> Self {
        Self {
            user,
            auth_token: auth_token.into(),
            store,
        }
    }

    /// Context backed by the Supabase REST client.
    pub fn from_config(config: &AppConfig, user: User, auth_token: impl Into<String>) -> Self {
        Self::new(user, auth_token, Arc::new(SupabaseClient::new(config)))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user.id)
            .finish_non_exhaustive()
    }
}
