//! User resource client

use std::sync::Arc;

use crate::core::error::AdminError;
use crate::core::roles::Roles;
use crate::core::transport::ApiTransport;

/// Default path of the roles resource
pub const ROLES_RESOURCE: &str = "/user/roles";

/// Fetches the current user's roles
#[derive(Clone)]
pub struct UserService {
    api: Arc<dyn ApiTransport>,
    roles_resource: String,
}

impl UserService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self::with_roles_resource(api, ROLES_RESOURCE)
    }

    pub fn with_roles_resource(api: Arc<dyn ApiTransport>, resource: impl Into<String>) -> Self {
        Self {
            api,
            roles_resource: resource.into(),
        }
    }

    pub async fn roles(&self) -> Result<Roles, AdminError> {
        tracing::debug!(resource = %self.roles_resource, "Fetching roles");
        self.api.get_json(&self.roles_resource, &[]).await
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("roles_resource", &self.roles_resource)
            .finish_non_exhaustive()
    }
}
