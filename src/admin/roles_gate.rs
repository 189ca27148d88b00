//! Roles fetch gating the create action

use std::sync::Arc;

use crate::core::roles::Roles;
use crate::services::UserService;

/// Where the roles fetch stands
#[derive(Debug, Clone, PartialEq)]
pub enum RolesState {
    /// Not requested yet, or a request is in flight
    Pending,
    Loaded(Roles),
    /// The fetch failed; the message is what the error body shows
    Failed(String),
}

/// Per-component roles fetch with manual retry
///
/// Each component owns its gate, so a list and a dialog never share state.
#[derive(Debug)]
pub struct RolesGate {
    users: Arc<UserService>,
    state: RolesState,
    attempts: u32,
}

impl RolesGate {
    pub fn new(users: Arc<UserService>) -> Self {
        Self {
            users,
            state: RolesState::Pending,
            attempts: 0,
        }
    }

    /// Issue the roles fetch and record its single outcome
    pub async fn load(&mut self) -> &RolesState {
        self.state = RolesState::Pending;
        self.attempts += 1;

        self.state = match self.users.roles().await {
            Ok(roles) => RolesState::Loaded(roles),
            Err(e) => {
                tracing::warn!(error = %e, attempt = self.attempts, "Failed to load roles");
                RolesState::Failed(e.to_string())
            }
        };
        &self.state
    }

    /// Re-issue the fetch; only ever triggered by the user
    pub async fn retry(&mut self) -> &RolesState {
        tracing::info!(attempt = self.attempts + 1, "Retrying roles fetch");
        self.load().await
    }

    pub fn state(&self) -> &RolesState {
        &self.state
    }

    /// Number of fetches issued so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Loaded and non-empty
    pub fn is_granted(&self) -> bool {
        matches!(&self.state, RolesState::Loaded(roles) if roles.is_granted())
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RolesState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
