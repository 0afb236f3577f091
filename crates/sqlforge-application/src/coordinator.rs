//! Workspace coordinator: the single owner of cross-panel state.
//!
//! Holds the session, the selected schema context, and the history
//! epoch. Panels read through accessors and signal mutations in through
//! explicit methods; there is no other writer. Auth expiry observed by
//! any panel funnels into one global logout here.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sqlforge_core::error::Result;
use sqlforge_core::schema::SchemaContext;
use sqlforge_core::session::{Session, SessionStore};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::query_orchestrator::GenerationOutcome;
use crate::schema_registry::SchemaMutation;

/// The active session plus the login generation it belongs to.
///
/// Completion handlers capture a ticket when they issue a request and
/// present it when the response arrives; a ticket from a login that is
/// no longer active identifies a stale response that must be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTicket {
    pub session: Session,
    login_id: Uuid,
}

struct AuthState {
    session: Session,
    login_id: Uuid,
}

/// Top-level state owner for the workspace.
///
/// States: LoggedOut (no session) and LoggedIn. Login and registration
/// both enter LoggedIn; an explicit logout or any downstream 401 returns
/// to LoggedOut, clearing the session from memory and durable storage
/// and dropping the selection so it cannot leak into the next login.
pub struct WorkspaceCoordinator {
    session_store: Arc<dyn SessionStore>,
    auth: RwLock<Option<AuthState>>,
    selection: RwLock<Option<SchemaContext>>,
    history_epoch: AtomicU64,
}

impl WorkspaceCoordinator {
    /// Creates a coordinator in the logged-out state.
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            session_store,
            auth: RwLock::new(None),
            selection: RwLock::new(None),
            history_epoch: AtomicU64::new(0),
        }
    }

    /// Creates a coordinator, restoring a persisted session if one
    /// exists so a restarted client resumes its login.
    pub async fn restore(session_store: Arc<dyn SessionStore>) -> Self {
        let coordinator = Self::new(session_store);
        if let Some(session) = coordinator.session_store.load().await {
            tracing::info!("Restored session for '{}'", session.username);
            *coordinator.auth.write().await = Some(AuthState {
                session,
                login_id: Uuid::new_v4(),
            });
        }
        coordinator
    }

    pub async fn is_logged_in(&self) -> bool {
        self.auth.read().await.is_some()
    }

    /// The active session, by value.
    pub async fn session(&self) -> Option<Session> {
        self.auth.read().await.as_ref().map(|a| a.session.clone())
    }

    /// The active session together with its login generation.
    pub async fn ticket(&self) -> Option<SessionTicket> {
        self.auth.read().await.as_ref().map(|a| SessionTicket {
            session: a.session.clone(),
            login_id: a.login_id,
        })
    }

    /// LoggedOut → LoggedIn: a login or registration succeeded.
    ///
    /// Persists the session mirror and clears any selection left over
    /// from a previous login.
    pub async fn login_succeeded(&self, session: Session) -> Result<()> {
        self.session_store.save(&session).await?;
        *self.auth.write().await = Some(AuthState {
            session,
            login_id: Uuid::new_v4(),
        });
        *self.selection.write().await = None;
        Ok(())
    }

    /// LoggedIn → LoggedOut: explicit logout or downstream 401.
    ///
    /// Clears session (memory and durable store) and selection. The
    /// history epoch is left alone; the next login starts a fresh
    /// context naturally.
    pub async fn logout(&self) -> Result<()> {
        *self.auth.write().await = None;
        *self.selection.write().await = None;
        self.session_store.clear().await
    }

    /// Reacts to a 401 observed by any panel: global logout.
    pub async fn handle_auth_expiry(&self) -> Result<()> {
        tracing::info!("Session rejected by the server, logging out");
        self.logout().await
    }

    /// The selected schema context, by value.
    pub async fn selected_schema(&self) -> Option<SchemaContext> {
        self.selection.read().await.clone()
    }

    /// Explicit "select" action from the schema panel.
    pub async fn select_schema(&self, schema: SchemaContext) {
        *self.selection.write().await = Some(schema);
    }

    pub async fn clear_selection(&self) {
        *self.selection.write().await = None;
    }

    /// Reconciles the held selection with a registry mutation, compared
    /// by `table_name` (the identity key): deleting the selected table
    /// clears the selection, editing it refreshes the held copy. Other
    /// tables leave the selection untouched.
    pub async fn apply_schema_mutation(&self, mutation: &SchemaMutation) {
        let mut selection = self.selection.write().await;
        match mutation {
            SchemaMutation::Deleted(table_name) => {
                if selection.as_ref().map(|s| s.table_name.as_str()) == Some(table_name.as_str()) {
                    *selection = None;
                }
            }
            SchemaMutation::Updated(updated) => {
                if selection.as_ref().map(|s| s.table_name.as_str())
                    == Some(updated.table_name.as_str())
                {
                    *selection = Some(updated.clone());
                }
            }
            SchemaMutation::Created(_) => {}
        }
    }

    /// Current history epoch. A change means the history view is stale
    /// and must refetch.
    pub fn history_epoch(&self) -> u64 {
        self.history_epoch.load(Ordering::SeqCst)
    }

    /// Applies a completed generation under the ticket it was issued
    /// with.
    ///
    /// Returns `false` and changes nothing when that login is no longer
    /// the active one (a logout or re-login raced the request): without a
    /// cancellation primitive, the guard is what keeps a stale response
    /// from mutating the next user's state. Otherwise bumps the epoch on
    /// success and triggers the global logout when the outcome reports an
    /// expired session.
    pub async fn apply_generation(
        &self,
        ticket: &SessionTicket,
        outcome: &GenerationOutcome,
    ) -> Result<bool> {
        {
            let auth = self.auth.read().await;
            let active = auth.as_ref().map(|a| a.login_id);
            if active != Some(ticket.login_id) {
                tracing::debug!("Discarding generation completion from a stale login");
                return Ok(false);
            }
        }

        if outcome.session_expired {
            self.handle_auth_expiry().await?;
            return Ok(true);
        }
        if outcome.history_changed {
            self.history_epoch.fetch_add(1, Ordering::SeqCst);
        }
        Ok(true)
    }
}
