//! Schema context registry use-cases.
//!
//! CRUD over the remote schema store, scoped to the authenticated user.
//! After every successful mutation the registry re-fetches the full list:
//! the server is the source of truth and local optimistic patching is
//! avoided so concurrent edits from elsewhere are always reflected.
//!
//! The registry knows nothing about "selection"; each mutation returns a
//! `SchemaMutation` notification so the owner of the selection can
//! reconcile one layer up.

use std::sync::Arc;

use sqlforge_core::error::{Result, SqlForgeError};
use sqlforge_core::schema::{SchemaApi, SchemaContext, SchemaDraft};
use sqlforge_core::session::Session;

const UPSERT_FALLBACK: &str = "Check table name uniqueness or input.";
const DELETE_FALLBACK: &str = "An error occurred.";

/// Notification of a completed mutation, passed up to the selection owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMutation {
    Created(SchemaContext),
    Updated(SchemaContext),
    Deleted(String),
}

/// Client-side registry over the remote schema store.
pub struct SchemaRegistry {
    schema_api: Arc<dyn SchemaApi>,
}

impl SchemaRegistry {
    pub fn new(schema_api: Arc<dyn SchemaApi>) -> Self {
        Self { schema_api }
    }

    /// Fetches all schema contexts for the session's user.
    ///
    /// Callers treat a failure as non-fatal: show a banner, render an
    /// empty list.
    pub async fn list(&self, session: &Session) -> Result<Vec<SchemaContext>> {
        self.schema_api.list(session).await
    }

    /// Registers a new schema context.
    ///
    /// `known` is the last fetched list; a duplicate table name is
    /// rejected locally as a conflict because the remote endpoint
    /// replaces silently, and the server's own uniqueness rejection is
    /// surfaced verbatim when it arrives instead.
    pub async fn create(
        &self,
        session: &Session,
        known: &[SchemaContext],
        draft: &SchemaDraft,
    ) -> Result<(SchemaMutation, Vec<SchemaContext>)> {
        draft.validate()?;
        if known.iter().any(|s| s.table_name == draft.table_name) {
            return Err(SqlForgeError::conflict(format!(
                "A schema for '{}' already exists.",
                draft.table_name
            )));
        }

        let created = self
            .schema_api
            .upsert(session, draft)
            .await
            .map_err(|e| e.or_detail(UPSERT_FALLBACK))?;
        let refreshed = self.schema_api.list(session).await?;
        tracing::debug!("Created schema context '{}'", created.table_name);
        Ok((SchemaMutation::Created(created), refreshed))
    }

    /// Replaces the DDL context of an existing schema.
    ///
    /// `table_name` is the immutable identity key: the target must be
    /// present in `known`, and only `ddl_context` changes.
    pub async fn update(
        &self,
        session: &Session,
        known: &[SchemaContext],
        draft: &SchemaDraft,
    ) -> Result<(SchemaMutation, Vec<SchemaContext>)> {
        draft.validate()?;
        if !known.iter().any(|s| s.table_name == draft.table_name) {
            return Err(SqlForgeError::not_found("schema", draft.table_name.clone()));
        }

        let updated = self
            .schema_api
            .upsert(session, draft)
            .await
            .map_err(|e| e.or_detail(UPSERT_FALLBACK))?;
        let refreshed = self.schema_api.list(session).await?;
        tracing::debug!("Updated schema context '{}'", updated.table_name);
        Ok((SchemaMutation::Updated(updated), refreshed))
    }

    /// Deletes a schema context by table name.
    ///
    /// Interactive confirmation is the caller's responsibility and must
    /// happen before this is invoked.
    pub async fn delete(
        &self,
        session: &Session,
        table_name: &str,
    ) -> Result<(SchemaMutation, Vec<SchemaContext>)> {
        self.schema_api
            .delete(session, table_name)
            .await
            .map_err(|e| e.or_detail(DELETE_FALLBACK))?;
        let refreshed = self.schema_api.list(session).await?;
        tracing::debug!("Deleted schema context '{}'", table_name);
        Ok((SchemaMutation::Deleted(table_name.to_string()), refreshed))
    }
}
