//! End-to-end workspace flows over mock service clients: login, schema
//! selection, generation, history refresh, and auth-expiry handling.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlforge_application::{
    CredentialService, QueryOrchestrator, SchemaRegistry, WorkspaceCoordinator,
};
use sqlforge_core::SqlForgeError;
use sqlforge_core::auth::{
    AuthApi, Credentials, PasswordResetRequest, RecoveryChallenge, RegistrationPayload,
};
use sqlforge_core::error::Result;
use sqlforge_core::history::{HistoryApi, HistoryRecord};
use sqlforge_core::query::{GenerationRequest, GenerationResponse, GenerationStatus, QueryApi};
use sqlforge_core::schema::{SchemaApi, SchemaContext, SchemaDraft};
use sqlforge_core::session::{Session, SessionStore};

// ============================================================================
// Mock backend: one struct implementing every service trait over shared
// in-memory state, so the flows observe a consistent "server".
// ============================================================================

#[derive(Default)]
struct MockBackend {
    schemas: Mutex<Vec<SchemaContext>>,
    history: Mutex<Vec<HistoryRecord>>,
    /// Token currently accepted by authenticated endpoints.
    valid_token: Mutex<Option<String>>,
}

impl MockBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn issue_token(&self, token: &str) {
        *self.valid_token.lock().unwrap() = Some(token.to_string());
    }

    fn revoke_token(&self) {
        *self.valid_token.lock().unwrap() = None;
    }

    fn check_token(&self, session: &Session) -> Result<()> {
        let valid = self.valid_token.lock().unwrap();
        if valid.as_deref() == Some(session.token.as_str()) {
            Ok(())
        } else {
            Err(SqlForgeError::auth(""))
        }
    }

    fn seed_schema(&self, table_name: &str, ddl_context: &str) {
        self.schemas.lock().unwrap().push(SchemaContext {
            id: Some(1),
            table_name: table_name.to_string(),
            ddl_context: ddl_context.to_string(),
            operator: "alice".to_string(),
        });
    }
}

#[async_trait]
impl AuthApi for MockBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.password == "pw1" {
            self.issue_token("tok-alice");
            Ok(Session::new("tok-alice", credentials.username.clone()))
        } else {
            Err(SqlForgeError::auth("Incorrect username or password"))
        }
    }

    async fn register(&self, payload: &RegistrationPayload) -> Result<Session> {
        self.issue_token("tok-new");
        Ok(Session::new("tok-new", payload.user.username.clone()))
    }

    async fn recovery_questions(&self, _username: &str) -> Result<RecoveryChallenge> {
        unimplemented!("not exercised here")
    }

    async fn reset_password(&self, _request: &PasswordResetRequest) -> Result<()> {
        unimplemented!("not exercised here")
    }
}

#[async_trait]
impl SchemaApi for MockBackend {
    async fn list(&self, session: &Session) -> Result<Vec<SchemaContext>> {
        self.check_token(session)?;
        Ok(self.schemas.lock().unwrap().clone())
    }

    async fn upsert(&self, session: &Session, draft: &SchemaDraft) -> Result<SchemaContext> {
        self.check_token(session)?;
        let context = SchemaContext {
            id: Some(1),
            table_name: draft.table_name.clone(),
            ddl_context: draft.ddl_context.clone(),
            operator: session.username.clone(),
        };
        let mut schemas = self.schemas.lock().unwrap();
        schemas.retain(|s| s.table_name != draft.table_name);
        schemas.push(context.clone());
        Ok(context)
    }

    async fn delete(&self, session: &Session, table_name: &str) -> Result<()> {
        self.check_token(session)?;
        self.schemas
            .lock()
            .unwrap()
            .retain(|s| s.table_name != table_name);
        Ok(())
    }
}

#[async_trait]
impl QueryApi for MockBackend {
    async fn generate(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse> {
        self.check_token(session)?;
        let sql = match request.table_name.as_deref() {
            Some(table) => format!("SELECT * FROM {};", table),
            None => "SELECT 1;".to_string(),
        };
        let mut history = self.history.lock().unwrap();
        let next_id = history.len() as i64 + 1;
        history.push(HistoryRecord {
            id: Some(next_id),
            question: request.question.clone(),
            generated_sql: Some(sql.clone()),
            intent_recognized: request.need_predict_intent,
            operator: request.operator.clone(),
            status: GenerationStatus::Success,
            error_message: None,
            gmt_create: None,
            table_name: request.table_name.clone(),
            ddl_context: request.ddl_context.clone(),
        });
        drop(history);
        Ok(GenerationResponse {
            status: GenerationStatus::Success,
            result_data: Some(sql),
            error_context: None,
        })
    }
}

#[async_trait]
impl HistoryApi for MockBackend {
    async fn list(&self, session: &Session) -> Result<Vec<HistoryRecord>> {
        self.check_token(session)?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn clear(&self, session: &Session) -> Result<bool> {
        self.check_token(session)?;
        let mut history = self.history.lock().unwrap();
        let had_records = !history.is_empty();
        history.clear();
        Ok(had_records)
    }
}

// In-memory session store
#[derive(Default)]
struct MemorySessionStore {
    stored: Mutex<Option<Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        self.stored.lock().unwrap().clone()
    }

    async fn clear(&self) -> Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn login_select_generate_and_refresh_history() {
    let backend = MockBackend::new();
    backend.seed_schema("orders", "CREATE TABLE orders (id INT, total REAL)");

    let store = Arc::new(MemorySessionStore::default());
    let coordinator = WorkspaceCoordinator::new(store.clone() as Arc<dyn SessionStore>);
    let credentials = CredentialService::new(backend.clone() as Arc<dyn AuthApi>);
    let registry = SchemaRegistry::new(backend.clone() as Arc<dyn SchemaApi>);
    let orchestrator = QueryOrchestrator::new(backend.clone() as Arc<dyn QueryApi>);

    // Login persists the session and enters LoggedIn.
    let session = credentials.login("alice", "pw1").await.unwrap();
    coordinator.login_succeeded(session.clone()).await.unwrap();
    assert!(store.load().await.is_some());

    // Select the registered schema from the list.
    let schemas = registry.list(&session).await.unwrap();
    assert_eq!(schemas.len(), 1);
    coordinator.select_schema(schemas[0].clone()).await;

    // Generate against the selected schema.
    let ticket = coordinator.ticket().await.unwrap();
    let selected = coordinator.selected_schema().await;
    let outcome = orchestrator
        .generate(
            Some(&ticket.session),
            "show all orders",
            true,
            selected.as_ref(),
        )
        .await;
    assert!(outcome.result.is_success());

    let applied = coordinator.apply_generation(&ticket, &outcome).await.unwrap();
    assert!(applied);
    assert_eq!(coordinator.history_epoch(), 1);

    // The epoch change means "refetch"; the new record is there.
    let history_api = backend.clone() as Arc<dyn HistoryApi>;
    let records = history_api.list(&ticket.session).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].question, "show all orders");
    assert_eq!(
        records[0].generated_sql.as_deref(),
        Some("SELECT * FROM orders;")
    );
}

#[tokio::test]
async fn mid_session_401_logs_out_globally() {
    let backend = MockBackend::new();
    backend.seed_schema("orders", "CREATE TABLE orders (id INT)");

    let store = Arc::new(MemorySessionStore::default());
    let coordinator = WorkspaceCoordinator::new(store.clone() as Arc<dyn SessionStore>);
    let credentials = CredentialService::new(backend.clone() as Arc<dyn AuthApi>);
    let orchestrator = QueryOrchestrator::new(backend.clone() as Arc<dyn QueryApi>);

    let session = credentials.login("alice", "pw1").await.unwrap();
    coordinator.login_succeeded(session).await.unwrap();
    let schemas = (backend.clone() as Arc<dyn SchemaApi>)
        .list(&coordinator.session().await.unwrap())
        .await
        .unwrap();
    coordinator.select_schema(schemas[0].clone()).await;

    // Token invalidated server-side mid-session.
    backend.revoke_token();

    let ticket = coordinator.ticket().await.unwrap();
    let outcome = orchestrator
        .generate(Some(&ticket.session), "show all orders", true, None)
        .await;
    assert!(outcome.session_expired);

    coordinator.apply_generation(&ticket, &outcome).await.unwrap();

    // Session absent, selection absent, store cleared: logged-out view.
    assert!(!coordinator.is_logged_in().await);
    assert!(coordinator.selected_schema().await.is_none());
    assert!(store.load().await.is_none());
    assert_eq!(coordinator.history_epoch(), 0);
}

#[tokio::test]
async fn clear_history_reports_whether_records_existed() {
    let backend = MockBackend::new();
    let store = Arc::new(MemorySessionStore::default());
    let coordinator = WorkspaceCoordinator::new(store as Arc<dyn SessionStore>);
    let credentials = CredentialService::new(backend.clone() as Arc<dyn AuthApi>);
    let orchestrator = QueryOrchestrator::new(backend.clone() as Arc<dyn QueryApi>);

    let session = credentials.login("alice", "pw1").await.unwrap();
    coordinator.login_succeeded(session).await.unwrap();
    let ticket = coordinator.ticket().await.unwrap();

    let outcome = orchestrator
        .generate(Some(&ticket.session), "count users", true, None)
        .await;
    coordinator.apply_generation(&ticket, &outcome).await.unwrap();

    let history_api = backend.clone() as Arc<dyn HistoryApi>;
    assert!(history_api.clear(&ticket.session).await.unwrap());
    assert!(history_api.list(&ticket.session).await.unwrap().is_empty());
    assert!(!history_api.clear(&ticket.session).await.unwrap());
}
