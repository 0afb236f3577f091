//! Use-case layer for the sqlforge client.
//!
//! Each service orchestrates one panel's worth of behavior over the core
//! API traits; the `WorkspaceCoordinator` is the single ownership node
//! for the state the panels share (session, selected schema context,
//! history epoch).

pub mod coordinator;
pub mod credentials;
pub mod query_orchestrator;
pub mod recovery;
pub mod schema_registry;

pub use coordinator::{SessionTicket, WorkspaceCoordinator};
pub use credentials::CredentialService;
pub use query_orchestrator::{GenerationOutcome, QueryOrchestrator};
pub use recovery::PasswordRecovery;
pub use schema_registry::{SchemaMutation, SchemaRegistry};
