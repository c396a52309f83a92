//! PostgreSQL adapters. Runtime queries only; the schema is provisioned
//! by the deployment.

mod audit_trail;
mod event_log;
mod profile_repository;

pub use audit_trail::PgAuditTrail;
pub use event_log::PgEventLog;
pub use profile_repository::PgProfileRepository;
