//! Interaction-path handlers: event ingestion and configuration queries.

mod get_configuration;
mod report_event;

pub use get_configuration::{
    ConfigurationSnapshot, GetConfigurationHandler, GetConfigurationQuery,
};
pub use report_event::{ReportEventCommand, ReportEventHandler, ReportEventResult};
