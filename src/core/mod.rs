//! Core types and document handling

mod document;
mod extractor;
mod kind;
mod loader;
mod namespaces;
mod types;

pub use document::{NodeExt, WorkflowDocument};
pub use extractor::{
    extract_activities, extract_database_connections, extract_urls, extract_variables,
    ExtractedFacts,
};
pub use kind::ActivityKind;
pub use loader::{find_project_file, load_project_info, ProjectInfo, PROJECT_FILE_NAME};
pub use namespaces::{NamespaceTable, DEFAULT_PREFIX, XAML_NAMESPACE};
pub use types::{
    Activity, Category, HealthRating, Issue, Severity, Variable, WorkflowAnalysis,
};
