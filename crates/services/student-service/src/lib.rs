//! Student Service Library
//!
//! This crate keeps a name-sorted roster of students in sync with a
//! hierarchical document store. Students live in `students/{id}` and each
//! phone number is a document in `students/{id}/phones`.
//!
//! It can be driven from the bundled CLI or embedded behind any UI that
//! subscribes to roster snapshots.

pub mod config;
pub mod repository;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::Student;

use crate::config::StudentServiceConfig;
use crate::repository::StudentStore;
use crate::service::{StudentManager, StudentService, StudentSnapshot};
use crate::store::{DocumentStore, JsonFileStore};

/// A roster mutation requested from the command line.
#[derive(Debug, Clone)]
pub enum RosterAction {
    List,
    Add(Student),
    Update(Student),
    Delete { document_id: String },
}

/// Build a manager over any document store and load the roster.
pub async fn connect(
    store: Arc<dyn DocumentStore>,
    config: &StudentServiceConfig,
) -> StudentManager {
    let repo = Arc::new(StudentStore::new(store));
    StudentManager::start(repo, config.sync.clone()).await
}

/// Run one action against the JSON file store and return the roster after it.
pub async fn run_action(
    action: RosterAction,
    config: &StudentServiceConfig,
) -> AppResult<StudentSnapshot> {
    let store = Arc::new(JsonFileStore::open(&config.store.path).await?);
    info!(
        service = %config.service.service_name,
        path = %store.path().display(),
        "Using document store"
    );

    let manager = connect(store, config).await;

    match action {
        RosterAction::List => {}
        RosterAction::Add(student) => {
            manager.add_student(&student).await?;
        }
        RosterAction::Update(student) => {
            manager.update_student(&student).await?;
        }
        RosterAction::Delete { document_id } => {
            let student = Student::default().with_document_id(document_id);
            manager.delete_student(&student).await?;
        }
    }

    Ok(manager.snapshot())
}
