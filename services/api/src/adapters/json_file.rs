//! services/api/src/adapters/json_file.rs
//!
//! This module contains the file adapter, which is the concrete implementation
//! of the `RecordStore` port from the `core` crate. Every collection lives in
//! its own file as a single JSON array that is read and rewritten in full.
//!
//! There is no locking. Two overlapping read-modify-write sequences can lose
//! a record or hand out the same id twice; the last writer wins.

use async_trait::async_trait;
use food_api_core::domain::{next_employee_id, Employee, FoodCategory, NewEmployee, User};
use food_api_core::ports::{PortError, PortResult, RecordStore};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

//=========================================================================================
// File Locations
//=========================================================================================

/// The paths of the three collection files.
#[derive(Clone, Debug)]
pub struct DataFiles {
    pub employees: PathBuf,
    pub food_categories: PathBuf,
    pub users: PathBuf,
}

impl DataFiles {
    /// Uses the conventional file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            employees: dir.join("employee.json"),
            food_categories: dir.join("food-categories.json"),
            users: dir.join("users.json"),
        }
    }
}

//=========================================================================================
// Whole-File Read / Write
//=========================================================================================

/// Reads an entire collection file.
///
/// Fails with `PortError::Read` when the file is missing or unreadable and with
/// `PortError::Parse` when it is not a JSON array of `T`.
pub async fn read_all<T: DeserializeOwned>(path: &Path) -> PortResult<Vec<T>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PortError::Read(format!("reading {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| PortError::Parse(format!("{}: {}", path.display(), e)))
}

/// Replaces an entire collection file with `records`, pretty-printed.
///
/// The content goes to a sibling temporary file first and is then renamed
/// over the target, so a reader sees either the old or the new array.
pub async fn write_all<T: Serialize>(path: &Path, records: &[T]) -> PortResult<()> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| PortError::Parse(format!("{}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("records");
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| PortError::Write(format!("writing {}: {}", tmp.display(), e)))?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            warn!("Failed to remove temporary file {}: {}", tmp.display(), cleanup);
        }
        return Err(PortError::Write(format!("replacing {}: {}", path.display(), e)));
    }
    Ok(())
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A record store that implements the `RecordStore` port over JSON files.
#[derive(Clone, Debug)]
pub struct JsonFileAdapter {
    files: DataFiles,
}

impl JsonFileAdapter {
    /// Creates a new `JsonFileAdapter`.
    pub fn new(files: DataFiles) -> Self {
        Self { files }
    }
}

//=========================================================================================
// `RecordStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl RecordStore for JsonFileAdapter {
    async fn list_employees(&self) -> PortResult<Vec<Employee>> {
        read_all(&self.files.employees).await
    }

    async fn create_employee(&self, employee: NewEmployee) -> PortResult<Employee> {
        let mut employees: Vec<Employee> = read_all(&self.files.employees).await?;

        let created = employee.with_id(next_employee_id(&employees));
        employees.push(created.clone());

        write_all(&self.files.employees, &employees).await?;
        debug!(id = created.id, total = employees.len(), "Employee appended");
        Ok(created)
    }

    async fn list_food_categories(&self) -> PortResult<Vec<FoodCategory>> {
        read_all(&self.files.food_categories).await
    }

    async fn list_users(&self) -> PortResult<Vec<User>> {
        read_all(&self.files.users).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn adapter_with_employees(json: &str) -> (TempDir, JsonFileAdapter) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("employee.json"), json).unwrap();
        let adapter = JsonFileAdapter::new(DataFiles::in_dir(dir.path()));
        (dir, adapter)
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = JsonFileAdapter::new(DataFiles::in_dir(dir.path()));
        let err = adapter.list_food_categories().await.unwrap_err();
        assert!(matches!(err, PortError::Read(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let (_dir, adapter) = adapter_with_employees("[{\"id\": 1,");
        let err = adapter.list_employees().await.unwrap_err();
        assert!(matches!(err, PortError::Parse(_)));
    }

    #[tokio::test]
    async fn create_on_empty_collection_assigns_id_one() {
        let (_dir, adapter) = adapter_with_employees("[]");
        let created = adapter
            .create_employee(serde_json::from_value(json!({ "name": "Bruce Wayne" })).unwrap())
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(adapter.list_employees().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn create_uses_max_plus_one() {
        let (_dir, adapter) = adapter_with_employees(r#"[{"id": 1}, {"id": 5}, {"id": 3}]"#);
        let created = adapter.create_employee(NewEmployee::default()).await.unwrap();
        assert_eq!(created.id, 6);

        let ids: Vec<i64> = adapter
            .list_employees()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 5, 3, 6]);
    }

    #[tokio::test]
    async fn create_keeps_unknown_fields_of_existing_records() {
        let (dir, adapter) = adapter_with_employees(
            r#"[{"id": 1, "name": "Ann", "badge": {"level": 3}, "tags": ["a", "b"]}]"#,
        );
        adapter
            .create_employee(serde_json::from_value(json!({ "name": "Bob", "shift": "night" })).unwrap())
            .await
            .unwrap();

        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("employee.json")).unwrap())
                .unwrap();
        assert_eq!(
            on_disk,
            json!([
                { "id": 1, "name": "Ann", "badge": { "level": 3 }, "tags": ["a", "b"] },
                { "id": 2, "name": "Bob", "shift": "night" }
            ])
        );
    }

    #[tokio::test]
    async fn write_all_pretty_prints_and_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employee.json");
        write_all(&path, &[NewEmployee::default().with_id(7)]).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"id\": 7\n  }\n]");

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn credentials_lookup_finds_exact_match_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("users.json"),
            r#"[{"id": 1, "email": "a@example.com", "password": "pw", "name": "Ann"}]"#,
        )
        .unwrap();
        let adapter = JsonFileAdapter::new(DataFiles::in_dir(dir.path()));

        let found = adapter
            .find_user_by_credentials("a@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id), Some(1));

        let missing = adapter
            .find_user_by_credentials("a@example.com", "PW")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
