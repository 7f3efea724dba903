use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Contact details resolved from the externally-owned employee directory.
/// Display and notification only; never mutated by the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeContact {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
}

/// In-memory stand-in for the employee directory lookup.
#[derive(Clone, Default)]
pub struct DirectoryRepository {
    contacts: Arc<RwLock<HashMap<Uuid, EmployeeContact>>>,
}

impl DirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or refresh a directory entry (boot-time sync, not an API)
    pub async fn upsert(&self, contact: EmployeeContact) -> EmployeeContact {
        let mut contacts = self.contacts.write().await;
        contacts.insert(contact.employee_id, contact.clone());
        contact
    }

    /// Resolve an employee id to contact details
    pub async fn get(&self, employee_id: Uuid) -> Option<EmployeeContact> {
        let contacts = self.contacts.read().await;
        contacts.get(&employee_id).cloned()
    }
}
