use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub head_id: Option<Uuid>,
}

impl Department {
    /// Executive departments are recognised by name, the API has no flag for it.
    pub fn is_executive(&self) -> bool {
        self.name.contains("Executive")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewDepartment {
    pub name: String,
}

/// Body of `PUT /api/departments/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DepartmentHead {
    pub head_id: Uuid,
}
