//! Profile Model

use crate::record::{Record, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile row from `profile/v1/index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: RecordId,
    /// Owning user; profile updates are keyed by it
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Profile {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

/// Create profile payload (`profile/v1/create`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub position: String,
    pub github: String,
    pub linkedin: String,
    pub user_id: i64,
}

/// Update profile payload (`profile/v1/update/{userId}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub github: String,
    pub linkedin: String,
    pub phone_number: String,
    pub department: String,
    pub position: String,
}

impl ProfileUpdate {
    /// Prefill an edit form from an existing profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            github: profile.github.clone().unwrap_or_default(),
            linkedin: profile.linkedin.clone().unwrap_or_default(),
            phone_number: profile.phone_number.clone().unwrap_or_default(),
            department: profile.department.clone().unwrap_or_default(),
            position: profile.position.clone().unwrap_or_default(),
        }
    }
}
