// Profiles: list, create, update by owning user

use serde::de::IgnoredAny;
use shared::RecordId;
use shared::models::{NewProfile, Profile, ProfileUpdate};

use super::{Resource, ResourceSpec};
use crate::ClientResult;
use crate::http::ApiClient;

impl Resource for Profile {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "profile",
        list_path: "api/profile/v1/index",
        route: "/profile",
        searchable: false,
    };
}

pub(crate) const CREATE_PATH: &str = "api/profile/v1/create";

pub(crate) fn update_path(user_id: &RecordId) -> String {
    format!("api/profile/v1/update/{user_id}")
}

impl ApiClient {
    pub async fn create_profile(&self, profile: &NewProfile) -> ClientResult<()> {
        let _: IgnoredAny = self.post(CREATE_PATH, profile).await?;
        Ok(())
    }

    /// Profiles are addressed by the user they belong to, not their own id.
    pub async fn update_profile(
        &self,
        user_id: &RecordId,
        update: &ProfileUpdate,
    ) -> ClientResult<()> {
        let _: IgnoredAny = self.put(&update_path(user_id), update).await?;
        Ok(())
    }
}
