// Users: list and admin-side creation

use serde::de::IgnoredAny;
use shared::models::{NewUser, User};

use super::{Resource, ResourceSpec};
use crate::ClientResult;
use crate::http::ApiClient;

impl Resource for User {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "user",
        list_path: "api/users/v1/getAllUsers",
        route: "/users",
        searchable: false,
    };
}

pub(crate) const REGISTER_PATH: &str = "api/users/v1/register";

impl ApiClient {
    /// Admin "add user" form; the backend issues credentials out of band.
    pub async fn create_user(&self, user: &NewUser) -> ClientResult<()> {
        let _: IgnoredAny = self.post(REGISTER_PATH, user).await?;
        Ok(())
    }
}
