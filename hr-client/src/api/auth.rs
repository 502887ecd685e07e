// Login, logout, self-registration

use serde::de::IgnoredAny;
use shared::ApiResponse;
use shared::client::{LoginData, LoginRequest, RegisterRequest};

use crate::http::ApiClient;
use crate::{ClientError, ClientResult};

pub(crate) const EMPLOYEE_LOGIN_PATH: &str = "api/employee/v1/login";
pub(crate) const USER_LOGIN_PATH: &str = "api/users/v1/login";
pub(crate) const LOGOUT_PATH: &str = "api/employee/v1/logout";

impl ApiClient {
    /// Employee login. Stores the returned token and hands it back.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<String> {
        self.login_at(EMPLOYEE_LOGIN_PATH, request).await
    }

    /// Same as [`ApiClient::login`] against the users table.
    pub async fn user_login(&self, request: &LoginRequest) -> ClientResult<String> {
        self.login_at(USER_LOGIN_PATH, request).await
    }

    async fn login_at(&self, path: &str, request: &LoginRequest) -> ClientResult<String> {
        let resp: ApiResponse<LoginData> = self.post(path, request).await?;
        let token = resp
            .data
            .and_then(|d| d.token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("No token received from server".into()))?;
        self.session().set(&token)?;
        tracing::info!(email = %request.email, "Logged in");
        Ok(token)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        let _: IgnoredAny = self.post(super::user::REGISTER_PATH, request).await?;
        tracing::info!(email = %request.email, "Registered");
        Ok(())
    }

    /// Drop the credential and return to the login route.
    ///
    /// The server-side logout is best effort; the local session is cleared
    /// whatever it answers.
    pub async fn logout(&self) -> ClientResult<()> {
        let redirected = match self.post_empty::<IgnoredAny>(LOGOUT_PATH).await {
            Ok(_) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Server logout failed");
                e.is_unauthorized()
            }
        };
        self.session().clear()?;
        // A 401 has already sent us to the login route
        if !redirected {
            self.navigator().navigate(self.login_route());
        }
        tracing::info!("Logged out");
        Ok(())
    }
}
