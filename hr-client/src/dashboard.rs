//! Dashboard façade
//!
//! Wires one session, one HTTP client and one notification channel into a
//! list controller per resource, and exposes the create/edit/delete flows the
//! pages trigger. Successful mutations refresh the affected list.

use std::sync::Arc;

use shared::RecordId;
use shared::models::{Attendance, Employee, EmployeeUpdate, Profile, Salary, User};
use tokio::sync::broadcast;

use crate::api::Resource;
use crate::config::ClientConfig;
use crate::forms::{LoginForm, ProfileForm, RegisterForm, SalaryForm, UserForm};
use crate::http::ApiClient;
use crate::list::{ListContext, ListController};
use crate::navigator::Navigator;
use crate::notify::{Notification, Notifier};
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

pub struct Dashboard {
    client: ApiClient,
    notifier: Notifier,
    home_route: String,
    employees: ListController<Employee>,
    attendance: ListController<Attendance>,
    salaries: ListController<Salary>,
    profiles: ListController<Profile>,
    users: ListController<User>,
}

impl Dashboard {
    pub fn new(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        Self::with_session(config, SessionStore::from_config(config), navigator)
    }

    pub fn with_session(
        config: &ClientConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let client = ApiClient::new(config, session.clone(), navigator.clone())?;
        let notifier = Notifier::new();
        let ctx = ListContext::new(config, session, navigator, notifier.clone());

        Ok(Self {
            employees: list_for(&client, &ctx),
            attendance: list_for(&client, &ctx),
            salaries: list_for(&client, &ctx),
            profiles: list_for(&client, &ctx),
            users: list_for(&client, &ctx),
            client,
            notifier,
            home_route: config.home_route.clone(),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn employees(&self) -> &ListController<Employee> {
        &self.employees
    }

    pub fn attendance(&self) -> &ListController<Attendance> {
        &self.attendance
    }

    pub fn salaries(&self) -> &ListController<Salary> {
        &self.salaries
    }

    pub fn profiles(&self) -> &ListController<Profile> {
        &self.profiles
    }

    pub fn users(&self) -> &ListController<User> {
        &self.users
    }

    pub async fn login(&self, form: LoginForm) -> ClientResult<()> {
        let request = form.into_request()?;
        match self.client.login(&request).await {
            Ok(_) => {
                self.notifier.success("Login successful");
                self.client.navigator().navigate(&self.home_route);
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .error(e.server_message().unwrap_or("Login failed").to_string());
                Err(e)
            }
        }
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.employees.unmount();
        self.attendance.unmount();
        self.salaries.unmount();
        self.profiles.unmount();
        self.users.unmount();
        self.client.logout().await
    }

    /// Self-registration; lands on the login route when accepted.
    pub async fn register(&self, form: RegisterForm) -> ClientResult<()> {
        let request = form.into_request()?;
        match self.client.register(&request).await {
            Ok(()) => {
                self.notifier.success("User created successfully");
                self.client.navigator().navigate(self.client.login_route());
                Ok(())
            }
            Err(e) => {
                let message = e.server_message().unwrap_or("Registration failed").to_string();
                self.fail("register", e, message)
            }
        }
    }

    /// Unpaginated employee list for the salary form picker.
    pub async fn employee_options(&self) -> ClientResult<Vec<Employee>> {
        self.client.all_employees().await.map_err(|e| {
            if !e.is_unauthorized() {
                self.notifier.error("No employee records found");
            }
            ClientError::fetch(Employee::SPEC.name, e)
        })
    }

    pub async fn create_salary(&self, form: SalaryForm) -> ClientResult<()> {
        let salary = form.into_new_salary()?;
        match self.client.store_salary(&salary).await {
            Ok(()) => self.succeeded(&self.salaries, "Salary created successfully").await,
            Err(e) => self.fail("create salary", e, "Failed to create salary"),
        }
    }

    pub async fn create_profile(&self, form: ProfileForm) -> ClientResult<()> {
        let profile = form.into_new_profile()?;
        match self.client.create_profile(&profile).await {
            Ok(()) => self.succeeded(&self.profiles, "Profile created successfully").await,
            Err(e) => self.fail("create profile", e, "Can't create profile"),
        }
    }

    pub async fn update_profile(&self, user_id: &RecordId, form: ProfileForm) -> ClientResult<()> {
        let update = form.into_update()?;
        match self.client.update_profile(user_id, &update).await {
            Ok(()) => self.succeeded(&self.profiles, "Profile updated successfully").await,
            Err(e) => self.fail("update profile", e, "Can't update profile"),
        }
    }

    pub async fn create_user(&self, form: UserForm) -> ClientResult<()> {
        let user = form.into_new_user()?;
        match self.client.create_user(&user).await {
            Ok(()) => self.succeeded(&self.users, "User created successfully").await,
            Err(e) => self.fail("create user", e, "Can't create user"),
        }
    }

    pub async fn update_employee(&self, id: &RecordId, update: EmployeeUpdate) -> ClientResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        match self.client.update_employee(id, &update).await {
            Ok(()) => self.succeeded(&self.employees, "Employee updated successfully").await,
            Err(e) => self.fail("update employee", e, "Failed to update employee"),
        }
    }

    pub async fn delete_employee(&self, id: &RecordId) -> ClientResult<()> {
        match self.client.destroy_employee(id).await {
            Ok(()) => self.succeeded(&self.employees, "Employee deleted successfully").await,
            Err(e) => self.fail("delete employee", e, "Failed to delete employee"),
        }
    }

    async fn succeeded<R: Resource>(
        &self,
        list: &ListController<R>,
        message: &str,
    ) -> ClientResult<()> {
        self.notifier.success(message);
        // The mutation stands even if the refresh does not
        if let Err(e) = list.refresh().await {
            tracing::warn!(resource = R::SPEC.name, error = %e, "Refresh after mutation failed");
        }
        Ok(())
    }

    fn fail(
        &self,
        action: &'static str,
        e: ClientError,
        message: impl Into<String>,
    ) -> ClientResult<()> {
        if !e.is_unauthorized() {
            self.notifier.error(message);
        }
        Err(ClientError::mutation(action, e))
    }
}

fn list_for<R: Resource>(client: &ApiClient, ctx: &ListContext) -> ListController<R> {
    ListController::new(Arc::new(client.clone()), ctx.clone())
}
