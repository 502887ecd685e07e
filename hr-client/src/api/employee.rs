// Employees: list, edit, delete; the status toggle goes through EMPLOYEE_ACTIVE

use serde::de::IgnoredAny;
use shared::models::{Employee, EmployeeUpdate};
use shared::{ListResponse, RecordId};

use super::{Resource, ResourceSpec};
use crate::ClientResult;
use crate::http::ApiClient;

impl Resource for Employee {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "employee",
        list_path: "api/employee/v1/getAllEmployee",
        route: "/employee",
        searchable: true,
    };
}

pub(crate) fn update_path(id: &RecordId) -> String {
    format!("api/employee/v1/updateEmployee/{id}")
}

pub(crate) fn status_path(id: &RecordId) -> String {
    format!("api/employee/v1/updateEmployeeStatus/{id}")
}

pub(crate) fn destroy_path(id: &RecordId) -> String {
    format!("api/employee/v1/destroyEmployee/{id}")
}

impl ApiClient {
    /// Every employee, unpaginated. Feeds the employee picker on the salary form.
    pub async fn all_employees(&self) -> ClientResult<Vec<Employee>> {
        let resp: ListResponse<Employee> = self.get(Employee::SPEC.list_path, &[]).await?;
        Ok(resp.data)
    }

    pub async fn update_employee(
        &self,
        id: &RecordId,
        update: &EmployeeUpdate,
    ) -> ClientResult<()> {
        let _: IgnoredAny = self.put(&update_path(id), update).await?;
        Ok(())
    }

    pub async fn destroy_employee(&self, id: &RecordId) -> ClientResult<()> {
        let _: IgnoredAny = self.delete(&destroy_path(id)).await?;
        Ok(())
    }
}
