// Salary: list, create; the paid/pending toggle goes through SALARY_PAID

use serde::de::IgnoredAny;
use shared::RecordId;
use shared::models::{NewSalary, Salary};

use super::{Resource, ResourceSpec};
use crate::ClientResult;
use crate::http::ApiClient;

impl Resource for Salary {
    const SPEC: ResourceSpec = ResourceSpec {
        name: "salary",
        list_path: "api/salary/v1/getAllSalary",
        route: "/salary",
        searchable: true,
    };
}

pub(crate) const STORE_PATH: &str = "api/salary/v1/storeSalary";

pub(crate) fn status_path(id: &RecordId) -> String {
    format!("api/salary/v1/updateSalaryStatus/{id}")
}

impl ApiClient {
    pub async fn store_salary(&self, salary: &NewSalary) -> ClientResult<()> {
        let _: IgnoredAny = self.post(STORE_PATH, salary).await?;
        Ok(())
    }
}
