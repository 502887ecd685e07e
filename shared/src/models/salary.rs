//! Salary Model

use super::attendance::EmployeeRef;
use crate::record::{Record, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Salary row from `salary/v1/getAllSalary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: RecordId,
    #[serde(default)]
    pub employee: EmployeeRef,
    #[serde(deserialize_with = "crate::util::f64_from_number_or_string")]
    pub basic_salary: f64,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub payment_method: String,
    /// `true` once paid
    #[serde(default)]
    pub status: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Salary {
    pub fn is_paid(&self) -> bool {
        self.status
    }
}

impl Record for Salary {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.employee.name]
    }
}

/// Create salary payload (`salary/v1/storeSalary`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSalary {
    pub basic_salary: f64,
    pub month: u32,
    pub year: i32,
    pub payment_method: String,
    /// New salaries start unpaid
    pub status: bool,
    pub employee_id: i64,
}

/// Payment toggle payload (`updateSalaryStatus/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStatusUpdate {
    pub status: bool,
}
