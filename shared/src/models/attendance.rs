//! Attendance Model

use crate::record::{Record, RecordId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Embedded employee reference (`{ "name": ... }`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attendance row from `attendance/v1/getAttendance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: RecordId,
    #[serde(default)]
    pub employee: EmployeeRef,
    pub check_in: DateTime<Utc>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attendance {
    /// Time between check-in and check-out; `None` while still checked in.
    pub fn worked(&self) -> Option<Duration> {
        self.check_out.map(|out| out - self.check_in)
    }
}

impl Record for Attendance {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.employee.name, &self.location]
    }
}
