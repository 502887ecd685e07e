//! Optimistic field updates
//!
//! A status toggle is written into the loaded page before the request goes
//! out and written back if the request fails. While a record has an update
//! in flight, further updates to it are refused; other records are
//! unaffected.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;
use shared::RecordId;
use shared::models::{Employee, EmployeeStatusUpdate, Salary, SalaryStatusUpdate};

use crate::api::{FieldRequest, Resource};
use crate::list::ListController;
use crate::{ClientError, ClientResult};

/// Verb of a field update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Patch,
    Put,
}

impl From<UpdateMethod> for Method {
    fn from(method: UpdateMethod) -> Self {
        match method {
            UpdateMethod::Patch => Method::PATCH,
            UpdateMethod::Put => Method::PUT,
        }
    }
}

/// Describes one mutable field of `R` and how it is persisted.
pub struct StatusField<R, V> {
    pub name: &'static str,
    /// Used in the error chain ("Failed to {action}")
    pub action: &'static str,
    pub get: fn(&R) -> V,
    pub set: fn(&mut R, V),
    pub method: UpdateMethod,
    pub path: fn(&RecordId) -> String,
    pub body: fn(&V) -> serde_json::Result<Value>,
    pub success: fn(&V) -> String,
    /// Shown when the server gives no message of its own
    pub failure: &'static str,
}

impl<R, V> Clone for StatusField<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for StatusField<R, V> {}

impl<R, V> std::fmt::Debug for StatusField<R, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusField")
            .field("name", &self.name)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

impl<R, V> StatusField<R, V> {
    pub fn request(&self, id: &RecordId, value: &V) -> ClientResult<FieldRequest> {
        Ok(FieldRequest {
            method: self.method.into(),
            path: (self.path)(id),
            body: (self.body)(value)?,
        })
    }
}

fn employee_is_active(e: &Employee) -> bool {
    e.is_active
}

fn set_employee_active(e: &mut Employee, value: bool) {
    e.is_active = value;
}

fn employee_active_body(value: &bool) -> serde_json::Result<Value> {
    serde_json::to_value(EmployeeStatusUpdate { is_active: *value })
}

fn employee_active_message(value: &bool) -> String {
    let verb = if *value { "activated" } else { "deactivated" };
    format!("Employee {verb} successfully")
}

/// `Employee.isActive` via `PATCH updateEmployeeStatus/{id}`
pub const EMPLOYEE_ACTIVE: StatusField<Employee, bool> = StatusField {
    name: "isActive",
    action: "update employee status",
    get: employee_is_active,
    set: set_employee_active,
    method: UpdateMethod::Patch,
    path: crate::api::employee_status_path,
    body: employee_active_body,
    success: employee_active_message,
    failure: "Failed to update status",
};

fn salary_is_paid(s: &Salary) -> bool {
    s.status
}

fn set_salary_paid(s: &mut Salary, value: bool) {
    s.status = value;
}

fn salary_paid_body(value: &bool) -> serde_json::Result<Value> {
    serde_json::to_value(SalaryStatusUpdate { status: *value })
}

fn salary_paid_message(value: &bool) -> String {
    let state = if *value { "paid" } else { "pending" };
    format!("Salary marked {state} successfully")
}

/// `Salary.status` (paid/pending) via `PATCH updateSalaryStatus/{id}`
pub const SALARY_PAID: StatusField<Salary, bool> = StatusField {
    name: "status",
    action: "update salary payment status",
    get: salary_is_paid,
    set: set_salary_paid,
    method: UpdateMethod::Patch,
    path: crate::api::salary_status_path,
    body: salary_paid_body,
    success: salary_paid_message,
    failure: "Failed to update salary payment status",
};

/// Record ids with a mutation in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    ids: Arc<Mutex<HashSet<RecordId>>>,
}

impl InFlightSet {
    /// Mark `id` as in flight, or `None` if it already is.
    pub fn try_acquire(&self, id: &RecordId) -> Option<InFlightGuard> {
        if !self.ids.lock().insert(id.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: self.clone(),
            id: id.clone(),
        })
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.lock().is_empty()
    }
}

/// Releases the in-flight mark when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    set: InFlightSet,
    id: RecordId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.ids.lock().remove(&self.id);
    }
}

/// Applies [`StatusField`] updates to the records of one list.
pub struct OptimisticUpdater<R: Resource> {
    list: ListController<R>,
}

impl<R: Resource> Clone for OptimisticUpdater<R> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<R: Resource> OptimisticUpdater<R> {
    pub(crate) fn new(list: ListController<R>) -> Self {
        Self { list }
    }

    pub fn is_in_flight(&self, id: &RecordId) -> bool {
        self.list.in_flight().contains(id)
    }

    /// Write `value` into record `id` now, persist it, revert on failure.
    ///
    /// The request is sent even if the record already holds `value`.
    /// A record that is not on the loaded page is still updated server-side.
    pub async fn set_field<V>(
        &self,
        id: &RecordId,
        field: &StatusField<R, V>,
        value: V,
    ) -> ClientResult<()>
    where
        V: Clone + PartialEq + Send + Sync,
    {
        let request = field.request(id, &value)?;
        let _guard = self
            .list
            .in_flight()
            .try_acquire(id)
            .ok_or_else(|| ClientError::InFlight(id.clone()))?;

        let previous = self.list.update_record(id, |record| {
            let previous = (field.get)(record);
            (field.set)(record, value.clone());
            previous
        });

        tracing::debug!(%id, field = field.name, "Optimistic update sent");

        match self.list.api().update(request).await {
            Ok(()) => {
                self.list.notifier().success((field.success)(&value));
                Ok(())
            }
            Err(e) => {
                if let Some(previous) = previous {
                    // A reload may have replaced the row meanwhile; leave fresh data alone
                    self.list.update_record(id, |record| {
                        if (field.get)(record) == value {
                            (field.set)(record, previous);
                        }
                    });
                }
                tracing::warn!(%id, field = field.name, error = %e, "Update failed, reverted");
                if !e.is_unauthorized() {
                    let message = e.server_message().unwrap_or(field.failure).to_string();
                    self.list.notifier().error(message);
                }
                Err(ClientError::mutation(field.action, e))
            }
        }
    }
}
