//! Form input validation
//!
//! Forms hold what the user typed. `into_*` validates, converts to the wire
//! payload, and reports every offending field at once.

use std::borrow::Cow;

use shared::client::{LoginRequest, RegisterRequest};
use shared::models::{NewProfile, NewSalary, NewUser, ProfileUpdate};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ClientResult;

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn into_request(self) -> ClientResult<LoginRequest> {
        self.validate()?;
        Ok(LoginRequest {
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "Confirm password is required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn into_request(self) -> ClientResult<RegisterRequest> {
        self.validate()?;
        Ok(RegisterRequest {
            name: self.name,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
        })
    }
}

/// New salary entry. Numbers arrive as typed text.
#[derive(Debug, Clone, Default, Validate)]
pub struct SalaryForm {
    #[validate(length(min = 1, message = "Basic salary is required"))]
    pub basic_salary: String,
    #[validate(length(min = 1, message = "Month is required"))]
    pub month: String,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    #[validate(length(min = 1, message = "Employee is required"))]
    pub employee_id: String,
}

impl SalaryForm {
    /// New entries always start unpaid.
    pub fn into_new_salary(self) -> ClientResult<NewSalary> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let basic_salary = parse_field::<f64>(
            &mut errors,
            "basic_salary",
            &self.basic_salary,
            "Basic salary must be a number",
        );
        let month = parse_field::<u32>(&mut errors, "month", &self.month, "Month must be a number")
            .filter(|m| {
                let valid = (1..=12).contains(m);
                if !valid {
                    reject(&mut errors, "month", "range", "Month must be between 1 and 12");
                }
                valid
            });
        let year = parse_field::<i32>(&mut errors, "year", &self.year, "Year must be a number");
        let employee_id = parse_field::<i64>(
            &mut errors,
            "employee_id",
            &self.employee_id,
            "Employee is required",
        );

        match (basic_salary, month, year, employee_id) {
            (Some(basic_salary), Some(month), Some(year), Some(employee_id))
                if errors.is_empty() =>
            {
                Ok(NewSalary {
                    basic_salary,
                    month,
                    year,
                    payment_method: self.payment_method,
                    status: false,
                    employee_id,
                })
            }
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 2, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub position: String,
    pub github: String,
    pub linkedin: String,
    pub user_id: i64,
}

impl ProfileForm {
    pub fn into_new_profile(self) -> ClientResult<NewProfile> {
        self.validate()?;
        Ok(NewProfile {
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            department: self.department,
            position: self.position,
            github: self.github,
            linkedin: self.linkedin,
            user_id: self.user_id,
        })
    }

    /// The edit dialog sends only the contact fields.
    pub fn into_update(self) -> ClientResult<ProfileUpdate> {
        self.validate()?;
        Ok(ProfileUpdate {
            github: self.github,
            linkedin: self.linkedin,
            phone_number: self.phone_number,
            department: self.department,
            position: self.position,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UserForm {
    #[validate(length(min = 2, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

impl UserForm {
    pub fn into_new_user(self) -> ClientResult<NewUser> {
        self.validate()?;
        Ok(NewUser {
            name: self.name,
            email: self.email,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &'static str,
) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        // Already reported by the length check
        return None;
    }
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            reject(errors, field, "parse", message);
            None
        }
    }
}

fn reject(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &'static str,
) {
    errors.add(field, ValidationError::new(code).with_message(Cow::Borrowed(message)));
}
