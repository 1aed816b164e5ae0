//! Inbound request bodies and their structural validation.
//!
//! Checks here are about shape only (presence, format, ranges). Business
//! rules such as minimum age live in the `User` aggregate.

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use domain::{Email, MAX_BASE_SALARY, MAX_PHONE_DIGITS};

use crate::service::{CreateUserCommand, UpdateUserCommand};

/// Body of `POST /api/v1/users`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Steven")]
    pub name: Option<String>,
    #[schema(example = "Garcia")]
    pub last_name: Option<String>,
    #[schema(example = "Carrera 60 # 53-14")]
    pub address: Option<String>,
    #[schema(example = "3001234567")]
    pub phone_number: Option<String>,
    #[schema(example = "1990-10-01")]
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "steven.garcia@test.com")]
    pub email: Option<String>,
    #[schema(example = "50000.00")]
    pub base_salary: Option<Decimal>,
    #[schema(example = "1234567890")]
    pub id_number: Option<String>,
}

/// Body of `PUT /api/v1/users/{id}`. Every rule applies only to fields that
/// are present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[schema(example = "Steven")]
    pub name: Option<String>,
    #[schema(example = "Garcia")]
    pub last_name: Option<String>,
    #[schema(example = "Calle 10 # 20-30")]
    pub address: Option<String>,
    #[schema(example = "3109876543")]
    pub phone_number: Option<String>,
    #[schema(example = "1990-10-01")]
    pub birth_date: Option<NaiveDate>,
    #[schema(example = "steven.garcia@test.com")]
    pub email: Option<String>,
    #[schema(example = "65000.00")]
    pub base_salary: Option<Decimal>,
    #[schema(example = "1234567890")]
    pub id_number: Option<String>,
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_phone(value: &str) -> Option<ValidationError> {
    if is_blank(value) {
        return Some(violation(
            "required",
            "Phone number is required and cannot be empty",
        ));
    }
    let digits_only = value.chars().all(|c| c.is_ascii_digit());
    if !digits_only || value.len() > MAX_PHONE_DIGITS {
        return Some(violation(
            "phone",
            "Phone number must contain only numbers and have at most 15 digits",
        ));
    }
    None
}

fn check_email(value: &str) -> Option<ValidationError> {
    if is_blank(value) {
        return Some(violation("required", "Email is required and cannot be empty"));
    }
    if !Email::is_valid_format(value) {
        return Some(violation("email", "Email must have a valid format"));
    }
    None
}

fn check_birth_date(value: NaiveDate) -> Option<ValidationError> {
    if value >= Utc::now().date_naive() {
        return Some(violation("past", "Birth date must be in the past"));
    }
    None
}

fn check_salary(value: Decimal) -> Option<ValidationError> {
    if value <= Decimal::ZERO {
        return Some(violation("range", "Base salary must be greater than 0"));
    }
    if value > MAX_BASE_SALARY {
        return Some(violation("range", "Base salary cannot exceed 15,000,000"));
    }
    None
}

/// Collects violations for one request body.
struct Checks(ValidationErrors);

impl Checks {
    fn new() -> Self {
        Self(ValidationErrors::new())
    }

    fn add(&mut self, field: &'static str, error: Option<ValidationError>) {
        if let Some(error) = error {
            self.0.add(field, error);
        }
    }

    fn text(&mut self, field: &'static str, value: Option<&str>, message: &'static str) {
        let blank = value.map_or(true, is_blank);
        self.add(field, blank.then(|| violation("required", message)));
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::new();

        checks.text("name", self.name.as_deref(), "Name is required and cannot be empty");
        checks.text(
            "lastName",
            self.last_name.as_deref(),
            "Last name is required and cannot be empty",
        );
        checks.text(
            "address",
            self.address.as_deref(),
            "Address is required and cannot be empty",
        );
        checks.add(
            "phoneNumber",
            check_phone(self.phone_number.as_deref().unwrap_or_default()),
        );
        checks.add(
            "birthDate",
            match self.birth_date {
                Some(date) => check_birth_date(date),
                None => Some(violation("required", "Birth date is required")),
            },
        );
        checks.add("email", check_email(self.email.as_deref().unwrap_or_default()));
        checks.add(
            "baseSalary",
            match self.base_salary {
                Some(salary) => check_salary(salary),
                None => Some(violation("required", "Base salary is required")),
            },
        );
        checks.text(
            "idNumber",
            self.id_number.as_deref(),
            "ID number is required and cannot be empty",
        );

        checks.finish()
    }
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = Checks::new();

        if let Some(name) = self.name.as_deref() {
            checks.text("name", Some(name), "Name cannot be empty");
        }
        if let Some(last_name) = self.last_name.as_deref() {
            checks.text("lastName", Some(last_name), "Last name cannot be empty");
        }
        if let Some(address) = self.address.as_deref() {
            checks.text("address", Some(address), "Address cannot be empty");
        }
        if let Some(phone) = self.phone_number.as_deref() {
            checks.add("phoneNumber", check_phone(phone));
        }
        if let Some(date) = self.birth_date {
            checks.add("birthDate", check_birth_date(date));
        }
        if let Some(email) = self.email.as_deref() {
            checks.add("email", check_email(email));
        }
        if let Some(salary) = self.base_salary {
            checks.add("baseSalary", check_salary(salary));
        }
        if let Some(id_number) = self.id_number.as_deref() {
            checks.text("idNumber", Some(id_number), "ID number cannot be empty");
        }

        checks.finish()
    }
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name.unwrap_or_default(),
            last_name: request.last_name.unwrap_or_default(),
            address: request.address,
            phone_number: request.phone_number,
            birth_date: request.birth_date,
            email: request.email,
            base_salary: request.base_salary,
            id_number: request.id_number,
        }
    }
}

impl UpdateUserRequest {
    pub fn into_command(self, id: String) -> UpdateUserCommand {
        UpdateUserCommand {
            id,
            name: self.name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            address: self.address,
            phone_number: self.phone_number,
            birth_date: self.birth_date,
            email: self.email,
            base_salary: self.base_salary,
            id_number: self.id_number,
        }
    }
}
