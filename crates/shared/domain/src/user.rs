//! User aggregate root.

use std::hash::{Hash, Hasher};

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::constants::{MAX_BASE_SALARY, MIN_USER_AGE_YEARS};
use crate::error::{DomainError, DomainResult};
use crate::value_objects::{Email, PhoneNumber};

/// Unvalidated field values for a [`User`].
///
/// Components that may be missing from an inbound payload are `Option`s so the
/// aggregate can report which one was absent.
#[derive(Debug, Clone, Default)]
pub struct UserProps {
    pub id: Option<String>,
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone_number: Option<PhoneNumber>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<Email>,
    pub base_salary: Option<Decimal>,
    pub id_number: Option<String>,
}

/// User domain entity.
///
/// Immutable once built: an update produces a new `User` carrying the same id.
/// Identity is the id alone, field contents do not take part in equality.
#[derive(Debug, Clone)]
pub struct User {
    id: Option<String>,
    name: String,
    last_name: String,
    address: Option<String>,
    phone_number: PhoneNumber,
    birth_date: NaiveDate,
    email: Email,
    base_salary: Decimal,
    id_number: String,
}

impl User {
    /// Build a user, checking every invariant against today's date.
    pub fn create(props: UserProps) -> DomainResult<Self> {
        Self::create_as_of(props, Utc::now().date_naive())
    }

    /// Build a user, checking the minimum age against `today`.
    pub fn create_as_of(props: UserProps, today: NaiveDate) -> DomainResult<Self> {
        let UserProps {
            id,
            name,
            last_name,
            address,
            phone_number,
            birth_date,
            email,
            base_salary,
            id_number,
        } = props;

        if name.trim().is_empty() {
            return Err(DomainError::validation("Name cannot be null or empty"));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::validation("Last name cannot be null or empty"));
        }

        let phone_number =
            phone_number.ok_or_else(|| DomainError::null_argument("Phone number cannot be null"))?;
        let birth_date = validate_birth_date(birth_date, today)?;
        let email = email.ok_or_else(|| DomainError::null_argument("Email cannot be null"))?;
        let base_salary = validate_base_salary(base_salary)?;

        let id_number = match id_number.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => return Err(DomainError::validation("ID number cannot be null or empty")),
        };

        Ok(Self {
            id,
            name,
            last_name,
            address,
            phone_number,
            birth_date,
            email,
            base_salary,
            id_number,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    pub fn id_number(&self) -> &str {
        &self.id_number
    }
}

fn validate_birth_date(birth_date: Option<NaiveDate>, today: NaiveDate) -> DomainResult<NaiveDate> {
    let birth_date = birth_date.ok_or_else(|| DomainError::validation("Birth date cannot be null"))?;

    // Feb 29 minus whole years lands on Feb 28
    let latest_allowed = today
        .checked_sub_months(Months::new(MIN_USER_AGE_YEARS * 12))
        .ok_or_else(|| DomainError::validation("User must be at least 18 years old"))?;

    if birth_date > latest_allowed {
        return Err(DomainError::validation("User must be at least 18 years old"));
    }
    Ok(birth_date)
}

fn validate_base_salary(base_salary: Option<Decimal>) -> DomainResult<Decimal> {
    let base_salary =
        base_salary.ok_or_else(|| DomainError::validation("Base salary cannot be null"))?;

    if base_salary.is_sign_negative() && !base_salary.is_zero() {
        return Err(DomainError::validation("Base salary cannot be negative"));
    }
    if base_salary > MAX_BASE_SALARY {
        return Err(DomainError::validation(
            "Base salary cannot be greater than 15,000,000",
        ));
    }
    Ok(base_salary)
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
