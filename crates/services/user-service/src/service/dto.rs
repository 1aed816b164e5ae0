//! Use-case inputs and outputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Data for registering a new user.
///
/// Components the entity checks for presence stay optional so it can name
/// whichever one is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserCommand {
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub base_salary: Option<Decimal>,
    pub id_number: Option<String>,
}

/// Full replacement of a stored user's fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserCommand {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub base_salary: Option<Decimal>,
    /// Left empty to keep the stored value
    pub id_number: Option<String>,
}

/// User as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "Steven")]
    pub name: String,
    #[schema(example = "Garcia")]
    pub last_name: String,
    #[schema(example = "Carrera 60 # 53-14")]
    pub address: Option<String>,
    #[schema(example = "3001234567")]
    pub phone_number: String,
    #[schema(example = "1990-10-01")]
    pub birth_date: NaiveDate,
    #[schema(example = "steven.garcia@test.com")]
    pub email: String,
    #[schema(example = "50000.00")]
    pub base_salary: Decimal,
    #[schema(example = "1234567890")]
    pub id_number: String,
}
