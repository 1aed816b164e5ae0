//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Email, PhoneNumber, User, UserProps};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone_number: String,
    pub birth_date: Date,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub base_salary: Decimal,
    #[sea_orm(unique)]
    pub identity_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rebuild the aggregate from a stored row, re-running every invariant.
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        User::create(UserProps {
            id: Some(model.id),
            name: model.name,
            last_name: model.last_name,
            address: model.address,
            phone_number: Some(PhoneNumber::new(model.phone_number)?),
            birth_date: Some(model.birth_date),
            email: Some(Email::new(model.email)?),
            base_salary: Some(model.base_salary),
            id_number: Some(model.identity_number),
        })
    }
}

/// Every column set, for both insert and overwrite.
impl ActiveModel {
    pub fn from_user(id: String, user: &User) -> Self {
        Self {
            id: Set(id),
            name: Set(user.name().to_string()),
            last_name: Set(user.last_name().to_string()),
            address: Set(user.address().map(str::to_string)),
            phone_number: Set(user.phone_number().value().to_string()),
            birth_date: Set(user.birth_date()),
            email: Set(user.email().value().to_string()),
            base_salary: Set(user.base_salary()),
            identity_number: Set(user.id_number().to_string()),
        }
    }
}
