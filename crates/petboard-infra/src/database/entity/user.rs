//! User entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ad::Entity")]
    Ad,
}

impl Related<super::ad::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ad.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for petboard_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            phone: model.phone,
            name: model.name,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from a registration draft to an insertable ActiveModel.
impl From<petboard_core::domain::NewUser> for ActiveModel {
    fn from(user: petboard_core::domain::NewUser) -> Self {
        Self {
            id: NotSet,
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            phone: Set(user.phone),
            name: Set(user.name),
            created_at: Set(user.created_at.into()),
        }
    }
}
