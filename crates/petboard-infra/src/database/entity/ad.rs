//! Ad entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use petboard_core::query::AdField;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    #[sea_orm(column_name = "type")]
    pub pet_type: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub danger: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub features: Option<String>,
    pub nickname: Option<String>,
    pub location: String,
    pub geo_location: Option<String>,
    pub time: DateTime,
    pub created_at: DateTimeWithTimeZone,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub extras: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Column {
    /// Column backing a filterable ad field.
    pub fn for_field(field: AdField) -> Self {
        match field {
            AdField::Status => Column::Status,
            AdField::Type => Column::PetType,
            AdField::Breed => Column::Breed,
            AdField::Size => Column::Size,
            AdField::Danger => Column::Danger,
        }
    }
}

/// Conversion from SeaORM Model to Domain Ad.
impl From<Model> for petboard_core::domain::Ad {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            pet_type: model.pet_type,
            breed: model.breed,
            color: model.color,
            size: model.size,
            danger: model.danger,
            features: model.features,
            nickname: model.nickname,
            location: model.location,
            geo_location: model.geo_location,
            time: model.time,
            created_at: model.created_at.into(),
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            extras: model.extras,
        }
    }
}

/// Conversion from a validated draft to an insertable ActiveModel.
impl From<petboard_core::domain::NewAd> for ActiveModel {
    fn from(ad: petboard_core::domain::NewAd) -> Self {
        Self {
            id: NotSet,
            user_id: Set(ad.user_id),
            status: Set(ad.status),
            pet_type: Set(ad.pet_type),
            breed: Set(ad.breed),
            color: Set(ad.color),
            size: Set(ad.size),
            danger: Set(ad.danger),
            features: Set(ad.features),
            nickname: Set(ad.nickname),
            location: Set(ad.location),
            geo_location: Set(ad.geo_location),
            time: Set(ad.time),
            created_at: Set(ad.created_at.into()),
            contact_name: Set(ad.contact_name),
            contact_phone: Set(ad.contact_phone),
            contact_email: Set(ad.contact_email),
            extras: Set(ad.extras),
        }
    }
}
