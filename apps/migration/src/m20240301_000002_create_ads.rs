use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ads::UserId).integer().not_null())
                    .col(ColumnDef::new(Ads::Status).string().not_null())
                    .col(ColumnDef::new(Ads::Type).string().not_null())
                    .col(ColumnDef::new(Ads::Breed).string().null())
                    .col(ColumnDef::new(Ads::Color).string().null())
                    .col(ColumnDef::new(Ads::Size).string().null())
                    .col(ColumnDef::new(Ads::Danger).string().null())
                    .col(ColumnDef::new(Ads::Features).text().null())
                    .col(ColumnDef::new(Ads::Nickname).string().null())
                    .col(ColumnDef::new(Ads::Location).string().not_null())
                    .col(ColumnDef::new(Ads::GeoLocation).string().null())
                    .col(ColumnDef::new(Ads::Time).date_time().not_null())
                    .col(
                        ColumnDef::new(Ads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ads::ContactName).string().null())
                    .col(ColumnDef::new(Ads::ContactPhone).string().null())
                    .col(ColumnDef::new(Ads::ContactEmail).string().null())
                    .col(ColumnDef::new(Ads::Extras).json().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ads_user_id")
                            .from(Ads::Table, Ads::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings always sort by creation time.
        manager
            .create_index(
                Index::create()
                    .name("idx_ads_created_at")
                    .table(Ads::Table)
                    .col(Ads::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ads {
    Table,
    Id,
    UserId,
    Status,
    Type,
    Breed,
    Color,
    Size,
    Danger,
    Features,
    Nickname,
    Location,
    GeoLocation,
    Time,
    CreatedAt,
    ContactName,
    ContactPhone,
    ContactEmail,
    Extras,
}
