use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string_len(Products::Name, 255))
                    .col(double(Products::CoordinatesX))
                    .col(big_integer(Products::CoordinatesY))
                    .col(
                        timestamp_with_time_zone(Products::CreationDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer_null(Products::Price))
                    .col(string_len_null(Products::PartNumber, 64))
                    .col(double(Products::ManufactureCost))
                    .col(string_null(Products::UnitOfMeasure))
                    .col(string_null(Products::OwnerName))
                    .col(date_null(Products::OwnerBirthday))
                    .col(integer_null(Products::OwnerHeight))
                    .col(string_len_null(Products::OwnerPassportId, 64))
                    .check(Expr::col(Products::Price).gt(0))
                    .check(Expr::col(Products::ManufactureCost).gte(0))
                    .to_owned(),
            )
            .await?;

        // Bulk deletes filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Products::Table)
                    .col(Products::Price)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_owner_name")
                    .table(Products::Table)
                    .col(Products::OwnerName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    CoordinatesX,
    CoordinatesY,
    CreationDate,
    Price,
    PartNumber,
    ManufactureCost,
    UnitOfMeasure,
    OwnerName,
    OwnerBirthday,
    OwnerHeight,
    OwnerPassportId,
}
