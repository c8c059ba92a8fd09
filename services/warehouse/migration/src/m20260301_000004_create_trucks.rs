use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trucks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trucks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Trucks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Trucks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Trucks::DeletedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Trucks::ChassisNumber).string().not_null().default(""))
                    .col(ColumnDef::new(Trucks::LicensePlate).string().not_null().default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trucks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Trucks {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    ChassisNumber,
    LicensePlate,
}
