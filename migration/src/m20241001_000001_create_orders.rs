use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    OrderId,
    CustomerId,
    EmployeeId,
    OrderDate,
    RequiredDate,
    ShippedDate,
    ShipVia,
    Freight,
    ShipName,
    ShipAddress,
    ShipCity,
    ShipRegion,
    ShipPostalCode,
    ShipCountry,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::OrderId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerId).string_len(5).not_null())
                    .col(ColumnDef::new(Orders::EmployeeId).integer())
                    .col(
                        ColumnDef::new(Orders::OrderDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Orders::RequiredDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Orders::ShippedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Orders::ShipVia).integer())
                    .col(ColumnDef::new(Orders::Freight).decimal_len(19, 4))
                    .col(ColumnDef::new(Orders::ShipName).string_len(40))
                    .col(ColumnDef::new(Orders::ShipAddress).string_len(60))
                    .col(ColumnDef::new(Orders::ShipCity).string_len(15))
                    .col(ColumnDef::new(Orders::ShipRegion).string_len(15))
                    .col(ColumnDef::new(Orders::ShipPostalCode).string_len(10))
                    .col(ColumnDef::new(Orders::ShipCountry).string_len(15))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer_id")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}
