use sea_orm_migration::prelude::*;

use crate::m20241001_000001_create_orders::Orders;

#[derive(DeriveIden)]
enum OrderDetails {
    Table,
    OrderId,
    ProductId,
    UnitPrice,
    Quantity,
    Discount,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No ON DELETE CASCADE: the service removes details before their order.
        manager
            .create_table(
                Table::create()
                    .table(OrderDetails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderDetails::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderDetails::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderDetails::UnitPrice)
                            .decimal_len(19, 4)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(OrderDetails::Quantity)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(OrderDetails::Discount)
                            .float()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrderDetails::OrderId)
                            .col(OrderDetails::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_details_orders")
                            .from(OrderDetails::Table, OrderDetails::OrderId)
                            .to(Orders::Table, Orders::OrderId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_details_order_id")
                    .table(OrderDetails::Table)
                    .col(OrderDetails::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDetails::Table).to_owned())
            .await
    }
}
