use super::{NewOrder, NewOrderDetail, OrderRepository, OrderWithDetails};
use crate::entities::{order_detail_entity as order_details, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::utils::SkipTake;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// PostgreSQL-backed repository.
pub struct SeaOrmOrderRepository {
    pool: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }
}

fn detail_active_model(order_id: i32, detail: NewOrderDetail) -> order_details::ActiveModel {
    order_details::ActiveModel {
        order_id: Set(order_id),
        product_id: Set(detail.product_id),
        unit_price: Set(detail.unit_price),
        quantity: Set(detail.quantity),
        discount: Set(detail.discount),
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_orders(&self, window: SkipTake) -> AppResult<Vec<OrderWithDetails>> {
        let order_list = orders::Entity::find()
            .order_by_asc(orders::Column::OrderId)
            .offset(window.skip)
            .limit(window.take)
            .all(&self.pool)
            .await?;

        let detail_lists = order_list
            .load_many(order_details::Entity, &self.pool)
            .await?;

        Ok(order_list
            .into_iter()
            .zip(detail_lists)
            .map(|(order, mut details)| {
                details.sort_by_key(|d| d.product_id);
                OrderWithDetails { order, details }
            })
            .collect())
    }

    async fn find_order(&self, order_id: i32) -> AppResult<Option<OrderWithDetails>> {
        let Some(order) = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let details = order
            .find_related(order_details::Entity)
            .order_by_asc(order_details::Column::ProductId)
            .all(&self.pool)
            .await?;

        Ok(Some(OrderWithDetails { order, details }))
    }

    async fn order_exists(&self, order_id: i32) -> AppResult<bool> {
        let count = orders::Entity::find()
            .filter(orders::Column::OrderId.eq(order_id))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn insert_order(
        &self,
        order: NewOrder,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<OrderWithDetails> {
        let txn = self.pool.begin().await?;

        let order = orders::ActiveModel {
            customer_id: Set(order.customer_id),
            employee_id: Set(order.employee_id),
            order_date: Set(order.order_date),
            required_date: Set(order.required_date),
            shipped_date: Set(None),
            ship_via: Set(order.ship_via),
            freight: Set(order.freight),
            ship_name: Set(order.ship_name),
            ship_address: Set(order.ship_address),
            ship_city: Set(order.ship_city),
            ship_region: Set(order.ship_region),
            ship_postal_code: Set(order.ship_postal_code),
            ship_country: Set(order.ship_country),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut saved = Vec::with_capacity(details.len());
        for detail in details {
            saved.push(
                detail_active_model(order.order_id, detail)
                    .insert(&txn)
                    .await?,
            );
        }

        txn.commit().await?;

        Ok(OrderWithDetails {
            order,
            details: saved,
        })
    }

    async fn insert_order_details(
        &self,
        order_id: i32,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<Vec<order_details::Model>> {
        let txn = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(details.len());
        for detail in details {
            saved.push(detail_active_model(order_id, detail).insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(saved)
    }

    async fn delete_order(&self, order_id: i32) -> AppResult<u64> {
        let txn = self.pool.begin().await?;

        let removed = order_details::Entity::delete_many()
            .filter(order_details::Column::OrderId.eq(order_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let result = orders::Entity::delete_by_id(order_id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound(format!("Order {order_id} not found")));
        }

        txn.commit().await?;
        Ok(removed)
    }
}
