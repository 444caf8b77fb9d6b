use super::{NewOrder, NewOrderDetail, OrderRepository, OrderWithDetails};
use crate::entities::{order_detail_entity, order_entity};
use crate::error::{AppError, AppResult};
use crate::utils::SkipTake;
use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    orders: BTreeMap<i32, order_entity::Model>,
    details: Vec<order_detail_entity::Model>,
    last_order_id: i32,
}

impl Tables {
    fn details_of(&self, order_id: i32) -> Vec<order_detail_entity::Model> {
        let mut details: Vec<_> = self
            .details
            .iter()
            .filter(|d| d.order_id == order_id)
            .cloned()
            .collect();
        details.sort_by_key(|d| d.product_id);
        details
    }

    /// Mirrors the (order_id, product_id) primary key and the foreign key
    /// on order_details. Nothing is written when a check fails.
    fn check_new_details(&self, order_id: i32, details: &[NewOrderDetail]) -> AppResult<()> {
        if !self.orders.contains_key(&order_id) {
            return Err(DbErr::Custom(format!(
                "order_details references missing order {order_id}"
            ))
            .into());
        }
        for (i, detail) in details.iter().enumerate() {
            let stored = self
                .details
                .iter()
                .any(|d| d.order_id == order_id && d.product_id == detail.product_id);
            let repeated = details[..i]
                .iter()
                .any(|d| d.product_id == detail.product_id);
            if stored || repeated {
                return Err(DbErr::Custom(format!(
                    "duplicate key (order_id, product_id) = ({order_id}, {})",
                    detail.product_id
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Process-local store with the same observable behaviour as the
/// database-backed repository. Each call holds the lock for its whole
/// duration, which makes every operation atomic.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    tables: Mutex<Tables>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Ids of new orders continue after the highest seeded id.
    pub fn with_data(
        orders: Vec<order_entity::Model>,
        details: Vec<order_detail_entity::Model>,
    ) -> Self {
        let last_order_id = orders.iter().map(|o| o.order_id).max().unwrap_or(0);
        Self {
            tables: Mutex::new(Tables {
                orders: orders.into_iter().map(|o| (o.order_id, o)).collect(),
                details,
                last_order_id,
            }),
        }
    }

    pub fn order_count(&self) -> AppResult<usize> {
        Ok(self.lock()?.orders.len())
    }

    pub fn detail_count(&self) -> AppResult<usize> {
        Ok(self.lock()?.details.len())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| AppError::InternalError(format!("In-memory store poisoned: {e}")))
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_orders(&self, window: SkipTake) -> AppResult<Vec<OrderWithDetails>> {
        let tables = self.lock()?;
        Ok(window
            .apply(tables.orders.values())
            .map(|order| OrderWithDetails {
                order: order.clone(),
                details: tables.details_of(order.order_id),
            })
            .collect())
    }

    async fn find_order(&self, order_id: i32) -> AppResult<Option<OrderWithDetails>> {
        let tables = self.lock()?;
        Ok(tables.orders.get(&order_id).map(|order| OrderWithDetails {
            order: order.clone(),
            details: tables.details_of(order_id),
        }))
    }

    async fn order_exists(&self, order_id: i32) -> AppResult<bool> {
        Ok(self.lock()?.orders.contains_key(&order_id))
    }

    async fn insert_order(
        &self,
        order: NewOrder,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<OrderWithDetails> {
        let mut tables = self.lock()?;

        let order_id = tables
            .last_order_id
            .checked_add(1)
            .ok_or_else(|| AppError::InternalError("Order id space exhausted".to_string()))?;
        let order = order_entity::Model {
            order_id,
            customer_id: order.customer_id,
            employee_id: order.employee_id,
            order_date: order.order_date,
            required_date: order.required_date,
            shipped_date: None,
            ship_via: order.ship_via,
            freight: order.freight,
            ship_name: order.ship_name,
            ship_address: order.ship_address,
            ship_city: order.ship_city,
            ship_region: order.ship_region,
            ship_postal_code: order.ship_postal_code,
            ship_country: order.ship_country,
        };

        tables.orders.insert(order_id, order.clone());
        if let Err(e) = tables.check_new_details(order_id, &details) {
            tables.orders.remove(&order_id);
            return Err(e);
        }

        let saved: Vec<_> = details.iter().map(|d| d.for_order(order_id)).collect();
        tables.details.extend(saved.iter().cloned());
        tables.last_order_id = order_id;

        Ok(OrderWithDetails {
            order,
            details: saved,
        })
    }

    async fn insert_order_details(
        &self,
        order_id: i32,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<Vec<order_detail_entity::Model>> {
        let mut tables = self.lock()?;
        tables.check_new_details(order_id, &details)?;

        let saved: Vec<_> = details.iter().map(|d| d.for_order(order_id)).collect();
        tables.details.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn delete_order(&self, order_id: i32) -> AppResult<u64> {
        let mut tables = self.lock()?;
        if !tables.orders.contains_key(&order_id) {
            return Err(AppError::NotFound(format!("Order {order_id} not found")));
        }

        let before = tables.details.len();
        tables.details.retain(|d| d.order_id != order_id);
        let removed = (before - tables.details.len()) as u64;
        tables.orders.remove(&order_id);

        Ok(removed)
    }
}
