//! Data access for orders and their line items.
//!
//! The service layer only sees [`OrderRepository`]; production wires in
//! [`SeaOrmOrderRepository`], tests use [`InMemoryOrderRepository`].

use crate::entities::{order_detail_entity, order_entity};
use crate::error::AppResult;
use crate::utils::SkipTake;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub mod memory;
pub mod order_repository;

pub use memory::InMemoryOrderRepository;
pub use order_repository::SeaOrmOrderRepository;

/// An order together with all of its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithDetails {
    pub order: order_entity::Model,
    pub details: Vec<order_detail_entity::Model>,
}

/// Order fields known before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: String,
    pub employee_id: Option<i32>,
    pub order_date: DateTime<Utc>,
    pub required_date: Option<DateTime<Utc>>,
    pub ship_via: Option<i32>,
    pub freight: Option<Decimal>,
    pub ship_name: Option<String>,
    pub ship_address: Option<String>,
    pub ship_city: Option<String>,
    pub ship_region: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: Option<String>,
}

/// A line item before it is attached to an order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderDetail {
    pub product_id: i32,
    pub unit_price: Decimal,
    pub quantity: i16,
    pub discount: f32,
}

impl NewOrderDetail {
    pub fn for_order(&self, order_id: i32) -> order_detail_entity::Model {
        order_detail_entity::Model {
            order_id,
            product_id: self.product_id,
            unit_price: self.unit_price,
            quantity: self.quantity,
            discount: self.discount,
        }
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders in ascending id order, restricted to `window`. Details are
    /// ordered by product id.
    async fn find_orders(&self, window: SkipTake) -> AppResult<Vec<OrderWithDetails>>;

    async fn find_order(&self, order_id: i32) -> AppResult<Option<OrderWithDetails>>;

    async fn order_exists(&self, order_id: i32) -> AppResult<bool>;

    /// Inserts the order and its details in one transaction and returns
    /// them with the assigned id. Details keep their input order.
    async fn insert_order(
        &self,
        order: NewOrder,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<OrderWithDetails>;

    /// Inserts details for an existing order in one transaction.
    async fn insert_order_details(
        &self,
        order_id: i32,
        details: Vec<NewOrderDetail>,
    ) -> AppResult<Vec<order_detail_entity::Model>>;

    /// Removes the order's details and then the order, in one transaction.
    /// Returns the number of details removed, or `NotFound` when the order
    /// is gone.
    async fn delete_order(&self, order_id: i32) -> AppResult<u64>;
}
