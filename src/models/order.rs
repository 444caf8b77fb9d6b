use crate::entities::{order_detail_entity, order_entity};
use crate::repositories::{NewOrder, NewOrderDetail, OrderWithDetails};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: i32,
    pub customer_id: String,
    pub employee_id: Option<i32>,
    pub order_date: DateTime<Utc>,
    pub required_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub ship_via: Option<i32>,
    pub freight: Option<Decimal>,
    pub ship_name: Option<String>,
    pub ship_address: Option<String>,
    pub ship_city: Option<String>,
    pub ship_region: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: Option<String>,
    pub order_details: Vec<OrderDetailResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    pub order_id: i32,
    pub product_id: i32,
    pub unit_price: Decimal,
    pub quantity: i16,
    pub discount: f32,
}

/// A line item as supplied by the caller. Price, quantity and discount
/// default to zero when omitted and are validated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailRequest {
    pub product_id: i32,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub quantity: i16,
    #[serde(default)]
    pub discount: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub employee_id: Option<i32>,
    pub required_date: Option<DateTime<Utc>>,
    pub ship_via: Option<i32>,
    pub freight: Option<Decimal>,
    pub ship_name: Option<String>,
    pub ship_address: Option<String>,
    pub ship_city: Option<String>,
    pub ship_region: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: Option<String>,
    #[serde(default)]
    pub order_details: Vec<OrderDetailRequest>,
}

#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    /// Number of orders to skip
    pub skip: Option<u64>,
    /// Maximum number of orders to return
    pub take: Option<u64>,
}

impl From<order_detail_entity::Model> for OrderDetailResponse {
    fn from(m: order_detail_entity::Model) -> Self {
        Self {
            order_id: m.order_id,
            product_id: m.product_id,
            unit_price: m.unit_price,
            quantity: m.quantity,
            discount: m.discount,
        }
    }
}

impl From<OrderWithDetails> for OrderResponse {
    fn from(row: OrderWithDetails) -> Self {
        let OrderWithDetails { order, details } = row;
        let order_entity::Model {
            order_id,
            customer_id,
            employee_id,
            order_date,
            required_date,
            shipped_date,
            ship_via,
            freight,
            ship_name,
            ship_address,
            ship_city,
            ship_region,
            ship_postal_code,
            ship_country,
        } = order;

        Self {
            order_id,
            customer_id,
            employee_id,
            order_date,
            required_date,
            shipped_date,
            ship_via,
            freight,
            ship_name,
            ship_address,
            ship_city,
            ship_region,
            ship_postal_code,
            ship_country,
            order_details: details.into_iter().map(OrderDetailResponse::from).collect(),
        }
    }
}

impl From<&OrderDetailRequest> for NewOrderDetail {
    fn from(req: &OrderDetailRequest) -> Self {
        Self {
            product_id: req.product_id,
            unit_price: req.unit_price,
            quantity: req.quantity,
            discount: req.discount,
        }
    }
}

impl CreateOrderRequest {
    /// Builds the order draft. `order_date` always comes from the caller of
    /// this function, never from the request.
    pub fn into_new_order(self, order_date: DateTime<Utc>) -> NewOrder {
        NewOrder {
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            order_date,
            required_date: self.required_date,
            ship_via: self.ship_via,
            freight: self.freight,
            ship_name: self.ship_name,
            ship_address: self.ship_address,
            ship_city: self.ship_city,
            ship_region: self.ship_region,
            ship_postal_code: self.ship_postal_code,
            ship_country: self.ship_country,
        }
    }
}
