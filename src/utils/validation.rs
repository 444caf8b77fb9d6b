use crate::error::{AppError, AppResult};
use crate::models::{CreateOrderRequest, OrderDetailRequest};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Width of the Northwind customer key.
pub const CUSTOMER_ID_MAX_LEN: usize = 5;

pub fn validate_customer_id(customer_id: &str) -> AppResult<()> {
    let trimmed = customer_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            "customerId is required".to_string(),
        ));
    }
    if trimmed.chars().count() > CUSTOMER_ID_MAX_LEN {
        return Err(AppError::ValidationError(format!(
            "customerId must be at most {CUSTOMER_ID_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_order_detail(detail: &OrderDetailRequest) -> AppResult<()> {
    if detail.quantity < 1 {
        return Err(AppError::ValidationError(format!(
            "quantity for product {} must be positive",
            detail.product_id
        )));
    }
    if detail.unit_price < Decimal::ZERO {
        return Err(AppError::ValidationError(format!(
            "unitPrice for product {} must not be negative",
            detail.product_id
        )));
    }
    if !(0.0..=1.0).contains(&detail.discount) {
        return Err(AppError::ValidationError(format!(
            "discount for product {} must be between 0 and 1",
            detail.product_id
        )));
    }
    Ok(())
}

/// Checks each line item and that no product appears twice; the store keys
/// details by (order, product).
pub fn validate_order_details(details: &[OrderDetailRequest]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(details.len());
    for detail in details {
        validate_order_detail(detail)?;
        if !seen.insert(detail.product_id) {
            return Err(AppError::ValidationError(format!(
                "product {} appears more than once",
                detail.product_id
            )));
        }
    }
    Ok(())
}

pub fn validate_create_order(req: &CreateOrderRequest) -> AppResult<()> {
    validate_customer_id(&req.customer_id)?;
    validate_order_details(&req.order_details)
}
