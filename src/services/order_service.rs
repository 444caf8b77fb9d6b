use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::repositories::{NewOrderDetail, OrderRepository};
use crate::utils::{SkipTake, validate_create_order, validate_order_details};
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Orders in ascending `order_id`, windowed by optional skip/take.
    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<OrderResponse>> {
        let window = SkipTake::new(query.skip, query.take);
        let orders = self.repo.find_orders(window).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_order(&self, order_id: i32) -> AppResult<OrderResponse> {
        self.repo
            .find_order(order_id)
            .await?
            .map(OrderResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))
    }

    /// Creates an order with its line items. `order_date` is always the
    /// current server time.
    pub async fn create_order(&self, request: CreateOrderRequest) -> AppResult<OrderResponse> {
        validate_create_order(&request)?;

        let details: Vec<NewOrderDetail> = request
            .order_details
            .iter()
            .map(NewOrderDetail::from)
            .collect();
        let new_order = request.into_new_order(Utc::now());

        let created = self.repo.insert_order(new_order, details).await?;
        log::info!(
            "Created order {} for customer {} with {} line items",
            created.order.order_id,
            created.order.customer_id,
            created.details.len()
        );

        Ok(OrderResponse::from(created))
    }

    pub async fn add_products_to_order(
        &self,
        order_id: i32,
        order_details: Vec<OrderDetailRequest>,
    ) -> AppResult<Vec<OrderDetailResponse>> {
        if !self.repo.order_exists(order_id).await? {
            return Err(AppError::NotFound(format!("Order {order_id} not found")));
        }
        validate_order_details(&order_details)?;

        let details = order_details.iter().map(NewOrderDetail::from).collect();
        let saved = self.repo.insert_order_details(order_id, details).await?;
        log::info!("Added {} line items to order {order_id}", saved.len());

        Ok(saved.into_iter().map(OrderDetailResponse::from).collect())
    }

    pub async fn delete_order(&self, order_id: i32) -> AppResult<()> {
        if !self.repo.order_exists(order_id).await? {
            return Err(AppError::NotFound(format!("Order {order_id} not found")));
        }

        let removed = self.repo.delete_order(order_id).await?;
        log::info!("Deleted order {order_id} and {removed} line items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::order_entity;
    use crate::repositories::InMemoryOrderRepository;
    use rust_decimal_macros::dec;

    fn seeded_order(order_id: i32, customer_id: &str, region: &str) -> order_entity::Model {
        order_entity::Model {
            order_id,
            customer_id: customer_id.to_string(),
            employee_id: Some(order_id),
            order_date: Utc::now(),
            required_date: None,
            shipped_date: None,
            ship_via: Some(1),
            freight: Some(dec!(1)),
            ship_name: Some("DHL1".to_string()),
            ship_address: Some(format!("{}2", order_id + 1)),
            ship_city: Some("BR".to_string()),
            ship_region: Some(region.to_string()),
            ship_postal_code: Some(format!("B{}3", order_id + 1)),
            ship_country: Some("UK".to_string()),
        }
    }

    fn seeded_service() -> (OrderService, Arc<InMemoryOrderRepository>) {
        let repo = Arc::new(InMemoryOrderRepository::with_data(
            vec![
                seeded_order(1, "A1", "North"),
                seeded_order(2, "A2", "East"),
                seeded_order(3, "A3", "West"),
                seeded_order(4, "A4", "South"),
            ],
            vec![],
        ));
        (OrderService::new(repo.clone()), repo)
    }

    fn detail(product_id: i32, quantity: i16) -> OrderDetailRequest {
        OrderDetailRequest {
            product_id,
            unit_price: dec!(0),
            quantity,
            discount: 0.0,
        }
    }

    fn create_request(customer_id: &str, details: Vec<OrderDetailRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: customer_id.to_string(),
            employee_id: Some(1),
            required_date: None,
            ship_via: None,
            freight: None,
            ship_name: Some("DHL1".to_string()),
            ship_address: Some("122".to_string()),
            ship_city: Some("BR".to_string()),
            ship_region: Some("Northern East".to_string()),
            ship_postal_code: Some("LR1".to_string()),
            ship_country: Some("UK".to_string()),
            order_details: details,
        }
    }

    #[tokio::test]
    async fn test_list_with_skip_and_take() {
        let (service, _) = seeded_service();
        let query = OrderQuery {
            skip: Some(1),
            take: Some(2),
        };

        let orders = service.list_orders(&query).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, 2);
        assert_eq!(orders[1].order_id, 3);
    }

    #[tokio::test]
    async fn test_list_without_window_returns_everything() {
        let (service, _) = seeded_service();
        let orders = service.list_orders(&OrderQuery::default()).await.unwrap();
        assert_eq!(orders.len(), 4);
    }

    #[tokio::test]
    async fn test_get_existing_order() {
        let (service, _) = seeded_service();
        let order = service.get_order(1).await.unwrap();
        assert_eq!(order.order_id, 1);
        assert_eq!(order.customer_id, "A1");
        assert_eq!(order.ship_region.as_deref(), Some("North"));
    }

    #[tokio::test]
    async fn test_get_unknown_order() {
        let (service, _) = seeded_service();
        let err = service.get_order(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_order() {
        let (service, repo) = seeded_service();
        let before = Utc::now();

        let order = service
            .create_order(create_request("C001", vec![detail(1, 5)]))
            .await
            .unwrap();

        assert_eq!(order.customer_id, "C001");
        assert_eq!(order.employee_id, Some(1));
        assert_eq!(order.order_id, 5);
        assert!(order.order_date >= before && order.order_date <= Utc::now());
        assert!(order.shipped_date.is_none());
        assert_eq!(order.order_details.len(), 1);
        assert_eq!(order.order_details[0].product_id, 1);
        assert_eq!(order.order_details[0].quantity, 5);
        assert_eq!(order.order_details[0].order_id, 5);

        let stored = service.get_order(order.order_id).await.unwrap();
        assert_eq!(stored, order);
        assert_eq!(repo.order_count().unwrap(), 5);
    }

    #[tokio::test]
    async fn test_create_order_keeps_every_detail() {
        let (service, _) = seeded_service();
        let details = vec![
            OrderDetailRequest {
                product_id: 11,
                unit_price: dec!(14.00),
                quantity: 12,
                discount: 0.0,
            },
            OrderDetailRequest {
                product_id: 42,
                unit_price: dec!(9.80),
                quantity: 10,
                discount: 0.15,
            },
            detail(72, 5),
        ];

        let order = service
            .create_order(create_request("VINET", details.clone()))
            .await
            .unwrap();

        assert_eq!(order.order_details.len(), details.len());
        for (resp, req) in order.order_details.iter().zip(&details) {
            assert_eq!(resp.product_id, req.product_id);
            assert_eq!(resp.unit_price, req.unit_price);
            assert_eq!(resp.quantity, req.quantity);
            assert_eq!(resp.discount, req.discount);
        }
    }

    #[tokio::test]
    async fn test_create_order_rejects_invalid_input() {
        let (service, repo) = seeded_service();

        let err = service
            .create_order(create_request("", vec![detail(1, 5)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service
            .create_order(create_request("C001", vec![detail(1, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        assert_eq!(repo.order_count().unwrap(), 4);
        assert_eq!(repo.detail_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_products_to_order() {
        let (service, repo) = seeded_service();

        let added = service
            .add_products_to_order(1, vec![detail(1, 5)])
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].order_id, 1);
        assert_eq!(added[0].product_id, 1);

        let order = service.get_order(1).await.unwrap();
        assert_eq!(order.order_details, added);
        assert_eq!(repo.detail_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_products_to_unknown_order() {
        let (service, repo) = seeded_service();
        let err = service
            .add_products_to_order(999, vec![detail(1, 5)])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.detail_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_existing_product_fails_in_store() {
        let (service, repo) = seeded_service();
        service
            .add_products_to_order(2, vec![detail(1, 5)])
            .await
            .unwrap();

        let err = service
            .add_products_to_order(2, vec![detail(3, 1), detail(1, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(repo.detail_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_order() {
        let (service, repo) = seeded_service();
        service
            .add_products_to_order(1, vec![detail(1, 5), detail(2, 1)])
            .await
            .unwrap();
        service
            .add_products_to_order(2, vec![detail(1, 1)])
            .await
            .unwrap();

        service.delete_order(1).await.unwrap();

        let err = service.get_order(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.order_count().unwrap(), 3);
        assert_eq!(repo.detail_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_order() {
        let (service, repo) = seeded_service();
        let err = service.delete_order(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.order_count().unwrap(), 4);
    }
}
