use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(OrderQuery),
    responses(
        (status = 200, description = "Orders in ascending id order", body = [OrderResponse]),
        (status = 400, description = "Malformed skip or take")
    )
)]
pub async fn get_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&query).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    tag = "order",
    params(
        ("order_id" = i32, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "The order with its line items", body = OrderResponse),
        (status = 404, description = "No such order")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.get_order(path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(order)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/create",
    tag = "order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "The created order", body = OrderResponse),
        (status = 400, description = "Invalid order", body = ErrorResponse)
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.create_order(request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(order)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{order_id}/addproductstoorder",
    tag = "order",
    params(
        ("order_id" = i32, Path, description = "Order id")
    ),
    request_body = [OrderDetailRequest],
    responses(
        (status = 200, description = "The added line items", body = [OrderDetailResponse]),
        (status = 400, description = "Invalid line items", body = ErrorResponse),
        (status = 404, description = "No such order")
    )
)]
pub async fn add_products_to_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    request: web::Json<Vec<OrderDetailRequest>>,
) -> Result<HttpResponse> {
    match order_service
        .add_products_to_order(path.into_inner(), request.into_inner())
        .await
    {
        Ok(details) => Ok(HttpResponse::Ok().json(details)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{order_id}/delete",
    tag = "order",
    params(
        ("order_id" = i32, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order and its line items deleted"),
        (status = 404, description = "No such order")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.delete_order(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(get_orders))
            .route("/create", web::post().to(create_order))
            .route("/{order_id}", web::get().to(get_order))
            .route(
                "/{order_id}/addproductstoorder",
                web::post().to(add_products_to_order),
            )
            .route("/{order_id}/delete", web::post().to(delete_order)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryOrderRepository;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;
    use std::sync::Arc;

    fn empty_service() -> OrderService {
        OrderService::new(Arc::new(InMemoryOrderRepository::new()))
    }

    async fn seed(service: &OrderService, customers: &[&str]) {
        for customer in customers {
            let request: CreateOrderRequest = serde_json::from_value(json!({
                "customerId": customer,
                "orderDetails": [{"productId": 1, "unitPrice": 10.0, "quantity": 1}]
            }))
            .unwrap();
            service.create_order(request).await.unwrap();
        }
    }

    macro_rules! app {
        ($service:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($service.clone()))
                    .configure(order_config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_orders_with_skip_and_take() {
        let service = empty_service();
        seed(&service, &["A1", "A2", "A3", "A4"]).await;
        let app = app!(service);

        let req = test::TestRequest::get()
            .uri("/orders?skip=1&take=2")
            .to_request();
        let orders: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].customer_id, "A2");
        assert_eq!(orders[1].customer_id, "A3");
    }

    #[actix_web::test]
    async fn test_list_orders_rejects_negative_skip() {
        let service = empty_service();
        let app = app!(service);

        let req = test::TestRequest::get().uri("/orders?skip=-1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_order_found_and_missing() {
        let service = empty_service();
        seed(&service, &["A1"]).await;
        let app = app!(service);

        let req = test::TestRequest::get().uri("/orders/1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["orderId"], 1);
        assert_eq!(body["customerId"], "A1");
        assert_eq!(body["orderDetails"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::get().uri("/orders/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_create_order() {
        let service = empty_service();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/orders/create")
            .set_json(json!({
                "customerId": "C001",
                "employeeId": 1,
                "orderDate": "1999-01-01T00:00:00Z",
                "shipName": "DHL1",
                "shipAddress": "122",
                "shipCity": "BR",
                "shipRegion": "Northern East",
                "shipPostalCode": "LR1",
                "shipCountry": "UK",
                "orderDetails": [{"productId": 1, "quantity": 5}]
            }))
            .to_request();
        let order: OrderResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(order.customer_id, "C001");
        assert_eq!(order.employee_id, Some(1));
        assert_ne!(order.order_id, 0);
        assert!(order.order_date.timestamp() > 946_684_800);
        assert_eq!(order.order_details.len(), 1);
    }

    #[actix_web::test]
    async fn test_create_order_validation_error() {
        let service = empty_service();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/orders/create")
            .set_json(json!({
                "customerId": "C001",
                "orderDetails": [{"productId": 1, "quantity": 5, "discount": 2.0}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_add_products_to_order() {
        let service = empty_service();
        seed(&service, &["A1"]).await;
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/orders/1/addproductstoorder")
            .set_json(json!([{"productId": 2, "unitPrice": 4.5, "quantity": 5, "discount": 0.05}]))
            .to_request();
        let details: Vec<OrderDetailResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].order_id, 1);
        assert_eq!(details[0].product_id, 2);

        let req = test::TestRequest::post()
            .uri("/orders/999/addproductstoorder")
            .set_json(json!([{"productId": 2, "quantity": 5}]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_order() {
        let service = empty_service();
        seed(&service, &["A1", "A2"]).await;
        let app = app!(service);

        let req = test::TestRequest::post().uri("/orders/1/delete").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test::read_body(resp).await.is_empty());

        let req = test::TestRequest::get().uri("/orders/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post().uri("/orders/1/delete").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/orders").to_request();
        let orders: Vec<OrderResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].customer_id, "A2");
    }
}
