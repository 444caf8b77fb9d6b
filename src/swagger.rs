use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::order::get_orders,
        handlers::order::get_order,
        handlers::order::create_order,
        handlers::order::add_products_to_order,
        handlers::order::delete_order,
    ),
    components(
        schemas(
            OrderResponse,
            OrderDetailResponse,
            OrderDetailRequest,
            CreateOrderRequest,
            ErrorResponse,
            ApiError,
        )
    ),
    tags(
        (name = "order", description = "Order management API"),
    ),
    info(
        title = "Northwind Orders API",
        version = "0.1.0",
        description = "CRUD API over Northwind orders and order details"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
