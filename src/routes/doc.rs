use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{AdjustStockRequest, CreateProductRequest, UpdateProductRequest},
    models::Product,
    response::ApiResponse,
    routes::{health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::adjust_stock,
    ),
    components(
        schemas(
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            AdjustStockRequest,
            health::HealthStatus,
            ApiResponse<Product>,
            ApiResponse<Vec<Product>>,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Products", description = "Product records and stock"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
