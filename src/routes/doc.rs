use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{ProductDetail, ProductForm, ProductList, ProductPatch, ProductSummary},
    response::ApiResponse,
    routes::{health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::home,
        health::health_check,
        products::create_product,
        products::list_products,
        products::get_product,
        products::update_product,
        products::delete_product
    ),
    components(
        schemas(
            ProductSummary,
            ProductDetail,
            ProductList,
            ProductForm,
            ProductPatch,
            health::HealthData,
            ApiResponse<ProductSummary>,
            ApiResponse<ProductDetail>,
            ApiResponse<ProductList>
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
