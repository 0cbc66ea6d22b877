use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::products::{ProductDetail, ProductForm, ProductList, ProductPatch, ProductSummary},
    error::AppResult,
    response::ApiResponse,
    routes::extract::{ProductId, ProductSubmission},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(create_product))
        .route("/list", get(list_products))
        .route(
            "/{id}",
            get(get_product).post(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    post,
    path = "/api/product/add",
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductSummary>),
        (status = 400, description = "Validation failed or insert failed")
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    submission: ProductSubmission,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductSummary>>)> {
    let response = product_service::create_product(&state, submission).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/product/list",
    responses(
        (status = 200, description = "All products; `status` is false when none could be fetched", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> Json<ApiResponse<ProductList>> {
    Json(product_service::list_products(&state).await)
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    Ok(Json(product_service::get_product(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body(
        content = ProductPatch,
        content_type = "multipart/form-data",
        description = "JSON and urlencoded bodies are accepted too; `product_image` only in multipart"
    ),
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Validation failed or update failed"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    submission: ProductSubmission,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    Ok(Json(
        product_service::update_product(&state, id, submission).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/product/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 400, description = "Delete failed"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(product_service::delete_product(&state, id).await?))
}
