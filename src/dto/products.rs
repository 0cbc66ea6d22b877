use serde::Serialize;
use utoipa::ToSchema;

use crate::{models::Product, state::AppState, validation::format_cost};

/// Shape used by create and list.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummary {
    pub title: String,
    #[schema(example = "1.50")]
    pub cost: String,
    pub description: String,
    pub url: String,
}

impl ProductSummary {
    pub fn new(product: &Product, state: &AppState) -> Self {
        Self {
            title: product.title.clone(),
            cost: format_cost(product.cost()),
            description: product.description.clone(),
            url: state.image_url(product.product_image.as_deref()),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductSummary>)]
    pub items: Vec<ProductSummary>,
}

/// Shape used by get and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub title: String,
    #[schema(example = "1.50")]
    pub cost: String,
    pub description: String,
    pub product_image: Option<String>,
}

impl ProductDetail {
    pub fn new(product: &Product, product_image: Option<String>) -> Self {
        Self {
            title: product.title.clone(),
            cost: format_cost(product.cost()),
            description: product.description.clone(),
            product_image,
        }
    }
}

/// Multipart body of `POST /api/product/add`, for the API docs.
#[derive(ToSchema)]
pub struct ProductForm {
    pub title: String,
    #[schema(example = "1.50")]
    pub cost: String,
    pub description: String,
    /// jpg or png, at most 2048 KB.
    #[schema(value_type = Option<String>, format = Binary)]
    pub product_image: Option<Vec<u8>>,
}

/// Body of `POST /api/product/{id}`; every field is optional.
#[derive(ToSchema)]
pub struct ProductPatch {
    pub title: Option<String>,
    #[schema(example = "2.00")]
    pub cost: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub product_image: Option<Vec<u8>>,
}
