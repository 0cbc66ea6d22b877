use sea_orm::DbErr;

use crate::{
    dto::products::{ProductDetail, ProductList, ProductSummary},
    error::{AppError, AppResult},
    models::{Product, ProductRecord},
    response::ApiResponse,
    routes::extract::{IMAGE_FIELD, ProductSubmission},
    state::AppState,
    storage::{UploadedImage, ValidImage},
    validation::{FieldErrors, ProductFields, ValidFields, field_errors},
};

pub async fn create_product(
    state: &AppState,
    submission: ProductSubmission,
) -> AppResult<ApiResponse<ProductSummary>> {
    let (fields, image) = validate_submission(state, submission.fields, submission.image)?;

    let product_image = match image {
        Some(image) => Some(state.images.save(&image).await?),
        None => None,
    };

    let record = ProductRecord {
        title: fields.title,
        cost: fields.cost,
        description: fields.description,
        product_image,
    };
    let stored_image = record.product_image.clone();
    let product = state.products.insert(record).await.map_err(|err| {
        persistence_failure(err, stored_image.as_deref(), "Failed to create product")
    })?;

    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success(
        "Product created successfully",
        ProductSummary::new(&product, state),
    ))
}

/// An empty table and a failed query both come back as `status: false`.
pub async fn list_products(state: &AppState) -> ApiResponse<ProductList> {
    match state.products.find_all().await {
        Ok(products) if !products.is_empty() => {
            let items = products
                .iter()
                .map(|product| ProductSummary::new(product, state))
                .collect();
            ApiResponse::success("Product list", ProductList { items })
        }
        Ok(_) => {
            tracing::debug!("product list is empty");
            ApiResponse::failure("Failed to fetch products")
        }
        Err(err) => {
            tracing::error!(error = %err, "product list query failed");
            ApiResponse::failure("Failed to fetch products")
        }
    }
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductDetail>> {
    let product = find_existing(state, id).await?;
    let image_url = state.image_url(product.product_image.as_deref());
    Ok(ApiResponse::success(
        "product details",
        ProductDetail::new(&product, Some(image_url)),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    submission: ProductSubmission,
) -> AppResult<ApiResponse<ProductDetail>> {
    let existing = find_existing(state, id).await?;

    let merged = submission.fields.or_existing(&existing);
    let (fields, image) = validate_submission(state, merged, submission.image)?;

    // the old file goes only once its replacement is on disk
    let replacement = match image {
        Some(image) => {
            let path = state.images.save(&image).await?;
            if let Some(old) = existing.product_image.as_deref() {
                remove_image(state, old).await;
            }
            Some(path)
        }
        None => None,
    };

    let record = ProductRecord {
        title: fields.title,
        cost: fields.cost,
        description: fields.description,
        product_image: replacement.clone().or(existing.product_image),
    };
    let product = state
        .products
        .update(id, record)
        .await
        .map_err(|err| persistence_failure(err, replacement.as_deref(), "Failed to update"))?;

    tracing::info!(product_id = product.id, "product updated");
    let image_url = product
        .product_image
        .as_deref()
        .map(|path| state.image_url(Some(path)));
    Ok(ApiResponse::success(
        "Product is updated",
        ProductDetail::new(&product, image_url),
    ))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let existing = find_existing(state, id).await?;

    if let Some(path) = existing.product_image.as_deref() {
        remove_image(state, path).await;
    }

    let removed = state.products.delete(id).await.map_err(|err| {
        tracing::error!(error = %err, product_id = id, "product delete failed");
        AppError::Persistence("Failed to delete product".to_string())
    })?;
    if !removed {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(ApiResponse::done("Product deleted successfully"))
}

async fn find_existing(state: &AppState, id: i32) -> AppResult<Product> {
    state
        .products
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Run the field rules and the upload rules together so the caller sees every error at once.
fn validate_submission(
    state: &AppState,
    fields: ProductFields,
    image: Option<UploadedImage>,
) -> AppResult<(ValidFields, Option<ValidImage>)> {
    let mut errors = FieldErrors::new();

    let fields = match fields.into_valid() {
        Ok(fields) => Some(fields),
        Err(err) => {
            errors.extend(field_errors(&err));
            None
        }
    };

    let image = match image.map(|image| image.inspect(state.config.max_image_bytes())) {
        Some(Ok(image)) => Some(image),
        Some(Err(rejection)) => {
            errors
                .entry(IMAGE_FIELD.to_string())
                .or_default()
                .push(rejection.to_string());
            None
        }
        None => None,
    };

    match fields {
        Some(fields) if errors.is_empty() => Ok((fields, image)),
        _ => Err(AppError::Validation(errors)),
    }
}

/// Best-effort removal; a missing file is not an error.
async fn remove_image(state: &AppState, path: &str) {
    match state.images.delete(path).await {
        Ok(true) => tracing::debug!(path, "image removed"),
        Ok(false) => tracing::debug!(path, "image already absent"),
        Err(err) => tracing::warn!(error = %err, path, "failed to remove image"),
    }
}

fn persistence_failure(err: DbErr, stored_image: Option<&str>, message: &str) -> AppError {
    tracing::error!(error = %err, "{message}");
    if let Some(path) = stored_image {
        tracing::warn!(path, "image kept without a matching record");
    }
    AppError::Persistence(message.to_string())
}
