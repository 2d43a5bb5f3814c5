use crate::{
    dto::products::{AdjustStockRequest, CreateProductRequest, UpdateProductRequest},
    error::{AppError, AppResult, storage},
    models::Product,
    response::ApiResponse,
    routes::params::ListProductsQuery,
    state::AppState,
    store::{NewProduct, ProductChanges, StockAdjustment},
};

pub async fn list_products(
    state: &AppState,
    query: ListProductsQuery,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let items: Vec<Product> = state
        .store
        .list(query.page())
        .await
        .map_err(storage("Error fetching products"))?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::data(items))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = state
        .store
        .find(id)
        .await
        .map_err(storage("Error fetching product"))?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::data(product.into()))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let (name, price) = match (payload.name, payload.price) {
        (Some(name), Some(price)) if !name.is_empty() => (name, price),
        _ => return Err(AppError::validation("Name and price are required")),
    };
    validate_price(price)?;
    let stock = payload.stock.unwrap_or(0);
    validate_stock(stock)?;

    let product = state
        .store
        .insert(NewProduct {
            name,
            description: payload.description.unwrap_or_default(),
            price,
            stock,
        })
        .await
        .map_err(storage("Error creating product"))?;

    tracing::info!(product_id = product.id, "product created");

    Ok(ApiResponse::success(
        "Product created successfully",
        product.into(),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = state
        .store
        .find(id)
        .await
        .map_err(storage("Error updating product"))?
        .ok_or(AppError::NotFound)?;

    if payload.name.as_deref() == Some("") {
        return Err(AppError::validation("Name must not be empty"));
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(stock) = payload.stock {
        validate_stock(stock)?;
    }

    let product = if payload.is_empty() {
        existing
    } else {
        let changes = ProductChanges {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock: payload.stock,
        };
        state
            .store
            .update(existing, changes)
            .await
            .map_err(storage("Error updating product"))?
    };

    tracing::info!(product_id = product.id, "product updated");

    Ok(ApiResponse::success(
        "Product updated successfully",
        product.into(),
    ))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(storage("Error deleting product"))?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::message("Product deleted successfully"))
}

pub async fn adjust_stock(
    state: &AppState,
    id: i32,
    payload: AdjustStockRequest,
) -> AppResult<ApiResponse<Product>> {
    state
        .store
        .find(id)
        .await
        .map_err(storage("Error updating stock"))?
        .ok_or(AppError::NotFound)?;

    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::validation("Quantity is required"))?;
    if quantity == i32::MIN {
        return Err(AppError::validation("Quantity is out of range"));
    }

    let outcome = state
        .store
        .adjust_stock(id, quantity)
        .await
        .map_err(storage("Error updating stock"))?;

    match outcome {
        StockAdjustment::Applied(product) => {
            tracing::info!(
                product_id = product.id,
                quantity,
                stock = product.stock,
                "stock adjusted"
            );
            Ok(ApiResponse::success(
                "Stock updated successfully",
                product.into(),
            ))
        }
        StockAdjustment::NotFound => Err(AppError::NotFound),
        StockAdjustment::Insufficient { stock } => {
            tracing::warn!(product_id = id, quantity, stock, "insufficient stock");
            Err(AppError::InsufficientStock)
        }
        StockAdjustment::Overflow { stock } => {
            tracing::warn!(product_id = id, quantity, stock, "stock overflow");
            Err(AppError::validation("Stock would exceed the maximum"))
        }
    }
}

fn validate_price(price: f64) -> AppResult<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(AppError::validation("Price must be a positive number"))
    }
}

fn validate_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("Stock must not be negative"));
    }
    Ok(())
}
