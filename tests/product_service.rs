mod common;

use product_service::{
    dto::products::{AdjustStockRequest, CreateProductRequest, UpdateProductRequest},
    error::AppError,
    models::Product,
    routes::params::ListProductsQuery,
    services::product_service as products,
    state::AppState,
};

async fn create(state: &AppState, name: &str, price: f64, stock: Option<i32>) -> Product {
    products::create_product(
        state,
        CreateProductRequest {
            name: Some(name.to_string()),
            price: Some(price),
            stock,
            ..Default::default()
        },
    )
    .await
    .expect("create product")
    .data
    .expect("product data")
}

async fn stock_of(state: &AppState, id: i32) -> i32 {
    products::get_product(state, id)
        .await
        .expect("get product")
        .data
        .expect("product data")
        .stock
}

#[tokio::test]
async fn create_applies_defaults() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let resp = products::create_product(
        &state,
        CreateProductRequest {
            name: Some("Widget".into()),
            price: Some(9.99),
            ..Default::default()
        },
    )
    .await?;

    assert!(resp.success);
    assert_eq!(resp.message.as_deref(), Some("Product created successfully"));
    let product = resp.data.expect("product data");
    assert!(product.id > 0);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description, "");
    assert_eq!(product.price, 9.99);
    assert_eq!(product.stock, 0);

    let second = create(&state, "Gadget", 1.5, Some(3)).await;
    assert_ne!(second.id, product.id);
    assert!(second.created_at >= product.created_at);
    Ok(())
}

#[tokio::test]
async fn create_requires_name_and_positive_price() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let cases = [
        CreateProductRequest {
            price: Some(5.0),
            ..Default::default()
        },
        CreateProductRequest {
            name: Some(String::new()),
            price: Some(5.0),
            ..Default::default()
        },
        CreateProductRequest {
            name: Some("No price".into()),
            ..Default::default()
        },
        CreateProductRequest {
            name: Some("Free".into()),
            price: Some(0.0),
            ..Default::default()
        },
        CreateProductRequest {
            name: Some("Negative stock".into()),
            price: Some(1.0),
            stock: Some(-1),
            ..Default::default()
        },
    ];

    for payload in cases {
        let err = products::create_product(&state, payload)
            .await
            .expect_err("invalid create must fail");
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    let listed = products::list_products(&state, ListProductsQuery::default()).await?;
    assert!(listed.data.expect("list data").is_empty());
    Ok(())
}

#[tokio::test]
async fn list_returns_newest_first_with_optional_paging() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let first = create(&state, "First", 1.0, None).await;
    let second = create(&state, "Second", 2.0, None).await;
    let third = create(&state, "Third", 3.0, None).await;

    let all = products::list_products(&state, ListProductsQuery::default())
        .await?
        .data
        .expect("list data");
    let ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let page = products::list_products(
        &state,
        ListProductsQuery {
            limit: Some(1),
            offset: Some(1),
        },
    )
    .await?
    .data
    .expect("list data");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
    Ok(())
}

#[tokio::test]
async fn missing_ids_report_not_found() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let existing = create(&state, "Widget", 9.99, Some(2)).await;
    let missing = existing.id + 1000;

    let err = products::get_product(&state, missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = products::update_product(
        &state,
        missing,
        UpdateProductRequest {
            name: Some("Ghost".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = products::delete_product(&state, missing).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = products::adjust_stock(
        &state,
        missing,
        AdjustStockRequest { quantity: Some(1) },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = products::update_product(
        &state,
        missing,
        UpdateProductRequest {
            price: Some(0.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = products::adjust_stock(&state, missing, AdjustStockRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let listed = products::list_products(&state, ListProductsQuery::default())
        .await?
        .data
        .expect("list data");
    assert_eq!(listed, vec![existing]);
    Ok(())
}

#[tokio::test]
async fn update_replaces_only_supplied_fields() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let original = create(&state, "Widget", 9.99, Some(7)).await;

    let updated = products::update_product(
        &state,
        original.id,
        UpdateProductRequest {
            stock: Some(0),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.message.as_deref(), Some("Product updated successfully"));
    let updated = updated.data.expect("product data");
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.description, original.description);
    assert_eq!(updated.price, original.price);
    assert_eq!(updated.created_at, original.created_at);

    let updated = products::update_product(
        &state,
        original.id,
        UpdateProductRequest {
            name: Some("Widget Pro".into()),
            description: Some("Shiny".into()),
            price: Some(19.5),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product data");
    assert_eq!(updated.name, "Widget Pro");
    assert_eq!(updated.description, "Shiny");
    assert_eq!(updated.price, 19.5);
    assert_eq!(updated.stock, 0);
    Ok(())
}

#[tokio::test]
async fn update_rejects_zero_price_without_writing() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let original = create(&state, "Widget", 9.99, Some(4)).await;

    let err = products::update_product(
        &state,
        original.id,
        UpdateProductRequest {
            price: Some(0.0),
            stock: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let current = products::get_product(&state, original.id)
        .await?
        .data
        .expect("product data");
    assert_eq!(current.price, 9.99);
    assert_eq!(current.stock, 4);
    Ok(())
}

#[tokio::test]
async fn empty_update_returns_existing_record() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let original = create(&state, "Widget", 9.99, Some(4)).await;

    let same = products::update_product(&state, original.id, UpdateProductRequest::default())
        .await?
        .data
        .expect("product data");
    assert_eq!(same, original);
    Ok(())
}

#[tokio::test]
async fn adjust_stock_is_bounded_at_zero() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let product = create(&state, "Widget", 9.99, None).await;

    let resp = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(5) },
    )
    .await?;
    assert_eq!(resp.message.as_deref(), Some("Stock updated successfully"));
    assert_eq!(resp.data.expect("product data").stock, 5);

    let err = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(-10) },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock));
    assert_eq!(stock_of(&state, product.id).await, 5);

    let resp = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(-5) },
    )
    .await?;
    assert_eq!(resp.data.expect("product data").stock, 0);

    let resp = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(0) },
    )
    .await?;
    assert_eq!(resp.data.expect("product data").stock, 0);
    Ok(())
}

#[tokio::test]
async fn adjust_stock_requires_quantity() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let product = create(&state, "Widget", 9.99, Some(3)).await;

    let err = products::adjust_stock(&state, product.id, AdjustStockRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(stock_of(&state, product.id).await, 3);
    Ok(())
}

#[tokio::test]
async fn concurrent_decrements_never_oversell() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let product = create(&state, "Widget", 9.99, Some(5)).await;

    let mut handles = Vec::new();
    for _ in 0..12 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            products::adjust_stock(
                &state,
                product.id,
                AdjustStockRequest { quantity: Some(-1) },
            )
            .await
            .is_ok()
        }));
    }

    let mut applied = 0;
    for handle in handles {
        if handle.await? {
            applied += 1;
        }
    }

    assert_eq!(applied, 5);
    assert_eq!(stock_of(&state, product.id).await, 0);
    Ok(())
}

#[tokio::test]
async fn delete_removes_the_record() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let product = create(&state, "Widget", 9.99, None).await;

    let resp = products::delete_product(&state, product.id).await?;
    assert!(resp.success);
    assert_eq!(resp.message.as_deref(), Some("Product deleted successfully"));
    assert!(resp.data.is_none());

    let err = products::get_product(&state, product.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn adjust_stock_rejects_overflow_without_writing() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let product = create(&state, "Widget", 9.99, Some(i32::MAX - 1)).await;

    let err = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(5) },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    assert_eq!(stock_of(&state, product.id).await, i32::MAX - 1);

    let resp = products::adjust_stock(
        &state,
        product.id,
        AdjustStockRequest { quantity: Some(1) },
    )
    .await?;
    assert_eq!(resp.data.expect("product data").stock, i32::MAX);
    Ok(())
}
