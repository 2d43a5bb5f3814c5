use product_service::{
    db::{create_orm_conn, run_migrations},
    state::AppState,
};

/// Fresh in-memory database with the product table created. A single
/// connection keeps every query on the same in-memory database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}
