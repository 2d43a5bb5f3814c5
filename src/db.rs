use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
    Statement,
};

use crate::entity::Products;

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection pool.
pub async fn create_orm_conn(database_url: &str, max_connections: u32) -> Result<OrmConn> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.max_connections(max_connections).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Round-trip a trivial query to prove the store is reachable.
pub async fn verify_connection(conn: &OrmConn) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    conn.execute(Statement::from_string(backend, "SELECT 1"))
        .await?;
    Ok(())
}

/// Apply the schema. Postgres runs the SQL files in `migrations/`; other
/// backends get the table derived from the entity definition.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    match conn.get_database_backend() {
        DbBackend::Postgres => {
            sqlx::migrate!("./migrations")
                .run(conn.get_postgres_connection_pool())
                .await?;
        }
        _ => create_schema(conn).await?,
    }
    Ok(())
}

/// Create the `product` table from the entity if it does not exist yet.
pub async fn create_schema(conn: &OrmConn) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut table = schema.create_table_from_entity(Products);
    table.if_not_exists();
    conn.execute(backend.build(&table)).await?;
    Ok(())
}
