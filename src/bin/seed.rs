use product_service::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    store::{NewProduct, Page, ProductStore},
};

const SAMPLE_PRODUCTS: [(&str, &str, f64, i32); 4] = [
    ("Widget", "A general purpose widget", 9.99, 100),
    ("Gadget", "A gadget with a button", 24.5, 40),
    ("Sprocket", "Spare sprocket, 12 teeth", 3.75, 250),
    ("Gizmo", "", 49.0, 0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url, config.max_connections).await?;
    run_migrations(&orm).await?;

    let store = ProductStore::new(orm);
    let existing: Vec<String> = store
        .list(Page::default())
        .await?
        .into_iter()
        .map(|product| product.name)
        .collect();

    for (name, description, price, stock) in SAMPLE_PRODUCTS {
        if existing.iter().any(|n| n == name) {
            println!("Skipping {name}, already present");
            continue;
        }
        let product = store
            .insert(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                stock,
            })
            .await?;
        println!("Seeded product {} ({})", product.id, product.name);
    }

    println!("Seed completed");
    Ok(())
}
