//! Page-table bootstrap: create the table if absent and seed a first page
//! into an empty database.

use tinysite_store::{Ident, Record, Store, StoreError};

pub async fn initialize(store: &Store, table: &str) -> Result<(), StoreError> {
    store
        .execute(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            table
        ))
        .await?;

    if store.count(Ident::new(table)).await? == 0 {
        let welcome = Record::new()
            .with("title", "Welcome")
            .with("content", "This site is up and serving pages.");
        let id = store.create(Ident::new(table), &welcome).await?;
        tracing::info!(table, id, "seeded first page");
    }

    Ok(())
}
