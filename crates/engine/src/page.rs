//! Assembles one page: record lookup, not-found fallback, computed fields,
//! template substitution.

use chrono::{Datelike, Utc};
use tinysite_store::{Ident, Record, Store};
use tinysite_template::{Context, Template};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Fallback record used when the requested page id matches no row.
pub fn not_found_record() -> Record {
    Record::new()
        .with("title", "Page Not Found")
        .with("content", "The requested page does not exist.")
}

/// Turn a record into substitution input, field order preserved.
pub fn page_context(record: &Record) -> Context {
    let mut data = Context::new();
    for (key, value) in record.iter() {
        data.set(key, value);
    }
    data
}

/// Render the page with the given id. A missing row is not an error; it
/// falls back to the not-found record. The template is read fresh per
/// invocation, so edits show up on the next request.
pub async fn render_page(
    store: &Store,
    config: &EngineConfig,
    id: i64,
) -> Result<String, EngineError> {
    let template = Template::load(config.template_path())?;

    let mut record = store
        .read(Ident::new(&config.page_table), id)
        .await?
        .unwrap_or_else(not_found_record);
    record.set("current_year", Utc::now().year() as i64);

    Ok(template.render(&page_context(&record)))
}
