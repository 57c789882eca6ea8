#![allow(dead_code)]

use farmconnect::application::storefront::Storefront;
use farmconnect::config::SimulatorConfig;
use farmconnect::domain::listing::Catalog;
use farmconnect::domain::payment::ConfirmationOutcome;
use farmconnect::infrastructure::confirmation::ScriptedConfirmation;
use farmconnect::infrastructure::in_memory::InMemoryTransactionLog;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const PHONE: &str = "0712345678";

/// A session on the default produce catalog whose confirmations follow
/// `outcomes`, answering after the default delay.
pub fn storefront(outcomes: impl IntoIterator<Item = ConfirmationOutcome>) -> Storefront {
    let config = SimulatorConfig::default();
    let provider = ScriptedConfirmation::new(outcomes).with_delay(config.confirmation_delay);
    Storefront::new(
        Catalog::default_produce(),
        Arc::new(provider),
        Box::new(InMemoryTransactionLog::new()),
        config,
    )
}

pub fn write_catalog(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, seller, price, unit, location").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}
