//! Page content commands.

use megaprime_server::services::content::{ContentService, SeedMode};

use super::{CliError, open_store};

/// Write the default sections.
pub async fn seed(missing_only: bool) -> Result<(), CliError> {
    let (_, store) = open_store().await?;
    let mode = if missing_only {
        SeedMode::MissingOnly
    } else {
        SeedMode::Overwrite
    };

    let report = ContentService::new(store.as_ref()).seed_defaults(mode).await?;

    for key in &report.written {
        tracing::info!("Wrote {key}");
    }
    for key in &report.skipped {
        tracing::info!("Skipped {key} (already present)");
    }
    tracing::info!(
        "Seeding complete: {} written, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(())
}

/// Print every stored section's key and title.
pub async fn list() -> Result<(), CliError> {
    let (_, store) = open_store().await?;
    let sections = ContentService::new(store.as_ref()).list_all().await?;

    #[allow(clippy::print_stdout)]
    {
        for section in &sections {
            println!("{:<24} {}", section.section_key.as_str(), section.title);
        }
        println!("{} section(s)", sections.len());
    }
    Ok(())
}
