//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{build_components, prepare_index, resolve_credentials};

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.backstory.trim().is_empty() {
        return Err(CliError::InvalidInput("backstory is empty".into()));
    }

    let credentials = resolve_credentials(
        args.credentials.api_key.clone(),
        args.credentials.secondary_api_key.clone(),
    )?;
    let (index, _) = prepare_index(
        config,
        args.corpus.books.clone(),
        args.corpus.cache.clone(),
        false,
    )
    .await?;

    if index.scope(&args.book).is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "No book titled '{}' in the index; every claim will lack evidence",
                args.book
            ))
        );
    }

    let components = build_components(config, index, credentials)?;
    let claims = components
        .extractor
        .decompose(&args.backstory, &args.character)
        .await?;
    let verdict = components.verifier.verify(&claims, &args.book).await;

    println!("{}", formatter.format_check(&claims, &verdict)?);
    Ok(())
}
