//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{build_components, prepare_index, resolve_credentials};
use canon_runner::{write_results_file, Dataset, ValidationRunner};
use tracing::warn;

/// Execute the validate command.
pub async fn execute_validate(
    args: ValidateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let credentials = resolve_credentials(
        args.credentials.api_key.clone(),
        args.credentials.secondary_api_key.clone(),
    )?;

    let mut runner_config = config.runner.clone();
    if args.limit.is_some() {
        runner_config.limit = args.limit;
    }

    let dataset = Dataset::from_path(&args.dataset)?;
    let (index, _) = prepare_index(
        config,
        args.corpus.books.clone(),
        args.corpus.cache.clone(),
        false,
    )
    .await?;

    let components = build_components(config, index, credentials)?;
    let runner = ValidationRunner::new(components.extractor, components.verifier, runner_config)?;
    let run = runner.run(&dataset).await?;

    write_results_file(&args.output, run.records())?;

    let report = match run.report() {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("Could not compute classification report: {}", e);
            None
        }
    };

    println!("{}", formatter.format_run(&run, report.as_ref(), &args.output)?);
    Ok(())
}
