//! Index command implementation.

use crate::cli::IndexArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{chunk_counts, prepare_index, IndexSource};

/// Execute the index command.
pub async fn execute_index(args: IndexArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (index, source) = prepare_index(
        config,
        args.corpus.books.clone(),
        args.corpus.cache.clone(),
        args.rebuild,
    )
    .await?;

    println!("{}", formatter.format_index(&chunk_counts(&index))?);
    let message = match (source, &args.corpus.cache) {
        (IndexSource::Cached, Some(path)) => {
            format!("Index cache {} is up to date ({} chunks)", path.display(), index.len())
        }
        (IndexSource::Built, Some(path)) => {
            format!("Indexed {} chunks into {}", index.len(), path.display())
        }
        (_, None) => format!("Indexed {} chunks (no --cache given, nothing saved)", index.len()),
    };
    eprintln!("{}", formatter.success(&message));
    Ok(())
}
