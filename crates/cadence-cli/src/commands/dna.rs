//! DNA command implementation.

use super::parse_ids;
use crate::cli::DnaArgs;
use crate::error::Result;
use crate::output::Formatter;
use cadence_sdk::{CadenceClient, Transport};

/// Execute the dna command.
///
/// A failed source is reported alongside the others rather than aborting.
pub async fn execute_dna<T: Transport>(
    args: DnaArgs,
    client: &CadenceClient<T>,
    formatter: &Formatter,
) -> Result<()> {
    let ids = parse_ids(&args.ids)?;
    let results = client.fetch_profiles(&ids).await;
    println!("{}", formatter.format_profiles(&results)?);
    Ok(())
}
