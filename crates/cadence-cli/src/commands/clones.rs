//! Clones command implementation.

use crate::cli::ClonesArgs;
use crate::error::Result;
use crate::output::Formatter;
use cadence_sdk::{CadenceClient, Transport};

/// Execute the clones command.
pub async fn execute_clones<T: Transport>(
    args: ClonesArgs,
    client: &CadenceClient<T>,
    formatter: &Formatter,
) -> Result<()> {
    let list = client.list_clones().await?;
    println!("{}", formatter.format_clones(&list, args.all)?);
    Ok(())
}
