//! Merge command implementation.

use super::parse_ids;
use crate::cli::{MergeArgs, WeightOverride};
use crate::error::Result;
use crate::output::Formatter;
use crate::session::{MergeSession, SourceReport};
use cadence_sdk::{CadenceClient, Transport};

/// Execute the merge command.
pub async fn execute_merge<T: Transport>(
    args: MergeArgs,
    client: &CadenceClient<T>,
    formatter: &Formatter,
) -> Result<()> {
    let mut session = prepare(&args.sources, &args.weights, client, formatter).await?;
    println!("{}", formatter.format_matrix(session.matrix())?);

    if args.dry_run {
        println!("{}", formatter.info("Dry run, nothing submitted"));
        return Ok(());
    }

    let created = session.submit(client, &args.name).await?;
    println!("{}", formatter.clone_created(&created)?);
    Ok(())
}

/// Build a session from sources and weight overrides.
///
/// Any source that cannot be loaded aborts the merge.
async fn prepare<T: Transport>(
    sources: &[String],
    overrides: &[WeightOverride],
    client: &CadenceClient<T>,
    formatter: &Formatter,
) -> Result<MergeSession> {
    let ids = parse_ids(sources)?;
    let mut session = MergeSession::new();

    for report in session.add_sources(client, &ids).await {
        if let SourceReport::Defaulted(id) = report.into_result()? {
            eprintln!(
                "{}",
                formatter.warning(&format!("{} has no DNA yet, using default weights", id))
            );
        }
    }

    for o in overrides {
        let stored = session.set_weight(&o.clone_id, o.category, o.value)?;
        if f64::from(stored.value()) != o.value {
            eprintln!(
                "{}",
                formatter.warning(&format!(
                    "{} {} set to {} (requested {})",
                    o.clone_id, o.category, stored, o.value
                ))
            );
        }
    }

    Ok(session)
}
