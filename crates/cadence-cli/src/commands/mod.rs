//! Command implementations.

pub mod clones;
pub mod dna;
pub mod merge;
pub mod profile;

pub use self::clones::execute_clones;
pub use self::dna::execute_dna;
pub use self::merge::execute_merge;
pub use self::profile::execute_profile;

use crate::error::{CliError, Result};
use cadence_domain::CloneId;

/// Parse user-supplied clone IDs, rejecting the first malformed one.
pub(crate) fn parse_ids<S: AsRef<str>>(raw: &[S]) -> Result<Vec<CloneId>> {
    raw.iter()
        .map(|s| CloneId::new(s.as_ref()).map_err(CliError::InvalidInput))
        .collect()
}
