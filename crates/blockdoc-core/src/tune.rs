//! Sequential tune application

use serde_json::{Map, Value};
use tracing::debug;

use crate::block::{BlockData, FeatureBlock};
use crate::error::{Error, Result};
use crate::registry::FeatureScope;

/// Apply every resolvable tune in `tunes` to `block`.
///
/// Tunes run in ascending name order so the result does not depend on how
/// the payload map was ordered. Each tune sees the block as left by the
/// previous one. Unknown tune names are skipped; a tune that fails
/// validation aborts with its error.
pub fn apply_tunes(
    scope: &FeatureScope<'_>,
    mut block: Box<dyn FeatureBlock>,
    tunes: &Map<String, Value>,
) -> Result<Box<dyn FeatureBlock>> {
    let mut names: Vec<&String> = tunes.keys().collect();
    names.sort();

    for name in names {
        let Some(reg) = scope.get(name) else {
            debug!(tune = %name, block_id = %block.id(), "skipping unknown tune");
            continue;
        };
        let tune = reg.as_tune().ok_or_else(|| {
            Error::structural(
                name.as_str(),
                format!("registered as {}, cannot be applied as a tune", reg.kind()),
            )
        })?;

        let data = BlockData::for_tune(block.id(), name, &tunes[name.as_str()]);
        reg.validate(&data)?;
        block = tune.tune(block, &data)?;
    }

    Ok(block)
}
