use crate::config::DataPaths;
use crate::error::{DataError, Result};
use crate::table::LaunchTable;
use liftoff_scanner::Horizon;
use tracing::info;

/// Load the table previously written for `horizon`
pub fn load(paths: &DataPaths, horizon: Horizon) -> Result<LaunchTable> {
    let path = paths.table(horizon);
    info!("Loading {} launches from {}", horizon, path.display());
    let table = LaunchTable::open(&path)?;
    info!("Loaded {} launch(es)", table.len());
    Ok(table)
}

/// Like [`load`], with the horizon given by name (`past` or `future`)
pub fn load_named(paths: &DataPaths, name: &str) -> Result<LaunchTable> {
    let horizon: Horizon = name.parse().map_err(DataError::InvalidHorizon)?;
    load(paths, horizon)
}
