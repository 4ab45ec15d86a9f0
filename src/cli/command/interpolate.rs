//! Interpolate both ancillary families to the time of a product.

use anyhow::Result;
use tracing::info;

use crate::{
    config::Config,
    driver::{Driver, RunOutcome},
    input::timestamp_from_name,
    store::ArchiveStore,
};

pub async fn interpolate(config: Config, input: &str, offset: usize) -> Result<RunOutcome> {
    let at = timestamp_from_name(input, offset)?;
    info!(%at, archive = %config.archive, "interpolating ancillary data");

    let store = ArchiveStore::for_location(&config.archive, &config.hadoop);
    let driver = Driver::new(store, config);

    Ok(driver.run(&at).await)
}
