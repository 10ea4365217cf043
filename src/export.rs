use std::{io, path::Path};

use crate::{core::HourlyAllocation, error::Error, prelude::*};

/// Write the hourly allocation as CSV with a header row.
pub fn write_hourly(writer: impl io::Write, allocations: &[HourlyAllocation]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for allocation in allocations {
        writer.serialize(allocation)?;
    }
    writer.flush()?;
    Ok(())
}

#[instrument(skip_all, fields(path = %path.display(), n_rows = allocations.len()))]
pub fn export_hourly(path: &Path, allocations: &[HourlyAllocation]) -> Result<(), Error> {
    let file = std::fs::File::create(path).map_err(|error| Error::csv(path)(error.into()))?;
    write_hourly(io::BufWriter::new(file), allocations).map_err(Error::csv(path))?;
    info!("exported");
    Ok(())
}
