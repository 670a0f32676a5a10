use crate::cohort::Histogram;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CohortRow {
    month: usize,
    total_accounts: u64,
}

/// Write the histogram as `month,total_accounts` CSV, one row per month
pub fn write_histogram<W: std::io::Write>(writer: W, histogram: &Histogram) -> Result<(), ReportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for (month, total_accounts) in histogram.iter() {
        wtr.serialize(CohortRow {
            month,
            total_accounts,
        })?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the histogram report into bytes ready for publishing
pub fn to_csv_bytes(histogram: &Histogram) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Vec::new();
    write_histogram(&mut buffer, histogram)?;
    Ok(buffer)
}
