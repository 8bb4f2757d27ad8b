use tracing::error;

use crate::hardware::error::ConversionError;
use crate::hardware::types::{CpuInfo, UNKNOWN};

/// threads per core × cores per socket × sockets.
pub fn total_threads(info: &CpuInfo) -> Result<u64, ConversionError> {
    let threads = parse_count("threads_per_core", &info.threads_per_core)?;
    let cores = parse_count("cores_per_socket", &info.cores_per_socket)?;
    let sockets = parse_count("sockets", &info.sockets)?;

    Ok(u64::from(threads)
        .saturating_mul(u64::from(cores))
        .saturating_mul(u64::from(sockets)))
}

/// Renders the total thread count, or [`UNKNOWN`] after logging which
/// input could not be read.
pub fn total_threads_display(info: &CpuInfo) -> String {
    match total_threads(info) {
        Ok(total) => total.to_string(),
        Err(err) => {
            error!(
                field = err.field,
                value = %err.value,
                error = %err.source,
                "Cannot compute total threads"
            );
            UNKNOWN.to_string()
        }
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, ConversionError> {
    value.parse::<u32>().map_err(|source| ConversionError {
        field,
        value: value.to_string(),
        source,
    })
}
