//! Decoding of `lshw -c <class> -json` output.
//!
//! Every device class shares the same decode path; a new class only needs a
//! record type that flattens [`Device`](crate::hardware::types::Device) and
//! adds its own fields.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{error, warn};

use crate::hardware::error::SourceError;
use crate::hardware::source::{command_line, CommandRunner, Sources};

/// Runs lshw for one device class and decodes its records as `T`.
pub fn collect_devices<T, R>(sources: &Sources<R>, class: &str) -> Result<Vec<T>, SourceError>
where
    T: DeserializeOwned,
    R: CommandRunner,
{
    let args = ["-c", class, "-json"];
    let output = sources.runner.run(&sources.tools.lshw, &args)?;
    decode_devices(&output.stdout).map_err(|source| SourceError::Parse {
        command: command_line(&sources.tools.lshw, &args),
        source,
    })
}

/// Logs an lshw failure. A missing or failing tool is a warning, output
/// that cannot be decoded is an error.
pub fn report_lshw_error(class: &str, err: &SourceError) {
    if err.is_unavailable() {
        warn!(
            class,
            error = %err,
            output = %err.output(),
            "Error collecting device information"
        );
    } else {
        error!(class, error = %err, "Error parsing lshw output");
    }
}

/// Decodes a JSON array of device records. Either every record decodes or
/// the whole payload is rejected. Older lshw releases print a bare object
/// when a single device matches; that is accepted as a one-element list.
pub fn decode_devices<T: DeserializeOwned>(payload: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    let value: Value = serde_json::from_slice(payload)?;
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        _ => Err(serde_json::Error::custom(
            "expected an array of device records",
        )),
    }
}

/// lshw prints `logicalname` as a string, or as a list when a device has
/// several names. The first name is kept.
pub fn one_or_many_names<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Names {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Names>::deserialize(deserializer)? {
        Some(Names::One(name)) => name,
        Some(Names::Many(names)) => names.into_iter().next().unwrap_or_default(),
        None => String::new(),
    })
}
