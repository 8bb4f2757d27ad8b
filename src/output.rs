use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Pretty,
}

pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(data)?,
    };
    Ok(text)
}

pub fn output_data<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(data, format)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::types::{CpuInfo, CpuReport};

    fn report() -> CpuReport {
        CpuReport {
            info: CpuInfo {
                model_name: "AMD EPYC 7302 16-Core Processor".to_string(),
                ..CpuInfo::default()
            },
            total_threads: "unknown".to_string(),
        }
    }

    #[test]
    fn test_json_is_flat() {
        let text = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["model_name"], "AMD EPYC 7302 16-Core Processor");
        assert_eq!(value["total_threads"], "unknown");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_yaml() {
        let text = render(&report(), OutputFormat::Yaml).unwrap();
        assert!(text.contains("total_threads: unknown"));
    }
}
