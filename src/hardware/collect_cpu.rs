use tracing::{debug, error, info};

use crate::hardware::lscpu::{extract_fields, parse_lscpu};
use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::topology::total_threads_display;
use crate::hardware::types::{CpuInfo, CpuReport};

/// Reads the lscpu tree into a [`CpuInfo`]. Any failure leaves the record
/// at its defaults.
pub fn collect_cpu_info<R: CommandRunner>(sources: &Sources<R>) -> CpuInfo {
    let mut info = CpuInfo::default();

    let output = match sources.runner.run(&sources.tools.lscpu, &["-J"]) {
        Ok(output) => output,
        Err(err) => {
            error!(error = %err, output = %err.output(), "Error running lscpu command");
            return info;
        }
    };

    let fields = match parse_lscpu(&output.stdout) {
        Ok(fields) => fields,
        Err(err) => {
            error!(error = %err, "Error parsing lscpu JSON output");
            return info;
        }
    };

    extract_fields(&fields, &mut info, sources.label_match);
    debug!("lscpu collection successful");
    info
}

pub fn cpu_report(info: CpuInfo) -> CpuReport {
    let total_threads = total_threads_display(&info);
    CpuReport { info, total_threads }
}

pub fn emit_cpu_report(report: &CpuReport) {
    let info = &report.info;
    info!(
        component = "cpu",
        architecture = %info.architecture,
        vendor_id = %info.vendor_id,
        model_name = %info.model_name,
        cpu_family = %info.cpu_family,
        model = %info.model,
        stepping = %info.stepping,
        threads_per_core = %info.threads_per_core,
        cores_per_socket = %info.cores_per_socket,
        sockets = %info.sockets,
        numa_nodes = %info.numa_nodes,
        cpu_frequency_min_mhz = %info.cpu_frequency_min_mhz,
        cpu_frequency_max_mhz = %info.cpu_frequency_max_mhz,
        virtualization = %info.virtualization,
        total_threads = %report.total_threads,
        "Collection complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelMatch;
    use crate::hardware::source::fake::{sources, FakeRunner};
    use std::path::Path;
    use tracing_test::traced_test;

    const LSCPU: &str = r#"{
       "lscpu": [
          {"field": "Architecture:", "data": "x86_64"},
          {"field": "CPU(s):", "data": "64"},
          {"field": "Vendor ID:", "data": "GenuineIntel",
           "children": [
              {"field": "Model name:", "data": "Intel(R) Xeon(R) Gold 6226R CPU @ 2.90GHz",
               "children": [
                  {"field": "CPU family:", "data": "6"},
                  {"field": "Model:", "data": "85"},
                  {"field": "Thread(s) per core:", "data": "2"},
                  {"field": "Core(s) per socket:", "data": "16"},
                  {"field": "Socket(s):", "data": "2"},
                  {"field": "CPU max MHz:", "data": "3900.0000"},
                  {"field": "CPU min MHz:", "data": "1000.0000"}
               ]}
           ]},
          {"field": "NUMA:", "data": null,
           "children": [
              {"field": "NUMA node(s):", "data": "2"},
              {"field": "NUMA node0 CPU(s):", "data": "0-15,32-47"}
           ]}
       ]
    }"#;

    fn lscpu_sources(output: &str) -> Sources<FakeRunner> {
        sources(
            FakeRunner::new().with_output("lscpu -J", output),
            Path::new("/nonexistent"),
        )
    }

    #[test]
    fn test_collects_cpu_info() {
        let info = collect_cpu_info(&lscpu_sources(LSCPU));
        assert_eq!(info.model_name, "Intel(R) Xeon(R) Gold 6226R CPU @ 2.90GHz");
        assert_eq!(info.cpu_family, "6");
        assert_eq!(info.model, "85");
        assert_eq!(info.numa_nodes, "2");
        assert_eq!(cpu_report(info).total_threads, "64");
    }

    #[test]
    #[traced_test]
    fn test_emitted_event_has_total_threads() {
        let report = cpu_report(collect_cpu_info(&lscpu_sources(LSCPU)));
        emit_cpu_report(&report);
        assert!(logs_contain("component=\"cpu\""));
        assert!(logs_contain("total_threads=64"));
        assert!(logs_contain("sockets=2"));
    }

    #[test]
    #[traced_test]
    fn test_missing_lscpu_gives_defaults() {
        let sources = sources(FakeRunner::new(), Path::new("/nonexistent"));
        let info = collect_cpu_info(&sources);
        assert_eq!(info, CpuInfo::default());
        assert!(logs_contain("Error running lscpu command"));
        assert_eq!(cpu_report(info).total_threads, "unknown");
    }

    #[test]
    #[traced_test]
    fn test_garbled_lscpu_gives_defaults() {
        let info = collect_cpu_info(&lscpu_sources("Architecture: x86_64"));
        assert_eq!(info, CpuInfo::default());
        assert!(logs_contain("Error parsing lscpu JSON output"));
    }

    #[test]
    fn test_respects_label_match_policy() {
        let tree = r#"{"lscpu": [
            {"field": "Model name:", "data": "Summary"},
            {"field": "Model name:", "data": "Cortex-A72"}
        ]}"#;
        let mut sources = lscpu_sources(tree);
        assert_eq!(collect_cpu_info(&sources).model_name, "Cortex-A72");
        sources.label_match = LabelMatch::First;
        assert_eq!(collect_cpu_info(&sources).model_name, "Summary");
    }
}
