use std::io::Read;

use procfs::{FromRead, ProcResult};
use tracing::{debug, error, info, warn};

use crate::hardware::source::{CommandRunner, Sources};
use crate::hardware::types::KernelInfo;
use crate::hardware::uname::read_uname;

pub fn collect_kernel_info<R: CommandRunner>(sources: &Sources<R>) -> KernelInfo {
    let mut info = KernelInfo::default();

    match read_uname() {
        Ok(uname) => {
            debug!("uname collection successful");
            info.sysname = uname.sysname;
            info.nodename = uname.nodename;
            info.release = uname.release;
            info.version = uname.version;
            info.machine = uname.machine;
        }
        Err(err) => error!(error = %err, "Error getting uname info"),
    }

    // kdump tooling is optional on most hosts
    match sources.runner.run(&sources.tools.kdump_config, &["status"]) {
        Ok(output) => {
            debug!("kdump-config status collection successful");
            info.kdump_status = output.combined();
        }
        Err(err) => warn!(
            error = %err,
            output = %err.output(),
            "Could not get kdump information"
        ),
    }

    match KernelCmdline::from_file(PROC_CMDLINE) {
        Ok(cmdline) => info.crashkernel = cmdline.crashkernel(),
        Err(err) => debug!(error = %err, "Could not read kernel command line"),
    }

    info
}

const PROC_CMDLINE: &str = "/proc/cmdline";

/// Whitespace separated arguments of `/proc/cmdline`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KernelCmdline {
    pub args: Vec<String>,
}

impl FromRead for KernelCmdline {
    fn from_read<R: Read>(mut r: R) -> ProcResult<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Ok(Self {
            args: text.split_whitespace().map(str::to_string).collect(),
        })
    }
}

impl KernelCmdline {
    /// The kernel honours the last `crashkernel=` on its command line.
    pub fn crashkernel(&self) -> String {
        self.args
            .iter()
            .rev()
            .find_map(|arg| arg.strip_prefix("crashkernel="))
            .unwrap_or_default()
            .to_string()
    }
}

pub fn emit_kernel_info(info: &KernelInfo) {
    info!(
        component = "kernel",
        sysname = %info.sysname,
        nodename = %info.nodename,
        release = %info.release,
        version = %info.version,
        machine = %info.machine,
        kdump_status = %info.kdump_status,
        crashkernel = %info.crashkernel,
        "Collection complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::source::fake::{sources, FakeRunner};
    use std::path::Path;
    use tracing_test::traced_test;

    const KDUMP_STATUS: &str = "current state   : ready to kdump\n\nkexec command:\n  /sbin/kexec -p\n";

    #[test]
    fn test_collects_uname_and_kdump() {
        let sources = sources(
            FakeRunner::new().with_output("kdump-config status", KDUMP_STATUS),
            Path::new("/nonexistent"),
        );
        let info = collect_kernel_info(&sources);
        assert!(!info.sysname.is_empty());
        assert!(!info.release.is_empty());
        assert_eq!(info.kdump_status, KDUMP_STATUS);
    }

    #[test]
    #[traced_test]
    fn test_missing_kdump_leaves_status_empty() {
        let sources = sources(FakeRunner::new(), Path::new("/nonexistent"));
        let info = collect_kernel_info(&sources);
        assert_eq!(info.kdump_status, "");
        assert!(!info.sysname.is_empty());
        assert!(logs_contain("Could not get kdump information"));
    }

    #[test]
    fn test_failed_kdump_is_not_stored() {
        let sources = sources(
            FakeRunner::new().with_failure("kdump-config status", "no crashkernel= parameter"),
            Path::new("/nonexistent"),
        );
        assert_eq!(collect_kernel_info(&sources).kdump_status, "");
    }

    #[test]
    fn test_crashkernel_last_wins() {
        let cmdline = KernelCmdline::from_read(
            "BOOT_IMAGE=/vmlinuz-6.8.0 root=/dev/sda1 crashkernel=512M-:192M quiet crashkernel=256M\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(cmdline.args.len(), 5);
        assert_eq!(cmdline.crashkernel(), "256M");
    }

    #[test]
    fn test_no_crashkernel() {
        let cmdline = KernelCmdline::from_read("ro quiet splash".as_bytes()).unwrap();
        assert_eq!(cmdline.crashkernel(), "");
        assert_eq!(KernelCmdline::from_read("".as_bytes()).unwrap().crashkernel(), "");
    }

    #[test]
    #[traced_test]
    fn test_emit_carries_component() {
        let info = KernelInfo {
            sysname: "Linux".to_string(),
            release: "6.8.0-45-generic".to_string(),
            ..KernelInfo::default()
        };
        emit_kernel_info(&info);
        assert!(logs_contain("Collection complete"));
        assert!(logs_contain("component=\"kernel\""));
        assert!(logs_contain("release=6.8.0-45-generic"));
    }
}
