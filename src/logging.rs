use std::env;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LogSettings};

/// Default level is taken from the config; -v/-vv raise it and -q drops to
/// errors only.
pub fn level_for(settings: &LogSettings, verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => settings.level.into(),
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// `level` is the global base. Per-target directives from `env_directives`
/// are layered over it; a bare level there is replaced by `level`.
fn filter_for(level: LevelFilter, env_directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(env_directives)
        .add_directive(level.into())
}

/// Builds the subscriber that receives every diagnostic and inventory
/// event, honouring `RUST_LOG` target directives on top of the CLI level.
pub fn build_dispatch<W>(settings: &LogSettings, verbose: u8, quiet: bool, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_directives = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    dispatch_with(settings, verbose, quiet, &env_directives, writer)
}

fn dispatch_with<W>(settings: &LogSettings, verbose: u8, quiet: bool, env_directives: &str, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = filter_for(level_for(settings, verbose, quiet), env_directives);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    match settings.format {
        LogFormat::Json => Dispatch::new(builder.json().flatten_event(true).finish()),
        LogFormat::Text => Dispatch::new(builder.finish()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use crate::config::LogLevel;
    use tracing::{debug, error, info};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn settings(format: LogFormat) -> LogSettings {
        LogSettings {
            format,
            level: LogLevel::Info,
        }
    }

    #[test]
    fn test_level_for() {
        let settings = settings(LogFormat::Json);
        assert_eq!(level_for(&settings, 0, false), LevelFilter::INFO);
        assert_eq!(level_for(&settings, 1, false), LevelFilter::DEBUG);
        assert_eq!(level_for(&settings, 3, false), LevelFilter::TRACE);
        assert_eq!(level_for(&settings, 2, true), LevelFilter::ERROR);

        let warn = LogSettings {
            format: LogFormat::Json,
            level: LogLevel::Warn,
        };
        assert_eq!(level_for(&warn, 0, false), LevelFilter::WARN);
    }

    fn capture(settings: &LogSettings, verbose: u8, quiet: bool, env_directives: &str) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let dispatch = dispatch_with(settings, verbose, quiet, env_directives, move || writer.clone());

        tracing::dispatcher::with_default(&dispatch, || {
            debug!("debug event");
            info!(component = "cpu", "Collection complete");
            error!("error event");
        });
        captured.text()
    }

    #[test]
    fn test_configured_warn_level_keeps_errors() {
        let warn = LogSettings {
            format: LogFormat::Text,
            level: LogLevel::Warn,
        };
        let text = capture(&warn, 0, false, "");
        assert!(text.contains("error event"));
        assert!(!text.contains("Collection complete"));
    }

    #[test]
    fn test_env_level_does_not_override_quiet() {
        let text = capture(&settings(LogFormat::Text), 0, true, "debug");
        assert!(text.contains("error event"));
        assert!(!text.contains("debug event"));
        assert!(!text.contains("Collection complete"));
    }

    #[test]
    fn test_env_level_does_not_override_verbose() {
        let text = capture(&settings(LogFormat::Text), 1, false, "error");
        assert!(text.contains("debug event"));
        assert!(text.contains("Collection complete"));
    }

    #[test]
    fn test_env_target_directive_layers_on_base() {
        let text = capture(&settings(LogFormat::Text), 0, true, "node_inventory::logging=debug");
        assert!(text.contains("debug event"));
        assert!(text.contains("error event"));
    }

    #[test]
    fn test_bad_env_directives_fall_back_to_base() {
        let text = capture(&settings(LogFormat::Text), 0, false, "node_inventory=lolwut");
        assert!(text.contains("Collection complete"));
        assert!(!text.contains("debug event"));
    }

    #[test]
    fn test_json_events_are_flat() {
        let captured = Captured::default();
        let writer = captured.clone();
        let dispatch = build_dispatch(&settings(LogFormat::Json), 0, false, move || writer.clone());

        tracing::dispatcher::with_default(&dispatch, || {
            info!(component = "cpu", total_threads = %"64", "Collection complete");
            debug!("hidden at info level");
        });

        let text = captured.text();
        let line = text.lines().next().unwrap();
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["component"], "cpu");
        assert_eq!(event["total_threads"], "64");
        assert_eq!(event["message"], "Collection complete");
        assert_eq!(event["level"], "INFO");
        assert!(!text.contains("hidden at info level"));
    }

    #[test]
    fn test_text_format() {
        let captured = Captured::default();
        let writer = captured.clone();
        let dispatch = build_dispatch(&settings(LogFormat::Text), 0, false, move || writer.clone());

        tracing::dispatcher::with_default(&dispatch, || {
            info!(component = "kernel", "Collection complete");
        });

        let text = captured.text();
        assert!(text.contains("Collection complete"));
        assert!(text.contains("component=\"kernel\""));
    }
}
