//! Logging setup on top of flexi_logger
//!
//! Three line formats are available: `text` (message only, optionally colored),
//! `ext` (message plus source location) and `json` (one object per line).

use std::str::FromStr;
use strum_macros::{Display, EnumString};

// Global logger handle, kept alive for runtime reconfiguration
static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<flexi_logger::LoggerHandle>> =
    std::sync::OnceLock::new();

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Text,
    Ext,
    Json,
}

impl LogFormat {
    /// Parse a format name, falling back to text for unknown names
    pub fn parse_or_text(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::from_str(name).unwrap_or_else(|_| {
                log::warn!("Unknown log format '{}', using text", name);
                LogFormat::Text
            }),
            None => LogFormat::Text,
        }
    }
}

/// Initialise the global logger
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let mut logger = Logger::try_with_str(log_level.unwrap_or("info"))?;

    logger = match (LogFormat::parse_or_text(log_format), color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(extended_color_format),
        (LogFormat::Ext, false) => logger.format(extended_format),
        (LogFormat::Text, true) => logger.format(simple_color_format),
        (LogFormat::Text, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));

    Ok(())
}

/// Change the log level of an already initialised logger
///
/// Only the level can change at runtime; format and file target are fixed by
/// flexi_logger at start-up.
pub fn reconfigure_log_level(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn colored_level_tag(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => level_tag(level).red().bold(),
        log::Level::Warn => level_tag(level).yellow(),
        log::Level::Info => level_tag(level).green(),
        log::Level::Debug => level_tag(level).blue(),
        log::Level::Trace => level_tag(level).magenta(),
    }
}

fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_tag(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level_tag(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (plugin/dispatch.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_tag(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        colored_level_tag(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_tag(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });

    match serde_json::to_string(&line) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// algohost::plugin::dispatch -> plugin/dispatch.rs
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("algohost::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    fn render(
        formatter: fn(
            &mut dyn std::io::Write,
            &mut DeferredNow,
            &log::Record,
        ) -> Result<(), std::io::Error>,
        target: &str,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        let record = log::Record::builder()
            .level(log::Level::Info)
            .target(target)
            .line(Some(42))
            .args(format_args!("Delivered 3 configuration values"))
            .build();
        formatter(&mut buffer, &mut now, &record).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse_or_text(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse_or_text(Some("EXT")), LogFormat::Ext);
        assert_eq!(LogFormat::parse_or_text(Some("fancy")), LogFormat::Text);
        assert_eq!(LogFormat::parse_or_text(None), LogFormat::Text);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_extended_format_includes_source_path() {
        let output = render(extended_format, "algohost::plugin::dispatch");

        assert!(output.contains("INF Delivered 3 configuration values"));
        assert!(
            output.contains("(plugin/dispatch.rs:42)"),
            "unexpected output: {}",
            output
        );
    }

    #[test]
    fn test_simple_format_omits_source_path() {
        let output = render(simple_format, "algohost::plugin::dispatch");

        assert!(output.contains("INF Delivered 3 configuration values"));
        assert!(!output.contains("dispatch.rs"));
    }

    #[test]
    fn test_json_format_is_single_object() {
        let output = render(json_format, "algohost::receiver::printer");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["level"], "INF");
        assert_eq!(value["message"], "Delivered 3 configuration values");
        assert_eq!(value["target"], "receiver/printer.rs:42");
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_foreign_targets_keep_their_path() {
        assert_eq!(format_target_as_path("tokio::runtime", None), "tokio/runtime");
        assert_eq!(
            format_target_as_path("algohost::execution", Some(7)),
            "execution.rs:7"
        );
    }
}
