//! CLI entrypoint exercising the cbase helpers.

use clap::{Parser, Subcommand};

use cbase_abi::{
    SafetyLevel, TIMESTAMP_ERROR, UNKNOWN_ERROR, c_text, describe_error, format_timestamp,
    format_timestamp_at, try_format_template,
};
use cbase_core::FormatError;
use cbase_harness::structured_log::trace_id;
use cbase_harness::{CliArg, LogEntry, LogLevel, Outcome};

/// Bounded formatting, error descriptions and timestamps from the shell.
#[derive(Debug, Parser)]
#[command(name = "cbase")]
#[command(about = "Exercise the cbase helpers with caller-sized buffers")]
struct Cli {
    /// Buffer capacity in bytes, terminator included.
    #[arg(long, global = true, default_value_t = 256)]
    capacity: usize,
    /// Print one JSONL record instead of plain text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a printf-style template.
    Format {
        template: String,
        /// Arguments: integers, then floats, else strings.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Describe an error number.
    Strerror {
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },
    /// Print the local time in `Www Mmm dd hh:mm:ss yyyy` form.
    Timestamp {
        /// Seconds since the Unix epoch instead of now.
        #[arg(long, allow_hyphen_values = true)]
        epoch: Option<i64>,
    },
}

/// What one helper call produced.
struct Report {
    event: &'static str,
    symbol: &'static str,
    outcome: Outcome,
    text: String,
    errno: Option<i32>,
    details: serde_json::Value,
}

fn run_format(template: &str, words: &[String], capacity: usize) -> Report {
    let owned: Vec<CliArg> = words.iter().map(|w| CliArg::parse(w)).collect();
    let args: Vec<_> = owned.iter().map(CliArg::as_arg).collect();
    let mut buf = vec![0u8; capacity];
    let result = try_format_template(&mut buf, template, &args);
    let (outcome, text, rc) = match result {
        Ok(len) => (
            Outcome::Ok,
            c_text(&buf).unwrap_or_default().to_owned(),
            i64::try_from(len).unwrap_or(-1),
        ),
        Err(err @ FormatError::Truncated { .. }) => (Outcome::Truncated, err.to_string(), -1),
        Err(err) => (Outcome::Error, err.to_string(), -1),
    };
    Report {
        event: "format",
        symbol: "format_template",
        outcome,
        text,
        errno: None,
        details: serde_json::json!({
            "template": template,
            "argc": args.len(),
            "capacity": capacity,
            "return": rc,
        }),
    }
}

fn run_strerror(code: i32, capacity: usize) -> Report {
    let mut buf = vec![0u8; capacity];
    let base = buf.as_ptr();
    let text = describe_error(code, &mut buf);
    let outcome = if std::ptr::eq(text.as_ptr(), base) {
        Outcome::Ok
    } else {
        debug_assert_eq!(text, UNKNOWN_ERROR);
        Outcome::Fallback
    };
    Report {
        event: "strerror",
        symbol: "describe_error",
        outcome,
        text: text.to_owned(),
        errno: Some(code),
        details: serde_json::json!({ "capacity": capacity }),
    }
}

fn run_timestamp(epoch: Option<i64>, capacity: usize) -> Report {
    let mut buf = vec![0u8; capacity];
    let base = buf.as_ptr();
    let text = match epoch {
        Some(secs) => format_timestamp_at(secs, &mut buf),
        None => format_timestamp(&mut buf),
    };
    let outcome = if std::ptr::eq(text.as_ptr(), base) {
        Outcome::Ok
    } else {
        debug_assert_eq!(text, TIMESTAMP_ERROR);
        Outcome::Fallback
    };
    Report {
        event: "timestamp",
        symbol: "format_timestamp",
        outcome,
        text: text.to_owned(),
        errno: None,
        details: serde_json::json!({ "capacity": capacity, "epoch": epoch }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let report = match &cli.command {
        Command::Format { template, args } => run_format(template, args, cli.capacity),
        Command::Strerror { code } => run_strerror(*code, cli.capacity),
        Command::Timestamp { epoch } => run_timestamp(*epoch, cli.capacity),
    };

    if cli.json {
        let level = match report.outcome {
            Outcome::Ok => LogLevel::Info,
            Outcome::Fallback | Outcome::Truncated => LogLevel::Warn,
            Outcome::Error => LogLevel::Error,
        };
        let mut details = report.details;
        details["text"] = serde_json::Value::String(report.text.clone());
        let mut entry = LogEntry::new(trace_id(report.event), level, report.event)
            .with_symbol(report.symbol)
            .with_mode(format!("{:?}", SafetyLevel::from_env()).to_lowercase())
            .with_outcome(report.outcome)
            .with_details(details);
        if let Some(errno) = report.errno {
            entry = entry.with_errno(errno);
        }
        println!("{}", entry.to_jsonl()?);
        return Ok(());
    }

    match report.outcome {
        Outcome::Ok | Outcome::Fallback => {
            println!("{}", report.text);
            Ok(())
        }
        Outcome::Truncated | Outcome::Error => Err(report.text.into()),
    }
}
