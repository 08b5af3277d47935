//! `jsonval` CLI: format, validate, and read typed fields from JSON on the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-emit compact JSON (stdin → stdout)
//! echo '{ "name": "Alice", "age": 30 }' | jsonval fmt
//!
//! # Indented output, file to file
//! jsonval fmt --pretty -i data.json -o data.pretty.json
//!
//! # Wrap the document as a JSON-RPC result
//! jsonval fmt --rpc-result -i data.json
//!
//! # Validate; prints the parse diagnostic and exits non-zero on failure
//! jsonval check -i data.json
//!
//! # Read typed fields from a top-level object
//! jsonval read -i data.json name:string age:i32
//!
//! # Count values by type and report nesting depth
//! jsonval stats -i data.json
//!
//! # Send diagnostics to a rotated log file instead of stderr
//! RUST_LOG=debug jsonval --log-dir /tmp/jsonval-logs check -i data.json
//! ```

mod log_file;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jsonval::extract::{field, read_object, Bind};
use jsonval::{Array, JsonRpcResponse, Object, Value, ValueType};
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::log_file::{FileLogDestination, FileLogOptions, DEFAULT_MAX_SIZE_MB};

#[derive(Parser)]
#[command(
    name = "jsonval",
    version,
    about = "Format, validate, and read typed fields from JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Write diagnostics to <DIR>/jsonval.log instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Rotate the log file once it reaches this size
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SIZE_MB)]
    log_max_size_mb: f64,

    /// Let the log file grow without rotating
    #[arg(long, global = true)]
    no_log_rotation: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse JSON and write it back out in canonical form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent by two spaces per level instead of compact output
        #[arg(long)]
        pretty: bool,
        /// Wrap the document as the result of a JSON-RPC response
        #[arg(long)]
        rpc_result: bool,
    },
    /// Check that the input is valid JSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Read typed fields from a top-level object
    Read {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Fields as NAME:TYPE, TYPE one of bool, i32, i64, u64, f64, string, array, object, any
        #[arg(required = true, value_name = "NAME:TYPE")]
        fields: Vec<FieldSpec>,
    },
    /// Show value counts by type and the maximum nesting depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Fmt {
            input,
            output,
            pretty,
            rpc_result,
        } => {
            let mut value = parse_input(input.as_deref())?;
            if rpc_result {
                let mut response = JsonRpcResponse::new();
                response.set_result(value);
                value = response.to_value();
            }
            let text = if pretty {
                jsonval::write_pretty(&value)
            } else {
                jsonval::write(&value)
            };
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { input } => {
            let value = parse_input(input.as_deref())?;
            println!("ok: {}", value.value_type());
        }
        Commands::Read { input, fields } => {
            let value = parse_input(input.as_deref())?;
            let object = value
                .as_object()
                .context("read expects the document to be a JSON object")?;

            let mut targets: Vec<Target> = fields.iter().map(|spec| Target::new(spec.kind)).collect();
            read_object(
                object,
                fields
                    .iter()
                    .zip(targets.iter_mut())
                    .map(|(spec, target)| field(&spec.name, target.as_bind())),
            )
            .context("Failed to read fields")?;

            for (spec, target) in fields.iter().zip(&targets) {
                println!("{} = {}", spec.name, target.to_value());
            }
        }
        Commands::Stats { input } => {
            let value = parse_input(input.as_deref())?;
            let stats = Stats::collect(&value);
            for (tag, count) in stats.counts() {
                println!("{:<10} {}", format!("{tag}:"), count);
            }
            println!("{:<10} {}", "max depth:", stats.max_depth);
        }
    }

    Ok(())
}

/// Install the global subscriber: `RUST_LOG` (default `warn`), written to
/// stderr or to the rotated log file.
fn init_tracing(cli: &Cli) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let mut log_path = None;
    let (writer, ansi) = match &cli.log_dir {
        Some(dir) => {
            let options = FileLogOptions {
                max_size_mb: cli.log_max_size_mb,
                rotate: !cli.no_log_rotation,
                ..FileLogOptions::new(dir.clone())
            };
            let destination = FileLogDestination::new("jsonval", options);
            log_path = Some(destination.log_path().to_path_buf());
            (BoxMakeWriter::new(destination), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
    if let Some(path) = log_path {
        debug!(path = %path.display(), "logging to file");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// read: NAME:TYPE specs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldKind {
    Bool,
    I32,
    I64,
    U64,
    F64,
    String,
    Array,
    Object,
    Any,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FromStr for FieldSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((name, kind)) = s.rsplit_once(':') else {
            bail!("field spec '{s}' must be NAME:TYPE");
        };
        let kind = match kind {
            "bool" => FieldKind::Bool,
            "i32" => FieldKind::I32,
            "i64" => FieldKind::I64,
            "u64" => FieldKind::U64,
            "f64" => FieldKind::F64,
            "string" => FieldKind::String,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            "any" => FieldKind::Any,
            other => bail!(
                "unknown type '{other}'. Available types: bool, i32, i64, u64, f64, string, array, object, any"
            ),
        };
        Ok(FieldSpec {
            name: name.to_string(),
            kind,
        })
    }
}

/// Typed storage for one requested field.
enum Target {
    Bool(bool),
    I32(i32),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Array(Array),
    Object(Object),
    Any(Value),
}

impl Target {
    fn new(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Target::Bool(false),
            FieldKind::I32 => Target::I32(0),
            FieldKind::I64 => Target::I64(0),
            FieldKind::U64 => Target::U64(0),
            FieldKind::F64 => Target::F64(0.0),
            FieldKind::String => Target::String(String::new()),
            FieldKind::Array => Target::Array(Array::new()),
            FieldKind::Object => Target::Object(Object::new()),
            FieldKind::Any => Target::Any(Value::Null),
        }
    }

    fn as_bind(&mut self) -> &mut dyn Bind {
        match self {
            Target::Bool(v) => v,
            Target::I32(v) => v,
            Target::I64(v) => v,
            Target::U64(v) => v,
            Target::F64(v) => v,
            Target::String(v) => v,
            Target::Array(v) => v,
            Target::Object(v) => v,
            Target::Any(v) => v,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Target::Bool(v) => Value::from(*v),
            Target::I32(v) => Value::from(*v),
            Target::I64(v) => Value::from(*v),
            Target::U64(v) => Value::from(*v),
            Target::F64(v) => Value::from(*v),
            Target::String(v) => Value::from(v.as_str()),
            Target::Array(v) => Value::from(v.clone()),
            Target::Object(v) => Value::from(v.clone()),
            Target::Any(v) => v.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// stats
// ─────────────────────────────────────────────────────────────────────────────

const ALL_TYPES: [ValueType; 7] = [
    ValueType::Null,
    ValueType::Bool,
    ValueType::Integer,
    ValueType::Real,
    ValueType::String,
    ValueType::Array,
    ValueType::Object,
];

#[derive(Debug, Default)]
struct Stats {
    counts: [usize; 7],
    max_depth: usize,
}

impl Stats {
    /// Walks the tree with a work list; the top-level value is depth 0.
    fn collect(root: &Value) -> Self {
        let mut stats = Stats::default();
        let mut pending = vec![(root, 0usize)];
        while let Some((value, depth)) = pending.pop() {
            stats.max_depth = stats.max_depth.max(depth);
            let tag = value.value_type();
            if let Some(slot) = ALL_TYPES.iter().position(|t| *t == tag) {
                stats.counts[slot] += 1;
            }
            match value {
                Value::Array(items) => pending.extend(items.iter().map(|v| (v, depth + 1))),
                Value::Object(members) => pending.extend(members.values().map(|v| (v, depth + 1))),
                _ => {}
            }
        }
        stats
    }

    fn counts(&self) -> impl Iterator<Item = (ValueType, usize)> + '_ {
        ALL_TYPES.iter().copied().zip(self.counts.iter().copied())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// I/O
// ─────────────────────────────────────────────────────────────────────────────

fn parse_input(path: Option<&str>) -> Result<Value> {
    let bytes = read_input(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.unwrap_or("<stdin>"));
    jsonval::parse_bytes(&bytes)
        .with_context(|| format!("Invalid JSON in {}", path.unwrap_or("<stdin>")))
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_parsing() {
        let spec: FieldSpec = "user:id:u64".parse().unwrap();
        assert_eq!(spec.name, "user:id");
        assert_eq!(spec.kind, FieldKind::U64);
        assert!("name".parse::<FieldSpec>().is_err());
        assert!("name:float".parse::<FieldSpec>().is_err());
    }

    #[test]
    fn stats_depth_and_counts() {
        let value = jsonval::parse(r#"{"a":[1,2.5,null],"b":{"c":"x"},"d":true}"#).unwrap();
        let stats = Stats::collect(&value);
        let counts: Vec<(ValueType, usize)> = stats.counts().collect();
        assert_eq!(
            counts,
            vec![
                (ValueType::Null, 1),
                (ValueType::Bool, 1),
                (ValueType::Integer, 1),
                (ValueType::Real, 1),
                (ValueType::String, 1),
                (ValueType::Array, 1),
                (ValueType::Object, 2),
            ]
        );
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn scalar_document_has_depth_zero() {
        let stats = Stats::collect(&Value::from(3));
        assert_eq!(stats.max_depth, 0);
    }
}
