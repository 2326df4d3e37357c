//! `hessian-pack` — encode JSON to Hessian 2.
//!
//! Provides the logic behind the `hessian-pack` binary:
//!
//! ```text
//! hessian-pack [--exact-lists] [--options FILE] [--hex] < input.json
//! ```
//!
//! JSON objects become untyped maps, or records when they carry a `"$type"`
//! member; `{"$date": <millis>}` becomes a date.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::hessian2::{EncodeError, Hessian2Encoder};
use crate::options::EncoderOptions;
use crate::shape::ListShape;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("invalid options: {0}")]
    Options(String),
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub const USAGE: &str = "usage: hessian-pack [--exact-lists] [--options FILE] [--hex] < input.json";

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackArgs {
    pub exact_lists: bool,
    pub options: Option<PathBuf>,
    pub hex: bool,
}

pub fn parse_args<I>(args: I) -> Result<PackArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = PackArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exact-lists" => parsed.exact_lists = true,
            "--hex" => parsed.hex = true,
            "--options" => match args.next() {
                Some(path) => parsed.options = Some(PathBuf::from(path)),
                None => return Err(CliError::Usage(format!("--options needs a file\n{USAGE}"))),
            },
            other => {
                return Err(CliError::Usage(format!("unknown argument: {other}\n{USAGE}")));
            }
        }
    }
    Ok(parsed)
}

pub fn load_options(path: &Path) -> Result<EncoderOptions, CliError> {
    let text = fs::read_to_string(path)?;
    EncoderOptions::from_json_str(&text)
        .map_err(|e| CliError::Options(format!("{}: {e}", path.display())))
}

/// Encodes a JSON document with default options.
pub fn pack(json: &str) -> Result<Vec<u8>, CliError> {
    pack_with_options(json, EncoderOptions::default())
}

pub fn pack_with_options(json: &str, options: EncoderOptions) -> Result<Vec<u8>, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let value = Value::from(value);
    let mut encoder = Hessian2Encoder::with_options(options);
    Ok(encoder.encode(&value)?)
}

/// Lowercase hex rendering of `bytes`.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Runs the tool: encodes `input` according to `args` and writes the result
/// to `out`.
pub fn run<W: Write>(args: &PackArgs, input: &str, out: &mut W) -> Result<(), CliError> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None => EncoderOptions::default(),
    };
    if args.exact_lists {
        options.list_shape = ListShape::Exact;
    }
    debug!(?options, "encoding stdin");
    let bytes = pack_with_options(input.trim(), options)?;
    if args.hex {
        writeln!(out, "{}", to_hex(&bytes))?;
    } else {
        out.write_all(&bytes)?;
    }
    Ok(())
}
