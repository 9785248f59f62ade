//! Command-line arguments

use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use rapp_core::{MismatchPolicy, Schema};

use crate::{error::InspectError, shape};

/// Inspect Rapp envelopes and ghost records.
#[derive(Parser, Debug)]
#[command(name = "rapp-inspect", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Inspector commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print fingerprint, head size and slot table for a schema.
    Schema {
        /// Fields in declaration order, e.g. "Id:int32,Name:string".
        #[arg(short, long, value_parser = shape::parse)]
        schema: Schema,
    },
    /// Decode a raw ghost buffer field by field.
    View {
        /// Fields in declaration order, e.g. "Id:int32,Name:string".
        #[arg(short, long, value_parser = shape::parse)]
        schema: Schema,
        /// Buffer to decode.
        #[command(flatten)]
        input: Input,
    },
    /// Check a stored envelope against a schema.
    Envelope {
        /// Fields in declaration order, e.g. "Id:int32,Name:string".
        #[arg(short, long, value_parser = shape::parse)]
        schema: Schema,
        /// Envelope to check.
        #[command(flatten)]
        input: Input,
        /// Also decode the payload as a ghost buffer.
        #[arg(long)]
        ghost: bool,
        /// returnEmpty reports a mismatch; raiseError also exits non-zero.
        #[arg(long, default_value_t, value_name = "POLICY")]
        on_mismatch: MismatchPolicy,
    },
}

/// Input bytes, from a file or inline hex
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct Input {
    /// File holding the raw bytes.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
    /// Bytes as hex; whitespace is ignored.
    #[arg(long, value_name = "HEX")]
    pub hex: Option<String>,
}

impl Input {
    /// Input from inline hex
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self { file: None, hex: Some(hex.into()) }
    }

    /// Input from a file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self { file: Some(path.into()), hex: None }
    }

    /// Read the input bytes
    pub fn load(&self) -> Result<Vec<u8>, InspectError> {
        match (&self.file, &self.hex) {
            (Some(path), _) => {
                fs::read(path).map_err(|source| InspectError::Read { path: path.clone(), source })
            },
            (None, Some(text)) => {
                let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                Ok(hex::decode(digits)?)
            },
            (None, None) => Ok(Vec::new()),
        }
    }
}
