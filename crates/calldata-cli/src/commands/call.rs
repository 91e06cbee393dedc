//! Encode and decode commands

use calldata_abi::{parse_hex, DecodeOptions, EncodeOptions, Method, Value};
use clap::Args;
use tracing::debug;

use super::MethodTarget;
use crate::{config::Config, output::Output, CliError};

/// Encode call arguments into calldata
#[derive(Debug, Args)]
pub struct EncodeCommand {
    #[command(flatten)]
    target: MethodTarget,

    /// Arguments as a JSON array (positional) or object (by name)
    #[arg(long)]
    args: String,

    /// Deduplicate repeated dynamic values
    #[arg(long)]
    optimize: bool,
}

/// Encode return values
#[derive(Debug, Args)]
pub struct EncodeOutputCommand {
    #[command(flatten)]
    target: MethodTarget,

    /// Return values as a JSON array or object
    #[arg(long)]
    values: String,

    /// Deduplicate repeated dynamic values
    #[arg(long)]
    optimize: bool,
}

/// Decode calldata into call arguments
#[derive(Debug, Args)]
pub struct DecodeCommand {
    #[command(flatten)]
    target: MethodTarget,

    /// Hex calldata including the 4-byte selector
    #[arg(long)]
    data: String,

    /// Decode tuples as objects keyed by field name
    #[arg(long)]
    structs_as_objects: bool,
}

/// Decode return data
#[derive(Debug, Args)]
pub struct DecodeOutputCommand {
    #[command(flatten)]
    target: MethodTarget,

    /// Hex return data
    #[arg(long)]
    data: String,

    /// Decode tuples as objects keyed by field name
    #[arg(long)]
    structs_as_objects: bool,
}

fn encode_options(flag: bool, config: &Config) -> EncodeOptions {
    EncodeOptions {
        optimize: flag || config.optimize,
    }
}

fn decode_options(flag: bool, config: &Config) -> DecodeOptions {
    DecodeOptions {
        structs_as_objects: flag || config.structs_as_objects,
    }
}

fn parse_values(json: &str) -> Result<Value, CliError> {
    let json: serde_json::Value = serde_json::from_str(json)?;
    if !json.is_array() && !json.is_object() {
        return Err(CliError::InvalidInput(
            "expected a JSON array or object".to_string(),
        ));
    }
    Ok(Value::from_json(&json)?)
}

fn print_encoded(method: &Method, field: &str, data: &[u8], optimized: bool, json: bool) {
    let hex = format!("0x{}", hex::encode(data));
    Output::new(json)
        .field("method", &method.signature())
        .field(field, &hex)
        .field_u64("bytes", data.len() as u64)
        .field_bool("optimized", optimized)
        .message(&hex)
        .print();
}

fn print_decoded(method: &Method, field: &str, value: &Value, json: bool) -> Result<(), CliError> {
    let rendered = value.to_json();
    Output::new(json)
        .field("method", &method.signature())
        .field_value(field, rendered.clone())
        .message(&serde_json::to_string_pretty(&rendered)?)
        .print();
    Ok(())
}

impl EncodeCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let method = self.target.resolve()?;
        let options = encode_options(self.optimize, config);
        let args = parse_values(&self.args)?;
        debug!("Encoding call to {}", method.signature());
        let calldata = method.encode(&args, &options)?;
        print_encoded(&method, "calldata", &calldata, options.optimize, json);
        Ok(())
    }
}

impl EncodeOutputCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let method = self.target.resolve()?;
        let options = encode_options(self.optimize, config);
        let values = parse_values(&self.values)?;
        let data = method.encode_return_values(&values, &options)?;
        print_encoded(&method, "data", &data, options.optimize, json);
        Ok(())
    }
}

impl DecodeCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let method = self.target.resolve()?;
        let data = parse_hex(self.data.trim())?;
        let args = method.decode(&data, &decode_options(self.structs_as_objects, config))?;
        print_decoded(&method, "args", &args, json)
    }
}

impl DecodeOutputCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let method = self.target.resolve()?;
        let data = parse_hex(self.data.trim())?;
        let values =
            method.decode_return_values(&data, &decode_options(self.structs_as_objects, config))?;
        print_decoded(&method, "values", &values, json)
    }
}
