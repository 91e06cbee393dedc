//! CLI subcommands

pub mod call;
pub mod selector;

use std::path::{Path, PathBuf};

use calldata_abi::{Contract, Method};
use clap::Args;

use crate::CliError;

/// Which function of which ABI file a command applies to
#[derive(Debug, Args)]
pub struct MethodTarget {
    /// JSON ABI file (a function object or a contract ABI array)
    #[arg(long)]
    pub abi: PathBuf,

    /// Function name; required when the ABI has more than one function
    #[arg(long)]
    pub method: Option<String>,
}

impl MethodTarget {
    /// Load the ABI file and pick the target function
    pub fn resolve(&self) -> Result<Method, CliError> {
        let contract = load_contract(&self.abi)?;
        Ok(contract.resolve(self.method.as_deref())?.clone())
    }
}

/// Read and parse a JSON ABI file
pub fn load_contract(path: &Path) -> Result<Contract, CliError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::InvalidInput(format!("cannot read {}: {}", path.display(), e)))?;
    Ok(Contract::from_json(&json)?)
}
