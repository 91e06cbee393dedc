//! Selector command

use clap::Args;

use super::{load_contract, MethodTarget};
use crate::{output::Output, CliError};

/// Print function selectors and canonical signatures
#[derive(Debug, Args)]
pub struct SelectorCommand {
    #[command(flatten)]
    target: MethodTarget,

    /// List every function in the ABI
    #[arg(long, conflicts_with = "method")]
    all: bool,
}

impl SelectorCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        if self.all {
            let contract = load_contract(&self.target.abi)?;
            let entries: Vec<serde_json::Value> = contract
                .methods()
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "selector": m.selector().to_hex(),
                        "signature": m.signature(),
                    })
                })
                .collect();
            let lines: Vec<String> = contract
                .methods()
                .iter()
                .map(|m| format!("{}  {}", m.selector(), m.signature()))
                .collect();
            Output::new(json)
                .field_value("functions", serde_json::Value::Array(entries))
                .message(&lines.join("\n"))
                .print();
            return Ok(());
        }

        let method = self.target.resolve()?;
        Output::new(json)
            .field("selector", &method.selector().to_hex())
            .field("signature", &method.signature())
            .message(&format!("{}  {}", method.selector(), method.signature()))
            .print();
        Ok(())
    }
}
