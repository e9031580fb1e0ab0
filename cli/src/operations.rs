#![deny(missing_docs)]

//! # Operations Command
//!
//! Lists every resolved operation with its merged parameter list, in
//! declaration order.

use crate::error::CliResult;
use crate::loader::{load_description, DescriptionArgs};
use oasgate_core::ResolvedDescription;
use serde_json::{json, Value};
use std::io::Write;

/// Arguments for `operations`.
#[derive(clap::Args, Debug, Clone)]
pub struct OperationsArgs {
    #[clap(flatten)]
    pub source: DescriptionArgs,
}

/// Prints the operation table as JSON.
pub fn execute(args: &OperationsArgs, out: &mut impl Write) -> CliResult<()> {
    let table = load_description(&args.source.description)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&describe(&table))?)?;
    Ok(())
}

fn describe(table: &ResolvedDescription) -> Value {
    let operations: Vec<Value> = table
        .operations()
        .map(|(path, method, op)| {
            json!({
                "path": path,
                "method": method,
                "operationId": op.operation_id,
                "parameters": op.parameters,
                "responses": op.responses.keys().collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({
        "basePath": table.base_path(),
        "operations": operations,
    })
}
