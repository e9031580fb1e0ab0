#![deny(missing_docs)]

//! # Loading
//!
//! File access shared by every command: the description and the request or
//! response documents to check. YAML is read for both (JSON is valid YAML).

use crate::error::CliResult;
use oasgate_core::{Description, JsonSchemaEngine, ResolvedDescription};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the description, shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct DescriptionArgs {
    /// Path to the Swagger 2.0 description (YAML or JSON).
    #[clap(long, short = 'd', env = "OASGATE_DESCRIPTION")]
    pub description: PathBuf,
}

/// Reads and resolves the description.
pub fn load_description(path: &Path) -> CliResult<ResolvedDescription> {
    let content = fs::read_to_string(path)?;
    let description = Description::from_yaml_str(&content)?;
    let resolved = description.resolve(&JsonSchemaEngine::new())?;
    tracing::info!(
        path = %path.display(),
        operations = resolved.len(),
        "loaded description"
    );
    Ok(resolved)
}

/// Reads a YAML/JSON document into `T`.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}
