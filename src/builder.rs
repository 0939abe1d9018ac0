//! Catalog → clap Command tree builder
//!
//! Converts the discovered catalog into the two-branch command grammar:
//! `<name> api <group> <operation> --<param> ...` and `<name> model <type>`.

use std::collections::HashSet;

use clap::{Arg, ArgAction, ArgGroup, Command};

use crate::catalog::{Catalog, Operation};
use crate::error::CliError;

/// Configuration for the synthesized CLI shell.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CliConfig {
    /// Root command name (e.g. "petstore")
    pub name: String,
    /// Root command about/description
    pub about: String,
    /// Surface only operations whose name starts with this prefix
    pub operation_prefix: Option<String>,
    /// Fall back to the `.access_token` file when no auth flag is given.
    /// A missing file is then a configuration error.
    pub require_token: bool,
}

impl CliConfig {
    pub fn new(name: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            operation_prefix: None,
            require_token: false,
        }
    }

    /// Restrict the surfaced operations to those starting with `prefix`.
    pub fn operation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.operation_prefix = Some(prefix.into());
        self
    }

    /// Require bearer auth, reading `.access_token` when no flag supplies it.
    pub fn require_token(mut self, yes: bool) -> Self {
        self.require_token = yes;
        self
    }
}

/// Build the full clap `Command` tree from a discovered catalog.
///
/// Fails with `CliError::FlagCollision` when two parameters of one operation
/// would synthesize the same lower-cased flag name.
pub fn build_commands(config: &CliConfig, catalog: &Catalog) -> Result<Command, CliError> {
    let root = Command::new(config.name.clone())
        .about(config.about.clone())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_api_command(catalog)?)
        .subcommand(build_model_command(catalog));
    Ok(root)
}

fn build_api_command(catalog: &Catalog) -> Result<Command, CliError> {
    let mut api = Command::new("api")
        .about("The API you want to interact with")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("proxy")
                .short('X')
                .long("proxy")
                .help("Proxy url (for example: 'http://localhost:8080')")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("insecure")
                .short('k')
                .long("insecure")
                .help("Disable SSL verification (use at your own risks!)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Display debug infos")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("access_token")
                .long("access_token")
                .help("The bearer token")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("basic")
                .long("basic")
                .help("Basic credentials as JSON: '{\"username\": .., \"password\": ..}'")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("api_key")
                .long("api_key")
                .help("The API key")
                .action(ArgAction::Set),
        )
        .group(ArgGroup::new("auth").args(["access_token", "basic", "api_key"]));

    for group in &catalog.groups {
        let mut group_cmd = Command::new(group.name.clone())
            .about(format!("Operations of {}", group.name))
            .subcommand_required(true)
            .arg_required_else_help(true);
        for op in &group.operations {
            group_cmd = group_cmd.subcommand(build_operation_command(op)?);
        }
        api = api.subcommand(group_cmd);
    }

    Ok(api)
}

fn build_operation_command(op: &Operation) -> Result<Command, CliError> {
    let mut cmd = Command::new(op.name.clone()).about(op.summary.clone());

    // Every discovered parameter becomes a required flag: the generated
    // client accepts only fully-specified calls.
    let mut seen = HashSet::new();
    for param in &op.parameters {
        let flag = param.name.to_lowercase();
        if !seen.insert(flag.clone()) {
            return Err(CliError::FlagCollision {
                operation: op.name.clone(),
                flag,
            });
        }
        cmd = cmd.arg(
            Arg::new(flag.clone())
                .long(flag)
                .help(format!("{} (type: {})", param.description, param.ty))
                .required(true)
                .action(ArgAction::Set),
        );
    }

    Ok(cmd)
}

fn build_model_command(catalog: &Catalog) -> Command {
    let mut model = Command::new("model")
        .about("Inspect a model type's field schema")
        .subcommand_required(true)
        .arg_required_else_help(true);
    for entry in &catalog.models {
        model = model.subcommand(
            Command::new(entry.name.clone())
                .about(format!("Show the {} field-to-type mapping", entry.name)),
        );
    }
    model
}
