//! ArgMatches → bound arguments, configuration, invocation
//!
//! Resolves which group/operation (or model) the grammar matched, coerces the
//! raw flag values into typed call arguments, builds the per-invocation
//! transport `Configuration`, and invokes the registered operation. This is the
//! single boundary where the client library's `ApiError` is caught.

use std::ffi::OsString;
use std::io::Write;

use clap::ArgMatches;
use serde_json::Value;

use crate::builder::{build_commands, CliConfig};
use crate::catalog::Catalog;
use crate::config::{load_access_token, AuthMode, Configuration};
use crate::error::CliError;
use crate::params::Parameter;
use crate::registry::Registry;

/// Run the CLI over the process arguments and std streams.
pub fn run(config: &CliConfig, registry: &Registry) -> i32 {
    run_from(
        config,
        registry,
        std::env::args_os(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
}

/// Run the CLI over explicit arguments and output streams, returning the
/// process exit code.
///
/// Discovery, grammar construction, matching, binding, and dispatch all happen
/// inside this one call; nothing is shared between runs.
pub fn run_from<I, T>(
    config: &CliConfig,
    registry: &Registry,
    argv: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let catalog = Catalog::build(registry, config.operation_prefix.as_deref());

    let command = match build_commands(config, &catalog) {
        Ok(command) => command,
        Err(grammar_err) => {
            let _ = writeln!(err, "{grammar_err}");
            return 1;
        }
    };

    let matches = match command.try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(parse_err) => {
            let rendered = parse_err.render();
            if parse_err.use_stderr() {
                let _ = write!(err, "{rendered}");
            } else {
                let _ = write!(out, "{rendered}");
            }
            return parse_err.exit_code();
        }
    };

    match execute(config, registry, &catalog, &matches, out, err) {
        Ok(code) => code,
        Err(cli_err) => {
            let _ = writeln!(err, "{cli_err}");
            1
        }
    }
}

/// What the grammar match resolved to. One fresh context per run.
enum Selection<'a> {
    Api {
        group: &'a str,
        operation: &'a str,
        api_matches: &'a ArgMatches,
        op_matches: &'a ArgMatches,
    },
    Model {
        name: &'a str,
    },
}

fn resolve_selection(matches: &ArgMatches) -> Option<Selection<'_>> {
    match matches.subcommand()? {
        ("api", api_matches) => {
            let (group, group_matches) = api_matches.subcommand()?;
            let (operation, op_matches) = group_matches.subcommand()?;
            Some(Selection::Api {
                group,
                operation,
                api_matches,
                op_matches,
            })
        }
        ("model", model_matches) => {
            let (name, _) = model_matches.subcommand()?;
            Some(Selection::Model { name })
        }
        _ => None,
    }
}

fn execute(
    config: &CliConfig,
    registry: &Registry,
    catalog: &Catalog,
    matches: &ArgMatches,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32, CliError> {
    // subcommand_required guards every level, so a missing selection means
    // clap already reported the usage error.
    let Some(selection) = resolve_selection(matches) else {
        return Ok(2);
    };

    match selection {
        Selection::Api {
            group,
            operation,
            api_matches,
            op_matches,
        } => {
            let op = catalog
                .find_operation(group, operation)
                .ok_or_else(|| CliError::UnknownOperation {
                    group: group.to_string(),
                    operation: operation.to_string(),
                })?;
            let args = bind_arguments(&op.parameters, op_matches)?;
            let configuration = build_configuration(config, api_matches)?;
            dispatch_operation(registry, &configuration, group, operation, &args, out, err)
        }
        Selection::Model { name } => {
            let model = catalog
                .model(name)
                .ok_or_else(|| CliError::UnknownModel(name.to_string()))?;
            let mut schema = serde_json::Map::new();
            for (field, ty) in &model.fields {
                schema.insert(field.clone(), Value::String(ty.clone()));
            }
            print_value(out, &Value::Object(schema));
            Ok(0)
        }
    }
}

/// Coerce the matched flag values into positional call arguments, in declared
/// parameter order.
pub fn bind_arguments(
    parameters: &[Parameter],
    matches: &ArgMatches,
) -> Result<Vec<Value>, CliError> {
    let mut args = Vec::with_capacity(parameters.len());
    for param in parameters {
        let flag = param.name.to_lowercase();
        if let Some(raw) = matches.get_one::<String>(&flag) {
            let value = if param.is_str() {
                Value::String(raw.clone())
            } else {
                serde_json::from_str(raw).map_err(|source| CliError::InvalidStructuredValue {
                    flag: flag.clone(),
                    source,
                })?
            };
            args.push(value);
        }
    }
    Ok(args)
}

/// Build the per-invocation transport configuration from the api-level flags.
pub fn build_configuration(
    config: &CliConfig,
    matches: &ArgMatches,
) -> Result<Configuration, CliError> {
    Ok(Configuration {
        proxy: matches.get_one::<String>("proxy").cloned(),
        verify_ssl: !matches.get_flag("insecure"),
        debug: matches.get_flag("verbose"),
        auth: resolve_auth(config, matches)?,
    })
}

fn resolve_auth(config: &CliConfig, matches: &ArgMatches) -> Result<AuthMode, CliError> {
    if let Some(token) = matches.get_one::<String>("access_token") {
        Ok(AuthMode::Bearer(token.clone()))
    } else if let Some(literal) = matches.get_one::<String>("basic") {
        let credentials =
            serde_json::from_str(literal).map_err(CliError::InvalidCredentials)?;
        Ok(AuthMode::Basic(credentials))
    } else if let Some(key) = matches.get_one::<String>("api_key") {
        Ok(AuthMode::ApiKey(key.clone()))
    } else if config.require_token {
        Ok(AuthMode::Bearer(load_access_token()?))
    } else {
        Ok(AuthMode::None)
    }
}

fn dispatch_operation(
    registry: &Registry,
    configuration: &Configuration,
    group: &str,
    operation: &str,
    args: &[Value],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32, CliError> {
    let invoker =
        registry
            .find_invoker(group, operation)
            .ok_or_else(|| CliError::UnknownOperation {
                group: group.to_string(),
                operation: operation.to_string(),
            })?;

    match invoker(configuration, args) {
        Ok(result) => {
            if configuration.debug {
                let _ = writeln!(out, "body:");
            }
            print_value(out, &result);
            Ok(0)
        }
        // A remote failure after a correctly dispatched call is reported,
        // not treated as a CLI failure.
        Err(api_err) => {
            let _ = writeln!(err, "Exception: {}", api_err.message);
            Ok(0)
        }
    }
}

fn print_value(out: &mut dyn Write, value: &Value) {
    let text = match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    let _ = writeln!(out, "{text}");
}
