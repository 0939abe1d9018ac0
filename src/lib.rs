//! Turn generated Swagger/OpenAPI client libraries into interactive clap CLIs.
//!
//! A generated client registers its operation groups, operations (with their
//! structured-comment documentation), and model types in a `Registry`. From
//! that, this crate discovers the parameter metadata, builds the nested
//! `<prog> api <group> <operation> --<param> ...` / `<prog> model <name>`
//! command tree, coerces flag text into typed call arguments, and dispatches
//! with a per-invocation transport `Configuration`.
//!
//! # Usage
//!
//! ```no_run
//! use swagger_clap::{run, CliConfig, Registry};
//! use swagger_clap::transport;
//!
//! const GET_USER_DOC: &str = "Get user by user name  # noqa: E501\n\n        \
//!     :param str username: The name that needs to be fetched (required)\n";
//!
//! let registry = Registry::builder()
//!     .group("UsersApi", |g| {
//!         g.operation("get_user", GET_USER_DOC, |cfg, _args| {
//!             let client = transport::http_client(cfg)?;
//!             let req = client.get("https://petstore.example/v2/user");
//!             transport::execute(transport::authorize(req, &cfg.auth))
//!         })
//!     })
//!     .model("User", &[("id", "int"), ("username", "str")])
//!     .build();
//!
//! let config = CliConfig::new("petstore", "Petstore command line interface");
//! std::process::exit(run(&config, &registry));
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod registry;
pub mod transport;

pub use builder::{build_commands, CliConfig};
pub use catalog::{Catalog, ModelType, Operation, OperationGroup};
pub use config::{load_access_token, AuthMode, BasicCredentials, Configuration};
pub use dispatch::{bind_arguments, run, run_from};
pub use error::{ApiError, CliError, DocError};
pub use params::{parse_doc, OperationDoc, Parameter};
pub use registry::{GroupEntry, Invoker, ModelEntry, OperationEntry, Registry};

// Re-export dependencies for downstream crates
pub use clap;
pub use reqwest;
