//! Command-line and environment configuration.
//!
//! Every flag can also come from a `ROSTER_*` environment variable, which
//! keeps the shared secret out of shell history:
//!
//! ```bash
//! export ROSTER_AUTH_TOKEN=mysecrettoken
//! roster api --addr 127.0.0.1:5000
//! roster static --dir ./static
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::middleware::{AuthConfig, Principal, Role};
use crate::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "User-record HTTP service")]
pub struct Cli {
    /// Log output format.
    #[arg(long, env = "ROSTER_LOG_FORMAT", value_enum, default_value_t, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the authenticated `/api/users` resource.
    Api(ApiArgs),
    /// Serve a directory of static files with a custom 404 page.
    Static(StaticArgs),
}

#[derive(Debug, Args)]
pub struct ApiArgs {
    #[arg(long, env = "ROSTER_ADDR", default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,

    /// Shared secret expected as `Bearer <token>`.
    #[arg(long, env = "ROSTER_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: String,

    /// Header carrying the bearer credential.
    #[arg(long, env = "ROSTER_AUTH_HEADER", default_value = "authenticate")]
    pub auth_header: String,

    /// Username attached to authenticated requests.
    #[arg(long, env = "ROSTER_PRINCIPAL_NAME", default_value = "authenticatedUser")]
    pub principal_name: String,

    /// Role attached to authenticated requests.
    #[arg(long, env = "ROSTER_PRINCIPAL_ROLE", default_value = "admin")]
    pub principal_role: Role,
}

impl ApiArgs {
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::new(self.auth_token.clone())
            .header(self.auth_header.clone())
            .principal(Principal {
                id: 1,
                username: self.principal_name.clone(),
                role: self.principal_role,
            })
    }
}

#[derive(Debug, Args)]
pub struct StaticArgs {
    #[arg(long, env = "ROSTER_STATIC_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Directory to serve; should contain `index.html` and `404.html`.
    #[arg(long, env = "ROSTER_STATIC_DIR", default_value = "static")]
    pub dir: PathBuf,
}
