use anyhow::Context;
use clap::Parser;
use tracing::info;

use roster::config::{Cli, Command};
use roster::users::{self, MemoryStore};
use roster::{static_files, telemetry, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    match cli.command {
        Command::Api(args) => {
            let store = MemoryStore::seeded().shared();
            info!(records = store.list().len(), header = %args.auth_header, "serving /api/users");
            let app = users::routes(store, args.auth_config());
            Server::bind(args.addr).serve(app).await.context("api server failed")?;
        }
        Command::Static(args) => {
            info!(dir = %args.dir.display(), "serving static files");
            Server::bind(args.addr)
                .serve(static_files::site(args.dir))
                .await
                .context("static server failed")?;
        }
    }
    Ok(())
}
