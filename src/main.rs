use clap::Parser;

use ipinfo::cli::{Cli, Commands, ConfigCommands};
use ipinfo::config::{get_config, init_config};
use ipinfo::runtime::modes;
use ipinfo::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        }) => modes::generate_config(output_path.as_deref(), force),
        Some(Commands::Serve) | None => {
            init_config(cli.config.as_deref());
            let config = get_config();

            // guard 需要存活到进程结束，保证日志写出
            let _guard = init_logging(&config)?;

            modes::run_server().await
        }
    }
}
