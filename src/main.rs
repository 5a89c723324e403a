use clap::Parser;

use surgedash::cli::Cli;
use surgedash::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use surgedash::runtime::modes::{self, Mode};
use surgedash::system::logging::init_logging;
use surgedash::system::panic_handler::{RunMode, crash_log_path, install_panic_hook};

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
    let crash_log = crash_log_path(&get_config().logging);

    match modes::detect_mode(cli.command.as_ref()) {
        #[cfg(feature = "server")]
        Mode::Server => {
            install_panic_hook(RunMode::Server, crash_log);

            let config = get_config();
            let _guard = match init_logging(&config.logging) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Failed to initialize logging: {:#}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = modes::run_server().await {
                tracing::error!("Server exited with error: {:#}", e);
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }

        #[cfg(feature = "cli")]
        Mode::Cli => {
            install_panic_hook(RunMode::Cli, crash_log);

            let Some(command) = cli.command else {
                return;
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(e.exit_code());
            }
        }

        Mode::Unknown => {
            eprintln!("No execution mode available. Enable the \"server\" or \"cli\" feature.");
            std::process::exit(1);
        }
    }
}
