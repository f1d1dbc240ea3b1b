use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use pulse_cli::{init_tracing, run_server, Config};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Pulse analysis functions server", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on, overrides PORT
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind, overrides HOST
        #[arg(long)]
        host: Option<String>,
    },
    /// Print the effective configuration and exit
    Config,
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Option<Commands>) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    match command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
    }) {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            init_tracing();
            run_server(config).await
        }
        Commands::Config => {
            print_config(&config);
            Ok(())
        }
    }
}

fn print_config(config: &Config) {
    let set = |value: bool| {
        if value {
            "set".green()
        } else {
            "not set".yellow()
        }
    };

    println!("{}", "Pulse configuration".bold());
    println!("  listen:          {}:{}", config.host, config.port);
    println!("  gateway url:     {}", config.gateway_url);
    println!("  gateway model:   {}", config.gateway_model);
    println!("  gateway timeout: {:?}", config.gateway_timeout);
    println!("  gateway key:     {}", set(config.gateway_api_key.is_some()));
    println!("  access code:     {}", set(config.access_code.is_some()));
    println!("  email key:       {}", set(config.email_api_key.is_some()));
    println!(
        "  notify address:  {}",
        set(config.access_request_notify.is_some())
    );
}
