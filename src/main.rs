use std::io::Read;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use proxyforge::interfaces::{convert_with_options, OUTPUT_FILE_NAME};
use proxyforge::utils::file::{file_exists, load_template};
use proxyforge::{ClashType, ConfigOptions};

/// Convert V2Ray/Shadowsocks subscriptions into Clash configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Subscription content file (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Template configuration file
    #[arg(short, long, value_name = "FILE")]
    template: Option<String>,

    /// Target dialect (clash or meta)
    #[arg(long, value_name = "TYPE")]
    clash_type: Option<ClashType>,

    /// Output file path
    #[arg(short, long, value_name = "OUTPUT_FILE", default_value = OUTPUT_FILE_NAME)]
    output: String,

    /// Print the configuration to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let mut options = ConfigOptions::default();
    if let Some(path) = args.template.as_deref() {
        if !file_exists(path) {
            error!("Template file not found: {}", path);
            std::process::exit(1);
        }
        match load_template(path) {
            Ok(template) => options.template = Some(template),
            Err(e) => {
                error!("Failed to read template {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }
    options.clash_type = args.clash_type;

    let input = match read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            error!("Failed to read input: {}", e);
            std::process::exit(1);
        }
    };

    let conversion = match convert_with_options(&input, &options) {
        Ok(conversion) => conversion,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if args.stdout {
        print!("{}", conversion.config);
        return;
    }

    match std::fs::write(&args.output, &conversion.config) {
        Ok(_) => info!(
            "Successfully wrote {} node(s) to {}",
            conversion.proxies.len(),
            args.output
        ),
        Err(e) => {
            error!("Failed to write to output file: {}", e);
            std::process::exit(1);
        }
    }
}
