use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use winlayout_core::{LayoutError, Switcher, load_config};
use winlayout_platform::Platform;

fn init_tracing(level: &str, output: &str) {
    if output != "console" {
        warn!(output = %output, "logging output is not supported yet, using console");
    }

    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_layout_error(err: &LayoutError) {
    println!("{}", err.kind());
    println!("{err}");
}

fn main() -> anyhow::Result<()> {
    let config = load_config(PathBuf::from("config.toml")).context("load config")?;
    init_tracing(&config.logging.level, &config.logging.output);

    let switcher = Switcher::new(Platform::new());
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = args.first() else {
        println!("Invalid args");
        return Ok(());
    };
    debug!(command = %command, "dispatching");

    match (command.as_str(), args.len()) {
        ("list", 1) => println!("{}", switcher.list()?),
        ("lang", 1) => println!("{}", switcher.current_lang()?),
        ("lang", 2) => match switcher.set_lang(&args[1]) {
            Ok(current) => println!("{current}"),
            Err(err @ LayoutError::UnknownLayout { .. }) => print_layout_error(&err),
            Err(err) => return Err(err.into()),
        },
        ("-l", 1) => println!("{}", switcher.short_list()?),
        ("xkblang", 1) => println!("{}", switcher.current_short()?),
        ("xkblang", 2) => match switcher.set_short(&args[1]) {
            Ok(()) => {}
            Err(err @ LayoutError::UnknownLayout { .. }) => print_layout_error(&err),
            Err(err) => return Err(err.into()),
        },
        _ => println!("Invalid command"),
    }

    Ok(())
}
