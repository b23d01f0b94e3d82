use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{app, tile};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "xlr-scaffold")]
#[command(version = VERSION)]
#[command(about = "Scaffold XL Release plugins and dashboard tiles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new plugin project
    App(app::AppArgs),
    /// Add a dashboard tile to an existing plugin project
    Tile(tile::TileArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let (json_result, exit_code) = commands::run_json(cli.command);

    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err.message);
        return std::process::ExitCode::from(exit_code_to_u8(1));
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
