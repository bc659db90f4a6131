use std::process;

use capstone_js_build::Cli;
use clap::Parser;

fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = capstone_js_build::run(cli) {
        println!("Build error: {e}");
        process::exit(1);
    }
}
