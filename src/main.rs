use clap::Parser;
use log::{error, info};
use std::process;
use valid_fraction_sim::config::Config;
use valid_fraction_sim::run_simulation;

fn init_msg() {
    info!("valid fraction simulation");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    init_msg();
    let config = Config::parse();
    config.display();
    if let Err(err) = run_simulation(config) {
        error!("{}", err);
        process::exit(1);
    }
}
