use crate::address::Generator;
use crate::error::{Error, Result};
use crate::{DPI_OUTPUT, FILENAME_OUTPUT, SIZE_ADDRESS_SPACE, SIZE_TABLE, TRIAL_COUNT};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use std::env;
use std::str::FromStr;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Exclusive upper bound of every generated virtual address.
    #[arg(long, default_value_t = env_or_default("SIM_SIZE_ADDRESS_SPACE", SIZE_ADDRESS_SPACE))]
    pub address_space_size: u64,

    /// Number of limits (positions) evaluated per trial.
    #[arg(long, default_value_t = env_or_default("SIM_SIZE_TABLE", SIZE_TABLE))]
    pub size_table: usize,

    #[arg(long, default_value_t = env_or_default("SIM_TRIALS", TRIAL_COUNT))]
    pub trials: u64,

    #[arg(long, value_enum, default_value_t = env_or_default_generator("SIM_GENERATOR"))]
    pub generator: Generator,

    #[arg(long, default_value_t = env_or_default_str("SIM_FILE_OUTPUT", FILENAME_OUTPUT))]
    pub file_output: String,

    #[arg(long, default_value_t = env_or_default("SIM_DPI", DPI_OUTPUT))]
    pub dpi: u32,

    /// Write the chart without opening it in a viewer.
    #[arg(long, default_value_t = env_flag("SIM_NO_SHOW"))]
    pub no_show: bool,

    #[arg(long, default_value_t = env_flag("SIM_NO_PROGRESS"))]
    pub no_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address_space_size: SIZE_ADDRESS_SPACE,
            size_table: SIZE_TABLE,
            trials: TRIAL_COUNT,
            generator: Generator::Mt19937,
            file_output: String::from(FILENAME_OUTPUT),
            dpi: DPI_OUTPUT,
            no_show: false,
            no_progress: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.address_space_size == 0 {
            Err(Error::Config(String::from(
                "'address_space_size' must be a non-zero value",
            )))
        } else if self.size_table == 0 {
            Err(Error::Config(String::from(
                "'size_table' must be a non-zero value",
            )))
        } else if self.trials == 0 {
            Err(Error::Config(String::from("'trials' must be a non-zero value")))
        } else if self.dpi == 0 {
            Err(Error::Config(String::from("'dpi' must be a non-zero value")))
        } else if self.file_output.is_empty() {
            Err(Error::Config(String::from("'file_output' must not be empty")))
        } else {
            Ok(())
        }
    }

    pub fn display(&self) {
        info!("simulation configuration values: ");
        info!("{:#?}", self);
    }
}

fn env_or_default<T: FromStr>(varname: &str, default: T) -> T {
    match env::var(varname) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring unparsable value '{}' for env var: '{}'", val, varname);
                default
            }
        },
        _ => default,
    }
}

fn env_or_default_str(varname: &str, default: &str) -> String {
    match env::var(varname) {
        Ok(val) => val,
        _ => String::from(default),
    }
}

fn env_or_default_generator(varname: &str) -> Generator {
    match env::var(varname) {
        Ok(val) => <Generator as ValueEnum>::from_str(val.trim(), true).unwrap_or_else(|_| {
            warn!("ignoring unknown generator '{}' for env var: '{}'", val, varname);
            Generator::Mt19937
        }),
        _ => Generator::Mt19937,
    }
}

fn env_flag(varname: &str) -> bool {
    matches!(
        env::var(varname).as_deref().map(str::trim),
        Ok("1") | Ok("true") | Ok("yes")
    )
}
