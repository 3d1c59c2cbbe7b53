pub mod address;
pub mod config;
pub mod error;
pub mod render;
pub mod tracker;

use address::{AddressStream, Generator};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use render::ChartStyle;
use std::path::Path;
use std::time::Instant;
use tracker::{Tracker, ValidFractionCurve};

pub const FILENAME_OUTPUT: &str = "valid-fraction.png";
pub const SIZE_ADDRESS_SPACE: u64 = 1024;
pub const SIZE_TABLE: usize = 16 * 1024;
pub const TRIAL_COUNT: u64 = 300;
pub const DPI_OUTPUT: u32 = 227;

/// A structure which contains the parameters required to run a simulation. Each trial draws one
/// virtual address per position and counts the address as valid when it lies below the position
/// itself, which acts as the limit.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub address_space_size: u64,
    pub size_table: usize,
    pub trials: u64,
    pub generator: Generator,
    progress: bool,
}

impl Simulation {
    pub fn build(address_space_size: u64, size_table: usize, trials: u64) -> Self {
        Self {
            address_space_size,
            size_table,
            trials,
            generator: Generator::Mt19937,
            progress: false,
        }
    }

    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    /// Draw an `indicatif` progress bar while trials run.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Run a single trial. The generator is reseeded with the trial index, so a given trial
    /// always records the same hits.
    ///
    /// # Arguments
    ///
    /// * `trial` - the trial index, also used as the seed.
    /// * `tracker` - accumulator receiving one hit per valid position.
    ///
    pub fn run_trial(&self, trial: u64, tracker: &mut Tracker) {
        let addresses = AddressStream::seeded(self.generator, trial, self.address_space_size);
        for (limit, virtual_address) in (0..self.size_table).zip(addresses) {
            if virtual_address < limit as u64 {
                tracker.record_hit(limit);
            }
        }
        tracker.finish_trial();
    }

    /// Run every trial and hand back the populated accumulator.
    pub fn accumulate(&self) -> Result<Tracker> {
        let mut tracker = Tracker::new(self.size_table);
        let bar = match self.progress {
            true => {
                let bar = ProgressBar::new(self.trials);
                bar.set_style(ProgressStyle::with_template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} trials",
                )?);
                bar
            }
            false => ProgressBar::hidden(),
        };

        for trial in 0..self.trials {
            self.run_trial(trial, &mut tracker);
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(tracker)
    }

    pub fn run(&self) -> Result<ValidFractionCurve> {
        Ok(self.accumulate()?.normalize())
    }
}

impl From<&Config> for Simulation {
    fn from(config: &Config) -> Self {
        Simulation::build(config.address_space_size, config.size_table, config.trials)
            .with_generator(config.generator)
            .with_progress(!config.no_progress)
    }
}

/// Simulate, summarize, render, and optionally show the chart described by `config`.
pub fn run_simulation(config: Config) -> Result<()> {
    config.validate()?;
    let simulation = Simulation::from(&config);

    info!(
        "running {} trials over {} limits (address space: {}, generator: {:?})",
        simulation.trials, simulation.size_table, simulation.address_space_size, simulation.generator
    );
    let started = Instant::now();
    let tracker = simulation.accumulate()?;
    info!("simulation finished in {:.2?}", started.elapsed());
    info!("{}", tracker);

    let curve = tracker.normalize();
    let midpoint = (simulation.address_space_size / 2) as usize;
    if let Some(fraction) = curve.get(midpoint) {
        info!("valid fraction at limit {}: {:.06}", midpoint, fraction);
    }

    let path = Path::new(&config.file_output);
    let style = ChartStyle::with_dpi(config.dpi);
    render::render_curve(&curve, &style, path)?;
    info!("chart written to '{}'", path.display());

    if !config.no_show {
        render::show(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[cfg(test)]
    mod simulation_tests {

        use super::*;

        #[test]
        fn build() {
            let sim = Simulation::build(16, 32, 4);
            assert_eq!(sim.address_space_size, 16);
            assert_eq!(sim.size_table, 32);
            assert_eq!(sim.trials, 4);
            assert_eq!(sim.generator, Generator::Mt19937);
        }

        #[test]
        fn from_config() {
            let config = Config {
                generator: Generator::Std,
                trials: 3,
                ..Config::default()
            };
            let sim = Simulation::from(&config);
            assert_eq!(sim.generator, Generator::Std);
            assert_eq!(sim.trials, 3);
            assert_eq!(sim.size_table, SIZE_TABLE);
        }

        #[test]
        fn run_trial_counts_once() {
            let sim = Simulation::build(8, 16, 1);
            let mut tracker = Tracker::new(16);
            sim.run_trial(0, &mut tracker);
            assert_eq!(tracker.trials, 1);
            assert!(tracker.hits().iter().all(|&hits| hits <= 1));
            // every address is below 8, so limits from 8 up always pass
            assert!(tracker.hits()[8..].iter().all(|&hits| hits == 1));
            assert_eq!(tracker.hits()[0], 0);
        }

        #[test]
        fn run_trial_replays() {
            let sim = Simulation::build(64, 128, 1);
            let (mut a, mut b) = (Tracker::new(128), Tracker::new(128));
            sim.run_trial(17, &mut a);
            sim.run_trial(17, &mut b);
            assert_eq!(a, b);
        }

        #[test]
        fn run_is_deterministic() {
            for generator in [Generator::Mt19937, Generator::Std] {
                let sim = Simulation::build(32, 96, 20).with_generator(generator);
                assert_eq!(sim.run().unwrap(), sim.run().unwrap());
            }
        }

        #[test]
        fn first_position_is_zero() {
            let curve = Simulation::build(1024, 2048, 10).run().unwrap();
            assert_eq!(curve.get(0), Some(0.0));
        }

        #[test]
        fn saturates_past_address_space() {
            let curve = Simulation::build(100, 300, 25).run().unwrap();
            assert_eq!(curve.len(), 300);
            assert!(curve.as_slice()[100..].iter().all(|&f| f == 1.0));
            assert!(curve.saturation_position().unwrap() <= 100);
        }

        #[test]
        fn reference_scenario() {
            let curve = Simulation::build(SIZE_ADDRESS_SPACE, SIZE_TABLE, TRIAL_COUNT)
                .run()
                .unwrap();
            assert_eq!(curve.len(), SIZE_TABLE);
            assert_eq!(curve.get(0), Some(0.0));
            let midpoint = curve.get(512).unwrap();
            assert!((midpoint - 0.5).abs() < 0.1, "midpoint was {}", midpoint);
            assert_eq!(curve.get(1024), Some(1.0));
            assert_eq!(curve.get(SIZE_TABLE - 1), Some(1.0));
        }

        #[test]
        fn expected_fraction_tracks_limit() {
            // for limits inside the address space the expected fraction is limit / size
            let curve = Simulation::build(64, 64, 2000).run().unwrap();
            for limit in [16usize, 32, 48] {
                let expected = limit as f64 / 64.0;
                let observed = curve.get(limit).unwrap();
                assert!(
                    (observed - expected).abs() < 0.05,
                    "limit {}: {} vs {}",
                    limit,
                    observed,
                    expected
                );
            }
        }

        #[test]
        fn progress_bar_runs() {
            let curve = Simulation::build(4, 8, 3).with_progress(true).run().unwrap();
            assert_eq!(curve.len(), 8);
        }
    }

    #[cfg(test)]
    mod invariant_tests {

        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn fractions_in_unit_interval(
                address_space_size in 1u64..256,
                size_table in 1usize..512,
                trials in 1u64..8,
                use_std in any::<bool>(),
            ) {
                let generator = if use_std { Generator::Std } else { Generator::Mt19937 };
                let curve = Simulation::build(address_space_size, size_table, trials)
                    .with_generator(generator)
                    .run()
                    .unwrap();
                prop_assert_eq!(curve.len(), size_table);
                prop_assert_eq!(curve.get(0), Some(0.0));
                prop_assert!(curve.as_slice().iter().all(|&f| (0.0..=1.0).contains(&f)));
                for &f in curve.as_slice().iter().skip(address_space_size as usize) {
                    prop_assert_eq!(f, 1.0);
                }
            }
        }
    }
}
