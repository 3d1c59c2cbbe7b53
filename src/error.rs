use thiserror::Error;

/// Type Alias: A rebranding of the `Result` enum from the standard library which focuses on errors
/// that may occur while configuring, running, or rendering a simulation.
pub type Result<T> = std::result::Result<T, Error>;

// Errors here are environment-level. The simulation loop itself has no failure modes, so every
// variant originates either in configuration or in one of the two side effects (image, viewer).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to render chart: {0}")]
    Render(String),
    #[error("progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
    #[error("failed to display '{path}': {source}")]
    Display {
        path: String,
        source: std::io::Error,
    },
    #[error("viewer exited with {0}")]
    Viewer(std::process::ExitStatus),
}
