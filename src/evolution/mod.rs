pub mod builder;
pub mod history;
pub mod launcher;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use history::{Generation, History};
pub use launcher::EvolutionLauncher;
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel, Retention};
