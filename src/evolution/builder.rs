use crate::error::{GeneticError, Result};

use super::EvolutionLauncher;

/// Fluent construction of an `EvolutionLauncher`.
///
/// # Example
///
/// ```rust
/// use chromoga::crossover::UniformCrossover;
/// use chromoga::evolution::EvolutionLauncherBuilder;
/// use chromoga::mutation::SingleLocusMutation;
/// use chromoga::selection::TournamentSelection;
///
/// let launcher = EvolutionLauncherBuilder::new()
///     .with_selection(TournamentSelection::default())
///     .with_crossover(UniformCrossover::new())
///     .with_mutation(SingleLocusMutation::<u8>::resample())
///     .build()
///     .unwrap();
///
/// assert_eq!(launcher.selection().tournament_size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncherBuilder<Sel, Cx, Mu> {
    selection: Option<Sel>,
    crossover: Option<Cx>,
    mutation: Option<Mu>,
}

impl<Sel, Cx, Mu> EvolutionLauncherBuilder<Sel, Cx, Mu> {
    pub fn new() -> Self {
        Self {
            selection: None,
            crossover: None,
            mutation: None,
        }
    }

    pub fn with_selection(mut self, selection: Sel) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_crossover(mut self, crossover: Cx) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: Mu) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<Sel, Cx, Mu>> {
        let selection = self.selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            GeneticError::Configuration("Crossover strategy not specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            GeneticError::Configuration("Mutation strategy not specified".to_string())
        })?;

        Ok(EvolutionLauncher::new(selection, crossover, mutation))
    }
}

impl<Sel, Cx, Mu> Default for EvolutionLauncherBuilder<Sel, Cx, Mu> {
    fn default() -> Self {
        Self::new()
    }
}
