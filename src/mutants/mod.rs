pub mod generator;
pub mod model;

pub use self::generator::{
    common_double_mutants, common_single_mutants, generate, generate_from_table,
    positional_greedy, ranked_candidates, Candidate, Frequency, Mutant, MutantBatch, Strategy,
    Substitution,
};
pub use self::model::{MutationModel, PositionDistribution};
