use crate::error::{SeqForgeError, SfResult};
use crate::mutants::model::MutationModel;
use crate::table::{serialize_symbols, SequenceTable};
use crate::util::sample_without_replacement;
use fastrand::Rng;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    PositionalGreedy,
    CommonSingle,
    CommonDouble,
}

/// Ranking key for single-site candidates.
///
/// `Excluded` marks a position's own consensus symbol and orders below
/// every observed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Frequency {
    Excluded,
    Observed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: usize,
    pub symbol: u8,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub position: usize,
    pub from: char,
    pub to: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mutant {
    #[serde(serialize_with = "serialize_symbols")]
    pub sequence: Vec<u8>,
    pub substitutions: Vec<Substitution>,
}

impl Mutant {
    fn from_consensus(consensus: &[u8], changes: &[(usize, u8)]) -> Self {
        let mut sequence = consensus.to_vec();
        let substitutions = changes
            .iter()
            .map(|&(position, to)| {
                sequence[position] = to;
                Substitution {
                    position,
                    from: consensus[position] as char,
                    to: to as char,
                }
            })
            .collect();
        Self {
            sequence,
            substitutions,
        }
    }

    pub fn sequence_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutantBatch {
    pub strategy: Strategy,
    pub mutants: Vec<Mutant>,
}

impl MutantBatch {
    pub fn len(&self) -> usize {
        self.mutants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutants.is_empty()
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[u8]> {
        self.mutants.iter().map(|m| m.sequence.as_slice())
    }
}

/// Generates exactly `n_mutants` variants of the model's consensus.
///
/// Only `PositionalGreedy` draws from `rng`.
pub fn generate(
    strategy: Strategy,
    model: &MutationModel,
    n_mutants: usize,
    rng: &mut Rng,
) -> SfResult<MutantBatch> {
    let mutants = match strategy {
        Strategy::PositionalGreedy => positional_greedy(model, n_mutants, rng)?,
        Strategy::CommonSingle => common_single_mutants(model, n_mutants)?,
        Strategy::CommonDouble => common_double_mutants(model, n_mutants)?,
    };

    info!(
        "🧪 Generated {} mutants with {} from consensus {}",
        mutants.len(),
        strategy,
        model.consensus_str()
    );

    Ok(MutantBatch { strategy, mutants })
}

/// Builds the model from `table` and generates from it.
pub fn generate_from_table(
    strategy: Strategy,
    table: &SequenceTable,
    n_mutants: usize,
    rng: &mut Rng,
) -> SfResult<MutantBatch> {
    let model = MutationModel::build(table)?;
    generate(strategy, &model, n_mutants, rng)
}

/// One mutant per randomly drawn position, carrying that position's
/// second-most-frequent symbol (or the consensus symbol when the position
/// is invariant). Mutants come out in draw order.
pub fn positional_greedy(
    model: &MutationModel,
    n_mutants: usize,
    rng: &mut Rng,
) -> SfResult<Vec<Mutant>> {
    let len = model.sequence_len();
    if n_mutants > len {
        return Err(SeqForgeError::InsufficientCandidates {
            strategy: Strategy::PositionalGreedy.to_string(),
            requested: n_mutants,
            available: len,
        });
    }

    let positions = sample_without_replacement(rng, (0..len).collect::<Vec<usize>>(), n_mutants);

    Ok(positions
        .into_iter()
        .map(|pos| {
            let dist = &model.distributions()[pos];
            let to = dist
                .second_most_frequent()
                .unwrap_or(model.consensus()[pos]);
            Mutant::from_consensus(model.consensus(), &[(pos, to)])
        })
        .collect())
}

/// All (position, symbol) pairs, most frequent first. Each position's
/// consensus symbol is tagged `Excluded` and sinks to the end.
pub fn ranked_candidates(model: &MutationModel) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = model
        .distributions()
        .iter()
        .flat_map(|dist| {
            dist.counts
                .iter()
                .enumerate()
                .map(move |(rank, &(symbol, count))| Candidate {
                    position: dist.position,
                    symbol,
                    frequency: if rank == 0 {
                        Frequency::Excluded
                    } else {
                        Frequency::Observed(count)
                    },
                })
        })
        .collect();

    candidates.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    candidates
}

/// The `n_mutants` most common single substitutions.
pub fn common_single_mutants(model: &MutationModel, n_mutants: usize) -> SfResult<Vec<Mutant>> {
    let candidates = ranked_candidates(model);
    if n_mutants > candidates.len() {
        return Err(SeqForgeError::InsufficientCandidates {
            strategy: Strategy::CommonSingle.to_string(),
            requested: n_mutants,
            available: candidates.len(),
        });
    }

    Ok(candidates
        .iter()
        .take(n_mutants)
        .map(|c| Mutant::from_consensus(model.consensus(), &[(c.position, c.symbol)]))
        .collect())
}

/// The first `n_mutants` pairs of ranked candidates, enumerated as
/// `(i, j)` with `i < j` over the ranked list, skipping same-position pairs.
pub fn common_double_mutants(model: &MutationModel, n_mutants: usize) -> SfResult<Vec<Mutant>> {
    let candidates = ranked_candidates(model);

    let mutants: Vec<Mutant> = candidates
        .iter()
        .tuple_combinations::<(_, _)>()
        .filter(|(a, b)| a.position != b.position)
        .take(n_mutants)
        .map(|(a, b)| {
            Mutant::from_consensus(
                model.consensus(),
                &[(a.position, a.symbol), (b.position, b.symbol)],
            )
        })
        .collect();

    if mutants.len() < n_mutants {
        return Err(SeqForgeError::InsufficientCandidates {
            strategy: Strategy::CommonDouble.to_string(),
            requested: n_mutants,
            available: mutants.len(),
        });
    }

    Ok(mutants)
}
