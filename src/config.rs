use crate::consts::{DEFAULT_N_MUTANTS, DEFAULT_SEED};
use crate::curation::slicer::check_range;
use crate::curation::{Difficulty, DifficultyFilter, FilterKind};
use crate::error::{SeqForgeError, SfResult};
use crate::mutants::Strategy;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub curation: CurationParams,
    #[command(flatten)]
    pub design: DesignParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurationParams {
    #[arg(long, default_value_t = FilterKind::Stratified)]
    pub filter: FilterKind,
    #[arg(long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    // Preset overrides
    #[arg(long)]
    pub lo: Option<f64>,
    #[arg(long)]
    pub hi: Option<f64>,
    #[arg(long)]
    pub min_gap: Option<usize>,
    #[arg(long)]
    pub n_train: Option<usize>,
    #[arg(long)]
    pub n_oracle: Option<usize>,
}

impl Default for CurationParams {
    fn default() -> Self {
        Self {
            filter: FilterKind::Stratified,
            difficulty: Difficulty::Medium,
            seed: DEFAULT_SEED,
            lo: None,
            hi: None,
            min_gap: None,
            n_train: None,
            n_oracle: None,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesignParams {
    #[arg(long, default_value_t = Strategy::CommonSingle)]
    pub strategy: Strategy,
    #[arg(long, default_value_t = DEFAULT_N_MUTANTS)]
    pub n_mutants: usize,
    /// Score imputed for mutants missing from the source table.
    /// Defaults to the source table's minimum score.
    #[arg(long)]
    pub default_score: Option<f64>,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            strategy: Strategy::CommonSingle,
            n_mutants: DEFAULT_N_MUTANTS,
            default_score: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SeqForgeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields that were given explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(curation.filter);
        update_if_present!(curation.difficulty);
        update_if_present!(curation.seed);
        update_if_present!(curation.lo);
        update_if_present!(curation.hi);
        update_if_present!(curation.min_gap);
        update_if_present!(curation.n_train);
        update_if_present!(curation.n_oracle);

        update_if_present!(design.strategy);
        update_if_present!(design.n_mutants);
        update_if_present!(design.default_score);
    }
}

impl CurationParams {
    /// The difficulty preset with any explicit overrides applied.
    pub fn difficulty_filter(&self) -> SfResult<DifficultyFilter> {
        let mut filter = DifficultyFilter::preset(self.filter, self.difficulty);

        match &mut filter {
            DifficultyFilter::Threshold(p) => {
                p.range = (self.lo.unwrap_or(p.range.0), self.hi.unwrap_or(p.range.1));
                p.min_gap = self.min_gap.unwrap_or(p.min_gap);
                check_range(p.range)?;
            }
            DifficultyFilter::Stratified(p) => {
                p.range = (self.lo.unwrap_or(p.range.0), self.hi.unwrap_or(p.range.1));
                p.n_train = self.n_train.unwrap_or(p.n_train);
                p.n_oracle = self.n_oracle.unwrap_or(p.n_oracle);
                check_range(p.range)?;
            }
        }

        Ok(filter)
    }

    pub fn rng(&self) -> fastrand::Rng {
        fastrand::Rng::with_seed(self.seed)
    }
}
