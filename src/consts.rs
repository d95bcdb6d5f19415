/// Percentile range treated as the "optimal" reference set for gap annotation.
pub const OPTIMAL_PERCENTILE: (f64, f64) = (0.99, 1.0);

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Default size of a generated mutant batch.
pub const DEFAULT_N_MUTANTS: usize = 128;

// Threshold presets: (percentile range, minimum gap).
pub const THRESHOLD_MEDIUM: ((f64, f64), usize) = ((0.2, 0.4), 6);
pub const THRESHOLD_HARD: ((f64, f64), usize) = ((0.0, 0.3), 7);

// Stratified presets: (percentile range, n_train, n_oracle).
pub const STRATIFIED_MEDIUM: ((f64, f64), usize, usize) = ((0.2, 0.4), 128, 256);
pub const STRATIFIED_HARD: ((f64, f64), usize, usize) = ((0.1, 0.3), 128, 256);
