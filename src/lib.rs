pub mod config;
pub mod consts;
pub mod curation;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod mutants;
pub mod pipeline;
pub mod table;
pub mod util;
// cmd and reports belong to the binary (main.rs).
