use crate::reports;
use clap::Args;
use seqforge::config::Config;
use seqforge::error::SfResult;
use seqforge::pipeline;
use seqforge::table::SequenceTable;
use serde_json::json;

#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    #[command(flatten)]
    pub config: Config,

    /// Print the outcome as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Maximum mutants listed in the table output
    #[arg(long, default_value_t = 20)]
    pub show: usize,
}

pub fn run(args: &DesignArgs, config: &Config, source: &SequenceTable) -> SfResult<()> {
    let outcome = pipeline::run_seeded(source, config)?;

    if args.json {
        let doc = json!({
            "config": config,
            "training_rows": outcome.training.len(),
            "consensus": outcome.model.consensus_str(),
            "report": outcome.report,
            "batch": outcome.batch,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    reports::print_table_summary("Training Subset", &outcome.training);
    println!("\nConsensus: {}", outcome.model.consensus_str());
    reports::print_evaluation(&outcome.report, outcome.batch.strategy);
    reports::print_mutants(&outcome.batch, &outcome.report.scores, args.show);

    Ok(())
}
