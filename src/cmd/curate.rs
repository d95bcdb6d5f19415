use crate::reports;
use clap::Args;
use seqforge::config::Config;
use seqforge::error::SfResult;
use seqforge::loader;
use seqforge::pipeline;
use seqforge::table::SequenceTable;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CurateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Write the training subset here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &CurateArgs, config: &Config, source: &SequenceTable) -> SfResult<()> {
    let filter = config.curation.difficulty_filter()?;
    info!(
        "🎚️  Filter: {} / {} ({:?})",
        config.curation.filter, config.curation.difficulty, filter
    );

    let mut rng = config.curation.rng();
    let training = pipeline::curate(source, config, &mut rng)?;

    match &args.output {
        Some(path) => {
            loader::write_table(path, &training)?;
            info!("💾 Wrote {} rows to {}", training.len(), path);
            reports::print_table_summary("Training Subset", &training);
        }
        None => loader::write_table_to_writer(std::io::stdout().lock(), &training)?,
    }

    Ok(())
}
