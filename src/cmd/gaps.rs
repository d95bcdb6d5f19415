use crate::reports;
use clap::Args;
use seqforge::curation::annotate_gaps;
use seqforge::error::SfResult;
use seqforge::loader;
use seqforge::table::SequenceTable;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GapsArgs {
    /// Write the annotated table here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: &GapsArgs, source: &SequenceTable) -> SfResult<()> {
    let annotated = annotate_gaps(source)?;

    match &args.output {
        Some(path) => {
            loader::write_table(path, &annotated)?;
            info!("💾 Wrote {} annotated rows to {}", annotated.len(), path);
            reports::print_table_summary("Annotated Table", &annotated);
            reports::print_gap_histogram(&annotated);
        }
        None => loader::write_table_to_writer(std::io::stdout().lock(), &annotated)?,
    }

    Ok(())
}
