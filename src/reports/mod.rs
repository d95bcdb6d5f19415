use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use seqforge::evaluator::EvaluationReport;
use seqforge::mutants::{MutantBatch, Strategy};
use seqforge::table::SequenceTable;
use seqforge::util::{mean, median};
use std::collections::BTreeMap;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, columns: std::ops::Range<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_table_summary(name: &str, data: &SequenceTable) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    let scores = data.scores();
    let fmt = |v: Option<f64>| v.map_or("-".to_string(), |x| format!("{:.4}", x));
    let range = data.score_range();

    table.add_row(vec![Cell::new("Rows"), Cell::new(data.len())]);
    table.add_row(vec![Cell::new("Length"), Cell::new(data.sequence_len())]);
    table.add_row(vec![Cell::new("Min Score"), Cell::new(fmt(range.map(|r| r.min)))]);
    table.add_row(vec![Cell::new("Median Score"), Cell::new(fmt(median(&scores)))]);
    table.add_row(vec![Cell::new("Max Score"), Cell::new(fmt(range.map(|r| r.max)))]);

    if let Some(gaps) = data.gaps() {
        let as_f64: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();
        table.add_row(vec![Cell::new("Mean Gap"), Cell::new(fmt(mean(&as_f64)))]);
        table.add_row(vec![
            Cell::new("Max Gap"),
            Cell::new(gaps.iter().max().map_or("-".to_string(), |g| g.to_string())),
        ]);
    }

    right_align(&mut table, 1..2);
    println!("\n{}", table);
}

pub fn print_gap_histogram(data: &SequenceTable) {
    let Some(gaps) = data.gaps() else {
        return;
    };

    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &g in gaps {
        *counts.entry(g).or_default() += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(1).max(1);

    let mut table = new_table();
    table.set_header(vec!["Gap", "Rows", ""]);
    for (gap, count) in counts {
        let bar = "#".repeat((count * 40).div_ceil(max_count));
        table.add_row(vec![
            Cell::new(gap),
            Cell::new(count),
            Cell::new(bar).fg(Color::Cyan),
        ]);
    }
    right_align(&mut table, 0..2);
    println!("\n{}", table);
}

pub fn print_evaluation(report: &EvaluationReport, strategy: Strategy) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("Mutants"),
        Cell::new("Imputed").fg(Color::Red),
        Cell::new("Median"),
        Cell::new("Mean"),
        Cell::new("Norm. Median").fg(Color::Cyan),
        Cell::new("Med. Dist"),
        Cell::new("Mean Dist"),
    ]);

    table.add_row(vec![
        Cell::new(strategy).add_attribute(Attribute::Bold),
        Cell::new(report.scores.len()),
        Cell::new(report.n_imputed).fg(Color::Red),
        Cell::new(format!("{:.4}", report.median_score)),
        Cell::new(format!("{:.4}", report.mean_score)),
        Cell::new(format!("{:.4}", report.normalized_median)).fg(Color::Cyan),
        Cell::new(format!("{:.2}", report.median_distance)),
        Cell::new(format!("{:.2}", report.mean_distance)),
    ]);

    right_align(&mut table, 1..8);
    println!("\n{}", table);
    println!(
        "Normalization range: [{:.4}, {:.4}]",
        report.score_range.min, report.score_range.max
    );
}

pub fn print_mutants(batch: &MutantBatch, scores: &[f64], limit: usize) {
    let mut table = new_table();
    table.set_header(vec!["#", "Substitutions", "Score", "Sequence"]);

    for (i, (mutant, score)) in batch.mutants.iter().zip(scores).take(limit).enumerate() {
        let subs: Vec<String> = mutant
            .substitutions
            .iter()
            .map(|s| format!("{}{}{}", s.from, s.position + 1, s.to))
            .collect();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(subs.join(",")),
            Cell::new(format!("{:.4}", score)),
            Cell::new(mutant.sequence_str()),
        ]);
    }

    right_align(&mut table, 0..1);
    right_align(&mut table, 2..3);
    println!("\n{}", table);

    if batch.len() > limit {
        println!("... {} more mutants not shown", batch.len() - limit);
    }
}
