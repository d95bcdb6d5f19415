#![allow(dead_code)]

use seqforge::table::SequenceTable;

pub const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

/// `n` variants of one random parent sequence, scored 1..=n in shuffled row order.
pub fn synthetic_table(n: usize, len: usize, seed: u64) -> SequenceTable {
    let mut rng = fastrand::Rng::with_seed(seed);
    let parent: Vec<u8> = (0..len)
        .map(|_| AMINO_ACIDS[rng.usize(..AMINO_ACIDS.len())])
        .collect();

    let mut pairs: Vec<(String, f64)> = (0..n)
        .map(|i| {
            let mut seq = parent.clone();
            for _ in 0..rng.usize(0..=len / 3) {
                let pos = rng.usize(..len);
                seq[pos] = AMINO_ACIDS[rng.usize(..AMINO_ACIDS.len())];
            }
            (String::from_utf8(seq).unwrap(), (i + 1) as f64)
        })
        .collect();
    rng.shuffle(&mut pairs);

    SequenceTable::from_pairs(pairs).expect("synthetic table")
}

/// Row index holding `score`.
pub fn row_with_score(table: &SequenceTable, score: f64) -> usize {
    table
        .records()
        .iter()
        .position(|r| r.score == score)
        .expect("score present")
}

pub fn write_csv(dir: &std::path::Path, name: &str, table: &SequenceTable) -> std::path::PathBuf {
    let path = dir.join(name);
    seqforge::loader::write_table(&path, table).expect("write csv");
    path
}
