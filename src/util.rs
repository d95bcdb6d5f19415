use fastrand::Rng;

/// Draws `k` distinct items from `pool` uniformly at random.
///
/// Partial Fisher-Yates: consumes exactly `k` values from `rng`, and the
/// result is in draw order. Caller guarantees `k <= pool.len()`.
pub fn sample_without_replacement<T: Copy>(rng: &mut Rng, mut pool: Vec<T>, k: usize) -> Vec<T> {
    let k = k.min(pool.len());
    for i in 0..k {
        let j = rng.usize(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; even-length inputs average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sampling_is_distinct_and_seeded() {
        let pool: Vec<usize> = (0..50).collect();
        let a = sample_without_replacement(&mut Rng::with_seed(42), pool.clone(), 20);
        let b = sample_without_replacement(&mut Rng::with_seed(42), pool, 20);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 20);
    }

    #[test]
    fn test_sampling_whole_pool() {
        let pool = vec![1, 2, 3];
        let mut drawn = sample_without_replacement(&mut Rng::with_seed(7), pool, 3);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![1, 2, 3]);
    }
}
