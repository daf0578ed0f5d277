//! Chunked parallel sums
//!
//! The slice is cut into fixed-length chunks, each chunk is summed by one
//! task, and the partial sums are added in chunk order. Chunk boundaries do
//! not depend on the thread count, so the result is the same for every
//! pool size and every schedule.

use rayon::prelude::*;

/// Number of items summed by one task
pub const CHUNK_LEN: usize = 64;

/// Sum `term(item)` over `items`
pub fn chunked_sum<T, F>(items: &[T], term: F) -> f64
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync,
{
    let partials: Vec<f64> = items
        .par_chunks(CHUNK_LEN)
        .map(|chunk| chunk.iter().map(&term).sum::<f64>())
        .collect();

    partials.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_sum_matches_serial() {
        let items: Vec<f64> = (0..1000).map(|i| (i as f64).sqrt()).collect();
        let serial: f64 = items.iter().sum();
        let chunked = chunked_sum(&items, |&x| x);

        assert!(((chunked - serial) / serial).abs() < 1e-12);
    }

    #[test]
    fn test_chunked_sum_is_repeatable() {
        let items: Vec<f64> = (0..777).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        let first = chunked_sum(&items, |&x| x * 3.0);

        for _ in 0..10 {
            assert_eq!(chunked_sum(&items, |&x| x * 3.0), first);
        }
    }

    #[test]
    fn test_chunked_sum_empty() {
        let items: Vec<f64> = Vec::new();
        assert_eq!(chunked_sum(&items, |&x| x), 0.0);
    }
}
