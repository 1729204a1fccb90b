//! Rating statistics over the current view.

use crate::catalog::ItemRegistry;
use serde::Serialize;

/// Number of histogram buckets over the 0–10 rating scale.
pub const HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedTitle {
    pub identity: String,
    pub title: String,
    pub rating: f64,
}

/// Summary of the rated items in a view. Unrated items are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub rated: usize,
    pub average: f64,
    pub median: f64,
    /// First highest-rated item in view order.
    pub best: RatedTitle,
    /// First lowest-rated item in view order.
    pub worst: RatedTitle,
    /// Counts per unit bucket; a perfect 10 lands in the last bucket.
    pub histogram: [usize; HISTOGRAM_BINS],
}

fn bucket(rating: f64) -> usize {
    // Truncation is the bucketing rule; ratings outside 0–10 are clamped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = rating.clamp(0.0, 10.0).floor() as usize;
    index.min(HISTOGRAM_BINS - 1)
}

/// Computes statistics for the given view, or `None` if nothing in it is rated.
#[must_use]
pub fn rating_stats(registry: &ItemRegistry, view: &[usize]) -> Option<RatingStats> {
    let rated: Vec<(&str, &str, f64)> = view
        .iter()
        .filter_map(|&position| registry.get(position))
        .filter_map(|m| m.rating.map(|r| (m.identity.as_str(), m.title.as_str(), r)))
        .collect();

    let first = rated.first()?;
    let mut best = *first;
    let mut worst = *first;
    let mut histogram = [0usize; HISTOGRAM_BINS];
    let mut total = 0.0;
    for &entry in &rated {
        if entry.2 > best.2 {
            best = entry;
        }
        if entry.2 < worst.2 {
            worst = entry;
        }
        histogram[bucket(entry.2)] += 1;
        total += entry.2;
    }

    let mut sorted: Vec<f64> = rated.iter().map(|entry| entry.2).collect();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    };

    #[allow(clippy::cast_precision_loss)]
    let average = total / rated.len() as f64;

    let to_title = |(identity, title, rating): (&str, &str, f64)| RatedTitle {
        identity: identity.to_string(),
        title: title.to_string(),
        rating,
    };

    Some(RatingStats {
        rated: rated.len(),
        average,
        median,
        best: to_title(best),
        worst: to_title(worst),
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;

    fn registry() -> ItemRegistry {
        ItemRegistry::from_movies(vec![
            Movie::new("a", "Alpha", Some(2000), Some(8.0)),
            Movie::new("b", "Bravo", Some(2001), Some(6.0)),
            Movie::new("c", "Charlie", Some(2002), None),
            Movie::new("d", "Delta", Some(2003), Some(10.0)),
            Movie::new("e", "Echo", Some(2004), Some(6.0)),
        ])
        .unwrap()
    }

    #[test]
    fn summarizes_rated_items() {
        let stats = rating_stats(&registry(), &[0, 1, 2, 3, 4]).unwrap();
        assert_eq!(stats.rated, 4);
        assert!((stats.average - 7.5).abs() < 1e-9);
        assert!((stats.median - 7.0).abs() < 1e-9);
        assert_eq!(stats.best.title, "Delta");
        // Ties resolve to the first item in view order.
        assert_eq!(stats.worst.title, "Bravo");
    }

    #[test]
    fn histogram_puts_perfect_score_in_last_bucket() {
        let stats = rating_stats(&registry(), &[0, 1, 3, 4]).unwrap();
        assert_eq!(stats.histogram[6], 2);
        assert_eq!(stats.histogram[8], 1);
        assert_eq!(stats.histogram[9], 1);
        assert_eq!(stats.histogram.iter().sum::<usize>(), 4);
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let stats = rating_stats(&registry(), &[0, 1, 3]).unwrap();
        assert!((stats.median - 8.0).abs() < 1e-9);
    }

    #[test]
    fn no_rated_items_yields_none() {
        assert!(rating_stats(&registry(), &[2]).is_none());
        assert!(rating_stats(&registry(), &[]).is_none());
    }
}
