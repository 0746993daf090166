//! Aggregates for the chart panels
//!
//! Every function accepts the filtered subset as an iterator of row
//! references and returns an empty result for an empty subset.

use crate::types::{ArtForm, CulturalEvent};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Frequency of each distinct value, ordered by count descending then value ascending.
pub fn value_counts<'a, T: 'a>(
    rows: impl IntoIterator<Item = &'a T>,
    column: impl Fn(&T) -> &str,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(column(row)).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// The `n` most frequent values, same ordering as [`value_counts`].
pub fn top_n<'a, T: 'a>(
    rows: impl IntoIterator<Item = &'a T>,
    column: impl Fn(&T) -> &str,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts = value_counts(rows, column);
    counts.truncate(n);
    counts
}

/// Mean of `value` per group, groups in ascending name order.
pub fn mean_by<'a, T: 'a>(
    rows: impl IntoIterator<Item = &'a T>,
    group: impl Fn(&T) -> &str,
    value: impl Fn(&T) -> f64,
) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = sums.entry(group(row)).or_insert((0.0, 0));
        entry.0 += value(row);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(g, (sum, n))| (g.to_string(), sum / n as f64))
        .collect()
}

/// Share of each slice in a count list, for pie rendering.
pub fn proportions(counts: &[(String, usize)]) -> Vec<(String, f64)> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|(v, n)| (v.clone(), *n as f64 / total as f64))
        .collect()
}

/// Art forms by popularity, highest first. Equal scores keep table order.
pub fn popularity_ranking<'a>(rows: impl IntoIterator<Item = &'a ArtForm>) -> Vec<&'a ArtForm> {
    let mut ranked: Vec<&ArtForm> = rows.into_iter().collect();
    ranked.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    ranked
}

/// One bar of the event timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSpan {
    pub name: String,
    pub kind: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineSpan {
    /// Length in days, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

pub fn timeline<'a>(rows: impl IntoIterator<Item = &'a CulturalEvent>) -> Vec<TimelineSpan> {
    rows.into_iter()
        .map(|e| TimelineSpan {
            name: e.name.clone(),
            kind: e.kind.clone(),
            start: e.start_date,
            end: e.end_date.max(e.start_date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(name: &str, category: &str, popularity: f64) -> ArtForm {
        ArtForm {
            name: name.into(),
            region: "Asia".into(),
            category: category.into(),
            time_period: "Ancient".into(),
            popularity,
            description: String::new(),
        }
    }

    #[test]
    fn counts_break_ties_by_name() {
        let rows = vec![
            art("a", "Music", 1.0),
            art("b", "Dance", 1.0),
            art("c", "Theatre", 1.0),
            art("d", "Dance", 1.0),
            art("e", "Music", 1.0),
            art("f", "Craft", 1.0),
        ];
        let counts = value_counts(&rows, |a| a.category.as_str());
        assert_eq!(
            counts,
            vec![
                ("Dance".to_string(), 2),
                ("Music".to_string(), 2),
                ("Craft".to_string(), 1),
                ("Theatre".to_string(), 1),
            ]
        );
        assert_eq!(top_n(&rows, |a| a.category.as_str(), 2).len(), 2);
    }

    #[test]
    fn mean_popularity_per_category() {
        let rows = vec![art("A", "Dance", 7.0), art("B", "Dance", 9.0), art("C", "Music", 5.0)];
        let dance: Vec<&ArtForm> = rows.iter().filter(|a| a.category == "Dance").collect();
        let means = mean_by(dance, |a| a.category.as_str(), |a| a.popularity);
        assert_eq!(means, vec![("Dance".to_string(), 8.0)]);
    }

    #[test]
    fn empty_subset_gives_empty_aggregates() {
        let rows: Vec<ArtForm> = Vec::new();
        assert!(value_counts(&rows, |a| a.category.as_str()).is_empty());
        assert!(mean_by(&rows, |a| a.category.as_str(), |a| a.popularity).is_empty());
        assert!(proportions(&[]).is_empty());
        assert!(popularity_ranking(&rows).is_empty());
        assert!(timeline(&[]).is_empty());
    }

    #[test]
    fn proportions_sum_to_one() {
        let shares = proportions(&[("x".into(), 3), ("y".into(), 1)]);
        assert_eq!(shares[0].1, 0.75);
        assert_eq!(shares[1].1, 0.25);
    }

    #[test]
    fn ranking_is_stable_for_equal_scores() {
        let rows = vec![art("A", "Dance", 7.0), art("B", "Dance", 9.0), art("C", "Music", 7.0)];
        let names: Vec<&str> = popularity_ranking(&rows).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
