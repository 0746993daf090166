//! Filter engine: equality on category columns, inclusive date containment

use crate::constants::ALL_OPTION;
use crate::types::{ArtForm, CulturalEvent, HeritageSite};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// A row predicate built from dropdown selections
pub trait RowFilter<T> {
    fn matches(&self, row: &T) -> bool;
}

/// Indices of the rows that satisfy `filter`, in table order.
pub fn apply<T, F: RowFilter<T>>(rows: &[T], filter: &F) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| filter.matches(row).then_some(i))
        .collect()
}

/// A single-choice dropdown: `All` or one exact value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn from_label(label: &str) -> Self {
        if label == ALL_OPTION {
            Selection::All
        } else {
            Selection::Value(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL_OPTION,
            Selection::Value(v) => v,
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => v == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Dropdown options: `All` followed by the sorted distinct column values
pub fn options<'a, T: 'a>(rows: impl IntoIterator<Item = &'a T>, column: impl Fn(&T) -> &str) -> Vec<String> {
    let distinct: BTreeSet<&str> = rows.into_iter().map(|r| column(r)).collect();
    std::iter::once(ALL_OPTION.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Inclusive date window. An event matches when it lies entirely inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Widest range covering every event: earliest start to latest end
    pub fn spanning(events: &[CulturalEvent]) -> Option<Self> {
        let start = events.iter().map(|e| e.start_date).min()?;
        let end = events.iter().map(|e| e.end_date).max()?;
        Some(Self { start, end })
    }

    pub fn contains(&self, event: &CulturalEvent) -> bool {
        event.start_date >= self.start && event.end_date <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteFilter {
    pub country: Selection,
    pub kind: Selection,
}

impl RowFilter<HeritageSite> for SiteFilter {
    fn matches(&self, row: &HeritageSite) -> bool {
        self.country.accepts(&row.country) && self.kind.accepts(&row.kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub country: Selection,
    pub kind: Selection,
    pub dates: Option<DateRange>,
}

impl RowFilter<CulturalEvent> for EventFilter {
    fn matches(&self, row: &CulturalEvent) -> bool {
        self.country.accepts(&row.country)
            && self.kind.accepts(&row.kind)
            && self.dates.map_or(true, |range| range.contains(row))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtFilter {
    pub region: Selection,
    pub category: Selection,
}

impl RowFilter<ArtForm> for ArtFilter {
    fn matches(&self, row: &ArtForm) -> bool {
        self.region.accepts(&row.region) && self.category.accepts(&row.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, country: &str, kind: &str) -> HeritageSite {
        HeritageSite {
            name: name.into(),
            country: country.into(),
            kind: kind.into(),
            latitude: 0.0,
            longitude: 0.0,
            location: String::new(),
            year: "1900".into(),
            description: String::new(),
        }
    }

    fn event(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> CulturalEvent {
        CulturalEvent {
            name: name.into(),
            country: "Japan".into(),
            kind: "Festival".into(),
            location: "Kyoto".into(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            description: String::new(),
        }
    }

    fn sites() -> Vec<HeritageSite> {
        vec![
            site("Great Wall of China", "China", "Cultural"),
            site("Machu Picchu", "Peru", "Mixed"),
            site("Forbidden City", "China", "Cultural"),
            site("Jiuzhaigou", "China", "Natural"),
        ]
    }

    #[test]
    fn all_selections_are_identity() {
        let rows = sites();
        assert_eq!(apply(&rows, &SiteFilter::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn criteria_are_anded_and_order_is_kept() {
        let rows = sites();
        let filter = SiteFilter {
            country: Selection::Value("China".into()),
            kind: Selection::Value("Cultural".into()),
        };
        let hits = apply(&rows, &filter);
        assert_eq!(hits, vec![0, 2]);
        assert!(hits.windows(2).all(|w| w[0] < w[1]));
        assert!(hits.iter().all(|&i| filter.matches(&rows[i])));
    }

    #[test]
    fn unknown_value_yields_empty_subset() {
        let rows = sites();
        let filter = SiteFilter {
            country: Selection::Value("Atlantis".into()),
            ..Default::default()
        };
        assert!(apply(&rows, &filter).is_empty());
    }

    #[test]
    fn date_range_is_inclusive_containment() {
        let rows = vec![
            event("Gion Matsuri", (2024, 7, 1), (2024, 7, 31)),
            event("Hanami", (2024, 3, 20), (2024, 4, 10)),
            event("Obon", (2024, 8, 13), (2024, 8, 16)),
        ];
        let filter = EventFilter {
            dates: Some(DateRange::new(
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 8, 16).unwrap(),
            )),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &filter), vec![0, 2]);

        let spanning = DateRange::spanning(&rows).unwrap();
        assert_eq!(spanning.start, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(spanning.end, NaiveDate::from_ymd_opt(2024, 8, 16).unwrap());
        let all = EventFilter {
            dates: Some(spanning),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &all), vec![0, 1, 2]);
        assert!(DateRange::spanning(&[]).is_none());
    }

    #[test]
    fn event_criteria_combine_with_dates() {
        let mut carnival = event("Carnival", (2024, 2, 9), (2024, 2, 14));
        carnival.country = "Brazil".into();
        carnival.kind = "Carnival".into();
        let mut festa = event("Festa Junina", (2024, 6, 1), (2024, 6, 29));
        festa.country = "Brazil".into();
        let rows = vec![
            carnival,
            event("Gion Matsuri", (2024, 7, 1), (2024, 7, 31)),
            festa,
            event("Hanami", (2024, 3, 20), (2024, 4, 10)),
        ];
        let first_half = Some(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        ));

        let brazil = EventFilter {
            country: Selection::Value("Brazil".into()),
            dates: first_half,
            ..Default::default()
        };
        assert_eq!(apply(&rows, &brazil), vec![0, 2]);

        let festivals = EventFilter {
            kind: Selection::Value("Festival".into()),
            dates: first_half,
            ..Default::default()
        };
        assert_eq!(apply(&rows, &festivals), vec![2, 3]);

        let both = EventFilter {
            country: Selection::Value("Brazil".into()),
            kind: Selection::Value("Festival".into()),
            dates: first_half,
        };
        assert_eq!(apply(&rows, &both), vec![2]);
        assert!(apply(&rows, &both).iter().all(|&i| festivals.matches(&rows[i]) && brazil.matches(&rows[i])));
    }

    #[test]
    fn art_filter_matches_region_and_category() {
        let art = |name: &str, region: &str, category: &str| ArtForm {
            name: name.into(),
            region: region.into(),
            category: category.into(),
            time_period: "Classical".into(),
            popularity: 7.0,
            description: String::new(),
        };
        let rows = vec![
            art("Kathakali", "Kerala", "Dance"),
            art("Kabuki", "Japan", "Theatre"),
            art("Mohiniyattam", "Kerala", "Dance"),
            art("Theyyam", "Kerala", "Ritual"),
        ];

        assert_eq!(apply(&rows, &ArtFilter::default()), vec![0, 1, 2, 3]);

        let kerala = ArtFilter {
            region: Selection::Value("Kerala".into()),
            ..Default::default()
        };
        assert_eq!(apply(&rows, &kerala), vec![0, 2, 3]);

        let kerala_dance = ArtFilter {
            region: Selection::Value("Kerala".into()),
            category: Selection::Value("Dance".into()),
        };
        assert_eq!(apply(&rows, &kerala_dance), vec![0, 2]);

        let japan_dance = ArtFilter {
            region: Selection::Value("Japan".into()),
            category: Selection::Value("Dance".into()),
        };
        assert!(apply(&rows, &japan_dance).is_empty());
    }

    #[test]
    fn options_start_with_all_and_are_sorted() {
        let rows = sites();
        assert_eq!(
            options(&rows, |s| s.country.as_str()),
            vec!["All", "China", "Peru"]
        );
        assert_eq!(Selection::from_label("All"), Selection::All);
        assert_eq!(Selection::from_label("Peru").label(), "Peru");
    }
}
