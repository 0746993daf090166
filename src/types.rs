//! Common types and data structures

use crate::constants::*;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// A row of a CSV file read from the data directory
pub trait CsvRecord: serde::de::DeserializeOwned {
    /// CSV file name inside the data directory
    const FILE_NAME: &'static str;
}

/// A dataset row with a gallery image
pub trait Record: CsvRecord + Clone {
    /// Image folder the gallery looks in for this dataset
    const IMAGE_CATEGORY: ImageCategory;

    fn name(&self) -> &str;

    /// Heading of the row's detail card
    fn card_title(&self) -> String;
}

/// Heritage site row (`heritage_sites.csv`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeritageSite {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Location")]
    pub location: String,
    // Free text: some sites are dated "3rd century BC"
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Cultural event row (`cultural_events.csv`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CulturalEvent {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Start_Date", deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End_Date", deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Art form row (`art_forms.csv`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtForm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Time_Period")]
    pub time_period: String,
    #[serde(rename = "Popularity")]
    pub popularity: f64,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Image manifest row (`image_urls.csv`), only read by the fetcher
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManifestRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Image_URL")]
    pub image_url: String,
}

impl CsvRecord for HeritageSite {
    const FILE_NAME: &'static str = HERITAGE_CSV;
}

impl Record for HeritageSite {
    const IMAGE_CATEGORY: ImageCategory = ImageCategory::Heritage;

    fn name(&self) -> &str {
        &self.name
    }

    fn card_title(&self) -> String {
        format!("{} - {}", self.name, self.country)
    }
}

impl CsvRecord for CulturalEvent {
    const FILE_NAME: &'static str = EVENTS_CSV;
}

impl Record for CulturalEvent {
    const IMAGE_CATEGORY: ImageCategory = ImageCategory::Events;

    fn name(&self) -> &str {
        &self.name
    }

    fn card_title(&self) -> String {
        format!("{} - {}", self.name, self.country)
    }
}

impl CsvRecord for ArtForm {
    const FILE_NAME: &'static str = ART_CSV;
}

impl Record for ArtForm {
    const IMAGE_CATEGORY: ImageCategory = ImageCategory::Art;

    fn name(&self) -> &str {
        &self.name
    }

    fn card_title(&self) -> String {
        format!("{} - {}", self.name, self.region)
    }
}

impl CsvRecord for ManifestRow {
    const FILE_NAME: &'static str = IMAGE_MANIFEST_CSV;
}

impl ManifestRow {
    pub fn category(&self) -> ImageCategory {
        ImageCategory::from_manifest_type(&self.kind)
    }
}

/// Folder an image lives in under `assets/images/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageCategory {
    Heritage,
    Events,
    Art,
}

impl ImageCategory {
    pub const ALL: [ImageCategory; 3] = [Self::Heritage, Self::Events, Self::Art];

    pub fn folder(self) -> &'static str {
        match self {
            ImageCategory::Heritage => "heritage",
            ImageCategory::Events => "events",
            ImageCategory::Art => "art",
        }
    }

    /// Manifest `Type` column: "heritage", "event", anything else is art
    pub fn from_manifest_type(kind: &str) -> Self {
        match kind {
            "heritage" => ImageCategory::Heritage,
            "event" => ImageCategory::Events,
            _ => ImageCategory::Art,
        }
    }
}

/// Pages of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Heritage,
    Events,
    Art,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Heritage, Page::Events, Page::Art];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Cultural Data Explorer",
            Page::Heritage => "Heritage Sites",
            Page::Events => "Cultural Events",
            Page::Art => "Art Forms",
        }
    }
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time component
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamped_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(parse_date("2024-02-09"), Some(expected));
        assert_eq!(parse_date(" 2024-02-09 00:00:00"), Some(expected));
        assert_eq!(parse_date("2024-02-09T12:30:00"), Some(expected));
        assert_eq!(parse_date("09/02/2024"), None);
    }

    #[test]
    fn manifest_type_maps_to_folder() {
        assert_eq!(ImageCategory::from_manifest_type("heritage").folder(), "heritage");
        assert_eq!(ImageCategory::from_manifest_type("event").folder(), "events");
        assert_eq!(ImageCategory::from_manifest_type("art").folder(), "art");
        assert_eq!(ImageCategory::from_manifest_type("sculpture").folder(), "art");
    }

    #[test]
    fn card_titles_name_the_place() {
        let event = CulturalEvent {
            name: "Holi".into(),
            country: "India".into(),
            kind: "Religious".into(),
            location: "Mathura".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 26).unwrap(),
            description: String::new(),
        };
        assert_eq!(event.card_title(), "Holi - India");

        let art = ArtForm {
            name: "Kathakali".into(),
            region: "Kerala".into(),
            category: "Dance".into(),
            time_period: "17th century".into(),
            popularity: 8.0,
            description: String::new(),
        };
        assert_eq!(art.card_title(), "Kathakali - Kerala");
    }

    #[test]
    fn manifest_category_comes_from_each_row() {
        let rows: Vec<ManifestRow> = csv::Reader::from_reader(
            "Name,Type,Image_URL\n\
             Taj Mahal,heritage,https://example.org/taj.jpg\n\
             Holi,event,https://example.org/holi.jpg\n"
                .as_bytes(),
        )
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();
        assert_eq!(ManifestRow::FILE_NAME, "image_urls.csv");
        assert_eq!(rows[0].category(), ImageCategory::Heritage);
        assert_eq!(rows[1].category(), ImageCategory::Events);
    }
}
