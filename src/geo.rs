//! Map geometry: markers, center point and the equirectangular projection

use crate::constants::POPUP_DESCRIPTION_CHARS;
use crate::types::HeritageSite;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const WORLD_VIEW: LatLon = LatLon { lat: 20.0, lon: 0.0 };

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A point on the map with its hover label and popup text
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub label: String,
    pub popup: String,
}

/// Arithmetic mean of the points. `None` for an empty set.
pub fn center(points: impl IntoIterator<Item = LatLon>) -> Option<LatLon> {
    let (sum_lat, sum_lon, n) = points
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(la, lo, n), p| (la + p.lat, lo + p.lon, n + 1));
    if n == 0 {
        return None;
    }
    Some(LatLon::new(sum_lat / n as f64, sum_lon / n as f64))
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", text[..byte_idx].trim_end()),
        None => text.to_string(),
    }
}

/// Markers for a site page: description excerpt in the popup
pub fn site_markers<'a>(sites: impl IntoIterator<Item = &'a HeritageSite>) -> Vec<Marker> {
    sites
        .into_iter()
        .map(|s| Marker {
            position: LatLon::new(s.latitude, s.longitude),
            label: s.name.clone(),
            popup: truncate_chars(&s.description, POPUP_DESCRIPTION_CHARS),
        })
        .collect()
}

/// Markers for the overview map: site type in the popup
pub fn overview_markers<'a>(sites: impl IntoIterator<Item = &'a HeritageSite>) -> Vec<Marker> {
    sites
        .into_iter()
        .map(|s| Marker {
            position: LatLon::new(s.latitude, s.longitude),
            label: s.name.clone(),
            popup: s.kind.clone(),
        })
        .collect()
}

/// Viewport over an equirectangular world: `zoom` 1.0 shows 360 degrees of longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center: LatLon,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub const MIN_ZOOM: f64 = 1.0;
    pub const MAX_ZOOM: f64 = 64.0;

    fn degrees_per_px(&self) -> f64 {
        360.0 / (self.width * self.zoom)
    }

    /// Screen offset from the top-left corner of the viewport
    pub fn to_screen(&self, p: LatLon) -> (f64, f64) {
        let dpp = self.degrees_per_px();
        let x = self.width / 2.0 + (p.lon - self.center.lon) / dpp;
        let y = self.height / 2.0 - (p.lat - self.center.lat) / dpp;
        (x, y)
    }

    /// Inverse of [`Projection::to_screen`]
    pub fn to_latlon(&self, x: f64, y: f64) -> LatLon {
        let dpp = self.degrees_per_px();
        LatLon::new(
            self.center.lat - (y - self.height / 2.0) * dpp,
            self.center.lon + (x - self.width / 2.0) * dpp,
        )
    }

    /// Shift the view by a screen-space drag, clamped to the globe.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let dpp = self.degrees_per_px();
        self.center.lon = (self.center.lon - dx * dpp).clamp(-180.0, 180.0);
        self.center.lat = (self.center.lat + dy * dpp).clamp(-90.0, 90.0);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_mean_and_empty_has_none() {
        let c = center([LatLon::new(10.0, 20.0), LatLon::new(30.0, -40.0)]).unwrap();
        assert_eq!(c, LatLon::new(20.0, -10.0));
        assert!(center(Vec::new()).is_none());
    }

    fn site(name: &str, kind: &str, description: &str) -> HeritageSite {
        HeritageSite {
            name: name.into(),
            country: "Peru".into(),
            kind: kind.into(),
            latitude: -13.16,
            longitude: -72.55,
            location: "Cusco Region".into(),
            year: "1983".into(),
            description: description.into(),
        }
    }

    #[test]
    fn popup_is_cut_at_hundred_chars() {
        let long = "é".repeat(150);
        let cut = truncate_chars(&long, 100);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn truncation_boundary_is_exact() {
        let exact = "a".repeat(100);
        assert_eq!(truncate_chars(&exact, 100), exact);

        let over = "a".repeat(101);
        assert_eq!(truncate_chars(&over, 100), format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn site_markers_carry_description_excerpt() {
        let description = "x".repeat(140);
        let sites = [site("Machu Picchu", "Mixed", &description), site("Nazca Lines", "Cultural", "Geoglyphs")];
        let markers = site_markers(&sites);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, "Machu Picchu");
        assert_eq!(markers[0].position, LatLon::new(-13.16, -72.55));
        assert_eq!(markers[0].popup, format!("{}...", "x".repeat(100)));
        assert_eq!(markers[1].popup, "Geoglyphs");
    }

    #[test]
    fn overview_markers_carry_site_type() {
        let sites = [site("Machu Picchu", "Mixed", &"x".repeat(140))];
        let markers = overview_markers(&sites);
        assert_eq!(markers[0].label, "Machu Picchu");
        assert_eq!(markers[0].popup, "Mixed");
    }

    #[test]
    fn projection_round_trips_through_screen() {
        let proj = Projection {
            center: LatLon::new(0.0, 0.0),
            zoom: 2.0,
            width: 720.0,
            height: 360.0,
        };
        assert_eq!(proj.to_screen(LatLon::new(0.0, 0.0)), (360.0, 180.0));
        let (x, y) = proj.to_screen(LatLon::new(45.0, 90.0));
        let back = proj.to_latlon(x, y);
        assert!((back.lat - 45.0).abs() < 1e-9);
        assert!((back.lon - 90.0).abs() < 1e-9);
    }

    #[test]
    fn pan_stops_at_the_edge_of_the_globe() {
        let mut proj = Projection {
            center: LatLon::new(0.0, 0.0),
            zoom: 1.0,
            width: 360.0,
            height: 180.0,
        };
        proj.pan(-30.0, 10.0);
        assert_eq!(proj.center, LatLon::new(10.0, 30.0));

        proj.pan(-1000.0, 1000.0);
        assert_eq!(proj.center, LatLon::new(90.0, 180.0));
        proj.pan(5000.0, -5000.0);
        assert_eq!(proj.center, LatLon::new(-90.0, -180.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut proj = Projection {
            center: LatLon::WORLD_VIEW,
            zoom: 1.0,
            width: 100.0,
            height: 50.0,
        };
        proj.zoom_by(0.1);
        assert_eq!(proj.zoom, Projection::MIN_ZOOM);
        proj.zoom_by(1000.0);
        assert_eq!(proj.zoom, Projection::MAX_ZOOM);
    }
}
