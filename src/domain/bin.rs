// Bin domain model
use serde::Serialize;

pub const MIN_FILL_PERCENT: f64 = 5.0;
pub const MAX_FILL_PERCENT: f64 = 100.0;

const NEARLY_FULL_THRESHOLD: f64 = 70.0;
const FULL_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BinStatus {
    Ok,
    NearlyFull,
    Full,
}

impl BinStatus {
    pub fn from_fill(fill_percent: f64) -> Self {
        if fill_percent < NEARLY_FULL_THRESHOLD {
            BinStatus::Ok
        } else if fill_percent < FULL_THRESHOLD {
            BinStatus::NearlyFull
        } else {
            BinStatus::Full
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BinStatus::Ok => "OK",
            BinStatus::NearlyFull => "Nearly Full",
            BinStatus::Full => "Full",
        }
    }

    /// CSS class of the status badge in the bin table
    pub fn badge_class(self) -> &'static str {
        match self {
            BinStatus::Ok => "status-badge success",
            BinStatus::NearlyFull => "status-badge warning",
            BinStatus::Full => "status-badge danger",
        }
    }

    pub fn marker_color(self) -> MarkerColor {
        match self {
            BinStatus::Ok => MarkerColor::Green,
            BinStatus::NearlyFull => MarkerColor::Orange,
            BinStatus::Full => MarkerColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Green,
    Orange,
    Red,
}

impl MarkerColor {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerColor::Green => "green",
            MarkerColor::Orange => "orange",
            MarkerColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinRecord {
    pub id: String,
    pub coord: Coordinate,
    pub address: Option<String>,
    fill_percent: f64,
    status: BinStatus,
}

impl BinRecord {
    pub fn new(id: String, coord: Coordinate, address: Option<String>, fill_percent: f64) -> Self {
        let fill_percent = clamp_fill(fill_percent);
        Self {
            id,
            coord,
            address,
            fill_percent,
            status: BinStatus::from_fill(fill_percent),
        }
    }

    pub fn fill_percent(&self) -> f64 {
        self.fill_percent
    }

    pub fn status(&self) -> BinStatus {
        self.status
    }

    /// Shift the fill level by `delta` points. Status always follows the clamped value.
    pub fn apply_perturbation(&mut self, delta: f64) -> f64 {
        self.fill_percent = clamp_fill(self.fill_percent + delta);
        self.status = BinStatus::from_fill(self.fill_percent);
        self.fill_percent
    }

    pub fn fill_label(&self) -> String {
        format!("{}% Full", self.fill_percent.round() as i64)
    }

    pub fn popup_html(&self) -> String {
        format!("<b>{}</b><br>Status: {}", self.id, self.status.label())
    }

    /// Text a bin table row shows, used for search matching
    pub fn row_text(&self) -> String {
        let mut text = self.id.clone();
        if let Some(address) = &self.address {
            text.push(' ');
            text.push_str(address);
        }
        text.push(' ');
        text.push_str(&self.fill_label());
        text.push(' ');
        text.push_str(self.status.label());
        text
    }
}

fn clamp_fill(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_FILL_PERCENT;
    }
    value.clamp(MIN_FILL_PERCENT, MAX_FILL_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(fill: f64) -> BinRecord {
        BinRecord::new("BIN-001".to_string(), Coordinate::new(40.7128, -74.0060), None, fill)
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BinStatus::from_fill(5.0), BinStatus::Ok);
        assert_eq!(BinStatus::from_fill(69.9), BinStatus::Ok);
        assert_eq!(BinStatus::from_fill(70.0), BinStatus::NearlyFull);
        assert_eq!(BinStatus::from_fill(89.99), BinStatus::NearlyFull);
        assert_eq!(BinStatus::from_fill(90.0), BinStatus::Full);
        assert_eq!(BinStatus::from_fill(100.0), BinStatus::Full);
    }

    #[test]
    fn test_perturbation_clamps_and_reclassifies() {
        let mut record = bin(65.0);
        assert_eq!(record.apply_perturbation(-5.0), 60.0);
        assert_eq!(record.status(), BinStatus::Ok);

        assert_eq!(record.apply_perturbation(30.0), 90.0);
        assert_eq!(record.status(), BinStatus::Full);

        assert_eq!(record.apply_perturbation(30.0), 100.0);
        assert_eq!(record.status(), BinStatus::Full);

        assert_eq!(record.apply_perturbation(-500.0), 5.0);
        assert_eq!(record.status(), BinStatus::Ok);
    }

    #[test]
    fn test_construction_clamps() {
        assert_eq!(bin(0.0).fill_percent(), 5.0);
        assert_eq!(bin(140.0).fill_percent(), 100.0);
        assert_eq!(bin(f64::NAN).fill_percent(), 5.0);
    }

    #[test]
    fn test_labels() {
        let record = bin(84.6);
        assert_eq!(record.fill_label(), "85% Full");
        assert_eq!(record.popup_html(), "<b>BIN-001</b><br>Status: Nearly Full");
        assert_eq!(record.status().marker_color(), MarkerColor::Orange);
        assert_eq!(record.status().badge_class(), "status-badge warning");
    }
}
