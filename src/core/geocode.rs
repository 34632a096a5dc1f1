use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::GeoPoint;

/// Errors resolving a ZIP code to coordinates
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("'{0}' is not a 5-digit ZIP code")]
    InvalidZip(String),

    #[error("ZIP code {0} is outside the supported area")]
    UnknownZip(String),

    #[error("Failed to read ZIP directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ZIP directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Approximate centroids for Seattle and nearby Eastside ZIP codes
const SEATTLE_ZIP_CENTROIDS: &[(&str, f64, f64)] = &[
    ("98101", 47.6105, -122.3348),
    ("98102", 47.6359, -122.3219),
    ("98103", 47.6733, -122.3426),
    ("98104", 47.6027, -122.3262),
    ("98105", 47.6631, -122.3017),
    ("98106", 47.5342, -122.3547),
    ("98107", 47.6682, -122.3769),
    ("98108", 47.5416, -122.3148),
    ("98109", 47.6315, -122.3448),
    ("98112", 47.6300, -122.2966),
    ("98115", 47.6849, -122.2960),
    ("98116", 47.5721, -122.3966),
    ("98117", 47.6894, -122.3799),
    ("98118", 47.5415, -122.2757),
    ("98119", 47.6378, -122.3670),
    ("98121", 47.6150, -122.3475),
    ("98122", 47.6114, -122.3047),
    ("98125", 47.7166, -122.2990),
    ("98126", 47.5445, -122.3737),
    ("98133", 47.7392, -122.3438),
    ("98144", 47.5865, -122.2999),
    ("98199", 47.6479, -122.3965),
    ("98004", 47.6183, -122.2059),
    ("98033", 47.6769, -122.1929),
    ("98052", 47.6801, -122.1206),
];

/// Offline ZIP code to centroid lookup
#[derive(Debug, Clone)]
pub struct ZipDirectory {
    centroids: HashMap<String, GeoPoint>,
}

impl ZipDirectory {
    /// Directory holding only the built-in Seattle-area centroids
    pub fn seattle() -> Self {
        let centroids = SEATTLE_ZIP_CENTROIDS
            .iter()
            .map(|(zip, lat, lon)| (zip.to_string(), GeoPoint::new(*lat, *lon)))
            .collect();

        Self { centroids }
    }

    /// Built-in centroids merged with a JSON file of `{"98101": [lat, lon]}`
    ///
    /// A missing file is not an error; the built-ins are returned.
    pub fn with_overrides<P: AsRef<Path>>(path: P) -> Result<Self, GeocodeError> {
        let mut directory = Self::seattle();
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No ZIP override file at {:?}, using built-in directory", path);
            return Ok(directory);
        }

        let content = fs::read_to_string(path)?;
        let overrides: HashMap<String, (f64, f64)> = serde_json::from_str(&content)?;

        tracing::info!("Loaded {} ZIP centroids from {:?}", overrides.len(), path);

        for (zip, (lat, lon)) in overrides {
            let zip = normalize_zip(&zip)?;
            directory.centroids.insert(zip, GeoPoint::new(lat, lon));
        }

        Ok(directory)
    }

    pub fn lookup(&self, zip: &str) -> Option<GeoPoint> {
        let zip = normalize_zip(zip).ok()?;
        self.centroids.get(&zip).copied()
    }

    /// Like [`lookup`](Self::lookup), but says why a code could not be used
    pub fn resolve(&self, zip: &str) -> Result<GeoPoint, GeocodeError> {
        let normalized = normalize_zip(zip)?;
        self.centroids
            .get(&normalized)
            .copied()
            .ok_or(GeocodeError::UnknownZip(normalized))
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

impl Default for ZipDirectory {
    fn default() -> Self {
        Self::seattle()
    }
}

/// Accepts `98101` and ZIP+4 `98101-1234`, returns the 5-digit code
fn normalize_zip(raw: &str) -> Result<String, GeocodeError> {
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

    let trimmed = raw.trim();
    let (five, plus_four) = match trimmed.split_once('-') {
        Some((five, plus_four)) => (five, Some(plus_four)),
        None => (trimmed, None),
    };

    if !digits(five, 5) || plus_four.is_some_and(|p| !digits(p, 4)) {
        return Err(GeocodeError::InvalidZip(raw.to_string()));
    }

    Ok(five.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_builtin() {
        let zips = ZipDirectory::seattle();
        let point = zips.lookup("98101").unwrap();
        assert!((point.latitude - 47.61).abs() < 0.01);
    }

    #[test]
    fn test_lookup_zip_plus_four_and_whitespace() {
        let zips = ZipDirectory::seattle();
        assert_eq!(zips.lookup(" 98103-2211 "), zips.lookup("98103"));
    }

    #[test]
    fn test_resolve_errors() {
        let zips = ZipDirectory::seattle();
        assert!(matches!(zips.resolve("9810"), Err(GeocodeError::InvalidZip(_))));
        assert!(matches!(zips.resolve("abcde"), Err(GeocodeError::InvalidZip(_))));
        assert!(matches!(zips.resolve("10001"), Err(GeocodeError::UnknownZip(_))));
    }

    #[test]
    fn test_zip_plus_four_suffix_must_be_four_digits() {
        let zips = ZipDirectory::seattle();
        assert!(zips.resolve("98101-1234").is_ok());
        for bad in ["98101-abcd", "98101-", "98101-123", "98101-12345", "98101-1234-5678"] {
            assert!(matches!(zips.resolve(bad), Err(GeocodeError::InvalidZip(_))), "{} should be invalid", bad);
        }
    }

    #[test]
    fn test_overrides_merge() {
        let path = std::env::temp_dir().join(format!("zip_overrides_{}.json", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"98011": [47.7565, -122.2054], "98101": [1.0, 2.0]}}"#).unwrap();

        let zips = ZipDirectory::with_overrides(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(zips.len(), SEATTLE_ZIP_CENTROIDS.len() + 1);
        assert_eq!(zips.lookup("98101"), Some(GeoPoint::new(1.0, 2.0)));
        assert!(zips.lookup("98011").is_some());
    }

    #[test]
    fn test_missing_override_file_uses_builtins() {
        let zips = ZipDirectory::with_overrides("does/not/exist.json").unwrap();
        assert_eq!(zips.len(), SEATTLE_ZIP_CENTROIDS.len());
    }
}
