use thiserror::Error;

use crate::models::CampMatch;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Column order of the exported table
pub const CSV_HEADERS: [&str; 11] = [
    "name",
    "provider",
    "age_range",
    "cost",
    "dates",
    "location",
    "activities",
    "rating",
    "distance_miles",
    "registration_link",
    "description",
];

/// Render matches as CSV, header row first
///
/// List columns are joined with `"; "`. Missing optional values become empty cells.
pub fn to_csv(matches: &[CampMatch]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADERS)?;

    for m in matches {
        let camp = &m.camp;
        wtr.write_record([
            camp.name.clone(),
            camp.provider.clone(),
            camp.age_range.clone(),
            format!("{:.2}", camp.cost),
            camp.dates.join("; "),
            camp.location.clone(),
            camp.activities.as_ref().map(|a| a.join("; ")).unwrap_or_default(),
            camp.rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
            m.distance_miles.map(|d| format!("{:.1}", d)).unwrap_or_default(),
            camp.registration_link.clone().unwrap_or_default(),
            camp.description.clone(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CampRecord;

    fn camp_match() -> CampMatch {
        CampMatch {
            camp: CampRecord {
                name: "Drama Workshop".to_string(),
                provider: "Seattle Children's Theatre".to_string(),
                age_range: "8-14".to_string(),
                cost: 450.0,
                dates: vec!["2025-07-15".to_string(), "2025-08-05".to_string()],
                location: "201 Thomas St, Seattle".to_string(),
                activities: Some(vec!["Acting".to_string(), "Improvisation".to_string()]),
                description: "Develop theater skills, and confidence".to_string(),
                latitude: None,
                longitude: None,
                rating: Some(4.9),
                registration_link: None,
                capacity: None,
                current_bookings: None,
                reviews: vec![],
            },
            distance_miles: Some(0.42),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), CSV_HEADERS.join(","));
    }

    #[test]
    fn test_row_contents() {
        let csv = to_csv(&[camp_match()]).unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("name,provider,age_range"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Drama Workshop,Seattle Children's Theatre,8-14,450.00,2025-07-15; 2025-08-05"));
        assert!(row.contains("Acting; Improvisation"));
        assert!(row.contains(",4.9,0.4,,"));
        // Field containing a comma is quoted
        assert!(row.ends_with("\"Develop theater skills, and confidence\""));
        assert!(lines.next().is_none());
    }
}
