use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::CatalogSettings;
use crate::core::parse_session_date;
use crate::models::{CampRecord, Review};
use crate::services::cache::{CacheError, CacheKey, CacheManager};

/// Errors that can occur while assembling the camp catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Source {name} returned {status}")]
    SourceStatus { name: String, status: u16 },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One remote camp feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampSources {
    pub sources: Vec<CampSource>,
}

/// Reads camp records from the configured catalog file, the built-in demo
/// list, and any remote JSON feeds
pub struct CatalogLoader {
    client: Client,
    catalog_file: Option<PathBuf>,
    sources_file: Option<PathBuf>,
}

impl CatalogLoader {
    pub fn new(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            catalog_file: settings.catalog_file.as_ref().map(PathBuf::from),
            sources_file: settings.sources_file.as_ref().map(PathBuf::from),
        })
    }

    /// Local records: the catalog file when configured, the built-ins otherwise
    pub fn base_records(&self) -> Result<Vec<CampRecord>, CatalogError> {
        match &self.catalog_file {
            Some(path) => {
                let records: Vec<CampRecord> = read_json(path)?;
                tracing::info!("Loaded {} camps from {:?}", records.len(), path);
                Ok(records)
            }
            None => Ok(builtin_camps()),
        }
    }

    /// Enabled remote sources; no sources file means no remote feeds
    pub fn sources(&self) -> Result<Vec<CampSource>, CatalogError> {
        let Some(path) = &self.sources_file else {
            return Ok(vec![]);
        };

        if !path.exists() {
            tracing::warn!("Sources file {:?} not found, skipping remote feeds", path);
            return Ok(vec![]);
        }

        let sources: CampSources = read_json(path)?;
        Ok(sources.sources.into_iter().filter(|s| s.enabled).collect())
    }

    /// Fetch one feed, which must be a JSON array of camp records
    pub async fn fetch_source(&self, source: &CampSource) -> Result<Vec<CampRecord>, CatalogError> {
        tracing::debug!("Fetching camp source {} from {}", source.name, source.url);

        let response = self.client.get(&source.url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::SourceStatus {
                name: source.name.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let mut records: Vec<CampRecord> =
            serde_json::from_str(&body).map_err(|source_err| CatalogError::InvalidJson {
                origin: source.url.clone(),
                source: source_err,
            })?;

        // Feeds may omit the provider; the source name stands in
        for record in records.iter_mut().filter(|r| r.provider.is_empty()) {
            record.provider = source.name.clone();
        }

        tracing::info!("Found {} camps at {}", records.len(), source.url);
        Ok(records)
    }

    /// Assemble the full catalog
    ///
    /// A broken catalog file falls back to the built-ins; a failing source is
    /// skipped. Loading itself never fails.
    pub async fn load(&self) -> Vec<CampRecord> {
        let mut records = self.base_records().unwrap_or_else(|e| {
            tracing::error!("Failed to load catalog file, using built-in camps: {}", e);
            builtin_camps()
        });

        let sources = self.sources().unwrap_or_else(|e| {
            tracing::error!("Failed to read camp sources: {}", e);
            vec![]
        });

        for source in &sources {
            match self.fetch_source(source).await {
                Ok(mut fetched) => records.append(&mut fetched),
                Err(e) => tracing::error!("Error fetching {}: {}", source.name, e),
            }
        }

        records
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CatalogError::InvalidJson {
        origin: path.display().to_string(),
        source,
    })
}

/// Cached view over a [`CatalogLoader`]
pub struct CampCatalog {
    loader: CatalogLoader,
    cache: Arc<CacheManager>,
}

impl CampCatalog {
    pub fn new(loader: CatalogLoader, cache: Arc<CacheManager>) -> Self {
        Self { loader, cache }
    }

    /// Current catalog, served from cache when fresh
    pub async fn records(&self) -> Vec<CampRecord> {
        match self.cache.get::<Vec<CampRecord>>(&CacheKey::catalog()).await {
            Ok(records) => return records,
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Catalog cache read failed: {}", e),
        }

        self.refresh().await
    }

    /// Reload from sources and repopulate the cache
    pub async fn refresh(&self) -> Vec<CampRecord> {
        let records = self.loader.load().await;

        if let Err(e) = self.cache.set(&CacheKey::catalog(), &records).await {
            tracing::warn!("Failed to cache catalog: {}", e);
        }

        tracing::info!("Catalog refreshed with {} camps", records.len());
        records
    }

    /// Look up a camp by exact name
    pub async fn find_by_name(&self, name: &str) -> Option<CampRecord> {
        self.records().await.into_iter().find(|r| r.name == name)
    }

    /// Pick the record to book for `name` on `session_date`
    ///
    /// Names are not unique, so among same-named records the one offering
    /// the date wins. With no such offering the first same-named record is
    /// returned and the ledger reports the unknown session. `None` means no
    /// camp carries the name at all.
    pub async fn find_session(&self, name: &str, session_date: NaiveDate) -> Option<CampRecord> {
        let mut named = self.records().await.into_iter().filter(|r| r.name == name).peekable();
        let first = named.peek().cloned()?;

        let offering = named.find(|r| {
            r.dates
                .iter()
                .filter_map(|d| parse_session_date(d).ok())
                .any(|d| d == session_date)
        });

        Some(offering.unwrap_or(first))
    }
}

fn review(user: &str, rating: f64, comment: &str) -> Review {
    Review {
        user: user.to_string(),
        rating,
        comment: comment.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Demo catalog of Seattle summer camps
pub fn builtin_camps() -> Vec<CampRecord> {
    vec![
        CampRecord {
            name: "STEM Discovery Camp".to_string(),
            provider: "Pacific Science Center".to_string(),
            age_range: "8-12".to_string(),
            cost: 475.0,
            dates: strings(&["2025-07-10", "2025-07-24"]),
            location: "200 2nd Ave N, Seattle".to_string(),
            activities: Some(strings(&["Robotics", "Chemistry", "Physics", "Coding"])),
            description: "Hands-on STEM exploration for curious minds".to_string(),
            latitude: Some(47.6192),
            longitude: Some(-122.3514),
            rating: Some(4.8),
            registration_link: Some("pacificsciencecenter.org/camps".to_string()),
            capacity: Some(20),
            current_bookings: Some(12),
            reviews: vec![
                review("Parent123", 5.0, "Excellent STEM activities!"),
                review("SeattleMom", 4.5, "Great instructors"),
            ],
        },
        CampRecord {
            name: "Zoo Explorers".to_string(),
            provider: "Woodland Park Zoo".to_string(),
            age_range: "9-11".to_string(),
            cost: 425.0,
            dates: strings(&["2025-07-17"]),
            location: "5500 Phinney Ave N, Seattle".to_string(),
            activities: Some(strings(&["Animal Care", "Conservation", "Wildlife Study"])),
            description: "Discover wildlife and conservation".to_string(),
            latitude: Some(47.6685),
            longitude: Some(-122.3503),
            rating: Some(4.9),
            registration_link: Some("zoo.org/camps".to_string()),
            capacity: Some(15),
            current_bookings: Some(8),
            reviews: vec![
                review("ZooLover", 5.0, "Amazing animal encounters!"),
                review("SeattleDad", 4.8, "Educational and fun"),
            ],
        },
        CampRecord {
            name: "Youth Kayaking Adventure".to_string(),
            provider: "Moss Bay".to_string(),
            age_range: "10-13".to_string(),
            cost: 495.0,
            dates: strings(&["2025-07-08", "2025-07-22"]),
            location: "1001 Fairview Ave N, Seattle".to_string(),
            activities: Some(strings(&["Kayaking", "Water Safety", "Navigation"])),
            description: "Adventure on Seattle's waters".to_string(),
            latitude: Some(47.6290),
            longitude: Some(-122.3300),
            rating: Some(4.7),
            registration_link: Some("mossbay.net/youth-camps".to_string()),
            capacity: Some(12),
            current_bookings: Some(6),
            reviews: vec![
                review("WaterSports", 4.7, "Great water safety instruction"),
                review("KayakMom", 4.7, "Fun on the water"),
            ],
        },
        CampRecord {
            name: "Drama Workshop".to_string(),
            provider: "Seattle Children's Theatre".to_string(),
            age_range: "8-14".to_string(),
            cost: 450.0,
            dates: strings(&["2025-07-15", "2025-08-05"]),
            location: "201 Thomas St, Seattle".to_string(),
            activities: Some(strings(&["Acting", "Improvisation", "Stage Design"])),
            description: "Develop theater skills and confidence".to_string(),
            latitude: Some(47.6213),
            longitude: Some(-122.3522),
            rating: Some(4.9),
            registration_link: Some("sct.org/camps".to_string()),
            capacity: Some(18),
            current_bookings: Some(10),
            reviews: vec![
                review("TheatreMom", 5.0, "Wonderful creative experience"),
                review("ArtsDad", 4.8, "Built confidence"),
            ],
        },
        CampRecord {
            name: "Multi-Sport Camp".to_string(),
            provider: "Seattle YMCA".to_string(),
            age_range: "7-12".to_string(),
            cost: 395.0,
            dates: strings(&["2025-07-01", "2025-07-29"]),
            location: "1426 NW 42nd St, Seattle".to_string(),
            activities: Some(strings(&["Basketball", "Soccer", "Swimming", "Tennis"])),
            description: "Active fun with multiple sports".to_string(),
            latitude: Some(47.6580),
            longitude: Some(-122.3760),
            rating: Some(4.6),
            registration_link: Some("seattleymca.org/camps".to_string()),
            capacity: Some(25),
            current_bookings: Some(15),
            reviews: vec![
                review("SportsFan", 4.6, "Great variety of activities"),
                review("ActiveKidMom", 4.6, "Well-organized sports"),
            ],
        },
    ]
}
