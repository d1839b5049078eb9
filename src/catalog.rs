use std::io::Read;
use std::path::Path;

use crate::models::CollegeStat;

const EMBEDDED_COLLEGES: &str = include_str!("../data/colleges.csv");

pub const DEFAULT_SEARCH_LIMIT: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read college catalog {path}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid college row {row}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Read-only reference table of college admissions statistics.
#[derive(Debug, Clone)]
pub struct Catalog {
    colleges: Vec<CollegeStat>,
}

impl Catalog {
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_reader(EMBEDDED_COLLEGES.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let reader = csv::Reader::from_path(path).map_err(|source| CatalogError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_csv(reader)?;
        tracing::debug!(path = %path.display(), colleges = catalog.len(), "loaded college catalog");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, CatalogError> {
        let mut colleges = Vec::new();
        for (index, result) in reader.deserialize::<CollegeStat>().enumerate() {
            let college = result.map_err(|source| CatalogError::Row {
                row: index + 1,
                source,
            })?;
            colleges.push(college);
        }
        Ok(Self { colleges })
    }

    pub fn new(colleges: Vec<CollegeStat>) -> Self {
        Self { colleges }
    }

    pub fn colleges(&self) -> &[CollegeStat] {
        &self.colleges
    }

    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// Case-insensitive substring match on name, location or state.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CollegeStat> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.colleges
            .iter()
            .filter(|college| {
                college.name.to_lowercase().contains(&query)
                    || college.location.to_lowercase().contains(&query)
                    || college.state.to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&CollegeStat> {
        let name = name.trim();
        self.colleges
            .iter()
            .find(|college| college.name.eq_ignore_ascii_case(name))
    }
}
