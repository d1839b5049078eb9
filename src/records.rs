use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::{
    Activity, CollegeListEntry, Course, CourseTier, GpaEntry, HonorAward, ReportedGrade,
    TestScore,
};

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: invalid row {row}")]
    Row {
        path: String,
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: duplicate course id '{id}'")]
    DuplicateCourse { path: String, id: String },
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, RecordsError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| RecordsError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        let row = result.map_err(|source| RecordsError::Row {
            path: path.display().to_string(),
            row: index + 1,
            source,
        })?;
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read records");
    Ok(rows)
}

fn record_id(id: Option<String>) -> String {
    id.filter(|value| !value.is_empty())
        .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()))
}

pub fn load_courses(path: &Path) -> Result<Vec<Course>, RecordsError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        name: String,
        grade: ReportedGrade,
        credits: f64,
        tier: CourseTier,
    }

    let mut courses: Vec<Course> = Vec::new();
    for row in read_rows::<CsvRow>(path)? {
        let id = record_id(row.id);
        if courses.iter().any(|course| course.id == id) {
            return Err(RecordsError::DuplicateCourse {
                path: path.display().to_string(),
                id,
            });
        }
        courses.push(Course {
            id,
            name: row.name,
            current_grade: row.grade,
            credits: row.credits,
            tier: row.tier,
        });
    }

    Ok(courses)
}

pub fn load_gpa_entries(path: &Path) -> Result<Vec<GpaEntry>, RecordsError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        semester: String,
        year: i32,
        gpa: f64,
        weighted_gpa: Option<f64>,
        credits: Option<f64>,
        class_rank: Option<u32>,
        class_size: Option<u32>,
    }

    Ok(read_rows::<CsvRow>(path)?
        .into_iter()
        .map(|row| GpaEntry {
            id: record_id(row.id),
            semester: row.semester,
            year: row.year,
            gpa: row.gpa,
            weighted_gpa: row.weighted_gpa,
            credits: row.credits,
            class_rank: row.class_rank,
            class_size: row.class_size,
        })
        .collect())
}

pub fn load_test_scores(path: &Path) -> Result<Vec<TestScore>, RecordsError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        test_type: String,
        subject: Option<String>,
        score: u32,
        max_score: Option<u32>,
        test_date: Option<NaiveDate>,
    }

    Ok(read_rows::<CsvRow>(path)?
        .into_iter()
        .map(|row| TestScore {
            id: record_id(row.id),
            test_type: row.test_type,
            subject: row.subject,
            score: row.score,
            max_score: row.max_score,
            test_date: row.test_date,
        })
        .collect())
}

pub fn load_activities(path: &Path) -> Result<Vec<Activity>, RecordsError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        activity_name: String,
        category: Option<String>,
        description: Option<String>,
        leadership_position: Option<String>,
        hours_per_week: Option<f64>,
        weeks_per_year: Option<f64>,
        years_participated: Option<f64>,
    }

    Ok(read_rows::<CsvRow>(path)?
        .into_iter()
        .map(|row| Activity {
            id: record_id(row.id),
            activity_name: row.activity_name,
            category: row.category.filter(|value| !value.is_empty()),
            description: row.description.filter(|value| !value.is_empty()),
            leadership_position: row.leadership_position.filter(|value| !value.is_empty()),
            hours_per_week: row.hours_per_week,
            weeks_per_year: row.weeks_per_year,
            years_participated: row.years_participated,
        })
        .collect())
}

pub fn load_honors(path: &Path) -> Result<Vec<HonorAward>, RecordsError> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        title: String,
        description: Option<String>,
        level: Option<String>,
        date_received: Option<NaiveDate>,
    }

    Ok(read_rows::<CsvRow>(path)?
        .into_iter()
        .map(|row| HonorAward {
            id: record_id(row.id),
            title: row.title,
            description: row.description.filter(|value| !value.is_empty()),
            level: row.level.filter(|value| !value.is_empty()),
            date_received: row.date_received,
        })
        .collect())
}

pub fn load_college_list(path: &Path) -> Result<Vec<CollegeListEntry>, RecordsError> {
    Ok(read_rows::<CollegeListEntry>(path)?
        .into_iter()
        .map(|entry| CollegeListEntry {
            name: entry.name,
            notes: entry.notes.filter(|value| !value.is_empty()),
        })
        .collect())
}
