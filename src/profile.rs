use crate::models::{AcademicProfile, GpaEntry, TestScore};

pub fn cumulative_gpa(entries: &[GpaEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|entry| entry.gpa).sum::<f64>() / entries.len() as f64
}

pub fn cumulative_weighted_gpa(entries: &[GpaEntry]) -> f64 {
    let weighted: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.weighted_gpa)
        .filter(|value| *value != 0.0)
        .collect();
    if weighted.is_empty() {
        return 0.0;
    }
    weighted.iter().sum::<f64>() / weighted.len() as f64
}

/// Most recent score for a test type. Dated scores win over undated ones;
/// among undated scores the first listed is kept.
pub fn latest_score<'a>(scores: &'a [TestScore], test_type: &str) -> Option<&'a TestScore> {
    scores
        .iter()
        .filter(|score| score.test_type.trim().eq_ignore_ascii_case(test_type))
        .fold(None, |best: Option<&TestScore>, score| match best {
            Some(current) if score.test_date <= current.test_date => Some(current),
            _ => Some(score),
        })
}

impl AcademicProfile {
    pub fn from_records(entries: &[GpaEntry], scores: &[TestScore]) -> Self {
        Self {
            gpa: cumulative_gpa(entries),
            sat: latest_score(scores, "SAT").map_or(0, |score| score.score),
            act: latest_score(scores, "ACT").map_or(0, |score| score.score),
        }
    }
}
