use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A student's academic stats as compared against college averages.
///
/// Every field uses 0 to mean "not reported".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AcademicProfile {
    pub gpa: f64,
    pub sat: u32,
    pub act: u32,
}

impl AcademicProfile {
    pub fn new(gpa: f64, sat: u32, act: u32) -> Self {
        Self { gpa, sat, act }
    }

    pub fn is_empty(&self) -> bool {
        self.gpa == 0.0 && self.sat == 0 && self.act == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionKind {
    Public,
    Private,
    CommunityCollege,
}

impl fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstitutionKind::Public => "Public",
            InstitutionKind::Private => "Private",
            InstitutionKind::CommunityCollege => "Community College",
        };
        f.write_str(label)
    }
}

/// Published admissions statistics for one college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeStat {
    pub name: String,
    pub location: String,
    pub state: String,
    pub acceptance_rate_percent: f64,
    pub avg_gpa: f64,
    pub avg_sat: u32,
    pub avg_act: u32,
    pub tuition: u32,
    pub kind: InstitutionKind,
}

/// Three-way admission outlook. Ordered from least to most likely, so
/// `Safety > Target > Reach`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitCategory {
    Reach,
    Target,
    Safety,
}

impl FitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitCategory::Reach => "reach",
            FitCategory::Target => "target",
            FitCategory::Safety => "safety",
        }
    }
}

impl fmt::Display for FitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradeParseError {
    #[error("unknown letter grade '{0}'")]
    UnknownGrade(String),
    #[error("unknown course tier '{0}' (expected regular, honors, ap or ib)")]
    UnknownTier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    /// Best grade first.
    pub const DESCENDING: [LetterGrade; 11] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LetterGrade {
    type Err = GradeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        LetterGrade::DESCENDING
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GradeParseError::UnknownGrade(trimmed.to_string()))
    }
}

/// The grade a course currently carries. Marks outside the letter-grade
/// table (pass/fail, incompletes, D+ and similar) are kept verbatim and
/// carry no weight in GPA calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportedGrade {
    Letter(LetterGrade),
    Unlisted(String),
}

impl ReportedGrade {
    pub fn letter(&self) -> Option<LetterGrade> {
        match self {
            ReportedGrade::Letter(grade) => Some(*grade),
            ReportedGrade::Unlisted(_) => None,
        }
    }
}

impl From<LetterGrade> for ReportedGrade {
    fn from(value: LetterGrade) -> Self {
        ReportedGrade::Letter(value)
    }
}

impl From<String> for ReportedGrade {
    fn from(value: String) -> Self {
        match value.parse::<LetterGrade>() {
            Ok(grade) => ReportedGrade::Letter(grade),
            Err(_) => ReportedGrade::Unlisted(value.trim().to_string()),
        }
    }
}

impl From<ReportedGrade> for String {
    fn from(value: ReportedGrade) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ReportedGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedGrade::Letter(grade) => f.write_str(grade.label()),
            ReportedGrade::Unlisted(mark) => f.write_str(mark),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CourseTier {
    Regular,
    Honors,
    ApIb,
}

impl CourseTier {
    pub fn label(&self) -> &'static str {
        match self {
            CourseTier::Regular => "Regular",
            CourseTier::Honors => "Honors",
            CourseTier::ApIb => "AP/IB",
        }
    }
}

impl fmt::Display for CourseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CourseTier {
    type Err = GradeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "regular" | "standard" | "cp" => Ok(CourseTier::Regular),
            "honors" | "honours" => Ok(CourseTier::Honors),
            "ap" | "ib" | "ap/ib" | "ap-ib" | "apib" => Ok(CourseTier::ApIb),
            other => Err(GradeParseError::UnknownTier(other.to_string())),
        }
    }
}

impl TryFrom<String> for CourseTier {
    type Error = GradeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseTier> for String {
    fn from(value: CourseTier) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub current_grade: ReportedGrade,
    pub credits: f64,
    pub tier: CourseTier,
}

/// Replaces the grade of one course for a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOverride {
    pub course_id: String,
    pub new_grade: LetterGrade,
}

impl GradeOverride {
    pub fn new(course_id: impl Into<String>, new_grade: LetterGrade) -> Self {
        Self {
            course_id: course_id.into(),
            new_grade,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeImpactScenario {
    pub course_id: String,
    pub hypothetical_grade: LetterGrade,
    pub projected_gpa: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaEntry {
    pub id: String,
    pub semester: String,
    pub year: i32,
    pub gpa: f64,
    pub weighted_gpa: Option<f64>,
    pub credits: Option<f64>,
    pub class_rank: Option<u32>,
    pub class_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    pub id: String,
    pub test_type: String,
    pub subject: Option<String>,
    pub score: u32,
    pub max_score: Option<u32>,
    pub test_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub activity_name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub leadership_position: Option<String>,
    pub hours_per_week: Option<f64>,
    pub weeks_per_year: Option<f64>,
    pub years_participated: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HonorAward {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub date_received: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeListEntry {
    pub name: String,
    pub notes: Option<String>,
}

/// One college from a student's list with its computed outlook.
#[derive(Debug, Clone, Serialize)]
pub struct CollegeFit {
    pub college: CollegeStat,
    pub category: FitCategory,
    pub match_average: f64,
    pub admission_chance: u8,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_grades_parse_case_insensitively() {
        assert_eq!("a-".parse::<LetterGrade>(), Ok(LetterGrade::AMinus));
        assert_eq!(" B+ ".parse::<LetterGrade>(), Ok(LetterGrade::BPlus));
        assert!("E".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn unlisted_marks_are_preserved() {
        let grade = ReportedGrade::from("P".to_string());
        assert_eq!(grade, ReportedGrade::Unlisted("P".to_string()));
        assert_eq!(grade.letter(), None);
        assert_eq!(
            ReportedGrade::from("c+".to_string()).letter(),
            Some(LetterGrade::CPlus)
        );
    }

    #[test]
    fn tiers_accept_common_spellings() {
        assert_eq!("AP".parse::<CourseTier>(), Ok(CourseTier::ApIb));
        assert_eq!("ib".parse::<CourseTier>(), Ok(CourseTier::ApIb));
        assert_eq!("Honors".parse::<CourseTier>(), Ok(CourseTier::Honors));
        assert_eq!("".parse::<CourseTier>(), Ok(CourseTier::Regular));
        assert!("dual".parse::<CourseTier>().is_err());
    }

    #[test]
    fn fit_categories_rank_safety_highest() {
        assert!(FitCategory::Safety > FitCategory::Target);
        assert!(FitCategory::Target > FitCategory::Reach);
    }
}
