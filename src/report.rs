use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::grades;
use crate::models::{
    AcademicProfile, CollegeFit, Course, FitCategory, GradeImpactScenario, LetterGrade,
};
use crate::spike::SpikeAnalysis;

/// Everything a report can draw on. Sections without data are still
/// rendered, with a short placeholder line.
pub struct ReportInput<'a> {
    pub generated_on: NaiveDate,
    pub profile: &'a AcademicProfile,
    pub fits: &'a [CollegeFit],
    pub unresolved: &'a [String],
    pub courses: &'a [Course],
    pub spike: Option<&'a SpikeAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub generated_on: NaiveDate,
    pub profile: &'a AcademicProfile,
    pub safety: usize,
    pub target: usize,
    pub reach: usize,
    pub fits: &'a [CollegeFit],
    pub unresolved: &'a [String],
    pub weighted_gpa: Option<f64>,
    pub outlook: Vec<CourseOutlook<'a>>,
    pub spike: Option<&'a SpikeAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct CourseOutlook<'a> {
    pub course_id: &'a str,
    pub name: &'a str,
    pub scenarios: Vec<GradeImpactScenario>,
}

/// Same content as [`build_report`], shaped for JSON output.
pub fn summarize<'a>(input: &ReportInput<'a>) -> ReportSummary<'a> {
    let weighted_gpa =
        (!input.courses.is_empty()).then(|| grades::weighted_gpa(input.courses, &[]));
    let outlook = input
        .courses
        .iter()
        .map(|course| CourseOutlook {
            course_id: &course.id,
            name: &course.name,
            scenarios: grades::course_outlook(input.courses, &course.id),
        })
        .collect();

    ReportSummary {
        generated_on: input.generated_on,
        profile: input.profile,
        safety: count_by_category(input.fits, FitCategory::Safety),
        target: count_by_category(input.fits, FitCategory::Target),
        reach: count_by_category(input.fits, FitCategory::Reach),
        fits: input.fits,
        unresolved: input.unresolved,
        weighted_gpa,
        outlook,
        spike: input.spike,
    }
}

pub fn count_by_category(fits: &[CollegeFit], category: FitCategory) -> usize {
    fits.iter().filter(|fit| fit.category == category).count()
}

fn stat_or_dash(value: u32) -> String {
    if value == 0 {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn build_report(input: &ReportInput<'_>) -> String {
    let mut output = String::new();
    let profile = input.profile;

    let _ = writeln!(output, "# College List Report");
    let _ = writeln!(output, "Generated on {}", input.generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Academic Profile");

    if profile.is_empty() {
        let _ = writeln!(
            output,
            "No GPA or test scores recorded; every college defaults to target."
        );
    } else {
        let gpa = if profile.gpa > 0.0 {
            format!("{:.2}", profile.gpa)
        } else {
            "-".to_string()
        };
        let _ = writeln!(
            output,
            "- GPA {} | SAT {} | ACT {}",
            gpa,
            stat_or_dash(profile.sat),
            stat_or_dash(profile.act)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## College List");

    if input.fits.is_empty() {
        let _ = writeln!(output, "No colleges on the list.");
    } else {
        let _ = writeln!(
            output,
            "{} safety, {} target, {} reach",
            count_by_category(input.fits, FitCategory::Safety),
            count_by_category(input.fits, FitCategory::Target),
            count_by_category(input.fits, FitCategory::Reach)
        );

        for category in [FitCategory::Safety, FitCategory::Target, FitCategory::Reach] {
            let group: Vec<&CollegeFit> = input
                .fits
                .iter()
                .filter(|fit| fit.category == category)
                .collect();
            if group.is_empty() {
                continue;
            }

            let _ = writeln!(output);
            let _ = writeln!(output, "### {}", capitalize(category.as_str()));
            for fit in group {
                let _ = write!(
                    output,
                    "- {} ({}) acceptance {:.1}%, match {:+.2}, est. chance {}%",
                    fit.college.name,
                    fit.college.location,
                    fit.college.acceptance_rate_percent,
                    fit.match_average,
                    fit.admission_chance
                );
                match &fit.notes {
                    Some(notes) => {
                        let _ = writeln!(output, ": {notes}");
                    }
                    None => {
                        let _ = writeln!(output);
                    }
                }
            }
        }
    }

    if !input.unresolved.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Not found in catalog: {}", input.unresolved.join(", "));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Outlook");

    if input.courses.is_empty() {
        let _ = writeln!(output, "No courses recorded.");
    } else {
        let current = grades::weighted_gpa(input.courses, &[]);
        let _ = writeln!(output, "Current weighted GPA {:.2}", current);
        let _ = writeln!(output);
        let _ = writeln!(output, "| Course | Tier | Credits | Grade | If A | If one step down |");
        let _ = writeln!(output, "|---|---|---|---|---|---|");
        for course in input.courses {
            let best = grades::impact(input.courses, &course.id, LetterGrade::A);
            let worse = course
                .current_grade
                .letter()
                .and_then(step_down)
                .map(|grade| format!("{:+.3}", grades::impact(input.courses, &course.id, grade)))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {:+.3} | {} |",
                course.name, course.tier, course.credits, course.current_grade, best, worse
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Extracurricular Spike");

    match input.spike.and_then(|analysis| analysis.primary.as_ref().map(|p| (analysis, p))) {
        Some((analysis, primary)) => {
            let _ = writeln!(
                output,
                "Primary: {} (strength {:.1}, {} activities, {} hours)",
                primary.category,
                primary.strength,
                primary.activities.len(),
                primary.total_hours.round()
            );
            for spike in analysis.secondary.iter() {
                let _ = writeln!(
                    output,
                    "- Secondary: {} (strength {:.1})",
                    spike.category, spike.strength
                );
            }
            if !analysis.recommended_majors.is_empty() {
                let majors: Vec<&str> = analysis
                    .recommended_majors
                    .iter()
                    .map(|m| m.major.as_str())
                    .collect();
                let _ = writeln!(output, "Suggested majors: {}", majors.join(", "));
            }
            if !analysis.mission_statements.is_empty() {
                let _ = writeln!(output);
                let _ = writeln!(output, "Mission statements:");
                for statement in &analysis.mission_statements {
                    let _ = writeln!(output, "- {statement}");
                }
            }
        }
        None => {
            let _ = writeln!(output, "No activities recorded.");
        }
    }

    output
}

fn step_down(grade: LetterGrade) -> Option<LetterGrade> {
    let grades = LetterGrade::DESCENDING;
    let index = grades.iter().position(|g| *g == grade)?;
    grades.get(index + 1).copied()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
