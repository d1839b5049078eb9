use serde::Serialize;

use crate::models::{Activity, HonorAward};

const MAX_MAJORS: usize = 6;
const MAX_SUGGESTIONS: usize = 4;
const MAX_STATEMENTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStrength {
    pub category: String,
    pub strength: f64,
    pub activities: Vec<String>,
    pub total_hours: f64,
    pub has_leadership: bool,
    pub honors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorRecommendation {
    pub major: String,
    pub relevance: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySuggestion {
    pub activity: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpikeAnalysis {
    pub primary: Option<CategoryStrength>,
    pub secondary: Vec<CategoryStrength>,
    pub recommended_majors: Vec<MajorRecommendation>,
    pub suggested_activities: Vec<ActivitySuggestion>,
    pub mission_statements: Vec<String>,
}

pub fn majors_for_category(category: &str) -> &'static [&'static str] {
    match category {
        "Academic" => &["Education", "Research & Development", "Academic Studies"],
        "Leadership" => &[
            "Business Administration",
            "Political Science",
            "Public Policy",
            "Management",
        ],
        "Sports" => &["Kinesiology", "Sports Management", "Physical Therapy"],
        "Arts" => &["Fine Arts", "Graphic Design", "Music", "Theater"],
        "Community Service" => &[
            "Social Work",
            "Public Health",
            "Nonprofit Management",
            "Psychology",
        ],
        "Work Experience" => &["Business", "Entrepreneurship", "Marketing"],
        _ => &[],
    }
}

pub fn analyze(activities: &[Activity], honors: &[HonorAward]) -> SpikeAnalysis {
    if activities.is_empty() && honors.is_empty() {
        return SpikeAnalysis::default();
    }

    let mut categories = group_by_category(activities);
    attach_honors(&mut categories, honors);

    for category in categories.iter_mut() {
        category.strength = strength(category);
    }
    // Stable: ties keep first-seen category order.
    categories.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranked = categories.into_iter();
    let primary = ranked.next();
    let secondary: Vec<CategoryStrength> = ranked.take(2).collect();

    let recommended_majors = recommend_majors(primary.as_ref(), &secondary);
    let suggested_activities = primary.as_ref().map(suggest_activities).unwrap_or_default();
    let mission_statements = primary
        .as_ref()
        .map(|primary| mission_statements(primary, &secondary, &recommended_majors))
        .unwrap_or_default();

    tracing::debug!(
        primary = primary.as_ref().map(|p| p.category.as_str()),
        secondary = secondary.len(),
        "spike analysis complete"
    );

    SpikeAnalysis {
        primary,
        secondary,
        recommended_majors,
        suggested_activities,
        mission_statements,
    }
}

fn group_by_category(activities: &[Activity]) -> Vec<CategoryStrength> {
    let mut categories: Vec<CategoryStrength> = Vec::new();

    for activity in activities {
        let name = activity.category.as_deref().unwrap_or("Other");
        let index = match categories.iter().position(|c| c.category == name) {
            Some(index) => index,
            None => {
                categories.push(CategoryStrength {
                    category: name.to_string(),
                    strength: 0.0,
                    activities: Vec::new(),
                    total_hours: 0.0,
                    has_leadership: false,
                    honors: Vec::new(),
                });
                categories.len() - 1
            }
        };

        let entry = &mut categories[index];
        entry.activities.push(activity.activity_name.clone());
        entry.total_hours += activity_hours(activity);
        if activity.leadership_position.is_some() {
            entry.has_leadership = true;
        }
    }

    categories
}

/// Lifetime hours, or 0 unless weekly hours, weeks and years are all given.
pub fn activity_hours(activity: &Activity) -> f64 {
    match (
        activity.hours_per_week,
        activity.weeks_per_year,
        activity.years_participated,
    ) {
        (Some(hours), Some(weeks), Some(years)) => hours * weeks * years,
        _ => 0.0,
    }
}

fn attach_honors(categories: &mut [CategoryStrength], honors: &[HonorAward]) {
    for honor in honors {
        let title = honor.title.to_lowercase();
        for category in categories.iter_mut() {
            let matches_category = title.contains(&category.category.to_lowercase());
            let matches_activity = category
                .activities
                .iter()
                .any(|activity| title.contains(&activity.to_lowercase()));
            if matches_category || matches_activity {
                category.honors.push(honor.title.clone());
            }
        }
    }
}

fn strength(category: &CategoryStrength) -> f64 {
    let mut score = category.activities.len() as f64 * 10.0;
    score += (category.total_hours / 100.0).min(50.0);
    if category.has_leadership {
        score += 20.0;
    }
    score + category.honors.len() as f64 * 15.0
}

fn recommend_majors(
    primary: Option<&CategoryStrength>,
    secondary: &[CategoryStrength],
) -> Vec<MajorRecommendation> {
    let mut majors: Vec<MajorRecommendation> = Vec::new();

    if let Some(primary) = primary {
        for major in majors_for_category(&primary.category) {
            majors.push(MajorRecommendation {
                major: major.to_string(),
                relevance: 95,
                reasoning: format!(
                    "Strong alignment with your {} background ({} activities, {} hours)",
                    primary.category.to_lowercase(),
                    primary.activities.len(),
                    primary.total_hours.round()
                ),
            });
        }
    }

    for spike in secondary {
        for major in majors_for_category(&spike.category).iter().take(2) {
            if majors.iter().any(|m| m.major == *major) {
                continue;
            }
            majors.push(MajorRecommendation {
                major: major.to_string(),
                relevance: 75,
                reasoning: format!(
                    "Complements your {} experience",
                    spike.category.to_lowercase()
                ),
            });
        }
    }

    majors.truncate(MAX_MAJORS);
    majors
}

fn suggest_activities(primary: &CategoryStrength) -> Vec<ActivitySuggestion> {
    let mut suggestions = Vec::new();
    let area = primary.category.to_lowercase();

    if !primary.has_leadership {
        suggestions.push(ActivitySuggestion {
            activity: format!("Leadership position in {area}"),
            reasoning: format!(
                "Take on a leadership role in one of your existing {area} activities to demonstrate initiative and impact"
            ),
        });
    }

    if primary.honors.is_empty() {
        suggestions.push(ActivitySuggestion {
            activity: format!("Competition or award in {area}"),
            reasoning: format!(
                "Participate in competitions or apply for awards to validate your excellence in {area}"
            ),
        });
    }

    let focused = match primary.category.as_str() {
        "Academic" => Some((
            "Research project or internship",
            "Demonstrate depth in your academic interests through hands-on research or real-world application",
        )),
        "Leadership" => Some((
            "Launch a new initiative or club",
            "Show entrepreneurial leadership by starting something new that addresses a need in your community",
        )),
        "Community Service" => Some((
            "Long-term community project with measurable impact",
            "Focus on sustained engagement and track quantifiable outcomes to demonstrate meaningful contribution",
        )),
        _ => None,
    };

    if let Some((activity, reasoning)) = focused {
        suggestions.push(ActivitySuggestion {
            activity: activity.to_string(),
            reasoning: reasoning.to_string(),
        });
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn mission_statements(
    primary: &CategoryStrength,
    secondary: &[CategoryStrength],
    majors: &[MajorRecommendation],
) -> Vec<String> {
    let area = primary.category.to_lowercase();
    let commitment = match primary.category.as_str() {
        "Community Service" => "making a positive impact in my community",
        "Academic" => "advancing knowledge and innovation",
        _ => "excellence and collaboration",
    };

    let mut statements = vec![format!("Passionate {area} leader committed to {commitment}")];

    if let Some(honor) = primary.honors.first() {
        statements.push(format!(
            "{honor} recipient dedicated to achieving excellence in {area}"
        ));
    }

    if let Some(next) = secondary.first() {
        statements.push(format!(
            "Well-rounded student combining {area} with {} to create unique perspectives and solutions",
            next.category.to_lowercase()
        ));
    }

    let field = majors
        .first()
        .map_or("my field of study", |major| major.major.as_str());
    statements.push(format!(
        "Driven to leverage my {area} experience to make meaningful contributions in {field}"
    ));

    statements.truncate(MAX_STATEMENTS);
    statements
}
