use crate::models::{AcademicProfile, CollegeFit, CollegeListEntry, CollegeStat, FitCategory};

/// Institutions treated as reaches whenever their acceptance rate is under
/// 10%, whatever the applicant's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliteSchool {
    Harvard,
    Yale,
    Princeton,
    Stanford,
    Mit,
    Columbia,
    Penn,
    Brown,
    Dartmouth,
    Cornell,
    Duke,
    JohnsHopkins,
    Northwestern,
    Vanderbilt,
    Rice,
    WashU,
    UChicago,
    NotreDame,
    Caltech,
    Georgetown,
}

impl EliteSchool {
    pub const ALL: [EliteSchool; 20] = [
        EliteSchool::Harvard,
        EliteSchool::Yale,
        EliteSchool::Princeton,
        EliteSchool::Stanford,
        EliteSchool::Mit,
        EliteSchool::Columbia,
        EliteSchool::Penn,
        EliteSchool::Brown,
        EliteSchool::Dartmouth,
        EliteSchool::Cornell,
        EliteSchool::Duke,
        EliteSchool::JohnsHopkins,
        EliteSchool::Northwestern,
        EliteSchool::Vanderbilt,
        EliteSchool::Rice,
        EliteSchool::WashU,
        EliteSchool::UChicago,
        EliteSchool::NotreDame,
        EliteSchool::Caltech,
        EliteSchool::Georgetown,
    ];

    /// Substring that identifies the school inside a college name.
    pub fn marker(&self) -> &'static str {
        match self {
            EliteSchool::Harvard => "Harvard",
            EliteSchool::Yale => "Yale",
            EliteSchool::Princeton => "Princeton",
            EliteSchool::Stanford => "Stanford",
            EliteSchool::Mit => "MIT",
            EliteSchool::Columbia => "Columbia",
            EliteSchool::Penn => "University of Pennsylvania",
            EliteSchool::Brown => "Brown University",
            EliteSchool::Dartmouth => "Dartmouth",
            EliteSchool::Cornell => "Cornell",
            EliteSchool::Duke => "Duke",
            EliteSchool::JohnsHopkins => "Johns Hopkins",
            EliteSchool::Northwestern => "Northwestern",
            EliteSchool::Vanderbilt => "Vanderbilt",
            EliteSchool::Rice => "Rice",
            EliteSchool::WashU => "Washington University",
            EliteSchool::UChicago => "University of Chicago",
            EliteSchool::NotreDame => "Notre Dame",
            EliteSchool::Caltech => "California Institute of Technology",
            EliteSchool::Georgetown => "Georgetown",
        }
    }

    pub fn matching(name: &str) -> Option<EliteSchool> {
        EliteSchool::ALL
            .into_iter()
            .find(|school| name.contains(school.marker()))
    }
}

/// Sum of per-stat match points and how many stats contributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub total: i32,
    pub criteria: u32,
}

impl MatchScore {
    pub fn average(&self) -> f64 {
        if self.criteria == 0 {
            0.0
        } else {
            self.total as f64 / self.criteria as f64
        }
    }
}

pub fn classify(profile: &AcademicProfile, college: &CollegeStat) -> FitCategory {
    if profile.is_empty() {
        return FitCategory::Target;
    }

    let rate = college.acceptance_rate_percent;

    if rate < 10.0 && EliteSchool::matching(&college.name).is_some() {
        return FitCategory::Reach;
    }

    if rate < 15.0 {
        // Exceptional stats only lift schools at 12% or above; [10, 12) stays a reach.
        if has_exceptional_stats(profile, college) && rate >= 12.0 {
            return FitCategory::Target;
        }
        return FitCategory::Reach;
    }

    let average = match_score(profile, college).average();
    let (safety_at, target_at) = if rate >= 60.0 {
        (0.5, -0.5)
    } else if rate >= 40.0 {
        (1.5, 0.0)
    } else if rate >= 25.0 {
        (1.8, 0.5)
    } else {
        (2.0, 1.0)
    };

    if average >= safety_at {
        FitCategory::Safety
    } else if average >= target_at {
        FitCategory::Target
    } else {
        FitCategory::Reach
    }
}

fn has_exceptional_stats(profile: &AcademicProfile, college: &CollegeStat) -> bool {
    let gpa = profile.gpa > 0.0 && profile.gpa >= college.avg_gpa + 0.15;
    let sat = profile.sat == 0 || profile.sat >= college.avg_sat + 80;
    let act = profile.act == 0 || profile.act >= college.avg_act + 2;
    gpa && sat && act
}

pub fn match_score(profile: &AcademicProfile, college: &CollegeStat) -> MatchScore {
    let mut score = MatchScore {
        total: 0,
        criteria: 0,
    };

    if profile.gpa > 0.0 {
        score.total += gpa_points(profile.gpa - college.avg_gpa);
        score.criteria += 1;
    }

    if profile.sat > 0 {
        score.total += sat_points(profile.sat as i64 - college.avg_sat as i64);
        score.criteria += 1;
    }

    if profile.act > 0 {
        score.total += act_points(profile.act as i64 - college.avg_act as i64);
        score.criteria += 1;
    }

    score
}

pub fn gpa_points(diff: f64) -> i32 {
    if diff >= 0.25 {
        2
    } else if diff >= 0.1 {
        1
    } else if diff >= -0.1 {
        0
    } else if diff >= -0.25 {
        -1
    } else {
        -2
    }
}

pub fn sat_points(diff: i64) -> i32 {
    match diff {
        d if d >= 100 => 2,
        d if d >= 50 => 1,
        d if d >= -50 => 0,
        d if d >= -100 => -1,
        _ => -2,
    }
}

pub fn act_points(diff: i64) -> i32 {
    match diff {
        d if d >= 3 => 2,
        d if d >= 1 => 1,
        d if d >= -1 => 0,
        d if d >= -3 => -1,
        _ => -2,
    }
}

/// Rough percent chance of admission, clamped to 5..=95. Stats the profile
/// leaves unset do not move the estimate.
pub fn admission_chance(profile: &AcademicProfile, college: &CollegeStat) -> u8 {
    let mut chance: i32 = 50;

    if profile.gpa > 0.0 {
        chance += if profile.gpa >= college.avg_gpa {
            20
        } else if profile.gpa >= college.avg_gpa - 0.1 {
            10
        } else {
            -15
        };
    }

    if profile.sat > 0 {
        let sat = profile.sat as i64;
        let avg = college.avg_sat as i64;
        chance += if sat >= avg {
            20
        } else if sat >= avg - 50 {
            10
        } else {
            -15
        };
    }

    let rate = college.acceptance_rate_percent;
    if rate > 30.0 {
        chance += 15;
    } else if rate > 15.0 {
        chance += 5;
    } else if rate < 10.0 {
        chance -= 20;
    }

    chance.clamp(5, 95) as u8
}

pub fn evaluate(
    profile: &AcademicProfile,
    college: &CollegeStat,
    notes: Option<String>,
) -> CollegeFit {
    CollegeFit {
        college: college.clone(),
        category: classify(profile, college),
        match_average: match_score(profile, college).average(),
        admission_chance: admission_chance(profile, college),
        notes,
    }
}

/// Labels every college in order.
pub fn classify_all(profile: &AcademicProfile, colleges: &[CollegeStat]) -> Vec<CollegeFit> {
    colleges
        .iter()
        .map(|college| evaluate(profile, college, None))
        .collect()
}

/// Resolves list entries against the catalog, returning the evaluated fits
/// and the names that matched no college.
pub fn evaluate_list(
    profile: &AcademicProfile,
    entries: &[CollegeListEntry],
    catalog: &crate::catalog::Catalog,
) -> (Vec<CollegeFit>, Vec<String>) {
    let mut fits = Vec::new();
    let mut unresolved = Vec::new();

    for entry in entries {
        match catalog.find(&entry.name) {
            Some(college) => fits.push(evaluate(profile, college, entry.notes.clone())),
            None => {
                tracing::warn!(college = %entry.name, "college not found in catalog");
                unresolved.push(entry.name.clone());
            }
        }
    }

    (fits, unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstitutionKind;

    fn college(name: &str, rate: f64, gpa: f64, sat: u32, act: u32) -> CollegeStat {
        CollegeStat {
            name: name.to_string(),
            location: "Somewhere, USA".to_string(),
            state: "CA".to_string(),
            acceptance_rate_percent: rate,
            avg_gpa: gpa,
            avg_sat: sat,
            avg_act: act,
            tuition: 10_000,
            kind: InstitutionKind::Private,
        }
    }

    #[test]
    fn empty_profile_is_always_target() {
        let empty = AcademicProfile::default();
        for rate in [4.6, 11.0, 14.9, 20.0, 35.0, 50.0, 90.0] {
            let c = college("Harvard University", rate, 3.9, 1500, 34);
            assert_eq!(classify(&empty, &c), FitCategory::Target);
        }
    }

    #[test]
    fn elite_schools_under_ten_percent_are_reaches() {
        let harvard = college("Harvard University", 4.6, 3.94, 1520, 34);
        let perfect = AcademicProfile::new(4.0, 1600, 36);
        assert_eq!(classify(&perfect, &harvard), FitCategory::Reach);
        assert_eq!(EliteSchool::matching(&harvard.name), Some(EliteSchool::Harvard));
    }

    #[test]
    fn elite_marker_is_case_sensitive_substring() {
        assert_eq!(EliteSchool::matching("Rice University"), Some(EliteSchool::Rice));
        assert_eq!(EliteSchool::matching("Smith College"), None);
        assert_eq!(EliteSchool::matching("Pomona College"), None);
    }

    #[test]
    fn selective_band_boundaries() {
        let strong = AcademicProfile::new(4.0, 1600, 36);

        // Exactly 10%: not elite territory, but still below the 12% floor.
        let at_ten = college("Claremont McKenna College", 10.0, 3.7, 1400, 31);
        assert_eq!(classify(&strong, &at_ten), FitCategory::Reach);

        let at_eleven = college("Tulane University", 11.1, 3.56, 1410, 31);
        assert_eq!(classify(&strong, &at_eleven), FitCategory::Reach);

        let at_twelve = college("New York University", 12.0, 3.69, 1440, 32);
        assert_eq!(classify(&strong, &at_twelve), FitCategory::Target);

        let weak = AcademicProfile::new(3.7, 1440, 32);
        assert_eq!(classify(&weak, &at_twelve), FitCategory::Reach);

        // At 15% the general band applies: +2 on every stat clears the 2.0 bar.
        let at_fifteen = college("Tufts University", 15.0, 3.7, 1400, 31);
        assert_eq!(classify(&strong, &at_fifteen), FitCategory::Safety);
    }

    #[test]
    fn elite_name_between_ten_and_fifteen_uses_selective_band() {
        let cornell = college("Cornell University", 12.5, 3.7, 1400, 31);
        let strong = AcademicProfile::new(4.0, 1600, 36);
        assert_eq!(classify(&strong, &cornell), FitCategory::Target);
    }

    #[test]
    fn exceptional_stats_require_a_gpa() {
        let c = college("Some College", 13.0, 3.5, 1300, 28);
        let sat_only = AcademicProfile::new(0.0, 1600, 0);
        assert_eq!(classify(&sat_only, &c), FitCategory::Reach);
    }

    #[test]
    fn unset_test_scores_do_not_block_exceptional_stats() {
        let c = college("Some College", 13.0, 3.5, 1300, 28);
        assert_eq!(classify(&AcademicProfile::new(3.7, 0, 31), &c), FitCategory::Target);
        assert_eq!(classify(&AcademicProfile::new(3.7, 1400, 0), &c), FitCategory::Target);
    }

    #[test]
    fn selective_band_sat_margin_is_eighty() {
        let c = college("Some College", 13.0, 3.5, 1300, 28);
        assert_eq!(classify(&AcademicProfile::new(3.7, 1379, 0), &c), FitCategory::Reach);
        assert_eq!(classify(&AcademicProfile::new(3.7, 1380, 0), &c), FitCategory::Target);
    }

    #[test]
    fn selective_band_act_margin_is_two() {
        let c = college("Some College", 13.0, 3.5, 1300, 28);
        assert_eq!(classify(&AcademicProfile::new(3.7, 0, 29), &c), FitCategory::Reach);
        assert_eq!(classify(&AcademicProfile::new(3.7, 0, 30), &c), FitCategory::Target);
    }

    #[test]
    fn selective_bucket_thresholds() {
        let c = college("Selective College", 30.0, 3.5, 1200, 25);

        // 5/3 sits between 1.5 and 1.8.
        assert_eq!(classify(&AcademicProfile::new(3.8, 1300, 26), &c), FitCategory::Target);
        assert_eq!(classify(&AcademicProfile::new(3.8, 1300, 0), &c), FitCategory::Safety);

        // Exactly 0.5 is a target; 1/3 falls short.
        assert_eq!(classify(&AcademicProfile::new(3.65, 1200, 0), &c), FitCategory::Target);
        assert_eq!(classify(&AcademicProfile::new(3.65, 1200, 25), &c), FitCategory::Reach);
    }

    #[test]
    fn match_points_follow_thresholds() {
        assert_eq!(gpa_points(0.3), 2);
        assert_eq!(gpa_points(0.1), 1);
        assert_eq!(gpa_points(-0.1), 0);
        assert_eq!(gpa_points(-0.2), -1);
        assert_eq!(gpa_points(-0.3), -2);
        assert_eq!(sat_points(100), 2);
        assert_eq!(sat_points(-50), 0);
        assert_eq!(sat_points(-101), -2);
        assert_eq!(act_points(1), 1);
        assert_eq!(act_points(-3), -1);
        assert_eq!(act_points(-4), -2);
    }

    #[test]
    fn match_score_averages_only_reported_stats() {
        let c = college("State University", 70.0, 3.5, 1200, 25);
        let gpa_only = AcademicProfile::new(3.8, 0, 0);
        let score = match_score(&gpa_only, &c);
        assert_eq!(score.criteria, 1);
        assert_eq!(score.total, 2);
        assert!((score.average() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn general_band_buckets() {
        let profile = AcademicProfile::new(3.5, 1200, 25);
        let par = |rate| college("Par College", rate, 3.5, 1200, 25);

        assert_eq!(classify(&profile, &par(70.0)), FitCategory::Target);
        assert_eq!(classify(&profile, &par(50.0)), FitCategory::Target);
        assert_eq!(classify(&profile, &par(30.0)), FitCategory::Reach);
        assert_eq!(classify(&profile, &par(20.0)), FitCategory::Reach);

        let above = AcademicProfile::new(3.7, 1260, 27);
        assert_eq!(classify(&above, &par(70.0)), FitCategory::Safety);
        assert_eq!(classify(&above, &par(50.0)), FitCategory::Target);
    }

    #[test]
    fn rising_gpa_never_lowers_the_outlook() {
        let c = college("Rutgers University", 60.0, 3.73, 1300, 28);
        let mut previous = FitCategory::Reach;
        let mut gpa = 2.0;
        while gpa <= 4.5 {
            let category = classify(&AcademicProfile::new(gpa, 1250, 0), &c);
            assert!(category >= previous, "gpa {gpa} dropped to {category}");
            previous = category;
            gpa += 0.05;
        }
        assert_eq!(previous, FitCategory::Safety);
    }

    #[test]
    fn classification_is_repeatable() {
        let c = college("University of Michigan", 20.2, 3.88, 1435, 32);
        let profile = AcademicProfile::new(3.95, 1500, 33);
        assert_eq!(classify(&profile, &c), classify(&profile, &c));
    }

    #[test]
    fn admission_chance_is_clamped() {
        let harvard = college("Harvard University", 4.6, 3.94, 1520, 34);
        let weak = AcademicProfile::new(2.5, 900, 0);
        assert_eq!(admission_chance(&weak, &harvard), 5);

        let open = college("Community College", 100.0, 3.0, 1000, 20);
        let strong = AcademicProfile::new(4.0, 1500, 0);
        assert_eq!(admission_chance(&strong, &open), 95);
    }

    #[test]
    fn admission_chance_skips_unset_sat() {
        let c = college("Mid University", 20.0, 3.6, 1300, 28);
        let gpa_only = AcademicProfile::new(3.65, 0, 0);
        assert_eq!(admission_chance(&gpa_only, &c), 75);
    }
}
