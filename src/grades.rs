use crate::models::{Course, CourseTier, GradeImpactScenario, GradeOverride, LetterGrade};

pub fn grade_points(grade: LetterGrade, tier: CourseTier) -> f64 {
    let (regular, honors, ap_ib) = match grade {
        LetterGrade::APlus | LetterGrade::A => (4.0, 4.5, 5.0),
        LetterGrade::AMinus => (3.7, 4.2, 4.7),
        LetterGrade::BPlus => (3.3, 3.8, 4.3),
        LetterGrade::B => (3.0, 3.5, 4.0),
        LetterGrade::BMinus => (2.7, 3.2, 3.7),
        LetterGrade::CPlus => (2.3, 2.8, 3.3),
        LetterGrade::C => (2.0, 2.5, 3.0),
        LetterGrade::CMinus => (1.7, 2.2, 2.7),
        LetterGrade::D => (1.0, 1.0, 1.0),
        LetterGrade::F => (0.0, 0.0, 0.0),
    };

    match tier {
        CourseTier::Regular => regular,
        CourseTier::Honors => honors,
        CourseTier::ApIb => ap_ib,
    }
}

/// Credit-weighted GPA with any overrides applied. Courses whose grade is
/// not a table letter are left out of both sums; no credits yields 0.
pub fn weighted_gpa(courses: &[Course], overrides: &[GradeOverride]) -> f64 {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;

    for course in courses {
        let grade = overrides
            .iter()
            .find(|o| o.course_id == course.id)
            .map(|o| o.new_grade)
            .or_else(|| course.current_grade.letter());

        let Some(grade) = grade else {
            continue;
        };

        total_points += grade_points(grade, course.tier) * course.credits;
        total_credits += course.credits;
    }

    if total_credits == 0.0 {
        0.0
    } else {
        total_points / total_credits
    }
}

pub fn impact(courses: &[Course], course_id: &str, grade: LetterGrade) -> f64 {
    scenario(courses, course_id, grade).delta
}

pub fn scenario(courses: &[Course], course_id: &str, grade: LetterGrade) -> GradeImpactScenario {
    let current = weighted_gpa(courses, &[]);
    let projected = weighted_gpa(courses, &[GradeOverride::new(course_id, grade)]);

    GradeImpactScenario {
        course_id: course_id.to_string(),
        hypothetical_grade: grade,
        projected_gpa: projected,
        delta: projected - current,
    }
}

/// Walks the table from A+ down and returns the first grade in `course_id`
/// that brings the weighted GPA to `target`.
pub fn min_grade_for_target(
    courses: &[Course],
    course_id: &str,
    target: f64,
) -> Option<LetterGrade> {
    LetterGrade::DESCENDING.into_iter().find(|grade| {
        weighted_gpa(courses, &[GradeOverride::new(course_id, *grade)]) >= target
    })
}

pub fn lowest_grade_for_target(
    courses: &[Course],
    course_id: &str,
    target: f64,
) -> Option<LetterGrade> {
    LetterGrade::DESCENDING
        .into_iter()
        .take_while(|grade| {
            weighted_gpa(courses, &[GradeOverride::new(course_id, *grade)]) >= target
        })
        .last()
}

pub fn course_outlook(courses: &[Course], course_id: &str) -> Vec<GradeImpactScenario> {
    LetterGrade::DESCENDING
        .into_iter()
        .map(|grade| scenario(courses, course_id, grade))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportedGrade;

    fn course(id: &str, grade: &str, credits: f64, tier: CourseTier) -> Course {
        Course {
            id: id.to_string(),
            name: format!("Course {id}"),
            current_grade: ReportedGrade::from(grade.to_string()),
            credits,
            tier,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_ap_course_recomputes() {
        let courses = vec![course("1", "B+", 4.0, CourseTier::ApIb)];
        assert!(close(weighted_gpa(&courses, &[]), 4.3));
        let overrides = [GradeOverride::new("1", LetterGrade::A)];
        assert!(close(weighted_gpa(&courses, &overrides), 5.0));
        assert!(close(impact(&courses, "1", LetterGrade::A), 0.7));
    }

    #[test]
    fn no_courses_yields_zero() {
        assert_eq!(weighted_gpa(&[], &[]), 0.0);
        assert_eq!(impact(&[], "missing", LetterGrade::A), 0.0);
    }

    #[test]
    fn credits_weight_the_average() {
        let courses = vec![
            course("calc", "A", 4.0, CourseTier::ApIb),
            course("gov", "B", 2.0, CourseTier::Regular),
        ];
        let expected = (5.0 * 4.0 + 3.0 * 2.0) / 6.0;
        assert!(close(weighted_gpa(&courses, &[]), expected));
    }

    #[test]
    fn unlisted_grades_are_skipped() {
        let courses = vec![
            course("pe", "P", 1.0, CourseTier::Regular),
            course("bio", "A-", 4.0, CourseTier::Honors),
        ];
        assert!(close(weighted_gpa(&courses, &[]), 4.2));

        let only_pass = vec![course("pe", "P", 1.0, CourseTier::Regular)];
        assert_eq!(weighted_gpa(&only_pass, &[]), 0.0);
    }

    #[test]
    fn override_applies_to_unlisted_grade() {
        let courses = vec![course("pe", "INC", 1.0, CourseTier::Regular)];
        let overrides = [GradeOverride::new("pe", LetterGrade::B)];
        assert!(close(weighted_gpa(&courses, &overrides), 3.0));
    }

    #[test]
    fn unknown_course_id_has_no_effect() {
        let courses = vec![course("1", "B", 3.0, CourseTier::Regular)];
        assert_eq!(impact(&courses, "nope", LetterGrade::A), 0.0);
    }

    #[test]
    fn scenario_reports_delta_from_unmodified_list() {
        let courses = vec![
            course("phys", "B+", 4.0, CourseTier::ApIb),
            course("lit", "A-", 4.0, CourseTier::ApIb),
        ];
        let s = scenario(&courses, "phys", LetterGrade::B);
        assert_eq!(s.hypothetical_grade, LetterGrade::B);
        assert!(close(s.projected_gpa, (4.0 + 4.7) / 2.0));
        assert!(close(s.delta, (4.0 + 4.7) / 2.0 - (4.3 + 4.7) / 2.0));
    }

    #[test]
    fn min_grade_reaches_current_average() {
        let courses = vec![
            course("a", "A", 4.0, CourseTier::Regular),
            course("b", "A", 4.0, CourseTier::Regular),
        ];
        assert!(close(weighted_gpa(&courses, &[]), 4.0));
        let grade = min_grade_for_target(&courses, "a", 4.0);
        assert!(matches!(grade, Some(LetterGrade::APlus) | Some(LetterGrade::A)));
        assert_eq!(min_grade_for_target(&courses, "a", 10.0), None);
    }

    #[test]
    fn lowest_grade_finds_the_floor() {
        let courses = vec![
            course("a", "A", 4.0, CourseTier::Regular),
            course("b", "B", 4.0, CourseTier::Regular),
        ];
        // Need (x + 3.0) / 2 >= 3.0, so any grade worth 3.0 or more.
        assert_eq!(lowest_grade_for_target(&courses, "a", 3.0), Some(LetterGrade::B));
        assert_eq!(lowest_grade_for_target(&courses, "a", 0.0), Some(LetterGrade::F));
        assert_eq!(lowest_grade_for_target(&courses, "a", 4.5), None);
    }

    #[test]
    fn outlook_lists_every_grade_best_first() {
        let courses = vec![course("1", "B", 3.0, CourseTier::Honors)];
        let outlook = course_outlook(&courses, "1");
        assert_eq!(outlook.len(), LetterGrade::DESCENDING.len());
        assert_eq!(outlook[0].hypothetical_grade, LetterGrade::APlus);
        assert!(close(outlook[4].delta, 0.0));
        assert!(outlook.windows(2).all(|w| w[0].projected_gpa >= w[1].projected_gpa));
    }

    #[test]
    fn weighted_gpa_is_repeatable() {
        let courses = vec![course("1", "C+", 3.0, CourseTier::Honors)];
        assert_eq!(weighted_gpa(&courses, &[]), weighted_gpa(&courses, &[]));
    }
}
