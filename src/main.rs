use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use college_fit::catalog::Catalog;
use college_fit::config::AppConfig;
use college_fit::models::{AcademicProfile, CollegeListEntry, Course, LetterGrade};
use college_fit::report::{self, ReportInput};
use college_fit::{classify, grades, records, spike, telemetry};

#[derive(Parser)]
#[command(name = "college-fit")]
#[command(about = "College list categorization and GPA what-if planning", long_about = None)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProfileArgs {
    /// Unweighted GPA (overrides --gpa-records)
    #[arg(long)]
    gpa: Option<f64>,
    /// SAT composite (overrides --score-records)
    #[arg(long)]
    sat: Option<u32>,
    /// ACT composite (overrides --score-records)
    #[arg(long)]
    act: Option<u32>,
    /// CSV of semester GPA entries
    #[arg(long)]
    gpa_records: Option<PathBuf>,
    /// CSV of test scores
    #[arg(long)]
    score_records: Option<PathBuf>,
}

impl ProfileArgs {
    fn resolve(&self) -> anyhow::Result<AcademicProfile> {
        let entries = match &self.gpa_records {
            Some(path) => records::load_gpa_entries(path)?,
            None => Vec::new(),
        };
        let scores = match &self.score_records {
            Some(path) => records::load_test_scores(path)?,
            None => Vec::new(),
        };

        let mut profile = AcademicProfile::from_records(&entries, &scores);
        if let Some(gpa) = self.gpa {
            profile.gpa = gpa;
        }
        if let Some(sat) = self.sat {
            profile.sat = sat;
        }
        if let Some(act) = self.act {
            profile.act = act;
        }

        tracing::debug!(gpa = profile.gpa, sat = profile.sat, act = profile.act, "resolved profile");
        Ok(profile)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the college catalog by name, city or state
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Label colleges safety, target or reach
    Classify {
        #[command(flatten)]
        profile: ProfileArgs,
        /// College names as listed in the catalog
        #[arg(required = true)]
        colleges: Vec<String>,
    },
    /// Show the weighted GPA for a course list
    Gpa {
        #[arg(long)]
        courses: PathBuf,
    },
    /// Project the weighted GPA with one course's grade changed
    WhatIf {
        #[arg(long)]
        courses: PathBuf,
        #[arg(long)]
        course: String,
        #[arg(long)]
        grade: LetterGrade,
    },
    /// Find the grade needed in one course to reach a target GPA
    Target {
        #[arg(long)]
        courses: PathBuf,
        #[arg(long)]
        course: String,
        #[arg(long)]
        gpa: f64,
    },
    /// Find the extracurricular category with the most depth
    Spike {
        #[arg(long)]
        activities: PathBuf,
        #[arg(long)]
        honors: Option<PathBuf>,
    },
    /// Generate a markdown report for a college list
    Report {
        #[arg(long)]
        colleges: PathBuf,
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long)]
        courses: Option<PathBuf>,
        #[arg(long)]
        activities: Option<PathBuf>,
        #[arg(long)]
        honors: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("invalid configuration")?;
    telemetry::init(&config.log_level).context("failed to initialise logging")?;

    match cli.command {
        Commands::Search { query, limit } => {
            let catalog = load_catalog(&config)?;
            let results = catalog.search(&query, limit.unwrap_or(config.search_limit));

            if cli.json {
                return print_json(&results);
            }
            if results.is_empty() {
                println!("No colleges match '{query}'.");
                return Ok(());
            }
            for college in results {
                println!(
                    "- {} ({}, {}) acceptance {:.1}%, GPA {:.2}, SAT {}, ACT {}",
                    college.name,
                    college.location,
                    college.kind,
                    college.acceptance_rate_percent,
                    college.avg_gpa,
                    college.avg_sat,
                    college.avg_act
                );
            }
        }
        Commands::Classify { profile, colleges } => {
            let catalog = load_catalog(&config)?;
            let profile = profile.resolve()?;
            let entries: Vec<CollegeListEntry> = colleges
                .into_iter()
                .map(|name| CollegeListEntry { name, notes: None })
                .collect();
            let (fits, unresolved) = classify::evaluate_list(&profile, &entries, &catalog);

            if cli.json {
                return print_json(&fits);
            }
            if profile.is_empty() {
                println!("No GPA or test scores given; defaulting every college to target.");
            }
            for fit in &fits {
                println!(
                    "- {}: {} (match {:+.2}, est. chance {}%)",
                    fit.college.name, fit.category, fit.match_average, fit.admission_chance
                );
            }
            for name in &unresolved {
                println!("- {name}: not found in catalog");
            }
        }
        Commands::Gpa { courses } => {
            let courses = records::load_courses(&courses)?;
            let current = grades::weighted_gpa(&courses, &[]);

            if cli.json {
                return print_json(&serde_json::json!({
                    "weighted_gpa": current,
                    "courses": courses,
                }));
            }
            println!("Weighted GPA {:.3} across {} courses", current, courses.len());
            for course in &courses {
                match course.current_grade.letter() {
                    Some(grade) => println!(
                        "- [{}] {} ({}, {} credits): {} = {:.1} points",
                        course.id,
                        course.name,
                        course.tier,
                        course.credits,
                        grade,
                        grades::grade_points(grade, course.tier)
                    ),
                    None => println!(
                        "- [{}] {}: '{}' not counted",
                        course.id, course.name, course.current_grade
                    ),
                }
            }
        }
        Commands::WhatIf {
            courses,
            course,
            grade,
        } => {
            let courses = records::load_courses(&courses)?;
            let target = find_course(&courses, &course)?;
            let scenario = grades::scenario(&courses, &target.id, grade);

            if cli.json {
                return print_json(&scenario);
            }
            println!(
                "{} at {}: weighted GPA {:.3} ({:+.3})",
                target.name, grade, scenario.projected_gpa, scenario.delta
            );
        }
        Commands::Target {
            courses,
            course,
            gpa,
        } => {
            let courses = records::load_courses(&courses)?;
            let target = find_course(&courses, &course)?;
            let first = grades::min_grade_for_target(&courses, &target.id, gpa);
            let floor = grades::lowest_grade_for_target(&courses, &target.id, gpa);

            if cli.json {
                return print_json(&serde_json::json!({
                    "course_id": target.id,
                    "target_gpa": gpa,
                    "min_grade": first,
                    "lowest_grade": floor,
                }));
            }
            match floor {
                Some(grade) => println!(
                    "{} needs at least {} to reach a {:.2} weighted GPA.",
                    target.name, grade, gpa
                ),
                None => println!(
                    "A {:.2} weighted GPA is not achievable through {} alone.",
                    gpa, target.name
                ),
            }
        }
        Commands::Spike { activities, honors } => {
            let activities = records::load_activities(&activities)?;
            let honors = match honors {
                Some(path) => records::load_honors(&path)?,
                None => Vec::new(),
            };
            let analysis = spike::analyze(&activities, &honors);

            if cli.json {
                return print_json(&analysis);
            }
            let Some(primary) = &analysis.primary else {
                println!("No activities recorded.");
                return Ok(());
            };
            println!(
                "Primary spike: {} (strength {:.1}, {} activities)",
                primary.category,
                primary.strength,
                primary.activities.len()
            );
            for secondary in &analysis.secondary {
                println!("Secondary: {} (strength {:.1})", secondary.category, secondary.strength);
            }
            for major in &analysis.recommended_majors {
                println!("- {} ({}): {}", major.major, major.relevance, major.reasoning);
            }
            for suggestion in &analysis.suggested_activities {
                println!("* {}: {}", suggestion.activity, suggestion.reasoning);
            }
            for statement in &analysis.mission_statements {
                println!("> {statement}");
            }
        }
        Commands::Report {
            colleges,
            profile,
            courses,
            activities,
            honors,
            out,
        } => {
            let catalog = load_catalog(&config)?;
            let profile = profile.resolve()?;
            let entries = records::load_college_list(&colleges)?;
            let (fits, unresolved) = classify::evaluate_list(&profile, &entries, &catalog);
            let courses = load_optional(courses.as_deref(), records::load_courses)?;
            let activities = load_optional(activities.as_deref(), records::load_activities)?;
            let honors = load_optional(honors.as_deref(), records::load_honors)?;
            let analysis = spike::analyze(&activities, &honors);

            let input = ReportInput {
                generated_on: chrono::Utc::now().date_naive(),
                profile: &profile,
                fits: &fits,
                unresolved: &unresolved,
                courses: &courses,
                spike: Some(&analysis),
            };
            std::fs::write(&out, report::build_report(&input))
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), colleges = fits.len(), "report written");

            if cli.json {
                return print_json(&report::summarize(&input));
            }
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::embedded().context("embedded college catalog is invalid")?,
    };
    Ok(catalog)
}

fn load_optional<T, E>(
    path: Option<&Path>,
    load: impl FnOnce(&Path) -> Result<Vec<T>, E>,
) -> Result<Vec<T>, E> {
    match path {
        Some(path) => load(path),
        None => Ok(Vec::new()),
    }
}

fn find_course<'a>(courses: &'a [Course], id: &str) -> anyhow::Result<&'a Course> {
    courses
        .iter()
        .find(|course| course.id == id)
        .with_context(|| format!("no course with id '{id}'"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
