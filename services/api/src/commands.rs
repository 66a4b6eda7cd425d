use crate::infra::{
    parse_self_positioning, parse_time_range, InMemoryParticipationStore, UnconfiguredClassifier,
};
use bussola::config::{AppConfig, QuizConfig};
use bussola::error::AppError;
use bussola::quiz::{
    axis_highlights, Category, ClassificationResult, LikertAnswer, QuizBuilder, QuizCompletion,
    QuizService, SelfPositioningId, Statement,
};
use bussola::ranking::{ParticipationRecord, RankingSummary, TimeRange};
use chrono::Utc;
use clap::{Args, ValueEnum};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuizBuildArgs {
    /// Number of statements to draw (defaults to APP_QUIZ_SIZE)
    #[arg(long)]
    pub(crate) size: Option<usize>,
    /// Seed for a reproducible draw (defaults to APP_QUIZ_SEED, then entropy)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the question set as JSON instead of a numbered list
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuizScoreArgs {
    /// JSON file holding an array of `{ "statementId", "value" }` answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Self-placement to compare against (left, center_left, center, center_right, right, unsure)
    #[arg(long, value_parser = parse_self_positioning)]
    pub(crate) self_assessment: Option<SelfPositioningId>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct RankingExportArgs {
    /// JSON file holding an array of participation records
    #[arg(long)]
    pub(crate) records: PathBuf,
    /// Window to summarise: 7d, 30d or all
    #[arg(long, value_parser = parse_time_range)]
    pub(crate) range: Option<TimeRange>,
    /// Output format; csv renders the monthly trend only
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub(crate) format: ExportFormat,
}

pub(crate) fn run_quiz_build(args: QuizBuildArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let target_size = args.size.unwrap_or(config.quiz.target_size);
    let mut builder = match args.seed.or(config.quiz.seed) {
        Some(seed) => QuizBuilder::seeded(seed),
        None => QuizBuilder::from_entropy(),
    };

    let set = builder.build(&bussola::quiz::all_statements(), target_size);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    render_question_set(&set, target_size);
    Ok(())
}

pub(crate) fn run_quiz_score(args: QuizScoreArgs) -> Result<(), AppError> {
    let answers: Vec<LikertAnswer> = read_json_file(&args.answers)?;

    let service = QuizService::new(
        Arc::new(UnconfiguredClassifier),
        Arc::new(InMemoryParticipationStore::default()),
        &QuizConfig::default(),
    );
    let known: HashSet<_> = service.bank().iter().map(|statement| statement.id).collect();
    let unknown = answers
        .iter()
        .filter(|answer| !known.contains(&answer.statement_id))
        .count();

    let result = service.complete(QuizCompletion {
        answers,
        self_assessment: args.self_assessment,
        ..QuizCompletion::default()
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    render_result(&result);
    if unknown > 0 {
        println!("  ({unknown} answers referenced unknown statements and were ignored)");
    }
    Ok(())
}

pub(crate) fn run_ranking_export(args: RankingExportArgs) -> Result<(), AppError> {
    let records: Vec<ParticipationRecord> = read_json_file(&args.records)?;
    let summary = RankingSummary::compute(&records, args.range.unwrap_or_default(), Utc::now());

    match args.format {
        ExportFormat::Json => println!("{}", summary.to_json_pretty()?),
        ExportFormat::Csv => print!("{}", summary.monthly_trend_csv()?),
    }
    Ok(())
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("{}: {err}", path.display())))
}

pub(crate) fn render_question_set(set: &[Statement], target_size: usize) {
    if set.is_empty() {
        println!(
            "No questions drawn: a size of {target_size} cannot cover all {} categories",
            Category::ALL.len()
        );
        return;
    }

    println!("Question set ({} statements)", set.len());
    for (index, statement) in set.iter().enumerate() {
        println!(
            "{:>3}. [{}] {}",
            index + 1,
            statement.category.label(),
            statement.text
        );
    }
}

pub(crate) fn render_result(result: &ClassificationResult) {
    println!("Result: {} ({:?})", result.label, result.origin);
    for axis in Category::ALL {
        println!(
            "  - {:<9} {:>5.2}",
            axis.label(),
            result.axis_scores.get(axis)
        );
    }

    println!("  Strongest leanings:");
    for highlight in axis_highlights(&result.axis_scores) {
        println!(
            "    - {} {:.2} ({:?}, {:.2} from neutral)",
            highlight.axis.label(),
            highlight.value,
            highlight.pole,
            highlight.strength
        );
    }

    if let Some(selection) = &result.self_assessment {
        match selection.scores {
            Some(reference) => {
                println!("  Self-placement: {}", selection.label);
                for axis in Category::ALL {
                    let delta = result.axis_scores.get(axis) - reference.get(axis);
                    println!("    - {:<9} {:+.2}", axis.label(), delta);
                }
            }
            None => println!("  Self-placement: {} (no comparison)", selection.label),
        }
    }

    println!(
        "  Intensity {:.1} | confidence {:.0}%",
        result.intensity, result.confidence
    );
    println!("  {}", result.explanation);
}
