use crate::commands::{render_question_set, render_result};
use crate::infra::{InMemoryParticipationStore, UnconfiguredClassifier};
use bussola::config::QuizConfig;
use bussola::error::AppError;
use bussola::quiz::{
    self_positioning_options, Category, LikertAnswer, LikertValue, QuizCompletion, QuizService,
    SelfPositioningId, Statement,
};
use bussola::ranking::TimeRange;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const DEMO_REGIONS: [&str; 6] = ["SP", "RJ", "MG", "BA", "RS", "PE"];
const HISTORY_DAYS: i64 = 170;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed driving question sampling and the simulated answers
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Number of simulated participants
    #[arg(long, default_value_t = 24)]
    pub(crate) participants: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            seed: 7,
            participants: 24,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, participants } = args;
    let now = Utc::now();

    println!("Bussola quiz demo (seed {seed})");
    println!("\nSelf-positioning options");
    for option in self_positioning_options() {
        println!("  - {:<13} {}", option.label, option.description);
    }

    let store = Arc::new(InMemoryParticipationStore::default());
    let service = QuizService::new(
        Arc::new(UnconfiguredClassifier),
        store,
        &QuizConfig {
            seed: Some(seed),
            ..QuizConfig::default()
        },
    );

    let set = service.new_quiz(None);
    println!();
    render_question_set(&set, QuizConfig::default().target_size);
    if set.is_empty() {
        return Ok(());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for participant in 0..participants {
        let completion = simulated_completion(&set, &mut rng);
        let completed_at = simulated_timestamp(now, &mut rng);
        let result = service.complete_at(completion, completed_at)?;

        if participant == 0 {
            println!("\nFirst participant");
            render_result(&result);
        }
    }

    let summary = service.ranking(TimeRange::All, now)?;
    println!(
        "\nRanking ({}, {} participants)",
        summary.range_label, summary.participants
    );
    if let Some(averages) = summary.averages {
        for axis in Category::ALL {
            println!("  - average {:<9} {:>5.2}", axis.label(), averages.get(axis));
        }
    }
    println!("  Distribution:");
    for share in &summary.distribution {
        println!(
            "    - {:<20} {:>3} ({:.1}%)",
            share.label, share.count, share.percentage
        );
    }
    println!("  Regions ({} shared):", summary.regions.total);
    for region in &summary.regions.by_region {
        println!("    - {} {}", region.region, region.count);
    }

    println!("\nMonthly trend (CSV)");
    print!("{}", summary.monthly_trend_csv()?);

    let recent = service.ranking(TimeRange::Last30Days, now)?;
    println!("\n{}: {} participants", recent.range_label, recent.participants);

    Ok(())
}

fn simulated_completion(set: &[Statement], rng: &mut StdRng) -> QuizCompletion {
    let answers = set
        .iter()
        .map(|statement| {
            let value = LikertValue::try_from(rng.gen_range(1..=5u8))
                .unwrap_or(LikertValue::NEUTRAL);
            LikertAnswer::new(statement.id, value)
        })
        .collect();

    let self_assessment = SelfPositioningId::ORDERED.choose(&mut *rng).copied();
    let region = DEMO_REGIONS.choose(&mut *rng).map(|region| region.to_string());

    QuizCompletion {
        answers,
        question_ids: set.iter().map(|statement| statement.id).collect(),
        self_assessment,
        region,
        region_opt_in: rng.gen_bool(0.7),
    }
}

fn simulated_timestamp(now: DateTime<Utc>, rng: &mut StdRng) -> DateTime<Utc> {
    let days = rng.gen_range(0..HISTORY_DAYS);
    let minutes = rng.gen_range(0..24 * 60);
    now - Duration::days(days) - Duration::minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_completions_answer_every_question() {
        let bank = bussola::quiz::all_statements();
        let set = bussola::quiz::QuizBuilder::seeded(1).build(&bank, 8);
        let mut rng = StdRng::seed_from_u64(1);

        let completion = simulated_completion(&set, &mut rng);

        assert_eq!(completion.answers.len(), 8);
        assert_eq!(completion.question_ids.len(), 8);
        assert!(completion.region.is_some());
    }

    #[test]
    fn simulated_timestamps_stay_within_history() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..50 {
            let at = simulated_timestamp(now, &mut rng);
            assert!(at <= now);
            assert!(at > now - Duration::days(HISTORY_DAYS + 1));
        }
    }

    #[test]
    fn demo_runs_end_to_end() {
        let outcome = run_demo(DemoArgs {
            seed: 3,
            participants: 5,
        });
        assert!(outcome.is_ok());
    }
}
