use super::common::*;
use crate::quiz::bank::all_statements;
use crate::quiz::domain::{AxisScores, Category, LikertAnswer, StatementId};
use crate::quiz::scoring::aggregate;

#[test]
fn empty_answers_stay_neutral() {
    let scores = aggregate(&[], &all_statements());
    assert_eq!(scores, scores_of(5.0));
}

fn scores_of(value: f64) -> AxisScores {
    scores(value, value, value, value)
}

#[test]
fn strong_agreement_with_negative_effect_moves_axis_down_one_point() {
    let bank = vec![statement(1, Category::Economic, -1.0, 1.0)];

    let result = aggregate(&[answer(1, 5)], &bank);

    assert_eq!(result.economic, 4.0);
    assert_eq!(result.social, 5.0);
    assert_eq!(result.cultural, 5.0);
    assert_eq!(result.national, 5.0);
}

#[test]
fn disagreement_reverses_the_direction() {
    let bank = vec![statement(6, Category::Social, 1.0, 1.2)];

    let result = aggregate(&[answer(6, 2)], &bank);

    assert!((result.social - 4.4).abs() < 1e-12);
}

#[test]
fn neutral_answers_do_not_move_any_axis() {
    let bank = all_statements();
    let answers: Vec<LikertAnswer> = bank.iter().map(|s| answer(s.id.0, 3)).collect();

    assert_eq!(aggregate(&answers, &bank), scores_of(5.0));
}

#[test]
fn unknown_statement_ids_are_skipped() {
    let bank = vec![statement(1, Category::Economic, -1.0, 1.0)];

    let result = aggregate(&[answer(1, 5), answer(999, 1)], &bank);

    assert_eq!(result, scores(4.0, 5.0, 5.0, 5.0));
}

#[test]
fn statements_can_move_several_axes() {
    let mut multi = statement(30, Category::Cultural, 1.0, 1.0);
    multi.effect.insert(Category::National, -0.5);

    let result = aggregate(&[answer(30, 5)], &[multi]);

    assert_eq!(result.cultural, 6.0);
    assert_eq!(result.national, 4.5);
    assert_eq!(result.economic, 5.0);
}

#[test]
fn totals_are_clamped_into_range() {
    let bank: Vec<_> = (1..=8)
        .map(|id| statement(id, Category::National, 1.0, 2.0))
        .collect();
    let agree: Vec<_> = (1..=8).map(|id| answer(id, 5)).collect();
    let disagree: Vec<_> = (1..=8).map(|id| answer(id, 1)).collect();

    assert_eq!(aggregate(&agree, &bank).national, 10.0);
    assert_eq!(aggregate(&disagree, &bank).national, 0.0);
}

#[test]
fn every_uniform_answer_pattern_stays_within_bounds() {
    let bank = all_statements();
    for value in 1..=5 {
        let answers: Vec<_> = bank.iter().map(|s| answer(s.id.0, value)).collect();
        let result = aggregate(&answers, &bank);
        for axis in Category::ALL {
            let score = result.get(axis);
            assert!((0.0..=10.0).contains(&score), "{axis:?} = {score}");
        }
    }
}

#[test]
fn bundled_bank_full_agreement_matches_hand_totals() {
    let bank = all_statements();
    let answers: Vec<_> = bank.iter().map(|s| answer(s.id.0, 5)).collect();

    let result = aggregate(&answers, &bank);

    // economic: 2 * 0.5 * (-1.0 - 1.2 + 1.0 + 1.1 - 0.9) = -1.0
    assert!((result.economic - 4.0).abs() < 1e-9);
    // social: 1.0 - 1.2 + 1.0 - 1.1 + 1.0 = 0.7
    assert!((result.social - 5.7).abs() < 1e-9);
    // cultural: 1.2 - 1.1 + 1.0 - 1.0 + 0.9 = 1.0
    assert!((result.cultural - 6.0).abs() < 1e-9);
    // national: 1.0 - 1.2 + 1.0 - 0.8 + 1.1 = 1.1
    assert!((result.national - 6.1).abs() < 1e-9);
}

#[test]
fn duplicate_ids_in_the_bank_resolve_to_the_first_statement() {
    let bank = vec![
        statement(1, Category::Economic, -1.0, 1.0),
        statement(1, Category::Economic, 1.0, 1.0),
    ];

    let result = aggregate(&[answer(1, 5)], &bank);

    assert_eq!(result.economic, 4.0);
    assert_eq!(StatementId(1), bank[0].id);
}
