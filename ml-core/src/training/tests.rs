//! Training pipeline tests over a small hand-labelled corpus

use tempfile::tempdir;

use super::*;
use crate::category::Category;
use crate::error::TrainingError;
use crate::model::{Categorizer, ModelArtifact};
use crate::transaction::TrainingExample;

fn corpus() -> Vec<TrainingExample> {
    use Category::*;
    let rows = [
        ("Starbucks Coffee", Food),
        ("Kroger Grocery Store", Food),
        ("McDonalds Restaurant", Food),
        ("Whole Foods Grocery", Food),
        ("Chipotle Restaurant", Food),
        ("Dunkin Coffee", Food),
        ("Shell Gas Station", Transportation),
        ("Chevron Gas Station", Transportation),
        ("Uber Ride", Transportation),
        ("Lyft Ride", Transportation),
        ("Exxon Fuel", Transportation),
        ("Metro Transit Pass", Transportation),
        ("Netflix Streaming", Entertainment),
        ("Spotify Music", Entertainment),
        ("AMC Movie Theater", Entertainment),
        ("Hulu Streaming", Entertainment),
        ("Steam Games", Entertainment),
        ("Regal Movie Theater", Entertainment),
        ("Electric Company Utility", Bills),
        ("Water Utility", Bills),
        ("Comcast Internet", Bills),
        ("Verizon Wireless Phone", Bills),
        ("Apartment Rent", Bills),
        ("Sewer Utility", Bills),
        ("Acme Corp Payroll", Income),
        ("Employer Salary", Income),
        ("Paycheck Direct Dep", Income),
        ("Freelance Income", Income),
        ("Bonus Payroll", Income),
        ("Employer Paycheck", Income),
    ];
    rows.iter()
        .map(|(d, c)| TrainingExample::new(*d, *c))
        .collect()
}

fn no_split() -> TrainingConfig {
    TrainingConfig {
        test_size: 0.0,
        ..Default::default()
    }
}

#[test]
fn test_training_descriptions_round_trip() {
    let examples = corpus();
    let artifact = Trainer::new(no_split()).fit(&examples).unwrap();
    let categorizer = Categorizer::new(artifact).unwrap();

    for example in &examples {
        let prediction = categorizer.predict(&example.description);
        assert_eq!(
            prediction.category, example.category,
            "'{}' predicted as {}",
            example.description, prediction.category
        );
        assert!(
            prediction.confidence > 0.5,
            "'{}' confidence {}",
            example.description,
            prediction.confidence
        );
    }
}

#[test]
fn test_fit_is_deterministic() {
    let examples = corpus();
    let a = Trainer::new(no_split()).fit(&examples).unwrap();
    let b = Trainer::new(no_split()).fit(&examples).unwrap();
    assert_eq!(a.vectorizer, b.vectorizer);
    assert_eq!(a.classifier, b.classifier);
    // ids and timestamps are per artifact
    assert_ne!(a.model_id, b.model_id);
}

#[test]
fn test_labels_are_present_categories() {
    let artifact = Trainer::new(no_split()).fit(&corpus()).unwrap();
    assert_eq!(
        artifact.categories(),
        &[
            Category::Food,
            Category::Transportation,
            Category::Entertainment,
            Category::Bills,
            Category::Income
        ]
    );
    assert_eq!(artifact.training.train_samples, 30);
    assert_eq!(artifact.training.test_samples, 0);
    assert!(artifact.training.final_loss.is_finite());
}

#[test]
fn test_train_with_holdout() {
    let outcome = Trainer::new(TrainingConfig::default()).train(&corpus()).unwrap();

    // round(6 * 0.2) = 1 held out per category
    assert_eq!(outcome.artifact.training.test_samples, 5);
    assert_eq!(outcome.artifact.training.train_samples, 25);

    let accuracy = outcome.artifact.training.holdout_accuracy.unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(outcome.evaluation.accuracy, accuracy);
    let support: usize = outcome.evaluation.classes.iter().map(|c| c.support).sum();
    assert_eq!(support, 5);
}

#[test]
fn test_train_falls_back_without_split() {
    let mut examples = corpus();
    examples.push(TrainingExample::new("Delta Airline Flight", Category::Travel));
    let config = TrainingConfig {
        min_examples_per_category: 1,
        ..Default::default()
    };

    let outcome = Trainer::new(config).train(&examples).unwrap();
    assert_eq!(outcome.artifact.training.test_samples, 0);
    assert_eq!(outcome.artifact.training.train_samples, examples.len());
    assert!(outcome.artifact.training.holdout_accuracy.is_none());
    assert!(outcome.artifact.categories().contains(&Category::Travel));
}

#[test]
fn test_trained_artifact_survives_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");

    let artifact = Trainer::new(no_split()).fit(&corpus()).unwrap();
    artifact.save(&path).unwrap();

    let before = Categorizer::new(artifact).unwrap();
    let after = Categorizer::load(&path).unwrap();
    let inputs = ["Starbucks Coffee #19", "Uber Ride 02/11/2024", "unseen"];
    assert_eq!(before.predict_batch(&inputs), after.predict_batch(&inputs));
    assert_eq!(ModelArtifact::load(&path).unwrap(), *after.artifact());
}

#[test]
fn test_reject_single_category() {
    let examples: Vec<_> = corpus()
        .into_iter()
        .filter(|e| e.category == Category::Food)
        .collect();
    assert!(matches!(
        Trainer::new(no_split()).fit(&examples),
        Err(TrainingError::TooFewCategories(1))
    ));
}

#[test]
fn test_reject_small_category() {
    let mut examples = corpus();
    examples.push(TrainingExample::new("Delta Airline Flight", Category::Travel));
    match Trainer::new(no_split()).fit(&examples) {
        Err(TrainingError::InsufficientExamples { category, count, required }) => {
            assert_eq!(category, "Travel");
            assert_eq!(count, 1);
            assert_eq!(required, 3);
        }
        other => panic!("Expected InsufficientExamples, got {:?}", other.map(|a| a.model_id)),
    }
}

#[test]
fn test_reject_empty_corpus() {
    assert!(matches!(
        Trainer::new(no_split()).fit(&[]),
        Err(TrainingError::EmptyCorpus)
    ));
}

#[test]
fn test_reject_invalid_test_size() {
    let config = TrainingConfig {
        test_size: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        Trainer::new(config).train(&corpus()),
        Err(TrainingError::InvalidConfig(_))
    ));
}

#[test]
fn test_stratified_split_is_seeded() {
    let examples = corpus();
    let a = stratified_split(&examples, 0.34, 7).unwrap();
    let b = stratified_split(&examples, 0.34, 7).unwrap();
    assert_eq!(a.test, b.test);
    assert_eq!(a.train.len() + a.test.len(), examples.len());

    // every category on both sides: round(6 * 0.34) = 2 held out each
    for category in [Category::Food, Category::Bills, Category::Income] {
        assert_eq!(a.test.iter().filter(|e| e.category == category).count(), 2);
        assert_eq!(a.train.iter().filter(|e| e.category == category).count(), 4);
    }
}

#[test]
fn test_stratified_split_declines_tiny_categories() {
    let examples = vec![
        TrainingExample::new("Kroger Grocery", Category::Food),
        TrainingExample::new("Safeway Grocery", Category::Food),
        TrainingExample::new("Shell Gas", Category::Transportation),
    ];
    assert!(stratified_split(&examples, 0.2, 42).is_none());
    assert!(stratified_split(&examples, 0.0, 42).is_none());
}

#[test]
fn test_csv_loading() {
    let data = "\
date,description,amount,type,category
2024-01-15,STARBUCKS STORE #1234,5.75,DEBIT,Food
2024-01-16,Shell Gas 0042,41.20,DEBIT,gas
2024-01-17,  ,10.00,DEBIT,Food
2024-01-18,ACME PAYROLL,2500.00,CREDIT,salary
";
    let examples = from_reader(data.as_bytes()).unwrap();
    assert_eq!(examples.len(), 3);
    assert_eq!(examples[0].description, "STARBUCKS STORE #1234");
    assert_eq!(examples[1].category, Category::Transportation);
    assert_eq!(examples[2].category, Category::Income);
}

#[test]
fn test_csv_requires_only_description_and_category() {
    let data = "description,category\nNetflix,Entertainment\n";
    let examples = from_reader(data.as_bytes()).unwrap();
    assert_eq!(examples, vec![TrainingExample::new("Netflix", Category::Entertainment)]);
}

#[test]
fn test_csv_unknown_category() {
    let data = "description,category\nNetflix,Entertainment\nRocket,Spaceships\n";
    match from_reader(data.as_bytes()) {
        Err(TrainingError::UnknownCategory { label, record }) => {
            assert_eq!(label, "Spaceships");
            assert_eq!(record, 2);
        }
        other => panic!("Expected UnknownCategory, got {:?}", other),
    }
}
