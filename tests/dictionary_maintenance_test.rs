use std::fs;

use tempfile::tempdir;
use typofinder::error::{Result, TypofinderError};
use typofinder::spelling::{Dictionary, Trainer, TrainingPlan};

#[test]
fn test_training_in_batches_matches_single_pass() {
    let first = ["lorem", "ipsum", "dolor", "lorem"];
    let second = ["ipsum", "amet", "lorem"];

    let mut batched = Dictionary::new();
    batched.train(first);
    batched.train(second);

    let mut single = Dictionary::new();
    single.train(first.iter().chain(second.iter()));

    assert_eq!(batched, single);
    assert_eq!(batched.frequency("lorem"), Some(3));
    assert_eq!(batched.frequency("amet"), Some(1));
}

#[test]
fn test_delete_then_train_restarts_count() {
    let mut dictionary: Dictionary = ["word", "word", "word"].into_iter().collect();
    assert_eq!(dictionary.frequency("word"), Some(3));

    assert!(dictionary.delete(["word"]).is_empty());
    assert!(!dictionary.contains("word"));

    dictionary.train(["word"]);
    assert_eq!(dictionary.frequency("word"), Some(1));
}

#[test]
fn test_save_and_load_round_trip() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/dictionary.json");

    let dictionary: Dictionary = ["zeta", "alpha", "alpha"].into_iter().collect();
    assert!(dictionary.save(&path)?);

    let content = fs::read_to_string(&path)?;
    assert_eq!(content, "{\n  \"alpha\": 2,\n  \"zeta\": 1\n}\n");

    let loaded = Dictionary::open(&path)?;
    assert_eq!(loaded, dictionary);
    Ok(())
}

#[test]
fn test_empty_dictionary_is_not_saved() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, "{\"keep\": 4}")?;

    assert!(!Dictionary::new().save(&path)?);
    assert_eq!(fs::read_to_string(&path)?, "{\"keep\": 4}");
    Ok(())
}

#[test]
fn test_dry_run_leaves_file_untouched() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    let corpus = dir.path().join("corpus.txt");
    fs::write(&corpus, "Known words and fresh words.")?;

    let seed: Dictionary = ["known", "words"].into_iter().collect();
    seed.save(&path)?;
    let before = fs::read(&path)?;

    let report = Trainer::new(&path).run(&TrainingPlan {
        corpus: vec![corpus],
        add: vec!["extra".to_string()],
        dry_run: true,
        ..Default::default()
    })?;

    assert!(report.dry_run);
    assert!(!report.saved);
    assert_eq!(
        report.new_words.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["and", "extra", "fresh"]
    );
    assert_eq!(fs::read(&path)?, before);
    Ok(())
}

#[test]
fn test_trainer_applies_corpus_add_then_delete() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    let corpus = dir.path().join("corpus.txt");
    fs::write(&corpus, "alpha beta beta")?;

    let report = Trainer::new(&path).run(&TrainingPlan {
        corpus: vec![corpus],
        add: vec!["gamma".to_string(), "beta".to_string()],
        delete: vec!["beta".to_string(), "delta".to_string()],
        dry_run: false,
    })?;

    assert!(report.saved);
    assert_eq!(report.corpus_files, 1);
    assert_eq!(report.trained_words, 3);
    assert_eq!(report.added_words, 2);
    assert_eq!(report.removed, vec!["beta"]);
    assert_eq!(report.missing, vec!["delta"]);
    assert_eq!(report.dictionary_size, 2);

    let saved = Dictionary::open(&path)?;
    assert_eq!(saved.frequency("alpha"), Some(1));
    assert_eq!(saved.frequency("gamma"), Some(1));
    assert!(!saved.contains("beta"));
    Ok(())
}

#[test]
fn test_load_failures_keep_contents() {
    let dir = tempdir().unwrap();
    let malformed = dir.path().join("malformed.json");
    fs::write(&malformed, "{\"word\": 0}").unwrap();

    let mut dictionary: Dictionary = ["kept"].into_iter().collect();

    assert!(matches!(
        dictionary.load(dir.path().join("missing.json")),
        Err(TypofinderError::NotFound(_))
    ));
    assert!(matches!(
        dictionary.load(&malformed),
        Err(TypofinderError::Malformed(_))
    ));
    assert!(matches!(
        dictionary.load(dir.path()),
        Err(TypofinderError::Malformed(_))
    ));
    assert!(dictionary.contains("kept"));
    assert_eq!(dictionary.len(), 1);
}

#[test]
fn test_trainer_refuses_malformed_dictionary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dictionary.json");
    fs::write(&path, "[\"not\", \"a\", \"dictionary\"]").unwrap();

    let result = Trainer::new(&path).run(&TrainingPlan {
        add: vec!["word".to_string()],
        ..Default::default()
    });

    assert!(matches!(result, Err(TypofinderError::Malformed(_))));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[\"not\", \"a\", \"dictionary\"]"
    );
}
