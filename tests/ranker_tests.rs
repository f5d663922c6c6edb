use std::sync::Arc;

use wordle_engine::ranker::partition_entropy;
use wordle_engine::{
    CandidateSet, EntropyRanker, GuessStrategy, Lexicon, SolverError, Solver, Word, WordId,
};

fn word(text: &str) -> Word {
    Word::new(text).unwrap()
}

fn ids(lexicon: &Lexicon, words: &[&str]) -> Vec<WordId> {
    words
        .iter()
        .map(|text| lexicon.id_of(&word(text)).unwrap())
        .collect()
}

fn five_words() -> Lexicon {
    Lexicon::from_words(["audio", "radio", "mango", "input", "tiger", "qqqqq"]).unwrap()
}

#[test]
fn test_partition_entropy_bounds() {
    let mut singletons = vec![1u32; 8];
    assert!((partition_entropy(&mut singletons) - 3.0).abs() < 1e-9);

    let mut one_group = vec![8u32];
    assert_eq!(partition_entropy(&mut one_group), 0.0);

    let mut halves = vec![4u32, 4];
    assert!((partition_entropy(&mut halves) - 1.0).abs() < 1e-9);

    assert_eq!(partition_entropy(&mut []), 0.0);
}

#[test]
fn test_partition_entropy_ignores_group_order() {
    let mut a = vec![3u32, 1, 7, 2];
    let mut b = vec![7u32, 2, 1, 3];
    assert_eq!(partition_entropy(&mut a).to_bits(), partition_entropy(&mut b).to_bits());
}

#[test]
fn test_perfect_separation_is_log2_n() {
    let lexicon = five_words();
    let candidates = ids(&lexicon, &["audio", "radio", "mango", "input", "tiger"]);
    let audio = lexicon.id_of(&word("audio")).unwrap();

    let entropy = EntropyRanker::default().entropy(&lexicon, audio, &candidates);
    assert!((entropy - 5f64.log2()).abs() < 1e-9, "entropy was {entropy}");
}

#[test]
fn test_uninformative_guess_has_zero_entropy() {
    let lexicon = five_words();
    let candidates = ids(&lexicon, &["audio", "radio"]);
    let probe = lexicon.id_of(&word("qqqqq")).unwrap();
    assert_eq!(EntropyRanker::default().entropy(&lexicon, probe, &candidates), 0.0);
}

#[test]
fn test_select_edge_cases() {
    let lexicon = five_words();
    let ranker = EntropyRanker::default();

    assert!(matches!(
        ranker.select(&lexicon, &[], &[]),
        Err(SolverError::NoConsistentCandidates)
    ));

    let only = ids(&lexicon, &["tiger"]);
    assert_eq!(ranker.select(&lexicon, &only, &only).unwrap(), only[0]);
}

#[test]
fn test_small_sets_fall_back_to_most_frequent() {
    let lexicon = Lexicon::from_entries([
        (word("audio"), 10),
        (word("radio"), 50),
        (word("mango"), 1),
    ]);
    let candidates = ids(&lexicon, &["audio", "radio"]);
    let pick = EntropyRanker::new(2)
        .select(&lexicon, &candidates, &candidates)
        .unwrap();
    assert_eq!(lexicon.word(pick), word("radio"));
}

#[test]
fn test_ties_prefer_frequency_then_smallest_word() {
    // Each of these splits the others into the same {1, 2} partition.
    let flat = Lexicon::from_words(["aaaad", "aaaab", "aaaac"]).unwrap();
    let all: Vec<WordId> = flat.ids().collect();
    let ranker = EntropyRanker::default();
    assert_eq!(flat.word(ranker.select(&flat, &all, &all).unwrap()), word("aaaab"));

    let weighted = Lexicon::from_entries([
        (word("aaaab"), 1),
        (word("aaaac"), 5),
        (word("aaaad"), 1),
    ]);
    let all: Vec<WordId> = weighted.ids().collect();
    assert_eq!(
        weighted.word(ranker.select(&weighted, &all, &all).unwrap()),
        word("aaaac")
    );
}

#[test]
fn test_select_is_deterministic() {
    let lexicon = Lexicon::from_words([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
    .unwrap();
    let all: Vec<WordId> = lexicon.ids().collect();
    let ranker = EntropyRanker::default();
    let first = ranker.select(&lexicon, &all, &all).unwrap();
    for _ in 0..20 {
        assert_eq!(ranker.select(&lexicon, &all, &all).unwrap(), first);
    }
}

#[test]
fn test_rank_is_ordered_and_truncated() {
    let lexicon = Lexicon::from_words([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
    .unwrap();
    let all: Vec<WordId> = lexicon.ids().collect();
    let top = EntropyRanker::default().rank(&lexicon, &all, &all, 5);

    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
    }
    assert!(top.iter().all(|analysis| analysis.is_candidate));
    assert_eq!(
        top[0].id,
        EntropyRanker::default().select(&lexicon, &all, &all).unwrap()
    );
}

#[test]
fn test_probe_guess_outside_candidates() {
    let lexicon = Arc::new(
        Lexicon::from_words(["aaaab", "aaaac", "aaaad", "aaaae", "bcdez"]).unwrap(),
    );
    let candidates = CandidateSet::new(ids(&lexicon, &["aaaab", "aaaac", "aaaad", "aaaae"]));

    let probing = Solver::with_strategy(
        Arc::clone(&lexicon),
        GuessStrategy::entropy(2, true),
        candidates.clone(),
    );
    assert_eq!(probing.suggest().unwrap(), word("bcdez"));

    let strict = Solver::with_strategy(lexicon, GuessStrategy::entropy(2, false), candidates);
    assert_eq!(strict.suggest().unwrap(), word("aaaab"));
}

#[test]
fn test_feedback_table_gives_same_answers() {
    let lexicon = five_words();
    let all: Vec<WordId> = lexicon.ids().collect();
    let before: Vec<_> = all
        .iter()
        .flat_map(|&g| all.iter().map(move |&t| (g, t)))
        .map(|(g, t)| lexicon.feedback(g, t))
        .collect();

    lexicon.precompute_feedback();
    assert!(lexicon.has_feedback_table());

    let after: Vec<_> = all
        .iter()
        .flat_map(|&g| all.iter().map(move |&t| (g, t)))
        .map(|(g, t)| lexicon.feedback(g, t))
        .collect();
    assert_eq!(before, after);

    for &g in &all {
        for &t in &all {
            assert_eq!(lexicon.feedback(g, t).is_win(), g == t);
        }
    }
}
