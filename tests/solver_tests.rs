use std::sync::Arc;

use wordle_engine::{
    CandidateSet, Feedback, GuessStrategy, Lexicon, Session, SessionState, Solver, SolverConfig,
    SolverError, StrategyKind, Word,
};

fn word(text: &str) -> Word {
    Word::new(text).unwrap()
}

fn five_words() -> Arc<Lexicon> {
    Arc::new(Lexicon::from_words(["audio", "radio", "mango", "input", "tiger"]).unwrap())
}

fn get_test_words() -> Arc<Lexicon> {
    Arc::new(
        Lexicon::from_words([
            "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast",
            "beast",
        ])
        .unwrap(),
    )
}

#[test]
fn test_solved_on_first_guess() {
    let mut session = Session::new(five_words(), &word("audio"), &SolverConfig::default()).unwrap();
    assert_eq!(session.turn(), 1);

    let feedback = session.play(&word("audio")).unwrap();
    assert!(feedback.is_win());
    assert_eq!(session.state(), SessionState::Solved);

    let result = session.result();
    assert!(result.won);
    assert!(result.found);
    assert_eq!(result.number_guesses, 1);
    assert_eq!(result.guesses, vec![word("audio")]);
}

#[test]
fn test_first_feedback_narrows_to_target() {
    let mut session = Session::new(five_words(), &word("mango"), &SolverConfig::default()).unwrap();

    let feedback = session.play(&word("audio")).unwrap();
    assert_eq!(feedback.to_string(), "y···g");
    assert_eq!(session.solver().remaining_words(), vec![word("mango")]);
    assert_eq!(session.suggest().unwrap(), word("mango"));

    session.play(&word("mango")).unwrap();
    assert_eq!(session.state(), SessionState::Solved);
    assert_eq!(session.result().guesses, vec![word("audio"), word("mango")]);
}

#[test]
fn test_invalid_guess_does_not_use_a_turn() {
    let mut session = Session::new(five_words(), &word("mango"), &SolverConfig::default()).unwrap();
    assert!(matches!(
        session.play(&word("zebra")),
        Err(SolverError::InvalidGuess(_))
    ));
    assert_eq!(session.turn(), 1);
    assert!(session.history().is_empty());
    assert_eq!(session.solver().remaining_count(), 5);
}

#[test]
fn test_target_outside_lexicon_is_rejected() {
    let result = Session::new(five_words(), &word("zebra"), &SolverConfig::default());
    assert!(matches!(result, Err(SolverError::Configuration(_))));
}

#[test]
fn test_turn_budget_exhausted() {
    let config = SolverConfig {
        max_turns: 1,
        ..SolverConfig::default()
    };
    let mut session = Session::new(five_words(), &word("mango"), &config).unwrap();
    session.play(&word("audio")).unwrap();

    assert_eq!(session.state(), SessionState::Exhausted);
    let result = session.result();
    assert!(!result.won);
    assert!(!result.found);
    assert_eq!(result.candidates_remaining, 1);
    assert!(matches!(
        session.play(&word("mango")),
        Err(SolverError::SessionOver)
    ));
}

#[test]
fn test_solve_various_targets() {
    let lexicon = get_test_words();
    for target in lexicon.ids().map(|id| lexicon.word(id)) {
        let mut session = Session::new(Arc::clone(&lexicon), &target, &SolverConfig::default()).unwrap();
        let result = session.run().unwrap();

        assert!(result.won, "didn't win for target: {target}");
        assert!(result.number_guesses <= 6, "too many guesses for target: {target}");
        assert_eq!(result.guesses.last(), Some(&target));
    }
}

#[test]
fn test_every_strategy_solves() {
    let lexicon = get_test_words();
    for kind in [
        StrategyKind::MostFrequent,
        StrategyKind::FrequencyReduction,
        StrategyKind::Entropy,
    ] {
        let config = SolverConfig {
            strategy: kind,
            max_turns: lexicon.len(),
            ..SolverConfig::default()
        };
        for target in lexicon.ids().map(|id| lexicon.word(id)) {
            let mut session = Session::new(Arc::clone(&lexicon), &target, &config).unwrap();
            let result = session.run().unwrap();
            assert!(result.found, "{kind:?} missed {target}");
        }
    }
}

#[test]
fn test_candidates_shrink_every_turn() {
    let lexicon = get_test_words();
    let mut session = Session::new(Arc::clone(&lexicon), &word("toast"), &SolverConfig::default()).unwrap();
    let mut previous = session.solver().remaining_count();
    while !session.is_over() {
        let turn = session.step().unwrap();
        assert!(turn.candidates_remaining <= previous);
        previous = turn.candidates_remaining;
        if !session.is_over() {
            assert!(session.solver().is_candidate(&word("toast")));
        }
    }
}

#[test]
fn test_target_outside_candidate_pool_runs_dry() {
    let lexicon = Arc::new(Lexicon::from_entries([
        (word("audio"), 100),
        (word("radio"), 100),
        (word("mango"), 1),
    ]));
    let config = SolverConfig {
        min_frequency: 10,
        strategy: StrategyKind::MostFrequent,
        ..SolverConfig::default()
    };
    let mut session = Session::new(lexicon, &word("mango"), &config).unwrap();

    assert!(matches!(
        session.run(),
        Err(SolverError::NoConsistentCandidates)
    ));
    let result = session.result();
    assert!(result.no_solution);
    assert!(!result.found);
    assert_eq!(result.guesses, vec![word("audio")]);
}

#[test]
fn test_running_dry_on_the_last_turn_is_still_reported() {
    let lexicon = Arc::new(Lexicon::from_entries([
        (word("audio"), 100),
        (word("radio"), 100),
        (word("mango"), 1),
    ]));
    let config = SolverConfig {
        min_frequency: 10,
        max_turns: 1,
        strategy: StrategyKind::MostFrequent,
        ..SolverConfig::default()
    };
    let mut session = Session::new(lexicon, &word("mango"), &config).unwrap();

    assert!(matches!(
        session.play(&word("audio")),
        Err(SolverError::NoConsistentCandidates)
    ));
    assert_eq!(session.state(), SessionState::Exhausted);
    let result = session.result();
    assert!(result.no_solution);
    assert!(!result.won);
    assert_eq!(result.candidates_remaining, 0);
    assert_eq!(result.guesses, vec![word("audio")]);
}

#[test]
fn test_scripted_openers_then_fallback() {
    let lexicon = get_test_words();
    let config = SolverConfig {
        openers: vec![word("beast"), word("roast")],
        strategy: StrategyKind::MostFrequent,
        ..SolverConfig::default()
    };
    let mut session = Session::new(Arc::clone(&lexicon), &word("toast"), &config).unwrap();
    let result = session.run().unwrap();

    assert_eq!(result.guesses, vec![word("beast"), word("roast"), word("toast")]);
    assert!(result.won);
    assert_eq!(result.solver_name, "scripted(2)+most-frequent");
}

#[test]
fn test_scripted_returns_sole_candidate() {
    let lexicon = five_words();
    let strategy = GuessStrategy::MostFrequentRemaining
        .with_openers(&lexicon, &[word("audio"), word("tiger")])
        .unwrap();
    let mut session =
        Session::with_strategy(lexicon, &word("mango"), strategy, &SolverConfig::default()).unwrap();

    session.step().unwrap();
    // Only "mango" is left, so the second opener is skipped.
    assert_eq!(session.step().unwrap().guess, word("mango"));
    assert_eq!(session.state(), SessionState::Solved);
}

#[test]
fn test_unknown_opener_is_a_configuration_error() {
    let config = SolverConfig {
        openers: vec![word("zebra")],
        ..SolverConfig::default()
    };
    assert!(matches!(
        Session::new(five_words(), &word("mango"), &config),
        Err(SolverError::Configuration(_))
    ));
}

#[test]
fn test_most_frequent_strategy() {
    let lexicon = Arc::new(Lexicon::from_entries([
        (word("audio"), 3),
        (word("radio"), 7),
        (word("mango"), 7),
    ]));
    let solver = Solver::with_strategy(
        Arc::clone(&lexicon),
        GuessStrategy::MostFrequentRemaining,
        CandidateSet::full(&lexicon),
    );
    assert_eq!(solver.suggest().unwrap(), word("mango"));
}

#[test]
fn test_frequency_reduction_prefers_new_letters() {
    let lexicon = Arc::new(Lexicon::from_entries([
        (word("aaaab"), 100),
        (word("abcde"), 1),
        (word("aaaac"), 1),
    ]));
    let solver = Solver::with_strategy(
        Arc::clone(&lexicon),
        GuessStrategy::FrequencyReduction,
        CandidateSet::full(&lexicon),
    );
    assert_eq!(solver.suggest().unwrap(), word("abcde"));
}

#[test]
fn test_assistant_applies_external_feedback() {
    let mut solver = Solver::new(five_words(), &SolverConfig::default()).unwrap();

    let left = solver
        .observe(&word("audio"), Feedback::parse("y···g").unwrap())
        .unwrap();
    assert_eq!(left, 1);
    assert_eq!(solver.suggest().unwrap(), word("mango"));

    solver.reset();
    assert_eq!(solver.remaining_count(), 5);
    assert!(solver.guessed().is_empty());
}

#[test]
fn test_assistant_rejects_unknown_guess() {
    let mut solver = Solver::new(five_words(), &SolverConfig::default()).unwrap();
    assert!(matches!(
        solver.observe(&word("zebra"), Feedback::parse("·····").unwrap()),
        Err(SolverError::InvalidGuess(_))
    ));
    assert_eq!(solver.remaining_count(), 5);
}

#[test]
fn test_assistant_detects_contradictory_feedback() {
    let mut solver = Solver::new(five_words(), &SolverConfig::default()).unwrap();
    // Every word shares a letter with "audio", so an all-miss answer fits none of them.
    let result = solver.observe(&word("audio"), Feedback::parse("·····").unwrap());
    assert!(matches!(result, Err(SolverError::NoConsistentCandidates)));
    assert!(matches!(
        solver.suggest(),
        Err(SolverError::NoConsistentCandidates)
    ));
}
