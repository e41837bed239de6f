use std::{
    sync::{Arc, Barrier},
    thread,
};

use events::{CloseReason, Event};
use ledger::{CandidateResult, ErrorKind, LedgerEngine, MockClock};
use ledger_config::LedgerConfig;
use primitives::{mock_address, Address, Timestamp};

const NOW: Timestamp = 1_700_000_000;

fn setup() -> (LedgerEngine, MockClock, Address) {
    let admin = mock_address(b"admin");
    let clock = MockClock::new(NOW);
    let engine = LedgerEngine::with_clock(&LedgerConfig::new(admin), Arc::new(clock.clone()));

    (engine, clock, admin)
}

fn registered_voter(engine: &LedgerEngine, seed: &str) -> Address {
    let voter = mock_address(seed.as_bytes());
    engine
        .register_voter(voter, &format!("cnic-{seed}"))
        .unwrap();
    voter
}

#[test]
fn election_ids_are_sequential_from_one() {
    let (engine, _, admin) = setup();

    let ids: Vec<_> = (0..5)
        .map(|i| {
            engine
                .create_election(admin, &format!("Election {i}"), NOW + 60)
                .unwrap()
        })
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn candidate_ids_are_sequential_per_election() {
    let (engine, _, admin) = setup();
    engine.create_election(admin, "First", NOW + 60).unwrap();
    engine.create_election(admin, "Second", NOW + 60).unwrap();

    assert_eq!(engine.add_candidate(admin, 1, "Alice").unwrap(), 1);
    assert_eq!(engine.add_candidate(admin, 2, "Carol").unwrap(), 1);
    assert_eq!(engine.add_candidate(admin, 1, "Bob").unwrap(), 2);
}

#[test]
fn double_vote_is_a_conflict_and_leaves_the_tally_alone() {
    let (engine, _, admin) = setup();
    let voter = registered_voter(&engine, "a");
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.add_candidate(admin, 1, "Bob").unwrap();

    engine.vote(voter, 1, 1).unwrap();
    let err = engine.vote(voter, 1, 2).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    let results = engine.get_results(admin, 1).unwrap();
    assert_eq!(results[0].vote_count, 1);
    assert_eq!(results[1].vote_count, 0);
}

#[test]
fn vote_after_deadline_fails_and_closes_the_election() {
    let (engine, clock, admin) = setup();
    let voter = registered_voter(&engine, "a");
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();

    clock.advance(61);

    let err = engine.vote(voter, 1, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(err.to_string(), "invalid state: election 1 has ended");

    assert!(!engine.get_election(1).unwrap().is_active);

    let last = engine.events_since(0, 100).pop().unwrap();
    assert_eq!(
        last.event,
        Event::ElectionClosed {
            id: 1,
            reason: CloseReason::DeadlineExpired,
        }
    );
}

#[test]
fn tallies_match_successful_votes() {
    let (engine, _, admin) = setup();
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.add_candidate(admin, 1, "Bob").unwrap();

    for i in 0..7 {
        let voter = registered_voter(&engine, &format!("voter-{i}"));
        let candidate = if i < 4 { 1 } else { 2 };
        engine.vote(voter, 1, candidate).unwrap();
    }

    let results = engine.get_results(admin, 1).unwrap();
    assert_eq!(results[0].vote_count, 4);
    assert_eq!(results[1].vote_count, 3);
    assert_eq!(engine.get_election(1).unwrap().total_votes, 7);
}

#[test]
fn only_the_admin_may_close() {
    let (engine, _, admin) = setup();
    let voter = registered_voter(&engine, "a");
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();

    let err = engine.close_election(voter, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    engine.close_election(admin, 1).unwrap();

    let err = engine.vote(voter, 1, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let err = engine.add_candidate(admin, 1, "Bob").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn admin_close_of_an_expired_election_is_invalid_state() {
    let (engine, clock, admin) = setup();
    engine.create_election(admin, "Board", NOW + 60).unwrap();

    clock.advance(60);

    let err = engine.close_election(admin, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let reasons: Vec<_> = engine
        .events_since(0, 100)
        .into_iter()
        .filter_map(|r| match r.event {
            Event::ElectionClosed { reason, .. } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(reasons, vec![CloseReason::DeadlineExpired]);
}

#[test]
fn credentials_are_unique_across_accounts() {
    let (engine, _, _) = setup();

    engine
        .register_voter(mock_address(b"a"), "35202-0000000-1")
        .unwrap();

    let err = engine
        .register_voter(mock_address(b"b"), "35202-0000000-1")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = engine
        .register_voter(mock_address(b"a"), "35202-0000000-1")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn presidential_election_scenario() {
    let (engine, _, admin) = setup();
    let voter = registered_voter(&engine, "a");

    let id = engine
        .create_election(admin, "Presidential Election", NOW + 3600)
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(engine.add_candidate(admin, 1, "Alice").unwrap(), 1);

    engine.vote(voter, 1, 1).unwrap();
    assert_eq!(
        engine.vote(voter, 1, 1).unwrap_err().kind(),
        ErrorKind::Conflict
    );

    assert_eq!(
        engine.get_results(voter, 1).unwrap(),
        vec![CandidateResult {
            id: 1,
            name: "Alice".into(),
            vote_count: 1,
        }]
    );
}

#[test]
fn failed_create_consumes_no_id() {
    let (engine, _, admin) = setup();

    let err = engine.create_election(admin, "Past", NOW - 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(engine.create_election(admin, "Future", NOW + 1).unwrap(), 1);
}

#[test]
fn results_stay_readable_after_close() {
    let (engine, clock, admin) = setup();
    let voter = registered_voter(&engine, "a");
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.vote(voter, 1, 1).unwrap();

    clock.advance(3600);

    let results = engine.get_results(admin, 1).unwrap();
    assert_eq!(results[0].vote_count, 1);
    assert_eq!(
        engine.get_results(admin, 2).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn every_mutation_is_recorded_in_order() {
    let (engine, _, admin) = setup();
    let voter = registered_voter(&engine, "a");
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.vote(voter, 1, 1).unwrap();
    engine.close_election(admin, 1).unwrap();

    let records = engine.events_since(0, 100);
    let names: Vec<_> = records.iter().map(|r| r.event.to_string()).collect();

    assert_eq!(
        names,
        vec![
            "VoterRegistered",
            "ElectionCreated",
            "CandidateAdded",
            "VoteCasted",
            "ElectionClosed",
        ]
    );
    assert!(records.iter().zip(1..).all(|(r, seq)| r.seq == seq));
    assert!(records.iter().all(|r| r.timestamp == NOW));
}

#[tokio::test]
async fn subscribers_observe_live_events() {
    let (engine, _, admin) = setup();
    let mut events_rx = engine.subscribe();

    engine.create_election(admin, "Board", NOW + 60).unwrap();

    let record = events_rx.recv().await.unwrap();
    assert_eq!(record.seq, 1);
    assert_eq!(record.event, Event::ElectionCreated { id: 1 });
}

#[test]
fn concurrent_votes_are_all_counted_once() {
    let (engine, _, admin) = setup();
    let engine = Arc::new(engine);
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.add_candidate(admin, 1, "Bob").unwrap();

    let voters: Vec<Address> = (0..32)
        .map(|i| registered_voter(&engine, &format!("voter-{i}")))
        .collect();

    let handles: Vec<_> = voters
        .into_iter()
        .enumerate()
        .map(|(i, voter)| {
            let engine = engine.clone();
            thread::spawn(move || {
                let candidate = (i % 2) as u64 + 1;
                let first = engine.vote(voter, 1, candidate);
                let second = engine.vote(voter, 1, candidate);
                (first.is_ok(), second.map_err(|err| err.kind()))
            })
        })
        .collect();

    for handle in handles {
        let (first_ok, second) = handle.join().unwrap();
        assert!(first_ok);
        assert_eq!(second, Err(ErrorKind::Conflict));
    }

    let results = engine.get_results(admin, 1).unwrap();
    assert_eq!(results[0].vote_count, 16);
    assert_eq!(results[1].vote_count, 16);
}

#[test]
fn racing_votes_from_one_account_admit_exactly_one() {
    const RACERS: usize = 16;

    let (engine, _, admin) = setup();
    let engine = Arc::new(engine);
    engine.create_election(admin, "Board", NOW + 60).unwrap();
    engine.add_candidate(admin, 1, "Alice").unwrap();
    engine.add_candidate(admin, 1, "Bob").unwrap();

    let voter = registered_voter(&engine, "racer");
    let barrier = Arc::new(Barrier::new(RACERS));

    let handles: Vec<_> = (0..RACERS)
        .map(|i| {
            let engine = engine.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                engine
                    .vote(voter, 1, (i % 2) as u64 + 1)
                    .map_err(|err| err.kind())
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| **outcome == Err(ErrorKind::Conflict))
            .count(),
        RACERS - 1
    );

    let total: u64 = engine
        .get_results(admin, 1)
        .unwrap()
        .iter()
        .map(|candidate| candidate.vote_count)
        .sum();
    assert_eq!(total, 1);
    assert!(engine.has_voted(1, &voter).unwrap());
}
