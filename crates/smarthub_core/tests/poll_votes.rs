use smarthub_core::{
    KeyValueStore, MemoryKvStore, PollDraft, PollService, RecordingNotifier, ServiceError,
};

fn draft(options: &[&str]) -> PollDraft {
    PollDraft::with_options(
        "Where should we eat?",
        "Riley",
        options.iter().map(|text| text.to_string()).collect(),
    )
    .unwrap()
}

#[test]
fn create_assigns_unique_option_ids_and_prepends() {
    let store = MemoryKvStore::new();
    let mut service = PollService::open(&store).unwrap();

    let first = service.add_poll(draft(&["Tacos", "Ramen"])).unwrap();
    let second = service.add_poll(draft(&["A", "B", "C"])).unwrap();

    assert_eq!(service.polls()[0].id, second.id);
    assert_eq!(service.polls()[1].id, first.id);
    assert_ne!(second.options[0].id, second.options[1].id);
    assert_ne!(second.options[1].id, second.options[2].id);
    assert_eq!(
        store.get("polls").unwrap().unwrap(),
        serde_json::to_string(service.polls()).unwrap()
    );
}

#[test]
fn blank_option_or_question_is_rejected() {
    let store = MemoryKvStore::new();
    let mut service = PollService::open(&store).unwrap();

    let err = service.add_poll(draft(&["Tacos", " "])).unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("options")));

    let err = service.add_poll(PollDraft::new("", "Riley")).unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("question")));
    assert!(store.is_empty());
}

#[test]
fn same_voter_may_vote_repeatedly() {
    let store = MemoryKvStore::new();
    let notifier = RecordingNotifier::new();
    let mut service = PollService::open(&store)
        .unwrap()
        .with_notifier(notifier.clone());
    let poll = service.add_poll(draft(&["Tacos", "Ramen"])).unwrap();
    let option_id = poll.options[0].id.clone();

    for expected in 1..=3 {
        let count = service.vote(&poll.id, &option_id, "Jo").unwrap();
        assert_eq!(count, Some(expected));
    }

    let stored = service.poll(&poll.id).unwrap();
    assert_eq!(stored.options[0].votes.len(), 3);
    assert!(stored.options[0].votes.iter().all(|v| v.user_name == "Jo"));
    assert!(stored.options[0].votes.iter().all(|v| v.option_id == option_id));
    assert_eq!(notifier.last().unwrap().description, "Jo voted on the poll");
}

#[test]
fn vote_requires_voter_name_and_known_target() {
    let store = MemoryKvStore::new();
    let mut service = PollService::open(&store).unwrap();
    let poll = service.add_poll(draft(&["Tacos", "Ramen"])).unwrap();

    let err = service.vote(&poll.id, &poll.options[0].id, "  ").unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("voterName")));
    assert_eq!(service.vote(&poll.id, "missing", "Jo").unwrap(), None);
    assert_eq!(service.vote("missing", &poll.options[0].id, "Jo").unwrap(), None);
    assert_eq!(service.poll(&poll.id).unwrap().total_votes(), 0);
}

#[test]
fn percentages_sum_to_hundred_once_votes_exist() {
    let store = MemoryKvStore::new();
    let mut service = PollService::open(&store).unwrap();
    let poll = service.add_poll(draft(&["A", "B", "C"])).unwrap();
    assert!(service.poll(&poll.id).unwrap().percentages().iter().all(|p| *p == 0.0));

    service.vote(&poll.id, &poll.options[0].id, "x").unwrap();
    service.vote(&poll.id, &poll.options[1].id, "y").unwrap();
    service.vote(&poll.id, &poll.options[1].id, "z").unwrap();

    let percentages = service.poll(&poll.id).unwrap().percentages();
    let sum: f64 = percentages.iter().sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert_eq!(percentages[2], 0.0);
}

#[test]
fn delete_is_exact_and_unknown_ids_are_noops() {
    let store = MemoryKvStore::new();
    let mut service = PollService::open(&store).unwrap();
    let keep = service.add_poll(draft(&["A", "B"])).unwrap();
    let gone = service.add_poll(draft(&["C", "D"])).unwrap();

    assert!(!service.delete_poll("unknown").unwrap());
    assert!(service.delete_poll(&gone.id).unwrap());
    assert_eq!(service.polls().len(), 1);
    assert_eq!(service.polls()[0].id, keep.id);
}

#[test]
fn polls_reload_from_storage_with_votes() {
    let store = MemoryKvStore::new();
    let (poll_id, option_id) = {
        let mut service = PollService::open(&store).unwrap();
        let poll = service.add_poll(draft(&["A", "B"])).unwrap();
        service.vote(&poll.id, &poll.options[1].id, "Jo").unwrap();
        (poll.id, poll.options[1].id.clone())
    };

    let reopened = PollService::open(&store).unwrap();
    let poll = reopened.poll(&poll_id).unwrap();
    assert_eq!(poll.option(&option_id).unwrap().vote_count(), 1);
}
