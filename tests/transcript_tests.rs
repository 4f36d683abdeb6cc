use huddle_meetings::session::{SpeakerRegistry, TranscriptAssembler};

#[test]
fn test_append_assigns_monotonic_sequence_numbers() {
    let mut log = TranscriptAssembler::new();

    log.append("S1", "first", 0);
    log.append("S2", "second", 3);
    log.append("S1", "third", 7);

    let sequences: Vec<u64> = log.segments().map(|s| s.sequence_number).collect();
    assert_eq!(sequences, vec![0, 1, 2]);

    let texts: Vec<&str> = log.segments().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn test_offsets_come_from_the_session_clock() {
    let mut log = TranscriptAssembler::new();

    log.append("S1", "early", 2);
    log.append("S1", "late", 41);

    let offsets: Vec<u64> = log.segments().map(|s| s.offset_seconds).collect();
    assert_eq!(offsets, vec![2, 41]);
}

#[test]
fn test_view_is_restartable() {
    let mut log = TranscriptAssembler::new();
    log.append("S1", "a", 0);
    log.append("S1", "b", 1);

    // Two independent reads over the same immutable log.
    assert_eq!(log.segments().count(), 2);
    assert_eq!(log.segments().count(), 2);
}

#[test]
fn test_render_resolves_speakers_and_formats_offsets() {
    let mut speakers = SpeakerRegistry::new();
    speakers.register("S1", None);
    speakers.rename("S1", "Alex");

    let mut log = TranscriptAssembler::new();
    log.append("S1", "Good morning", 62);

    assert_eq!(log.render(&speakers), "[01:02] Alex: Good morning");
}

#[test]
fn test_rename_is_retroactive_and_non_destructive() {
    let mut speakers = SpeakerRegistry::new();
    let mut log = TranscriptAssembler::new();

    for i in 0..5 {
        speakers.register("S1", None);
        log.append("S1", &format!("s1 line {i}"), i);
    }
    for i in 0..3 {
        speakers.register("S2", None);
        log.append("S2", &format!("s2 line {i}"), 10 + i);
    }

    assert!(speakers.rename("S1", "Alex"));

    // Past segments resolve to the new name...
    let resolved = log.resolved(&speakers);
    assert_eq!(resolved.len(), 8);
    assert!(resolved.iter().take(5).all(|s| s.speaker == "Alex"));
    assert!(resolved.iter().skip(5).all(|s| s.speaker == "S2"));

    // ...and so does a future one.
    log.append("S1", "one more", 20);
    let resolved = log.resolved(&speakers);
    assert_eq!(resolved.last().unwrap().speaker, "Alex");

    // The underlying log is untouched: same length, same order, raw ids.
    let order: Vec<u64> = log.segments().map(|s| s.sequence_number).collect();
    assert_eq!(order, (0..9).collect::<Vec<u64>>());
    assert!(log.segments().take(5).all(|s| s.speaker_id == "S1"));
}

#[test]
fn test_resolution_falls_back_to_backend_name_then_id() {
    let mut speakers = SpeakerRegistry::new();
    speakers.register("S1", Some("Jordan"));
    speakers.register("S2", None);

    assert_eq!(speakers.resolve("S1"), "Jordan");
    assert_eq!(speakers.resolve("S2"), "S2");
    // Never-seen ids resolve to themselves.
    assert_eq!(speakers.resolve("S9"), "S9");

    speakers.rename("S1", "Jordan L.");
    assert_eq!(speakers.resolve("S1"), "Jordan L.");
}

#[test]
fn test_auto_identified_flag() {
    let mut speakers = SpeakerRegistry::new();
    speakers.register("S1", None);
    speakers.register("S2", Some("Priya"));

    assert!(speakers.get("S1").unwrap().is_auto_identified);
    assert!(!speakers.get("S2").unwrap().is_auto_identified);

    // A name arriving on a later sighting upgrades the identity.
    speakers.register("S1", Some("Alex"));
    let s1 = speakers.get("S1").unwrap();
    assert!(!s1.is_auto_identified);
    assert_eq!(s1.backend_name.as_deref(), Some("Alex"));
}

#[test]
fn test_colors_are_stable_and_cycle() {
    let mut speakers = SpeakerRegistry::new();

    for i in 0..9 {
        speakers.register(&format!("S{i}"), None);
    }

    let first_color = speakers.get("S0").unwrap().color.clone();
    // Re-sighting never changes the assigned color.
    speakers.register("S0", None);
    assert_eq!(speakers.get("S0").unwrap().color, first_color);

    // Distinct colors for the first palette cycle.
    let c0 = &speakers.get("S0").unwrap().color;
    let c1 = &speakers.get("S1").unwrap().color;
    assert_ne!(c0, c1);

    // Ninth speaker wraps around to the first color.
    assert_eq!(&speakers.get("S8").unwrap().color, c0);
}

#[test]
fn test_resolved_names_keep_first_seen_order() {
    let mut speakers = SpeakerRegistry::new();
    speakers.register("S2", Some("Priya"));
    speakers.register("S1", None);
    speakers.rename("S1", "Alex");

    assert_eq!(speakers.resolved_names(), vec!["Priya", "Alex"]);
}
