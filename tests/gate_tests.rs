use wildfire_dilemmas::config::TutorialConfig;
use wildfire_dilemmas::gate::{GateState, GateTransition, NavigationRequest, PlaybackStatus, TutorialGate};

const YT: &str = "https://www.youtube.com";

fn state_change(info: &str) -> String {
    format!(r#"{{"event":"onStateChange","info":{}}}"#, info)
}

#[test]
fn test_ended_twice_stays_watched() {
    let mut gate = TutorialGate::default();
    assert_eq!(gate.handle_message(YT, &state_change("0")), GateTransition::Unlocked);
    assert_eq!(gate.handle_message(YT, &state_change("0")), GateTransition::Unchanged);
    assert_eq!(gate.state(), GateState::Watched);
}

#[test]
fn test_order_independence() {
    let mut sequenced = TutorialGate::default();
    for status in [PlaybackStatus::Started, PlaybackStatus::Ended, PlaybackStatus::Paused] {
        sequenced.apply(status);
    }
    let mut single = TutorialGate::default();
    single.apply(PlaybackStatus::Ended);

    assert_eq!(sequenced.state(), GateState::Watched);
    assert_eq!(sequenced.state(), single.state());
    assert_eq!(sequenced.can_proceed(), single.can_proceed());
}

#[test]
fn test_untrusted_origin_never_changes_state() {
    let mut gate = TutorialGate::default();
    for info in ["0", "1", "2", "3", "-1"] {
        let t = gate.handle_message("https://attacker.example", &state_change(info));
        assert_eq!(t, GateTransition::Unchanged);
    }
    assert_eq!(gate.state(), GateState::NotWatched);
    assert!(!gate.is_playing());
}

#[test]
fn test_malformed_payloads_ignored() {
    let mut gate = TutorialGate::default();
    for raw in ["", "null", "[]", "{\"event\":1}", "{\"event\":\"onReady\"}", "{not json"] {
        assert_eq!(gate.handle_message(YT, raw), GateTransition::Unchanged);
    }
    assert_eq!(gate.state(), GateState::NotWatched);
}

#[test]
fn test_proceed_disabled_until_watched() {
    let mut gate = TutorialGate::default();
    gate.handle_message(YT, &state_change("1"));
    assert!(gate.is_playing());
    assert_eq!(gate.proceed(), None);

    gate.handle_message(YT, &state_change("0"));
    assert!(!gate.is_playing());
    assert_eq!(gate.proceed(), Some(NavigationRequest::Proceed { target: "/simulation".into() }));
}

#[test]
fn test_replay_after_watch_keeps_unlocked() {
    let mut gate = TutorialGate::default();
    gate.apply(PlaybackStatus::Ended);
    gate.replay();
    gate.handle_message(YT, &state_change("2"));
    assert_eq!(gate.state(), GateState::Watched);
    assert!(gate.proceed().is_some());
}

#[test]
fn test_custom_origin_and_target() {
    let config = TutorialConfig {
        embed_url: "https://player.example/embed/abc".into(),
        trusted_origin: "https://player.example".into(),
        next_stage: "/scenarios/1".into(),
    };
    let mut gate = TutorialGate::new(config);
    assert_eq!(gate.handle_message(YT, &state_change("0")), GateTransition::Unchanged);
    assert_eq!(gate.handle_message("https://player.example", &state_change("0")), GateTransition::Unlocked);
    assert_eq!(gate.proceed(), Some(NavigationRequest::Proceed { target: "/scenarios/1".into() }));
    assert_eq!(gate.page().embed_url, "https://player.example/embed/abc");
}

#[test]
fn test_sessions_are_distinct() {
    let a = TutorialGate::default();
    let b = TutorialGate::default();
    assert_ne!(a.session_id(), b.session_id());
}

#[test]
fn test_float_encoded_end_unlocks() {
    let mut gate = TutorialGate::default();
    assert_eq!(gate.handle_message(YT, &state_change("0.0")), GateTransition::Unlocked);
    assert_eq!(gate.state(), GateState::Watched);
}
