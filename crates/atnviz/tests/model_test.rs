use atnviz::{AtnData, Automaton, Error, StateData, StateKind, TransitionData, Vocabulary};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn load(name: &str) -> Automaton {
    let file = std::fs::File::open(workspace_root().join("fixtures").join(name)).expect("fixture");
    Automaton::from_json_reader(std::io::BufReader::new(file)).expect("valid snapshot")
}

#[test]
fn orphan_requires_no_edges_in_either_direction() {
    let atn = load("two_rules.json");
    assert!(!atn.is_orphan(0), "has outgoing transitions");
    assert!(!atn.is_orphan(2), "targeted by state 1");
    assert!(atn.is_orphan(3));

    let calc = load("calc.json");
    let orphans: Vec<u32> = (0..calc.states().len())
        .filter(|&i| calc.is_orphan(i))
        .map(|i| calc.state(i).id)
        .collect();
    assert_eq!(orphans, vec![15, 16]);
}

#[test]
fn state_connectivity_is_one_hop() {
    let atn = load("calc.json");
    // 6 (prog) calls into expr at 2.
    assert!(atn.is_state_connected_to_rule(6, 1));
    // 7 (prog) is where expr returns to.
    assert!(atn.is_state_connected_to_rule(7, 1));
    // 0 (prog) reaches expr only through 6.
    assert!(!atn.is_state_connected_to_rule(0, 1));
    assert!(atn.is_state_connected_to_rule(0, 0));
    assert!(!atn.is_state_connected_to_rule(16, 0));
}

#[test]
fn transition_connectivity_looks_at_the_target_only() {
    let atn = load("two_rules.json");
    let t = &atn.state(1).transitions[0];
    assert!(atn.is_transition_connected_to_rule(t, 1));
    assert!(!atn.is_transition_connected_to_rule(t, 0));
}

#[test]
fn incoming_connectivity_matches_a_connected_transition() {
    let atn = load("calc.json");
    for idx in 0..atn.states().len() {
        let Some(own_rule) = atn.state(idx).rule else {
            continue;
        };
        for &p in atn.predecessors(idx) {
            let Some(pred_rule) = atn.state(p).rule else {
                continue;
            };
            assert!(atn.is_state_connected_to_rule(idx, pred_rule));
            assert!(
                atn.state(p)
                    .transitions
                    .iter()
                    .any(|t| t.target == idx && atn.is_transition_connected_to_rule(t, own_rule)),
                "state {p} -> {idx}"
            );
        }
    }
}

#[test]
fn states_of_rule_follow_arena_order() {
    let atn = load("calc.json");
    let ids: Vec<u32> = atn.states_of_rule(2).map(|i| atn.state(i).id).collect();
    assert_eq!(ids, vec![4, 5, 11, 13, 14]);
    assert_eq!(atn.rule_names(), ["prog", "expr", "atom"]);
}

#[test]
fn snapshots_can_be_built_in_code() {
    let data = AtnData {
        rule_names: vec!["r".to_string()],
        vocabulary: Vocabulary::from_symbolic_names([None, Some("A")]),
        states: vec![
            StateData {
                id: 5,
                rule_index: 0,
                kind: StateKind::RuleStart,
                transitions: vec![TransitionData {
                    target: 9,
                    epsilon: false,
                    symbols: vec![1],
                }],
            },
            StateData {
                id: 9,
                rule_index: 0,
                kind: StateKind::RuleStop,
                transitions: Vec::new(),
            },
        ],
    };
    let atn = Automaton::from_data(data).expect("valid");
    assert_eq!(atn.vocabulary().display_name(1), "A");
    assert_eq!(atn.state_label(1), "[9] RuleStop r");
}

#[test]
fn malformed_json_is_reported() {
    let err = Automaton::from_json_str("{ \"states\": 3 }").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn validation_errors_name_the_offending_state() {
    let err = Automaton::from_json_str(
        r#"{ "rule_names": ["r"], "states": [{ "id": 4, "rule_index": 0, "transitions": [{ "target": 40, "epsilon": true }] }] }"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "state 4 has a transition to unknown state 40");

    let err = Automaton::from_json_str(r#"{ "rule_names": [], "states": [{ "id": 2, "rule_index": 0 }] }"#)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "state 2 has rule index 0, but only 0 rules are declared"
    );
}
