//! Automaton snapshot types and the read-only graph model built from them.
//!
//! [`AtnData`] is the serde-facing shape handed over by the grammar toolchain: states refer
//! to each other by their ATN state number. [`Automaton`] validates it once and stores the
//! states in an arena where transitions point at arena indices, with predecessor lists
//! precomputed for the adjacency queries.

use crate::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Position of a state inside [`Automaton::states`].
pub type StateIndex = usize;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtnData {
    pub rule_names: Vec<String>,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    pub states: Vec<StateData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateData {
    pub id: u32,
    /// Owning rule, or `-1` when the state belongs to no rule.
    #[serde(default = "no_rule")]
    pub rule_index: i32,
    #[serde(default)]
    pub kind: StateKind,
    #[serde(default)]
    pub transitions: Vec<TransitionData>,
}

fn no_rule() -> i32 {
    -1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionData {
    /// ATN state number of the target.
    pub target: u32,
    #[serde(default)]
    pub epsilon: bool,
    /// Accepted symbol codes; ignored for epsilon transitions.
    #[serde(default)]
    pub symbols: Vec<i32>,
}

/// ATN state flavours, named after the runtime classes without their `State` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StateKind {
    #[default]
    Basic,
    RuleStart,
    RuleStop,
    BasicBlockStart,
    PlusBlockStart,
    StarBlockStart,
    TokensStart,
    BlockEnd,
    StarLoopEntry,
    StarLoopback,
    PlusLoopback,
    LoopEnd,
}

impl StateKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::RuleStart => "RuleStart",
            Self::RuleStop => "RuleStop",
            Self::BasicBlockStart => "BasicBlockStart",
            Self::PlusBlockStart => "PlusBlockStart",
            Self::StarBlockStart => "StarBlockStart",
            Self::TokensStart => "TokensStart",
            Self::BlockEnd => "BlockEnd",
            Self::StarLoopEntry => "StarLoopEntry",
            Self::StarLoopback => "StarLoopback",
            Self::PlusLoopback => "PlusLoopback",
            Self::LoopEnd => "LoopEnd",
        }
    }
}

/// Symbol code to display name lookup.
///
/// Resolution follows the ANTLR runtime: an explicit display name wins, then the literal name
/// (e.g. `'+'`), then the symbolic name (e.g. `PLUS`), and finally the decimal code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub literal_names: Vec<Option<String>>,
    #[serde(default)]
    pub symbolic_names: Vec<Option<String>>,
    #[serde(default)]
    pub display_names: Vec<Option<String>>,
}

/// Symbol code of the end-of-input token.
pub const EOF: i32 = -1;

impl Vocabulary {
    pub fn from_symbolic_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            symbolic_names: names.into_iter().map(|n| n.map(Into::into)).collect(),
            ..Default::default()
        }
    }

    pub fn display_name(&self, symbol: i32) -> Cow<'_, str> {
        if symbol == EOF {
            return Cow::Borrowed("EOF");
        }
        fn lookup(names: &[Option<String>], symbol: i32) -> Option<&str> {
            let i = usize::try_from(symbol).ok()?;
            names.get(i)?.as_deref()
        }
        lookup(&self.display_names, symbol)
            .or_else(|| lookup(&self.literal_names, symbol))
            .or_else(|| lookup(&self.symbolic_names, symbol))
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(symbol.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub target: StateIndex,
    pub epsilon: bool,
    pub symbols: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: u32,
    pub rule: Option<usize>,
    pub kind: StateKind,
    pub transitions: Vec<Transition>,
}

impl State {
    /// Graph node identifier, `state<id>`.
    pub fn node_id(&self) -> String {
        format!("state{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
    predecessors: Vec<Vec<StateIndex>>,
    rule_names: Vec<String>,
    vocabulary: Vocabulary,
}

impl Automaton {
    /// Validates a snapshot and builds the arena.
    ///
    /// Fails on duplicate or path-like rule names (they name output files), duplicate state
    /// ids, transitions to unknown states, and rule indices outside the declared rule names.
    /// Nothing is rendered from a snapshot that fails here.
    pub fn from_data(data: AtnData) -> Result<Self> {
        let rule_count = data.rule_names.len();

        let mut seen_rules = FxHashSet::default();
        for name in &data.rule_names {
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(Error::InvalidRuleName { name: name.clone() });
            }
            if !seen_rules.insert(name.as_str()) {
                return Err(Error::DuplicateRuleName { name: name.clone() });
            }
        }

        let mut index_of: FxHashMap<u32, StateIndex> = FxHashMap::default();
        for (idx, s) in data.states.iter().enumerate() {
            if index_of.insert(s.id, idx).is_some() {
                return Err(Error::DuplicateStateId { id: s.id });
            }
        }

        let mut states = Vec::with_capacity(data.states.len());
        for s in data.states {
            let rule = match s.rule_index {
                -1 => None,
                r if r >= 0 && (r as usize) < rule_count => Some(r as usize),
                r => {
                    return Err(Error::RuleIndexOutOfRange {
                        state: s.id,
                        rule_index: r,
                        rule_count,
                    });
                }
            };
            let transitions = s
                .transitions
                .into_iter()
                .map(|t| {
                    let target = *index_of.get(&t.target).ok_or(Error::UnknownTarget {
                        state: s.id,
                        target: t.target,
                    })?;
                    Ok(Transition {
                        target,
                        epsilon: t.epsilon,
                        symbols: if t.epsilon { Vec::new() } else { t.symbols },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            states.push(State {
                id: s.id,
                rule,
                kind: s.kind,
                transitions,
            });
        }

        let mut predecessors = vec![Vec::new(); states.len()];
        for (idx, s) in states.iter().enumerate() {
            for t in &s.transitions {
                let preds: &mut Vec<StateIndex> = &mut predecessors[t.target];
                if preds.last() != Some(&idx) {
                    preds.push(idx);
                }
            }
        }

        tracing::debug!(
            states = states.len(),
            rules = rule_count,
            "built automaton from snapshot"
        );

        Ok(Self {
            states,
            predecessors,
            rule_names: data.rule_names,
            vocabulary: data.vocabulary,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_data(serde_json::from_str(text)?)
    }

    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self> {
        Self::from_data(serde_json::from_reader(reader)?)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, index: StateIndex) -> &State {
        &self.states[index]
    }

    /// Sources of the transitions that target `index`, each listed once, in arena order.
    pub fn predecessors(&self, index: StateIndex) -> &[StateIndex] {
        &self.predecessors[index]
    }

    pub fn rule_count(&self) -> usize {
        self.rule_names.len()
    }

    pub fn rule_names(&self) -> &[String] {
        &self.rule_names
    }

    /// Panics when `rule` is not a declared rule index.
    pub fn rule_name(&self, rule: usize) -> &str {
        &self.rule_names[rule]
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Arena indices of the states owned by `rule`, in arena order.
    pub fn states_of_rule(&self, rule: usize) -> impl Iterator<Item = StateIndex> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.rule == Some(rule))
            .map(|(idx, _)| idx)
    }

    /// `[N] Kind rule` for owned states, `stateN` otherwise.
    pub fn state_label(&self, index: StateIndex) -> String {
        let s = &self.states[index];
        match s.rule {
            Some(rule) => format!("[{}] {} {}", s.id, s.kind.tag(), self.rule_names[rule]),
            None => s.node_id(),
        }
    }

    /// True when the state has no outgoing transitions and nothing targets it.
    pub fn is_orphan(&self, index: StateIndex) -> bool {
        self.states[index].transitions.is_empty() && self.predecessors[index].is_empty()
    }

    /// One-hop adjacency: the state is owned by `rule`, targets a state of `rule`, or is
    /// targeted by a state of `rule`.
    pub fn is_state_connected_to_rule(&self, index: StateIndex, rule: usize) -> bool {
        let s = &self.states[index];
        s.rule == Some(rule)
            || s
                .transitions
                .iter()
                .any(|t| self.is_transition_connected_to_rule(t, rule))
            || self.predecessors[index]
                .iter()
                .any(|&p| self.states[p].rule == Some(rule))
    }

    pub fn is_transition_connected_to_rule(&self, transition: &Transition, rule: usize) -> bool {
        self.states[transition.target].rule == Some(rule)
    }
}
