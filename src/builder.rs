use crate::automaton::{Automaton, TransitionTable};
use crate::math::OrderedSet;
use crate::{State, Symbol};

/// Helper struct for piecing together automata from lists of transitions. States are
/// discovered from the endpoints of the given transitions (plus the start state handed to
/// the finisher), the alphabet from the transition symbols; both can be extended explicitly
/// for states or symbols that appear on no transition.
///
/// # Example
///
/// We want to create a DFA with two states `0` and `1` over the alphabet `['a', 'b']` that
/// accepts exactly the words with an even number of `b`s:
///
/// ```
/// use nerode::prelude::*;
///
/// let dfa = AutomatonBuilder::default()
///     .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .with_accepting([0])
///     .into_dfa(0); // 0 is the start state
/// assert!(dfa.accepts("abba".chars()));
/// ```
pub struct AutomatonBuilder<Q: State, S: Symbol> {
    symbols: OrderedSet<S>,
    states: OrderedSet<Q>,
    edges: Vec<(Q, S, Q)>,
    accepting: OrderedSet<Q>,
}

impl<Q: State, S: Symbol> Default for AutomatonBuilder<Q, S> {
    fn default() -> Self {
        Self {
            symbols: OrderedSet::new(),
            states: OrderedSet::new(),
            edges: Vec::new(),
            accepting: OrderedSet::new(),
        }
    }
}

impl<Q: State, S: Symbol> AutomatonBuilder<Q, S> {
    /// Adds a list of transitions, given as `(source, symbol, target)` tuples. Source and
    /// target states as well as the symbols become part of the automaton automatically.
    pub fn with_transitions<I: IntoIterator<Item = (Q, S, Q)>>(mut self, iter: I) -> Self {
        self.edges.extend(iter);
        self
    }

    /// By default the alphabet consists of the symbols that appear on at least one
    /// transition. This method can be used to force additional alphabet symbols.
    pub fn with_alphabet_symbols<I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        self.symbols.extend(iter);
        self
    }

    /// Adds states that appear on no transition, for example isolated ones.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.states.extend(iter);
        self
    }

    /// Marks the given states as accepting. They must occur somewhere in the automaton,
    /// otherwise the finishers below panic.
    pub fn with_accepting<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.accepting.extend(iter);
        self
    }

    /// Builds the automaton with `start` as its start state.
    ///
    /// # Panics
    /// When an accepting state neither occurs on any transition nor was added through
    /// [`Self::with_states`] nor is the start state.
    pub fn into_nfa(self, start: Q) -> Automaton<Q, S> {
        let mut states = self.states;
        states.insert(start.clone());
        for (source, _, target) in &self.edges {
            states.insert(source.clone());
            states.insert(target.clone());
        }
        let alphabet: OrderedSet<S> = self
            .edges
            .iter()
            .map(|(_, symbol, _)| *symbol)
            .chain(self.symbols)
            .collect();
        let transitions: TransitionTable<Q, S> = self.edges.into_iter().collect();
        Automaton::try_new(states, alphabet, transitions, start, self.accepting)
            .unwrap_or_else(|error| panic!("invalid automaton: {error}"))
    }

    /// Builds the automaton with `start` as its start state and verifies that it is
    /// deterministic.
    ///
    /// # Panics
    /// When the collected transitions are not deterministic, or under the conditions of
    /// [`Self::into_nfa`].
    pub fn into_dfa(self, start: Q) -> Automaton<Q, S> {
        let automaton = self.into_nfa(start);
        assert!(
            automaton.is_deterministic(),
            "transition table is not deterministic"
        );
        automaton
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn states_and_alphabet_are_discovered() {
        let nfa = AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0"), ("q0", 'a', "q1"), ("q1", 'b', "q2")])
            .with_accepting(["q2"])
            .into_nfa("q0");
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.alphabet().len(), 2);
        assert!(!nfa.is_deterministic());
    }

    #[test]
    fn isolated_states_and_extra_symbols() {
        let dfa = AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0")])
            .with_states(["q1"])
            .with_alphabet_symbols(['b'])
            .into_dfa("q0");
        assert_eq!(dfa.size(), 2);
        assert!(dfa.alphabet().contains(&'b'));
        assert_eq!(dfa.transitions().targets(&"q1", &'a'), None);
    }

    #[test]
    #[should_panic(expected = "not deterministic")]
    fn dfa_finisher_rejects_nondeterminism() {
        AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0"), ("q0", 'a', "q1")])
            .into_dfa("q0");
    }

    #[test]
    #[should_panic(expected = "invalid automaton")]
    fn unknown_accepting_state_is_rejected() {
        AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0")])
            .with_accepting(["q5"])
            .into_nfa("q0");
    }
}
