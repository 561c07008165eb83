use crate::automaton::Automaton;
use crate::{State, Symbol};

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Walks a single path through the automaton, starting at the start state and taking
    /// one transition per symbol of `word`. Returns the state the walk ends in, or `None`
    /// as soon as a step has no defined transition.
    ///
    /// Where a pair of state and symbol has several targets, the minimal one is taken, so
    /// the walk stays a total deterministic function. This makes the result meaningful only
    /// for deterministic automata; on an NFA it follows one arbitrary path rather than
    /// exploring all of them. Determinize first (see [`Automaton::subset_construction`]) to
    /// decide acceptance for an NFA.
    pub fn reach<W: IntoIterator<Item = S>>(&self, word: W) -> Option<&Q> {
        let mut current = self.start();
        for symbol in word {
            current = self.transitions().successor(current, &symbol)?;
        }
        Some(current)
    }

    /// Returns true if and only if the automaton accepts `word`: the walk of [`Automaton::reach`]
    /// consumes the whole word and ends in an accepting state. A missing transition along
    /// the way is an ordinary reject, not an error. The empty word is accepted precisely
    /// when the start state is accepting.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, word: W) -> bool {
        self.reach(word).is_some_and(|state| self.is_accepting(state))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn ab_then_anything() -> Automaton<&'static str, char> {
        AutomatonBuilder::default()
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q1", 'b', "q2"),
                ("q2", 'a', "q2"),
                ("q2", 'b', "q2"),
            ])
            .with_accepting(["q2"])
            .into_dfa("q0")
    }

    #[test]
    fn acceptance_walk() {
        let dfa = ab_then_anything();
        assert!(dfa.accepts("ab".chars()));
        assert!(dfa.accepts("abba".chars()));
        assert!(!dfa.accepts("aa".chars()));
        assert!(!dfa.accepts("".chars()));
    }

    #[test]
    fn missing_transition_rejects() {
        let dfa = ab_then_anything();
        assert_eq!(dfa.reach("aa".chars()), None);
        assert_eq!(dfa.reach("ab".chars()), Some(&"q2"));
    }

    #[test]
    fn empty_word_depends_on_start_state() {
        let dfa = AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0")])
            .with_accepting(["q0"])
            .into_dfa("q0");
        assert!(dfa.accepts("".chars()));
        assert!(!ab_then_anything().accepts("".chars()));
    }

    #[test]
    fn single_path_on_nfa_takes_minimal_target() {
        let nfa = crate::tests::ends_with_ab_nfa();
        // one arbitrary path only; "q0" is the minimal of the two 'a'-targets of "q0"
        assert_eq!(nfa.reach(['a']), Some(&"q0"));
        assert!(!nfa.accepts("ab".chars()));
    }
}
