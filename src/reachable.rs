use std::collections::VecDeque;

use tracing::trace;

use crate::automaton::Automaton;
use crate::math::{OrderedSet, Set};
use crate::{State, Symbol};

/// Iterator over the states of an automaton that are reachable from its start state, in
/// breadth-first order. Created through [`Automaton::reachable_states`].
pub struct Reachable<'a, Q: State, S: Symbol> {
    automaton: &'a Automaton<Q, S>,
    seen: Set<&'a Q>,
    queue: VecDeque<&'a Q>,
}

impl<'a, Q: State, S: Symbol> Reachable<'a, Q, S> {
    pub(crate) fn new(automaton: &'a Automaton<Q, S>) -> Self {
        let mut seen = Set::default();
        seen.insert(automaton.start());
        let mut queue = VecDeque::new();
        queue.push_back(automaton.start());
        Self {
            automaton,
            seen,
            queue,
        }
    }
}

impl<'a, Q: State, S: Symbol> Iterator for Reachable<'a, Q, S> {
    type Item = &'a Q;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.queue.pop_front()?;
        for target in self.automaton.transitions().targets_from(state) {
            if self.seen.insert(target) {
                self.queue.push_back(target);
            }
        }
        Some(state)
    }
}

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Iterates over the states reachable from the start state, the start state first.
    pub fn reachable_states(&self) -> Reachable<'_, Q, S> {
        Reachable::new(self)
    }

    /// Returns the restriction of `self` to its reachable part: states that cannot be
    /// reached from the start state are removed, together with their transitions and their
    /// membership in the accepting set. The alphabet is left unchanged.
    ///
    /// Minimization relies on this: unreachable states can block merges between states
    /// that accept the same language, so `minimize` prunes first.
    pub fn trim(&self) -> Automaton<Q, S> {
        let reachable: OrderedSet<Q> = self.reachable_states().cloned().collect();
        if reachable.len() < self.size() {
            trace!("trimming {} unreachable states", self.size() - reachable.len());
        }
        let transitions = self
            .transitions()
            .entries()
            .filter(|(source, _, _)| reachable.contains(*source))
            .map(|(source, symbol, target)| (source.clone(), *symbol, target.clone()))
            .collect();
        let accepting = self
            .accepting_states()
            .iter()
            .filter(|state| reachable.contains(*state))
            .cloned()
            .collect();
        Automaton::from_parts(
            reachable,
            self.alphabet().clone(),
            transitions,
            self.start().clone(),
            accepting,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn reachable_states_in_breadth_first_order() {
        let dfa = AutomatonBuilder::default()
            .with_transitions([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 2),
                (1, 'b', 0),
                (2, 'a', 2),
                (2, 'b', 2),
            ])
            .with_accepting([2])
            .into_dfa(0);
        assert_eq!(dfa.reachable_states().collect::<Vec<_>>(), vec![&0, &1, &2]);
    }

    #[test]
    fn trim_removes_unreachable_states() {
        let dfa = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'a', 1), (2, 'a', 0)])
            .with_accepting([2])
            .into_dfa(0);
        let trimmed = dfa.trim();
        assert_eq!(trimmed.size(), 2);
        assert!(!trimmed.states().contains(&2));
        assert!(trimmed.accepting_states().is_empty());
        assert_eq!(trimmed.transitions().targets(&2, &'a'), None);
        assert_eq!(trimmed.alphabet(), dfa.alphabet());
    }

    #[test]
    fn trim_is_identity_on_reachable_automata() {
        let dfa = crate::tests::wiki_dfa();
        assert_eq!(dfa.trim(), dfa);
    }
}
