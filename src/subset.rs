use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::automaton::{Automaton, TransitionTable};
use crate::math::OrderedSet;
use crate::{Show, State, Symbol};

/// A composite state as produced by the subset construction: an immutable set of states of
/// the original automaton in canonical (sorted) form, so that equal sets compare equal and
/// composite states can be used as map keys and be totally ordered like any other state
/// label.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet<Q: State>(OrderedSet<Q>);

impl<Q: State> StateSet<Q> {
    /// The composite state consisting of exactly one original state.
    pub fn singleton(state: Q) -> Self {
        Self(OrderedSet::from([state]))
    }

    /// Iterates over the member states in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Q> + '_ {
        self.0.iter()
    }

    /// Whether `state` is a member.
    pub fn contains(&self, state: &Q) -> bool {
        self.0.contains(state)
    }

    /// The number of member states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<Q: State> FromIterator<Q> for StateSet<Q> {
    fn from_iter<T: IntoIterator<Item = Q>>(iter: T) -> Self {
        Self(OrderedSet::from_iter(iter))
    }
}

impl<Q: State> IntoIterator for StateSet<Q> {
    type Item = Q;
    type IntoIter = std::collections::btree_set::IntoIter<Q>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<Q: State> Extend<Q> for StateSet<Q> {
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<Q: State> Show for StateSet<Q> {
    fn show(&self) -> String {
        if self.0.is_empty() {
            "∅".to_string()
        } else {
            format!("{{{}}}", self.iter().map(|state| state.show()).join(", "))
        }
    }
}

impl<Q: State> std::fmt::Debug for StateSet<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Applies the subset construction to `self`, producing a deterministic automaton over
    /// composite states that accepts the same language. Epsilon transitions are not
    /// handled; the input is expected to be epsilon-free.
    ///
    /// Starting from the composite state containing only the start state, unexplored
    /// composite states are expanded one at a time: for every symbol, the targets of all
    /// members are collected into one composite successor. An empty union yields no
    /// transition, and every composite state is expanded at most once, so the construction
    /// terminates after at most `2^n` expansions. A composite state is accepting if it
    /// contains an accepting state of `self`.
    pub fn subset_construction(&self) -> Automaton<StateSet<Q>, S> {
        let initial = StateSet::singleton(self.start().clone());
        let mut states: OrderedSet<StateSet<Q>> = OrderedSet::from([initial.clone()]);
        let mut transitions = TransitionTable::default();
        let mut queue = VecDeque::from([initial.clone()]);

        while let Some(current) = queue.pop_front() {
            for symbol in self.alphabet() {
                let successor: StateSet<Q> = current
                    .iter()
                    .filter_map(|state| self.transitions().targets(state, symbol))
                    .flatten()
                    .cloned()
                    .collect();
                if successor.is_empty() {
                    continue;
                }
                if states.insert(successor.clone()) {
                    trace!("registering composite state {}", successor.show());
                    queue.push_back(successor.clone());
                }
                transitions.add(current.clone(), *symbol, successor);
            }
        }

        let accepting = states
            .iter()
            .filter(|composite| composite.iter().any(|state| self.is_accepting(state)))
            .cloned()
            .collect();
        debug!(
            "subset construction expanded {} states into {} composite states",
            self.size(),
            states.len()
        );
        Automaton::from_parts(states, self.alphabet().clone(), transitions, initial, accepting)
    }
}
