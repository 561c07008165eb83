use itertools::Itertools;

use crate::math::{OrderedMap, OrderedSet};
use crate::{Show, State, Symbol};

/// A transition function in its most general, nondeterministic form: each pair of source
/// state and symbol maps to the set of possible successor states. A table is deterministic
/// precisely if every such set has at most one element, which [`TransitionTable::is_deterministic`]
/// checks. Target sets are never empty; a pair without successors simply has no entry.
#[derive(Clone, PartialEq, Eq)]
pub struct TransitionTable<Q: State, S: Symbol>(OrderedMap<Q, OrderedMap<S, OrderedSet<Q>>>);

impl<Q: State, S: Symbol> Default for TransitionTable<Q, S> {
    fn default() -> Self {
        Self(OrderedMap::new())
    }
}

impl<Q: State, S: Symbol> TransitionTable<Q, S> {
    /// Records a transition from `source` to `target` on `symbol`. Inserting the same
    /// transition twice has no effect.
    pub fn add(&mut self, source: Q, symbol: S, target: Q) {
        self.0
            .entry(source)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(target);
    }

    /// Returns the set of states reachable from `state` in one step on `symbol`, or `None`
    /// if no such transition is defined.
    pub fn targets(&self, state: &Q, symbol: &S) -> Option<&OrderedSet<Q>> {
        self.0.get(state).and_then(|row| row.get(symbol))
    }

    /// Returns the successor of `state` on `symbol`. When more than one target exists, the
    /// minimal one is returned, so for deterministic tables this is *the* successor.
    pub fn successor(&self, state: &Q, symbol: &S) -> Option<&Q> {
        self.targets(state, symbol).and_then(|targets| targets.iter().next())
    }

    /// Iterates over all targets of transitions leaving `state`, across all symbols.
    pub fn targets_from<'a>(&'a self, state: &Q) -> impl Iterator<Item = &'a Q> + 'a {
        self.0
            .get(state)
            .into_iter()
            .flat_map(|row| row.values().flatten())
    }

    /// Iterates over the individual transitions of the table as `(source, symbol, target)`
    /// triples, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (&Q, &S, &Q)> + '_ {
        self.0.iter().flat_map(|(source, row)| {
            row.iter()
                .flat_map(move |(symbol, targets)| targets.iter().map(move |target| (source, symbol, target)))
        })
    }

    /// The number of individual transitions in the table.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Whether the table contains no transitions at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if and only if every pair of state and symbol has at most one target,
    /// i.e. the table describes a deterministic transition function.
    pub fn is_deterministic(&self) -> bool {
        self.0
            .values()
            .flat_map(|row| row.values())
            .all(|targets| targets.len() <= 1)
    }
}

impl<Q: State, S: Symbol> FromIterator<(Q, S, Q)> for TransitionTable<Q, S> {
    fn from_iter<T: IntoIterator<Item = (Q, S, Q)>>(iter: T) -> Self {
        let mut table = Self::default();
        for (source, symbol, target) in iter {
            table.add(source, symbol, target);
        }
        table
    }
}

impl<Q: State, S: Symbol> std::fmt::Debug for TransitionTable<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.entries()
                .map(|(source, symbol, target)| {
                    format!("({}, {}, {})", source.show(), symbol.show(), target.show())
                })
                .join(", ")
        )
    }
}

/// The errors that can occur when assembling an [`Automaton`] from parts that do not fit
/// together. Each variant corresponds to one construction invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError<Q: State, S: Symbol> {
    /// The start state is not an element of the state set.
    MissingStartState(Q),
    /// An accepting state is not an element of the state set.
    UnknownAcceptingState(Q),
    /// A transition source or target is not an element of the state set.
    UnknownTransitionState(Q),
    /// A transition is labelled with a symbol outside the alphabet.
    UnknownSymbol(S),
}

impl<Q: State, S: Symbol> std::fmt::Display for ConstructionError<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::MissingStartState(state) => {
                write!(f, "Start state {} is not in the state set", state.show())
            }
            ConstructionError::UnknownAcceptingState(state) => {
                write!(f, "Accepting state {} is not in the state set", state.show())
            }
            ConstructionError::UnknownTransitionState(state) => {
                write!(f, "Transition endpoint {} is not in the state set", state.show())
            }
            ConstructionError::UnknownSymbol(symbol) => {
                write!(f, "Transition symbol {} is not in the alphabet", symbol.show())
            }
        }
    }
}

impl<Q: State, S: Symbol> std::error::Error for ConstructionError<Q, S> {}

/// A finite automaton: a set of states over which a [`TransitionTable`] operates, a finite
/// alphabet, a start state and a set of accepting states. Values are immutable once built;
/// every operation of this crate that changes an automaton returns a new one.
///
/// Whether the automaton is an NFA or a DFA is a property of its transition table, see
/// [`Automaton::is_deterministic`]; there is no separate type for the deterministic case.
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton<Q: State, S: Symbol> {
    states: OrderedSet<Q>,
    alphabet: OrderedSet<S>,
    transitions: TransitionTable<Q, S>,
    start: Q,
    accepting: OrderedSet<Q>,
}

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Assembles an automaton from its five parts, verifying that they fit together: the
    /// start state and all accepting states must be elements of the state set, every
    /// transition must connect states from the state set, and every transition symbol must
    /// be an element of the alphabet.
    pub fn try_new(
        states: OrderedSet<Q>,
        alphabet: OrderedSet<S>,
        transitions: TransitionTable<Q, S>,
        start: Q,
        accepting: OrderedSet<Q>,
    ) -> Result<Self, ConstructionError<Q, S>> {
        if !states.contains(&start) {
            return Err(ConstructionError::MissingStartState(start));
        }
        if let Some(state) = accepting.iter().find(|q| !states.contains(*q)) {
            return Err(ConstructionError::UnknownAcceptingState(state.clone()));
        }
        for (source, symbol, target) in transitions.entries() {
            if !states.contains(source) {
                return Err(ConstructionError::UnknownTransitionState(source.clone()));
            }
            if !states.contains(target) {
                return Err(ConstructionError::UnknownTransitionState(target.clone()));
            }
            if !alphabet.contains(symbol) {
                return Err(ConstructionError::UnknownSymbol(*symbol));
            }
        }
        Ok(Self {
            states,
            alphabet,
            transitions,
            start,
            accepting,
        })
    }

    /// Assembles an automaton whose parts are known to fit together. Used by the operations
    /// of this crate, which produce well-formed automata by construction.
    pub(crate) fn from_parts(
        states: OrderedSet<Q>,
        alphabet: OrderedSet<S>,
        transitions: TransitionTable<Q, S>,
        start: Q,
        accepting: OrderedSet<Q>,
    ) -> Self {
        Self {
            states,
            alphabet,
            transitions,
            start,
            accepting,
        }
    }

    /// The set of states.
    pub fn states(&self) -> &OrderedSet<Q> {
        &self.states
    }

    /// The alphabet the automaton operates on.
    pub fn alphabet(&self) -> &OrderedSet<S> {
        &self.alphabet
    }

    /// The transition table.
    pub fn transitions(&self) -> &TransitionTable<Q, S> {
        &self.transitions
    }

    /// The start state.
    pub fn start(&self) -> &Q {
        &self.start
    }

    /// The set of accepting states.
    pub fn accepting_states(&self) -> &OrderedSet<Q> {
        &self.accepting
    }

    /// Whether `state` is accepting.
    pub fn is_accepting(&self, state: &Q) -> bool {
        self.accepting.contains(state)
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if and only if the transition table is deterministic, i.e. the
    /// automaton is a DFA.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.is_deterministic()
    }
}

impl<Q: State, S: Symbol> std::fmt::Debug for Automaton<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "automaton over {{{}}} with start {}, accepting {{{}}}\n{:?}",
            self.alphabet.iter().map(|symbol| symbol.show()).join(", "),
            self.start.show(),
            self.accepting.iter().map(|state| state.show()).join(", "),
            self.transitions
        )
    }
}
