use itertools::Itertools;
use tracing::{debug, trace};

use crate::automaton::{Automaton, TransitionTable};
use crate::math::{OrderedMap, OrderedSet, Partition};
use crate::{Show, State, Symbol};

impl<Q: State, S: Symbol> Automaton<Q, S> {
    /// Returns the unique minimal DFA accepting the same language as `self`, computed with
    /// Moore's partition refinement algorithm: the accepting/rejecting split is refined
    /// until no block contains states that reach different blocks under some symbol, at
    /// which point two states share a block exactly when they accept the same set of
    /// suffixes. Each block is then collapsed into its minimal member, so the states of the
    /// result are a subset of the (reachable) states of the input and re-minimizing yields
    /// a structurally identical automaton.
    ///
    /// Unreachable states are pruned up front, see [`Automaton::trim`].
    ///
    /// # Panics
    /// When `self` is not deterministic.
    pub fn minimize(&self) -> Automaton<Q, S> {
        assert!(
            self.is_deterministic(),
            "partition refinement requires a deterministic automaton"
        );
        let trimmed = self.trim();
        let partition = refine(&trimmed);
        quotient(&trimmed, &partition)
    }
}

/// Refines the partition {accepting, rejecting} of the states of `automaton` to the
/// coarsest congruence: a fixpoint loop that keeps splitting blocks whose members disagree
/// on the block their successor belongs to. The partition grows by at least one block per
/// effective split and is bounded by the state count, so the loop terminates.
fn refine<Q: State, S: Symbol>(automaton: &Automaton<Q, S>) -> Partition<Q> {
    let accepting = automaton.accepting_states().clone();
    let rejecting: OrderedSet<Q> = automaton
        .states()
        .iter()
        .filter(|state| !automaton.is_accepting(state))
        .cloned()
        .collect();
    let mut partition = Partition::new([accepting, rejecting]);

    loop {
        let mut next: Vec<OrderedSet<Q>> = Vec::new();
        let mut changed = false;
        for block in &partition {
            match split(automaton, &partition, block) {
                Some(pieces) => {
                    trace!(
                        "splitting block {{{}}} into {} pieces",
                        block.iter().map(|state| state.show()).join(", "),
                        pieces.len()
                    );
                    changed = true;
                    next.extend(pieces);
                }
                None => next.push(block.clone()),
            }
        }
        partition = Partition::from(next);
        if !changed {
            break;
        }
    }
    debug!(
        "partition refinement converged at {} blocks over {} states",
        partition.size(),
        automaton.size()
    );
    partition
}

/// Tries to split `block` along the first symbol under which its members do not all reach
/// the same block of `partition`. A member without a transition on the symbol is grouped
/// under its own distinguished no-target class. Returns `None` if no symbol separates the
/// block.
fn split<Q: State, S: Symbol>(
    automaton: &Automaton<Q, S>,
    partition: &Partition<Q>,
    block: &OrderedSet<Q>,
) -> Option<Vec<OrderedSet<Q>>> {
    for symbol in automaton.alphabet() {
        let mut groups: OrderedMap<Option<usize>, OrderedSet<Q>> = OrderedMap::new();
        for state in block {
            let class = automaton
                .transitions()
                .successor(state, symbol)
                .map(|target| {
                    partition
                        .block_of(target)
                        .expect("successors of partitioned states stay within the partition")
                });
            groups.entry(class).or_default().insert(state.clone());
        }
        if groups.len() > 1 {
            return Some(groups.into_values().collect());
        }
    }
    None
}

/// Collapses every block of `partition` into its minimal member and rebuilds the automaton
/// over these representatives. All members of a converged block agree on the block their
/// successors lie in, so the representative's own transitions decide the quotient's.
fn quotient<Q: State, S: Symbol>(
    automaton: &Automaton<Q, S>,
    partition: &Partition<Q>,
) -> Automaton<Q, S> {
    let representative = |block: &OrderedSet<Q>| {
        block
            .iter()
            .next()
            .expect("blocks of a partition are never empty")
            .clone()
    };
    let mut class_of: OrderedMap<Q, Q> = OrderedMap::new();
    for block in partition {
        let rep = representative(block);
        for state in block {
            class_of.insert(state.clone(), rep.clone());
        }
    }
    let resolve = |state: &Q| {
        class_of
            .get(state)
            .expect("every state belongs to exactly one block")
            .clone()
    };

    let states: OrderedSet<Q> = partition.iter().map(representative).collect();
    let mut transitions = TransitionTable::default();
    for rep in &states {
        for symbol in automaton.alphabet() {
            if let Some(target) = automaton.transitions().successor(rep, symbol) {
                transitions.add(rep.clone(), *symbol, resolve(target));
            }
        }
    }
    let start = resolve(automaton.start());
    let accepting = automaton.accepting_states().iter().map(resolve).collect();
    Automaton::from_parts(
        states,
        automaton.alphabet().clone(),
        transitions,
        start,
        accepting,
    )
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{wiki_dfa, words_up_to};

    #[test_log::test]
    fn wiki_dfa_minimizes_to_three_states() {
        let dfa = wiki_dfa();
        let minimal = dfa.minimize();
        assert!(minimal.is_deterministic());
        assert_eq!(minimal.size(), 3);
        for word in words_up_to(&['a', 'b'], 6) {
            assert_eq!(
                dfa.accepts(word.iter().copied()),
                minimal.accepts(word.iter().copied()),
                "disagreement on {:?}",
                word
            );
        }
    }

    #[test]
    fn minimization_is_idempotent() {
        let minimal = wiki_dfa().minimize();
        assert_eq!(minimal.minimize(), minimal);
    }

    #[test]
    fn already_minimal_automaton_keeps_its_states() {
        // pairwise inequivalent states: no two states agree on all suffixes
        let dfa = AutomatonBuilder::default()
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q0", 'b', "q2"),
                ("q1", 'a', "q0"),
                ("q1", 'b', "q3"),
                ("q2", 'a', "q3"),
                ("q2", 'b', "q0"),
                ("q3", 'a', "q2"),
                ("q3", 'b', "q1"),
            ])
            .with_accepting(["q0"])
            .into_dfa("q0");
        let minimal = dfa.minimize();
        assert_eq!(minimal.size(), 4);
        assert_eq!(minimal, dfa);
    }

    #[test]
    fn unreachable_states_are_pruned_before_refinement() {
        // the unreachable accepting state 2 must not keep 0 and 1 apart
        let dfa = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'a', 1), (2, 'a', 0)])
            .with_accepting([2])
            .into_dfa(0);
        let minimal = dfa.minimize();
        assert_eq!(minimal.size(), 1);
        assert!(minimal.accepting_states().is_empty());
        assert!(!minimal.states().contains(&2));
    }

    #[test]
    fn all_accepting_states_collapse_into_one() {
        let dfa = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'a', 0)])
            .with_accepting([0, 1])
            .into_dfa(0);
        let minimal = dfa.minimize();
        assert_eq!(minimal.size(), 1);
        assert!(minimal.accepts("aaa".chars()));
        assert!(minimal.accepts("".chars()));
    }

    #[test]
    fn subset_construction_composes_with_minimization() {
        let nfa = crate::tests::ends_with_ab_nfa();
        let dfa = nfa.subset_construction();
        let minimal = dfa.minimize();
        assert!(minimal.size() <= dfa.size());
        assert_eq!(minimal.size(), 3);
        for word in words_up_to(&['a', 'b'], 6) {
            assert_eq!(
                dfa.accepts(word.iter().copied()),
                minimal.accepts(word.iter().copied()),
                "disagreement on {:?}",
                word
            );
        }
    }

    #[test]
    #[should_panic(expected = "deterministic")]
    fn refining_a_nondeterministic_automaton_is_rejected() {
        crate::tests::ends_with_ab_nfa().minimize();
    }
}
