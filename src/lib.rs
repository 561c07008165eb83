//! Library for working with finite automata over arbitrary state and symbol types.
//!
//! An automaton consists of a finite set of states $Q$, a finite alphabet $\Sigma$, a transition
//! function $\delta$, a designated start state and a set of accepting states. The transition
//! function is kept in its most general form, mapping a pair of state and symbol to a *set* of
//! successor states; a deterministic automaton (DFA) is simply the special case in which every
//! such set has at most one element. This uniform representation means the same [`automaton::Automaton`]
//! type can hold an NFA, the DFA obtained from it by the subset construction, and the minimal
//! DFA obtained from that by partition refinement.
//!
//! The pipeline the crate implements is the classical one: build an automaton (through
//! [`automaton::Automaton::try_new`] or the more convenient [`builder::AutomatonBuilder`]), check whether it
//! is deterministic, run finite words through it, determinize it via the subset construction
//! (see the [`subset`] module) and minimize the result (see the `minimization` module, which
//! is gated behind the default-enabled `minimize` feature). All of these operations are pure;
//! each produces a fresh [`automaton::Automaton`] value and leaves its input untouched, so values can be
//! shared freely between threads.
//!
//! State labels only need to be orderable, hashable and cloneable, see [`State`]. The total
//! order is load-bearing: it gives composite states of the subset construction a canonical
//! form and makes the choice of block representatives during minimization reproducible.
//! Epsilon transitions are not modelled; automata are expected to be epsilon-free.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use nerode::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Automaton, ConstructionError, TransitionTable},
        builder::AutomatonBuilder,
        math,
        reachable::Reachable,
        subset::StateSet,
        Show, State, Symbol,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout
/// the crate and do not really fit to the top level.
pub mod math;

/// Defines the automaton model itself: transition tables, the [`automaton::Automaton`] value
/// type, validated construction and the determinism predicate.
pub mod automaton;

/// Provides [`builder::AutomatonBuilder`] for piecing together automata from edge lists.
pub mod builder;

/// Running finite words through an automaton.
pub mod run;

/// The subset construction, turning an NFA into an equivalent DFA.
pub mod subset;

/// Iteration over reachable states and restriction to the reachable part.
pub mod reachable;

/// DFA minimization through partition refinement. This is feature gated behind the
/// `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

use std::fmt::Debug;
use std::hash::Hash;

/// A state label is any type that can be used to identify the states of an automaton. Labels
/// must be totally ordered; the order determines the canonical form of composite states built
/// by the subset construction and which member of an equivalence block becomes its
/// representative during minimization.
pub trait State: Clone + Eq + Ord + Hash + Debug + Show {}

impl<T: Clone + Eq + Ord + Hash + Debug + Show> State for T {}

/// A symbol is an element of the (finite) alphabet of an automaton.
pub trait Symbol: Copy + Eq + Ord + Hash + Debug + Show {}

impl<T: Copy + Eq + Ord + Hash + Debug + Show> Symbol for T {}

/// Helper trait which can be used to display states and symbols. For a state label this
/// should return something like q0, q1, q2 and for a symbol just the symbol itself. Mainly
/// used in error messages, trace output and `Debug` implementations.
pub trait Show {
    /// Returns a human readable representation of `self`.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for u32 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for i32 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
