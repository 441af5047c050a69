//! Templates for building [`Grappler`]( crate::Grappler )s.
//!
//! [`BasicGrappler`] turns a two-phase "build iteration state, then load with
//! it" implementation into a grappler that honours the scope contract.
//! [`PairGrappler`] specialises it for sources that remember, per yielded plugin,
//! something to load it with.

mod basic ;
mod pair ;

pub use basic::{ BasicGrappler, IterationSlot };
pub use pair::{ PairContext, PairGrappler, PluginPairs };
