//! Ready-made grapplers.
//!
//! - [`CompositeGrappler`] merges grapplers and chains wrappers around them.
//! - [`StaticGrappler`] serves objects registered by the host application.
//! - [`EntryPointGrappler`] serves [`EntryPoint`]s registered at link time.
//! - [`BouncerGrappler`] hides the plugins a [`Bouncer`] denies.

mod composite ;
mod static_table ;
mod entry_point ;
mod bouncer ;

pub use composite::{ CompositeContext, CompositeGrappler };
pub use static_table::StaticGrappler ;
pub use entry_point::{ EntryPoint, EntryPointGrappler };
pub use bouncer::{ Bouncer, BouncerGrappler, DeniedPlugin };
