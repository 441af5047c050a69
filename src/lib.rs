//! Discover and load plugins contributed by the host application or by linked packages.
//!
//! A host declares extension points as **topics**. Plugins belong to one or more
//! topics and are produced by **grapplers**, backends that know how to find
//! plugins and how to load the objects behind them. The host doesn't need to
//! know which grapplers exist: it asks a [`CompositeGrappler`]( grapplers::CompositeGrappler )
//! that merges all of them.
//!
//! # Core Concepts
//!
//! - [`Plugin`]: A record describing one discoverable unit: the grappler that
//! 	produced it, an id opaque to everyone else, its [`Package`] and its topics.
//! 	Plugins are pure data.
//!
//! - [`Grappler`]: The backend contract. [`Grappler::find`] opens a [`Scope`] over
//! 	the plugins of a topic and [`Grappler::load`] resolves one of them to its
//! 	object, a type-erased [`Value`].
//!
//! - [`Scope`]: An iterator over plugins that owns whatever the grappler needed
//! 	to produce them. Dropping the scope releases those resources, exactly once,
//! 	in reverse order of acquisition. Many grapplers can only load plugins while
//! 	the scope that yielded them is open.
//!
//! - [`bases::BasicGrappler`]: The usual way to implement a grappler. Build some
//! 	state when a scope opens and load plugins from it; scope bookkeeping comes
//! 	for free.
//!
//! - [`WrapperGrappler`]: A grappler that decorates another one, hiding plugins
//! 	according to a [`WrapperConfig`].
//!
//! - [`Hook`]: The consumer side. Binds a topic to a grappler and yields the
//! 	loaded values of an expected type.
//!
//! # Grapplers
//!
//! - [`grapplers::StaticGrappler`] - objects registered by the host at runtime
//! - [`grapplers::EntryPointGrappler`] - [`grapplers::EntryPoint`]s registered at
//! 	link time with [`inventory::submit!`]
//! - [`grapplers::CompositeGrappler`] - merges grapplers and chains wrappers
//! 	around the merge
//! - [`grapplers::BouncerGrappler`] - hides plugins by plugin, package or topic
//!
//! # Example
//!
//! ```
//! use grappler::{ Grappler, Hook, WrapperGrappler };
//! use grappler::grapplers::{ Bouncer, CompositeGrappler, StaticGrappler };
//!
//! // The type every plugin of the "formatter" topic is expected to load to.
//! struct Formatter { name: &'static str, format: fn( &str ) -> String }
//!
//! # fn main() -> Result<(), grappler::GrapplerError> {
//! // Host components registered next to real plugins.
//! let builtin = StaticGrappler::new()
//! 	.plugin([ "formatter" ], Formatter { name: "upper", format: | text | text.to_uppercase() })
//! 	.plugin([ "formatter" ], Formatter { name: "lower", format: | text | text.to_lowercase() });
//!
//! // Third-party components, one of which the user turned off.
//! let mut contributed = StaticGrappler::new();
//! let noisy = contributed.add_plugin([ "formatter" ], Formatter { name: "noisy", format: | text | format!( "{text}!!!" ) });
//! contributed.add_plugin([ "formatter" ], "not a formatter" );
//!
//! let grappler = CompositeGrappler::new()
//! 	.source( builtin )
//! 	.source( contributed )
//! 	.wrap( WrapperGrappler::detached(
//! 		Bouncer::new().deny_plugin( noisy.source_id(), noisy.plugin_id() ),
//! 	));
//!
//! // Plugins of other types are skipped, denied plugins are never found.
//! let formatters = Hook::<Formatter>::new( "formatter", grappler.clone() )?
//! 	.grapple()?
//! 	.collect::<Result<Vec<_>, _>>()?;
//! let names = formatters.iter().map(| formatter | formatter.name ).collect::<Vec<_>>();
//! assert_eq!( names, vec![ "upper", "lower" ]);
//! assert_eq!(( formatters[0].format )( "hi" ), "HI" );
//!
//! // Denied plugins stay loadable from the grappler that owns them, as long as
//! // the scope that passed over them is open.
//! let mut scope = grappler.find( None )?;
//! assert_eq!( scope.by_ref().count(), 3 );
//! let value = grappler.load( &noisy )?;
//! assert!( value.downcast::<Formatter>().is_ok() );
//! scope.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Scopes and Threads
//!
//! Grapplers are `Send + Sync` and cheap to clone. Scopes are not `Send`: the state
//! a [`bases::BasicGrappler`] keeps for an open scope belongs to the thread that
//! opened it, and loading from another thread behaves as if no scope was open.
//! Two threads may iterate the same grappler at the same time without seeing each
//! other's scopes.

mod plugin ;
mod grappler ;
mod scope ;
pub mod bases ;
mod wrapper ;
pub mod grapplers ;
mod hook ;

pub use plugin::{ Package, Plugin };
pub use grappler::{ Grappler, GrapplerError, Value };
pub use scope::{ ExitStack, Plugins, Scope };
pub use wrapper::{ FilterMode, WrapperConfig, WrapperGrappler, WrappingGrappler };
pub use hook::{ Expected, Grapple, Hook };

#[doc( no_inline )]
pub use inventory ;
