use std::sync::Arc ;
use itertools::Itertools ;
use tracing::{ debug, trace, warn };

use crate::{ ExitStack, Grappler, GrapplerError, Plugin, Plugins, Value, WrappingGrappler };
use crate::bases::{ BasicGrappler, IterationSlot, PairContext, PairGrappler, PluginPairs };



/// Merges several grapplers into one and applies a chain of wrappers to the merge.
///
/// Sources are enumerated in the order they were added, each in its own order.
/// Wrappers are chained in the order they were added: the first one wraps the
/// merged sources directly, the next one wraps the first, and so on.
///
/// Loading walks the chain from the outermost wrapper inwards. A wrapper that
/// rejects a plugin passes the request on to what it wraps, and when every
/// wrapper rejected it, the merged sources load it from the source that yielded
/// it. Wrappers therefore decide what is visible, never what is resolvable.
///
/// ```
/// use grappler::{ Grappler, grapplers::{ CompositeGrappler, StaticGrappler }};
///
/// # fn main() -> Result<(), grappler::GrapplerError> {
/// let grappler = CompositeGrappler::new()
/// 	.source( StaticGrappler::new().plugin([ "colour" ], "red" ))
/// 	.source( StaticGrappler::new().plugin([ "colour" ], "green" ));
///
/// let colours = grappler.find( Some( "colour" ))?
/// 	.map(| plugin | grappler.load( &plugin ))
/// 	.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!( colours.len(), 2 );
/// # Ok(())
/// # }
/// ```
#[derive( Clone, Default )]
pub struct CompositeGrappler {
	/// Merged in order
	sources: Vec<Arc<dyn Grappler>>,
	/// Chained in order, the first one innermost
	wrappers: Vec<Arc<dyn WrappingGrappler>>,
	slot: IterationSlot<CompositeContext>,
}

/// What an open composite scope loads with.
pub struct CompositeContext {
	/// The merged sources
	source: MergeGrappler,
	/// Every wrapper layer, innermost first
	layers: Vec<Arc<dyn WrappingGrappler>>,
}

impl CompositeGrappler {

	/// Id of every composite grappler.
	pub const ID: &'static str = "grappler.grapplers.composite" ;

	/// Creates a composite with no sources and no wrappers.
	pub fn new() -> Self { Self::default() }

	/// Creates a composite over `sources`.
	pub fn from_sources( sources: impl IntoIterator<Item = Arc<dyn Grappler>> ) -> Self {
		Self { sources: sources.into_iter().collect(), ..Self::default() }
	}

	/// Adds a source.
	pub fn source( self, source: impl Grappler + 'static ) -> Self {
		self.shared_source( Arc::new( source ))
	}

	/// Adds a source that is shared with other owners.
	pub fn shared_source( mut self, source: Arc<dyn Grappler> ) -> Self {
		self.sources.push( source );
		self
	}

	/// Adds a wrapper around everything added so far.
	///
	/// The wrapper is used as a template: every scope attaches a fresh copy of it
	/// to the chain. A wrapper that already has a target will have that target
	/// replaced, with a warning.
	pub fn wrap( self, wrapper: impl WrappingGrappler + 'static ) -> Self {
		self.shared_wrap( Arc::new( wrapper ))
	}

	/// Adds a wrapper that is shared with other owners. See [`wrap`]( Self::wrap ).
	pub fn shared_wrap( mut self, wrapper: Arc<dyn WrappingGrappler> ) -> Self {
		self.wrappers.push( wrapper );
		self
	}

	/// The sources, in merge order.
	#[inline] pub fn sources( &self ) -> &[Arc<dyn Grappler>] { &self.sources }

	/// The wrappers, innermost first.
	#[inline] pub fn wrappers( &self ) -> &[Arc<dyn WrappingGrappler>] { &self.wrappers }

}

impl BasicGrappler for CompositeGrappler {

	type Context = CompositeContext ;

	fn id( &self ) -> &str { Self::ID }

	fn iteration_slot( &self ) -> &IterationSlot<CompositeContext> { &self.slot }

	fn create_iteration_context(
		&self,
		topic: Option<&str>,
		stack: &ExitStack,
	) -> Result<( Plugins, CompositeContext ), GrapplerError> {

		let source = MergeGrappler::new( self.sources.clone() );
		let mut wrapped: Arc<dyn Grappler> = Arc::new( source.clone() );
		let mut layers = Vec::with_capacity( self.wrappers.len() );

		for wrapper in &self.wrappers {
			if let Some( discarded ) = wrapper.wrapped() {
				warn!(
					wrapper = wrapper.id(),
					discarded = discarded.id(),
					"Grappler {:?} already wrapping another grappler ({:?}); currently wrapped grappler will be discarded",
					wrapper.id(), discarded.id()
				);
			}
			let layer = wrapper.rewrap( Arc::clone( &wrapped ));
			wrapped = layer.clone();
			layers.push( layer );
		}

		debug!(
			sources = %self.sources.iter().map(| source | source.id() ).join( ", " ),
			wrappers = layers.len(),
			?topic,
			"opening composite scope"
		);

		let plugins = stack.enter( wrapped.find( topic )? );
		Ok(( plugins, CompositeContext { source, layers }))

	}

	fn load_from_context( &self, plugin: &Plugin, context: &CompositeContext ) -> Result<Value, GrapplerError> {

		for layer in context.layers.iter().rev() {
			match layer.load( plugin ) {
				Err( err ) if err.is_unknown_plugin() => {
					trace!( layer = layer.id(), plugin = plugin.plugin_id(), "layer rejected plugin" );
					if layer.wrapped().is_none() { break }
				}
				result => return result,
			}
		}

		trace!( plugin = plugin.plugin_id(), "falling back to merged sources" );
		context.source.load( plugin ).map_err(| err | match err.is_unknown_plugin() {
			true => GrapplerError::unknown_plugin( plugin, Self::ID ),
			false => err,
		})

	}

}

impl std::fmt::Debug for CompositeGrappler {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "CompositeGrappler" )
			.field( "sources", &self.sources.iter().map(| source | source.id() ).collect::<Vec<_>>() )
			.field( "wrappers", &self.wrappers.iter().map(| wrapper | wrapper.id() ).collect::<Vec<_>>() )
			.finish_non_exhaustive()
	}
}

impl std::fmt::Debug for CompositeContext {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "CompositeContext" )
			.field( "layers", &self.layers.iter().map(| layer | layer.id() ).collect::<Vec<_>>() )
			.finish_non_exhaustive()
	}
}

/// The virtual grappler a composite builds over its sources for each scope.
///
/// Every source's scope is opened up front and released with the composite's
/// scope. Plugins are remembered with the source that yielded them, which is
/// where loads are sent.
#[derive( Clone )]
struct MergeGrappler {
	sources: Vec<Arc<dyn Grappler>>,
	slot: IterationSlot<PairContext<Arc<dyn Grappler>>>,
}

impl MergeGrappler {

	const ID: &'static str = "grappler.grapplers._internal.merge" ;

	fn new( sources: Vec<Arc<dyn Grappler>> ) -> Self {
		Self { sources, slot: IterationSlot::new() }
	}

}

impl PairGrappler for MergeGrappler {

	type Pair = Arc<dyn Grappler>;

	fn id( &self ) -> &str { Self::ID }

	fn iteration_slot( &self ) -> &IterationSlot<PairContext<Arc<dyn Grappler>>> { &self.slot }

	fn iter_plugins(
		&self,
		topic: Option<&str>,
		stack: &ExitStack,
	) -> Result<PluginPairs<Arc<dyn Grappler>>, GrapplerError> {
		let members = self.sources.iter()
			.map(| source | Ok::<_, GrapplerError>(( stack.enter( source.find( topic )? ), Arc::clone( source ))))
			.collect::<Result<Vec<_>, _>>()?;
		let pairs: PluginPairs<Arc<dyn Grappler>> = Box::new( members.into_iter().flat_map(|( plugins, source )| {
			plugins.map( move | plugin | ( plugin, Arc::clone( &source )))
		}));
		Ok( pairs )
	}

	fn load_with_pair( &self, plugin: &Plugin, source: &Arc<dyn Grappler> ) -> Result<Value, GrapplerError> {
		source.load( plugin )
	}

}
