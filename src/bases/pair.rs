use std::collections::HashMap ;
use std::sync::{ Arc, Mutex, PoisonError };

use crate::{ ExitStack, GrapplerError, Plugin, Plugins, Value };
use super::{ BasicGrappler, IterationSlot };



/// Boxed `(plugin, pair)` iterator produced by [`PairGrappler::iter_plugins`].
pub type PluginPairs<P> = Box<dyn Iterator<Item = ( Plugin, P )>>;

/// The scope context of a [`PairGrappler`]: the pair of every plugin yielded so far.
pub struct PairContext<P> {
	pairs: Arc<Mutex<HashMap<Plugin, P>>>,
}

impl<P> PairContext<P> {

	fn new() -> Self { Self { pairs: Arc::new( Mutex::new( HashMap::new() ))}}

	/// The pair recorded for `plugin`, if it was yielded in this scope.
	pub fn pair( &self, plugin: &Plugin ) -> Option<P>
	where
		P: Clone,
	{
		self.pairs.lock().unwrap_or_else( PoisonError::into_inner ).get( plugin ).cloned()
	}

	/// Number of distinct plugins yielded so far.
	pub fn len( &self ) -> usize {
		self.pairs.lock().unwrap_or_else( PoisonError::into_inner ).len()
	}

	/// Whether nothing was yielded yet.
	pub fn is_empty( &self ) -> bool { self.len() == 0 }

}

impl<P> std::fmt::Debug for PairContext<P> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "PairContext" ).field( "yielded", &self.len() ).finish()
	}
}

/// A [`BasicGrappler`] for sources that know, per plugin, a value to load it with.
///
/// [`iter_plugins`]( Self::iter_plugins ) yields each plugin together with its
/// pair. The pairs are recorded as the scope is consumed, and
/// [`load_with_pair`]( Self::load_with_pair ) receives the pair of the plugin
/// being loaded. Plugins not yielded in the current scope are unknown.
///
/// If a structurally equal plugin is yielded twice, the first pair is kept.
pub trait PairGrappler: Clone + Send + Sync + 'static {

	/// The value recorded next to each plugin.
	type Pair: Clone + Send + Sync + 'static ;

	/// A globally unique id naming this kind of grappler.
	fn id( &self ) -> &str ;

	/// Where the contexts of open scopes are kept.
	fn iteration_slot( &self ) -> &IterationSlot<PairContext<Self::Pair>>;

	/// Enumerates `(plugin, pair)` tuples for a new scope.
	///
	/// # Errors
	/// Any error aborts `find`, see
	/// [`BasicGrappler::create_iteration_context`].
	fn iter_plugins(
		&self,
		topic: Option<&str>,
		stack: &ExitStack,
	) -> Result<PluginPairs<Self::Pair>, GrapplerError>;

	/// Loads `plugin` using the pair it was yielded with.
	///
	/// # Errors
	/// Whatever loading through the pair fails with.
	fn load_with_pair( &self, plugin: &Plugin, pair: &Self::Pair ) -> Result<Value, GrapplerError>;

}

impl<G: PairGrappler> BasicGrappler for G {

	type Context = PairContext<G::Pair>;

	fn id( &self ) -> &str { PairGrappler::id( self ) }

	fn iteration_slot( &self ) -> &IterationSlot<Self::Context> { PairGrappler::iteration_slot( self ) }

	fn create_iteration_context(
		&self,
		topic: Option<&str>,
		stack: &ExitStack,
	) -> Result<( Plugins, Self::Context ), GrapplerError> {
		let context = PairContext::new();
		let pairs = Arc::clone( &context.pairs );
		let plugins: Plugins = Box::new( self.iter_plugins( topic, stack )?.map( move |( plugin, pair )| {
			pairs.lock()
				.unwrap_or_else( PoisonError::into_inner )
				.entry( plugin.clone() )
				.or_insert( pair );
			plugin
		}));
		Ok(( plugins, context ))
	}

	fn load_from_context( &self, plugin: &Plugin, context: &Self::Context ) -> Result<Value, GrapplerError> {
		match context.pair( plugin ) {
			Some( pair ) => self.load_with_pair( plugin, &pair ),
			None => Err( GrapplerError::unknown_plugin( plugin, PairGrappler::id( self ))),
		}
	}

}
