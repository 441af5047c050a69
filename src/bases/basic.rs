use std::collections::HashMap ;
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };
use std::thread::ThreadId ;
use tracing::trace ;

use crate::{ ExitStack, Grappler, GrapplerError, Plugin, Plugins, Scope, Value };



/// Per-thread storage for the contexts of open iteration scopes.
///
/// Every [`BasicGrappler`] owns one. While a scope is open, its context is
/// reachable from [`Grappler::load`] on the thread that opened it, and only
/// there: loading from any other thread behaves as if no scope was open.
///
/// Scopes on the same grappler and thread nest. The most recently opened one
/// that is still open is the current one.
///
/// Clones share storage, so a cloned grappler handle sees the scopes opened
/// through the original.
pub struct IterationSlot<C> {
	contexts: Arc<Mutex<HashMap<ThreadId, Vec<Arc<C>>>>>,
}

impl<C> IterationSlot<C> {

	/// Creates a slot with no open scope.
	pub fn new() -> Self {
		Self { contexts: Arc::new( Mutex::new( HashMap::new() )) }
	}

	/// The context of the current thread's innermost open scope.
	pub fn current( &self ) -> Option<Arc<C>> {
		self.lock()
			.get( &std::thread::current().id() )
			.and_then(| stack | stack.last() )
			.cloned()
	}

	/// Whether the current thread has an open scope.
	pub fn is_open( &self ) -> bool { self.current().is_some() }

	fn push( &self, context: Arc<C> ) -> ThreadId {
		let thread = std::thread::current().id();
		self.lock().entry( thread ).or_default().push( context );
		thread
	}

	fn remove( &self, thread: ThreadId, context: &Arc<C> ) {
		let mut contexts = self.lock();
		if let Some( stack ) = contexts.get_mut( &thread ) {
			// Scopes may be dropped out of order, so match by identity rather than position.
			if let Some( index ) = stack.iter().rposition(| open | Arc::ptr_eq( open, context )) {
				stack.remove( index );
			}
			if stack.is_empty() { contexts.remove( &thread ); }
		}
	}

	fn lock( &self ) -> MutexGuard<'_, HashMap<ThreadId, Vec<Arc<C>>>> {
		// Every critical section is a single map operation, a poisoned map is still consistent.
		self.contexts.lock().unwrap_or_else( PoisonError::into_inner )
	}

}

impl<C> Clone for IterationSlot<C> {
	fn clone( &self ) -> Self { Self { contexts: Arc::clone( &self.contexts )}}
}

impl<C> Default for IterationSlot<C> {
	fn default() -> Self { Self::new() }
}

impl<C> std::fmt::Debug for IterationSlot<C> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "IterationSlot" )
			.field( "open_threads", &self.lock().len() )
			.finish()
	}
}

/// A two-phase template for grapplers that need per-scope state.
///
/// Implement [`create_iteration_context`]( Self::create_iteration_context ) and
/// [`load_from_context`]( Self::load_from_context ) and the type becomes a
/// [`Grappler`]:
///
/// - `find` creates the context, stores it in the [`IterationSlot`] for the
/// 	current thread and returns the plugins as a [`Scope`].
/// - `load` hands the current thread's innermost context to
/// 	`load_from_context`. Without an open scope it fails with
/// 	[`GrapplerError::UnknownPlugin`].
/// - When the scope ends, everything registered on the [`ExitStack`] is released,
/// 	then the context is removed from the slot and
/// 	[`cleanup_iteration_context`]( Self::cleanup_iteration_context ) runs. This
/// 	happens exactly once per scope, however the scope ends.
///
/// Implementors are handles: `Clone` is expected to be cheap and clones share
/// their [`IterationSlot`].
///
/// ```
/// use std::sync::Arc ;
/// use grappler::{ ExitStack, Grappler, GrapplerError, Package, Plugin, Plugins, Value };
/// use grappler::bases::{ BasicGrappler, IterationSlot };
///
/// #[derive( Clone, Default )]
/// struct Numbers { slot: IterationSlot<Vec<Plugin>> }
///
/// impl BasicGrappler for Numbers {
/// 	type Context = Vec<Plugin>;
///
/// 	fn id( &self ) -> &str { "example.numbers" }
/// 	fn iteration_slot( &self ) -> &IterationSlot<Vec<Plugin>> { &self.slot }
///
/// 	fn create_iteration_context(
/// 		&self,
/// 		topic: Option<&str>,
/// 		_stack: &ExitStack,
/// 	) -> Result<( Plugins, Vec<Plugin> ), GrapplerError> {
/// 		let package = Package::new( "numbers", "1.0.0", "numbers", None );
/// 		let context = ( 0..3 )
/// 			.map(| n | Plugin::new( "example.numbers", n.to_string(), package.clone(), [ "numbers" ]))
/// 			.filter(| plugin | plugin.matches( topic ))
/// 			.collect::<Vec<_>>();
/// 		let plugins: Plugins = Box::new( context.clone().into_iter() );
/// 		Ok(( plugins, context ))
/// 	}
///
/// 	fn load_from_context( &self, plugin: &Plugin, context: &Vec<Plugin> ) -> Result<Value, GrapplerError> {
/// 		match context.contains( plugin ) {
/// 			true => Ok( Arc::new( plugin.plugin_id().parse::<u32>().unwrap_or_default() )),
/// 			false => Err( GrapplerError::unknown_plugin( plugin, "example.numbers" )),
/// 		}
/// 	}
/// }
///
/// # fn main() -> Result<(), GrapplerError> {
/// let numbers = Numbers::default();
/// let loaded = numbers.find( None )?
/// 	.map(| plugin | numbers.load( &plugin ))
/// 	.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!( loaded.len(), 3 );
/// # Ok(())
/// # }
/// ```
pub trait BasicGrappler: Clone + Send + Sync + 'static {

	/// State built when a scope opens and threaded through to every load.
	type Context: Send + Sync + 'static ;

	/// A globally unique id naming this kind of grappler.
	fn id( &self ) -> &str ;

	/// Where the contexts of open scopes are kept.
	fn iteration_slot( &self ) -> &IterationSlot<Self::Context>;

	/// Builds the plugin sequence and the context for a new scope.
	///
	/// Called exactly once per scope. Anything that has to be released when the
	/// scope ends goes on `stack`, including nested scopes of other grapplers
	/// (see [`ExitStack::enter`]).
	///
	/// # Errors
	/// Any error aborts `find`; whatever was already registered on `stack` is
	/// released before the error is returned.
	fn create_iteration_context(
		&self,
		topic: Option<&str>,
		stack: &ExitStack,
	) -> Result<( Plugins, Self::Context ), GrapplerError>;

	/// Loads a plugin using the context of the scope that is open on this thread.
	///
	/// # Errors
	/// [`GrapplerError::UnknownPlugin`] when the context does not know `plugin`.
	fn load_from_context( &self, plugin: &Plugin, context: &Self::Context ) -> Result<Value, GrapplerError>;

	/// Runs once when a scope ends, after its stack was released.
	fn cleanup_iteration_context( &self, _context: &Self::Context ) {}

}

impl<B: BasicGrappler> Grappler for B {

	fn id( &self ) -> &str { BasicGrappler::id( self ) }

	fn find( &self, topic: Option<&str> ) -> Result<Scope, GrapplerError> {

		let resources = ExitStack::new();
		let ( plugins, context ) = match self.create_iteration_context( topic, &resources ) {
			Ok( created ) => created,
			Err( err ) => {
				resources.close();
				return Err( err );
			}
		};

		let context = Arc::new( context );
		let thread = self.iteration_slot().push( Arc::clone( &context ));
		trace!( grappler = BasicGrappler::id( self ), ?topic, "opened iteration scope" );

		// The cleanup goes in first so that it runs after every resource is released.
		let stack = ExitStack::new();
		let this = self.clone();
		stack.callback( move || {
			this.iteration_slot().remove( thread, &context );
			this.cleanup_iteration_context( &context );
			trace!( grappler = BasicGrappler::id( &this ), "closed iteration scope" );
		});
		stack.callback( move || resources.close() );

		Ok( Scope::with_stack( plugins, stack ))

	}

	fn load( &self, plugin: &Plugin ) -> Result<Value, GrapplerError> {
		match self.iteration_slot().current() {
			Some( context ) => self.load_from_context( plugin, &context ),
			None => Err( GrapplerError::unknown_plugin( plugin, BasicGrappler::id( self ))),
		}
	}

}
