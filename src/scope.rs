//! Scoped iteration.
//!
//! A [`Scope`] is what [`Grappler::find`]( crate::Grappler::find ) returns: an
//! iterator over plugins that also owns the resources needed to produce and load
//! them. Resources are registered on an [`ExitStack`] and released exactly once,
//! in reverse order, when the scope is dropped or closed.

use std::cell::RefCell ;
use std::rc::Rc ;

use crate::Plugin ;



/// A boxed plugin iterator as produced inside a scope.
pub type Plugins = Box<dyn Iterator<Item = Plugin>>;

type Release = Box<dyn FnOnce()>;

/// A stack of release actions.
///
/// `ExitStack` is a handle: clones share the same stack. This lets a lazy
/// iterator keep a handle and open nested scopes while it is being consumed,
/// with all of them released together when the owning [`Scope`] ends.
///
/// Closing runs the registered actions last-in first-out and leaves the stack
/// empty, so closing twice is harmless. Actions registered while the stack is
/// closing are run by the same close.
#[derive( Clone, Default )]
pub struct ExitStack {
	releases: Rc<RefCell<Vec<Release>>>,
}

impl ExitStack {

	/// Creates an empty stack.
	pub fn new() -> Self { Self::default() }

	/// Registers an action to run when the stack closes.
	pub fn callback( &self, release: impl FnOnce() + 'static ) {
		self.releases.borrow_mut().push( Box::new( release ));
	}

	/// Adopts a nested scope.
	///
	/// The nested scope's releases run when this stack closes, and its plugins are
	/// handed back to the caller.
	pub fn enter( &self, mut scope: Scope ) -> Plugins {
		let plugins = scope.plugins.take().unwrap_or_else(|| Box::new( std::iter::empty() ));
		let nested = std::mem::take( &mut scope.stack );
		self.callback( move || nested.close() );
		plugins
	}

	/// Number of actions waiting to run.
	pub fn len( &self ) -> usize { self.releases.borrow().len() }

	/// Whether no action is waiting to run.
	pub fn is_empty( &self ) -> bool { self.releases.borrow().is_empty() }

	/// Runs every registered action, most recent first.
	pub fn close( &self ) {
		loop {
			// The borrow must end before the action runs: actions may touch this stack.
			let release = self.releases.borrow_mut().pop();
			match release {
				Some( release ) => release(),
				None => break,
			}
		}
	}

}

impl std::fmt::Debug for ExitStack {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ExitStack" )
			.field( "pending", &self.len() )
			.finish()
	}
}

/// An open iteration over the plugins of a grappler.
///
/// Dropping the scope ends it: the plugin iterator is dropped first, then the
/// scope's [`ExitStack`] is closed. This happens on every exit path, including
/// an early `break`, a `?` and a panic unwinding through the loop.
///
/// Scopes are neither `Send` nor `Sync`. The state a grappler keeps for an open
/// scope belongs to the thread that opened it.
#[must_use = "a scope releases its resources as soon as it is dropped"]
pub struct Scope {
	plugins: Option<Plugins>,
	stack: ExitStack,
}

impl Scope {

	/// A scope over `plugins` that holds no resources.
	pub fn new( plugins: impl Iterator<Item = Plugin> + 'static ) -> Self {
		Self::with_stack( plugins, ExitStack::new() )
	}

	/// A scope over `plugins` that closes `stack` when it ends.
	pub fn with_stack( plugins: impl Iterator<Item = Plugin> + 'static, stack: ExitStack ) -> Self {
		Self { plugins: Some( Box::new( plugins )), stack }
	}

	/// A scope that yields nothing.
	pub fn empty() -> Self { Self::new( std::iter::empty() ) }

	/// Ends the scope now. Equivalent to dropping it.
	pub fn close( self ) {}

}

impl Iterator for Scope {
	type Item = Plugin ;

	fn next( &mut self ) -> Option<Plugin> {
		self.plugins.as_mut()?.next()
	}
}

impl Drop for Scope {
	fn drop( &mut self ) {
		drop( self.plugins.take() );
		self.stack.close();
	}
}

impl std::fmt::Debug for Scope {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Scope" )
			.field( "plugins", &self.plugins.as_ref().map(| _ | "<iterator>" ))
			.field( "stack", &self.stack )
			.finish()
	}
}
