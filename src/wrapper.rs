//! Grapplers that decorate other grapplers.
//!
//! A wrapper delegates to a target grappler and may hide plugins from it. Wrappers
//! are configured once, without a target, and attached to a target later. This
//! is how [`CompositeGrappler`]( crate::grapplers::CompositeGrappler ) reuses the
//! same policy around a freshly merged source on every scope.

use std::sync::Arc ;
use tracing::trace ;

use crate::{ ExitStack, Grappler, GrapplerError, Plugin, Scope, Value };



/// Which operation a plugin is being filtered for.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum FilterMode {
	/// The plugin is about to be yielded by `find`.
	Find,
	/// The plugin is about to be loaded.
	Load,
}

impl std::fmt::Display for FilterMode {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Find => write!( f, "find" ),
			Self::Load => write!( f, "load" ),
		}
	}
}

/// The policy part of a [`WrapperGrappler`].
///
/// Cloning a config must produce an independent policy with the same behaviour;
/// [`WrapperGrappler::remapped`] relies on it.
pub trait WrapperConfig: Clone + Send + Sync + 'static {

	/// A globally unique id naming this kind of wrapper.
	fn id( &self ) -> &str ;

	/// Whether `plugin` should be filtered out.
	///
	/// In [`FilterMode::Find`], `true` drops the plugin from the iteration. In
	/// [`FilterMode::Load`], `true` makes the load fail with
	/// [`GrapplerError::UnknownPlugin`]. The default filters nothing.
	fn filter( &self, _plugin: &Plugin, _mode: FilterMode ) -> bool { false }

}

/// A grappler that can be re-targeted.
///
/// [`CompositeGrappler`]( crate::grapplers::CompositeGrappler ) chains these
/// around its merged sources. Any grappler can take part by implementing this
/// trait; [`WrapperGrappler`] does so for every [`WrapperConfig`].
pub trait WrappingGrappler: Grappler {

	/// The grappler this one currently wraps.
	fn wrapped( &self ) -> Option<Arc<dyn Grappler>>;

	/// A copy of this grappler wrapping `target` instead.
	fn rewrap( &self, target: Arc<dyn Grappler> ) -> Arc<dyn WrappingGrappler>;

}

/// A grappler that delegates to a target, filtered by a [`WrapperConfig`].
///
/// Without a target, the wrapper is only a template: `find` and `load` fail with
/// [`GrapplerError::MissingTarget`].
pub struct WrapperGrappler<C> {
	/// The wrapped grappler
	target: Option<Arc<dyn Grappler>>,
	/// The filtering policy
	config: C,
}

impl<C: WrapperConfig> WrapperGrappler<C> {

	/// Creates a wrapper around `target`, or a template if `target` is `None`.
	pub fn new( target: Option<Arc<dyn Grappler>>, config: C ) -> Self {
		Self { target, config }
	}

	/// Creates a wrapper template with no target.
	pub fn detached( config: C ) -> Self { Self::new( None, config ) }

	/// The wrapped grappler.
	#[inline] pub fn target( &self ) -> Option<&Arc<dyn Grappler>> { self.target.as_ref() }

	/// The filtering policy.
	#[inline] pub fn config( &self ) -> &C { &self.config }

	/// Whether `plugin` is filtered out for `mode`. See [`WrapperConfig::filter`].
	#[inline] pub fn filter( &self, plugin: &Plugin, mode: FilterMode ) -> bool { self.config.filter( plugin, mode )}

	/// A new wrapper with a copy of this config, pointed at `target`.
	pub fn remapped( &self, target: Arc<dyn Grappler> ) -> Self {
		Self::new( Some( target ), self.config.clone() )
	}

	fn require_target( &self ) -> Result<&Arc<dyn Grappler>, GrapplerError> {
		self.target.as_ref().ok_or_else(|| GrapplerError::MissingTarget { grappler: self.config.id().to_string() })
	}

}

impl<C: WrapperConfig> Grappler for WrapperGrappler<C> {

	fn id( &self ) -> &str { self.config.id() }

	fn find( &self, topic: Option<&str> ) -> Result<Scope, GrapplerError> {
		let target = self.require_target()?;
		let stack = ExitStack::new();
		let plugins = stack.enter( target.find( topic )? );
		let config = self.config.clone();
		Ok( Scope::with_stack(
			plugins.filter( move | plugin | !config.filter( plugin, FilterMode::Find )),
			stack,
		))
	}

	fn load( &self, plugin: &Plugin ) -> Result<Value, GrapplerError> {
		let target = self.require_target()?;
		if self.filter( plugin, FilterMode::Load ) {
			trace!( wrapper = self.config.id(), plugin = plugin.plugin_id(), "wrapper rejected load" );
			return Err( GrapplerError::unknown_plugin( plugin, self.config.id() ));
		}
		target.load( plugin )
	}

}

impl<C: WrapperConfig> WrappingGrappler for WrapperGrappler<C> {

	fn wrapped( &self ) -> Option<Arc<dyn Grappler>> { self.target.clone() }

	fn rewrap( &self, target: Arc<dyn Grappler> ) -> Arc<dyn WrappingGrappler> {
		Arc::new( self.remapped( target ))
	}

}

impl<C: WrapperConfig> Clone for WrapperGrappler<C> {
	fn clone( &self ) -> Self {
		Self { target: self.target.clone(), config: self.config.clone() }
	}
}

impl<C: WrapperConfig + std::fmt::Debug> std::fmt::Debug for WrapperGrappler<C> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WrapperGrappler" )
			.field( "target", &self.target.as_ref().map(| target | target.id().to_string() ))
			.field( "config", &self.config )
			.finish()
	}
}
