//! The source contract every discovery backend implements.

use std::any::Any ;
use std::sync::Arc ;
use thiserror::Error ;

use crate::{ Plugin, Scope };



/// A loaded plugin object.
///
/// Values are shared and type-erased; use [`Hook`]( crate::Hook ) or
/// [`Arc::downcast`] to get a typed handle back.
pub type Value = Arc<dyn Any + Send + Sync>;

/// A discovery and loading backend.
///
/// A grappler enumerates [`Plugin`]s, optionally restricted to a topic, and
/// resolves the plugins it produced to their underlying objects.
///
/// # Scopes
///
/// [`find`]( Self::find ) hands out a [`Scope`]. The scope is an iterator over the
/// plugins and it holds whatever the grappler needed to enumerate them. Those
/// resources are released when the scope is dropped, however iteration ends.
/// Many grapplers only know how to load plugins while the scope that yielded
/// them is still open:
///
/// ```
/// use grappler::{ Grappler, grapplers::StaticGrappler };
///
/// # fn main() -> Result<(), grappler::GrapplerError> {
/// let grappler = StaticGrappler::new()
/// 	.plugin([ "greeting" ], "hello" )
/// 	.plugin([ "greeting", "farewell" ], "goodbye" );
///
/// let scope = grappler.find( Some( "greeting" ))?;
/// let values = scope
/// 	.map(| plugin | grappler.load( &plugin ))
/// 	.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!( values.len(), 2 );
/// # Ok(())
/// # }
/// ```
///
/// The `topic` filter is advisory: a grappler may yield plugins that do not list
/// the topic, so consumers should check [`Plugin::has_topic`] themselves.
pub trait Grappler: Send + Sync {

	/// A globally unique id naming this kind of grappler.
	fn id( &self ) -> &str ;

	/// Opens an iteration scope over the plugins matching `topic`.
	///
	/// `None` yields every plugin.
	///
	/// # Errors
	/// Fails when the grappler is not configured well enough to iterate, e.g. a
	/// wrapper without a target.
	fn find( &self, topic: Option<&str> ) -> Result<Scope, GrapplerError> ;

	/// Loads the object behind `plugin`.
	///
	/// # Errors
	/// [`GrapplerError::UnknownPlugin`] when this grappler did not produce
	/// `plugin`, or can't resolve it anymore.
	fn load( &self, plugin: &Plugin ) -> Result<Value, GrapplerError> ;

}

impl<G: Grappler + ?Sized> Grappler for Arc<G> {
	fn id( &self ) -> &str { (**self).id() }
	fn find( &self, topic: Option<&str> ) -> Result<Scope, GrapplerError> { (**self).find( topic ) }
	fn load( &self, plugin: &Plugin ) -> Result<Value, GrapplerError> { (**self).load( plugin ) }
}

/// Errors returned by grapplers and hooks.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum GrapplerError {
	/// The grappler does not recognise the plugin: it came from another grappler,
	/// it is stale, or its id is malformed. Also returned when a scoped grappler is
	/// asked to load outside of an open scope.
	#[error( "Grappler (id={grappler:?}) does not know how to load plugin: {plugin}" )]
	UnknownPlugin {
		/// The plugin that was rejected
		plugin: Plugin,
		/// Id of the grappler that rejected it
		grappler: String,
	},
	/// A wrapper was used before being attached to a target.
	#[error( "Grappler (id={grappler:?}) requires a target, but none was set" )]
	MissingTarget {
		/// Id of the unattached wrapper
		grappler: String,
	},
	/// Any other programmer error in how a grappler or hook was set up.
	#[error( "Invalid configuration: {0}" )] Configuration( String ),
}

impl GrapplerError {

	/// Shorthand for building an [`UnknownPlugin`]( Self::UnknownPlugin ) error.
	pub fn unknown_plugin( plugin: &Plugin, grappler: &str ) -> Self {
		Self::UnknownPlugin { plugin: plugin.clone(), grappler: grappler.to_string() }
	}

	/// Whether this is an [`UnknownPlugin`]( Self::UnknownPlugin ) error.
	#[inline] pub fn is_unknown_plugin( &self ) -> bool { matches!( self, Self::UnknownPlugin { .. })}

}
