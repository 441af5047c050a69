//! Typed access to the plugins of one topic.

use std::any::{ Any, TypeId };
use std::marker::PhantomData ;
use std::sync::Arc ;

use crate::{ Grappler, GrapplerError, Scope, Value };



/// The type a [`Hook`] expects its plugins to load to.
///
/// Implemented for every sized `T: Any + Send + Sync`, which accepts values of
/// exactly that type, and for `dyn Any + Send + Sync`, which accepts anything.
pub trait Expected: Send + Sync + 'static {

	/// The accepted type, or `None` to accept every value.
	fn expected_type() -> Option<TypeId>;

	/// Converts a value that passed the type check.
	fn downcast( value: Value ) -> Option<Arc<Self>>;

}

impl<T: Any + Send + Sync> Expected for T {
	fn expected_type() -> Option<TypeId> { Some( TypeId::of::<T>() ) }
	fn downcast( value: Value ) -> Option<Arc<Self>> { value.downcast().ok() }
}

impl Expected for dyn Any + Send + Sync {
	fn expected_type() -> Option<TypeId> { None }
	fn downcast( value: Value ) -> Option<Arc<Self>> { Some( value ) }
}

/// A topic bound to a grappler, loading only the plugins of an expected type.
///
/// [`grapple`]( Self::grapple ) finds the plugins of the topic, loads each one
/// and yields those whose value has type `T`. Values of any other type are
/// skipped. With the default `T`, every value is yielded.
///
/// ```
/// use grappler::{ Hook, grapplers::StaticGrappler };
///
/// # fn main() -> Result<(), grappler::GrapplerError> {
/// let grappler = StaticGrappler::new()
/// 	.plugin([ "port" ], 8080_u16 )
/// 	.plugin([ "port" ], "not a port" )
/// 	.plugin([ "port" ], 443_u16 );
///
/// let ports = Hook::<u16>::new( "port", grappler )?
/// 	.grapple()?
/// 	.map(| port | port.map(| port | *port ))
/// 	.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!( ports, vec![ 8080, 443 ]);
/// # Ok(())
/// # }
/// ```
pub struct Hook<T: ?Sized + Expected = dyn Any + Send + Sync> {
	topic: String,
	grappler: Arc<dyn Grappler>,
	expected: Option<TypeId>,
	_marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Expected> Hook<T> {

	/// Binds `topic` to `grappler`.
	///
	/// # Errors
	/// [`GrapplerError::Configuration`] when `topic` is empty.
	pub fn new( topic: impl Into<String>, grappler: impl Grappler + 'static ) -> Result<Self, GrapplerError> {
		Self::shared( topic, Arc::new( grappler ))
	}

	/// Binds `topic` to a grappler shared with other owners.
	///
	/// # Errors
	/// [`GrapplerError::Configuration`] when `topic` is empty.
	pub fn shared( topic: impl Into<String>, grappler: Arc<dyn Grappler> ) -> Result<Self, GrapplerError> {
		let topic = topic.into();
		if topic.is_empty() {
			return Err( GrapplerError::Configuration( "a hook requires a non-empty topic".to_string() ));
		}
		Ok( Self { topic, grappler, expected: T::expected_type(), _marker: PhantomData })
	}

	#[inline] pub fn topic( &self ) -> &str { &self.topic }

	#[inline] pub fn grappler( &self ) -> &Arc<dyn Grappler> { &self.grappler }

	/// Whether `value` has the expected type.
	pub fn can_support( &self, value: &Value ) -> bool {
		self.expected.is_none_or(| expected | ( **value ).type_id() == expected )
	}

	/// Opens a scope over the topic and yields the values of the expected type.
	///
	/// Each call starts a new scope. Load errors are yielded, type mismatches are
	/// skipped.
	///
	/// # Errors
	/// Whatever [`Grappler::find`] fails with.
	pub fn grapple( &self ) -> Result<Grapple<T>, GrapplerError> {
		let scope = self.grappler.find( Some( &self.topic ))?;
		Ok( Grapple {
			scope,
			topic: self.topic.clone(),
			grappler: Arc::clone( &self.grappler ),
			expected: self.expected,
			_marker: PhantomData,
		})
	}

}

impl<T: ?Sized + Expected> Clone for Hook<T> {
	fn clone( &self ) -> Self {
		Self {
			topic: self.topic.clone(),
			grappler: Arc::clone( &self.grappler ),
			expected: self.expected,
			_marker: PhantomData,
		}
	}
}

impl<T: ?Sized + Expected> std::fmt::Debug for Hook<T> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Hook" )
			.field( "topic", &self.topic )
			.field( "grappler", &self.grappler.id() )
			.field( "typed", &self.expected.is_some() )
			.finish()
	}
}

/// The values of one [`Hook::grapple`] call.
///
/// Holds the underlying [`Scope`] open until dropped.
pub struct Grapple<T: ?Sized + Expected> {
	scope: Scope,
	topic: String,
	grappler: Arc<dyn Grappler>,
	expected: Option<TypeId>,
	_marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Expected> Iterator for Grapple<T> {
	type Item = Result<Arc<T>, GrapplerError>;

	fn next( &mut self ) -> Option<Self::Item> {
		loop {
			let plugin = self.scope.next()?;
			if !plugin.has_topic( &self.topic ) { continue }
			let value = match self.grappler.load( &plugin ) {
				Ok( value ) => value,
				Err( err ) => return Some( Err( err )),
			};
			if self.expected.is_some_and(| expected | ( *value ).type_id() != expected ) { continue }
			if let Some( value ) = T::downcast( value ) { return Some( Ok( value )) }
		}
	}
}

impl<T: ?Sized + Expected> std::fmt::Debug for Grapple<T> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Grapple" )
			.field( "topic", &self.topic )
			.field( "scope", &self.scope )
			.finish_non_exhaustive()
	}
}
