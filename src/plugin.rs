//! Plugin metadata types.
//!
//! A [`Plugin`] describes one discoverable unit: the grappler that produced it,
//! an id that is opaque outside of that grappler, the [`Package`] it was shipped
//! in and the topics it belongs to. Plugins are pure data. The object behind a
//! plugin is only reachable through [`Grappler::load`]( crate::Grappler::load ).

use std::sync::Arc ;
use itertools::Itertools ;



/// The distributable unit a [`Plugin`] belongs to.
///
/// Equality is structural: two packages with the same fields are interchangeable,
/// whether or not they are the same allocation.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord )]
pub struct Package {
	/// Display name
	name: String,
	/// Free-form version string
	version: String,
	/// Normalized, stable identifier
	id: String,
	/// Architecture or OS qualifier, if the package has one
	platform: Option<String>,
}

impl Package {

	/// Creates a new package record.
	#[inline]
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		id: impl Into<String>,
		platform: Option<String>,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			id: id.into(),
			platform,
		}
	}

	/// Display name.
	#[inline] pub fn name( &self ) -> &str { &self.name }

	/// Free-form version string.
	#[inline] pub fn version( &self ) -> &str { &self.version }

	/// Normalized, stable identifier.
	#[inline] pub fn id( &self ) -> &str { &self.id }

	/// Architecture or OS qualifier.
	#[inline] pub fn platform( &self ) -> Option<&str> { self.platform.as_deref() }

}

/// A loadable object discovered by a [`Grappler`]( crate::Grappler ).
///
/// A plugin is only meaningful to the grappler that produced it. Handing it to
/// any other grappler fails with
/// [`GrapplerError::UnknownPlugin`]( crate::GrapplerError::UnknownPlugin ).
///
/// Topics keep their insertion order. Order does not matter when matching a
/// topic, but it is part of the record, so it does matter for equality.
#[derive( Debug, Clone, PartialEq, Eq, Hash )]
pub struct Plugin {
	/// Id of the grappler kind that produced this plugin
	source_id: String,
	/// Opaque id, unique within the producing grappler
	plugin_id: String,
	/// The package this plugin ships in
	package: Arc<Package>,
	/// Topics this plugin belongs to
	topics: Arc<[String]>,
}

impl Plugin {

	/// Creates a new plugin record.
	pub fn new(
		source_id: impl Into<String>,
		plugin_id: impl Into<String>,
		package: impl Into<Arc<Package>>,
		topics: impl IntoIterator<Item = impl Into<String>>,
	) -> Self {
		Self {
			source_id: source_id.into(),
			plugin_id: plugin_id.into(),
			package: package.into(),
			topics: topics.into_iter().map( Into::into ).collect(),
		}
	}

	/// Id of the grappler kind that produced this plugin.
	#[inline] pub fn source_id( &self ) -> &str { &self.source_id }

	/// Opaque id, unique within the producing grappler.
	#[inline] pub fn plugin_id( &self ) -> &str { &self.plugin_id }

	/// The package this plugin ships in.
	#[inline] pub fn package( &self ) -> &Package { &self.package }

	/// Topics this plugin belongs to, in insertion order.
	#[inline] pub fn topics( &self ) -> &[String] { &self.topics }

	/// Whether `topic` is one of this plugin's topics.
	pub fn has_topic( &self, topic: &str ) -> bool {
		self.topics.iter().any(| candidate | candidate == topic )
	}

	/// Whether this plugin should be yielded for a `find` over `topic`.
	///
	/// `None` matches every plugin.
	pub fn matches( &self, topic: Option<&str> ) -> bool {
		topic.is_none_or(| topic | self.has_topic( topic ))
	}

}

impl std::fmt::Display for Plugin {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		write!(
			f, "{}:{} from {} {} [{}]",
			self.source_id, self.plugin_id,
			self.package.name, self.package.version,
			self.topics.iter().join( ", " ),
		)
	}
}
