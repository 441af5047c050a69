use std::sync::Arc ;
use pipe_trait::Pipe ;
use tracing::debug ;

use crate::{ Grappler, GrapplerError, Package, Plugin, Scope, Value };
use super::StaticGrappler ;



/// A plugin registered at link time.
///
/// Any crate linked into the final binary can contribute entry points with
/// [`inventory::submit!`]; an [`EntryPointGrappler`] finds all of them. The
/// `group` is the topic the plugin is found under.
///
/// ```
/// use std::sync::Arc ;
/// use grappler::{ Grappler, grapplers::{ EntryPoint, EntryPointGrappler }};
///
/// grappler::inventory::submit! {
/// 	EntryPoint::new( "greeters", "english", "demo::english", || Arc::new( "hello" ))
/// 		.distribution( "demo-greeters", "1.0.0" )
/// }
///
/// # fn main() -> Result<(), grappler::GrapplerError> {
/// let grappler = EntryPointGrappler::new();
/// let plugin = grappler.find( Some( "greeters" ))?.next().unwrap();
/// assert_eq!( plugin.plugin_id(), "english@:demo::english@:greeters" );
/// assert_eq!( plugin.package().id(), "demo_greeters" );
/// # Ok(())
/// # }
/// ```
#[derive( Clone, Copy )]
pub struct EntryPoint {
	group: &'static str,
	name: &'static str,
	value: &'static str,
	distribution: Option<( &'static str, &'static str )>,
	load: fn() -> Value,
}

impl EntryPoint {

	/// Creates an entry point with no distribution.
	///
	/// `value` describes what `load` produces, usually its path. Together with
	/// `group` and `name` it identifies the entry point.
	pub const fn new(
		group: &'static str,
		name: &'static str,
		value: &'static str,
		load: fn() -> Value,
	) -> Self {
		Self { group, name, value, distribution: None, load }
	}

	/// Sets the name and version of the package shipping this entry point.
	pub const fn distribution( mut self, name: &'static str, version: &'static str ) -> Self {
		self.distribution = Some(( name, version ));
		self
	}

	/// The group, used as the plugin's topic.
	#[inline] pub fn group( &self ) -> &'static str { self.group }
	/// The entry point's name within its group.
	#[inline] pub fn name( &self ) -> &'static str { self.name }
	/// Describes what `load` produces, usually its path.
	#[inline] pub fn value( &self ) -> &'static str { self.value }
	/// Name of the package shipping this entry point, if set.
	#[inline] pub fn distribution_name( &self ) -> Option<&'static str> { self.distribution.map(|( name, _ )| name )}
	/// Version of the package shipping this entry point, if set.
	#[inline] pub fn distribution_version( &self ) -> Option<&'static str> { self.distribution.map(|( _, version )| version )}

	/// Produces the registered object.
	#[inline] pub fn load( &self ) -> Value { ( self.load )() }

	fn plugin_id( &self ) -> String {
		[ self.name, self.value, self.group ].join( EntryPointGrappler::SEPARATOR )
	}

	fn package( &self ) -> Package {
		match self.distribution {
			Some(( name, version )) => Package::new( name, version, normalize( name ), None ),
			None => StaticGrappler::internal_package(),
		}
	}

	fn plugin( &self ) -> Plugin {
		Plugin::new( EntryPointGrappler::ID, self.plugin_id(), self.package(), [ self.group ])
	}

}

impl std::fmt::Debug for EntryPoint {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "EntryPoint" )
			.field( "group", &self.group )
			.field( "name", &self.name )
			.field( "value", &self.value )
			.field( "distribution", &self.distribution )
			.finish_non_exhaustive()
	}
}

inventory::collect!( EntryPoint );

/// A grappler over every [`EntryPoint`] linked into the binary.
///
/// Plugin ids are `name@:value@:group`, so they stay the same across runs of
/// the same binary and can be loaded without an open scope.
#[derive( Clone, Debug )]
pub struct EntryPointGrappler {
	entries: Arc<[&'static EntryPoint]>,
}

impl EntryPointGrappler {

	/// Id of every entry point grappler.
	pub const ID: &'static str = "grappler.grapplers.entry_point" ;

	const SEPARATOR: &'static str = "@:" ;

	/// Collects the registered entry points.
	pub fn new() -> Self {
		let entries = inventory::iter::<EntryPoint>.into_iter()
			.collect::<Vec<_>>()
			.pipe( sorted )
			.pipe( Arc::<[_]>::from );
		debug!( entries = entries.len(), "collected entry points" );
		Self { entries }
	}

	/// The collected entry points, sorted by group, name and value.
	#[inline] pub fn entries( &self ) -> &[&'static EntryPoint] { &self.entries }

	fn lookup( &self, plugin: &Plugin ) -> Option<&'static EntryPoint> {
		if plugin.source_id() != Self::ID { return None }
		let [ name, value, group ]: [&str; 3] = plugin.plugin_id().split( Self::SEPARATOR ).collect::<Vec<_>>()
			.try_into()
			.ok()?;
		self.entries.iter()
			.find(| entry | entry.name == name && entry.value == value && entry.group == group )
			.copied()
	}

}

impl Default for EntryPointGrappler {
	fn default() -> Self { Self::new() }
}

impl Grappler for EntryPointGrappler {

	fn id( &self ) -> &str { Self::ID }

	fn find( &self, topic: Option<&str> ) -> Result<Scope, GrapplerError> {
		let topic = topic.map( str::to_owned );
		let entries = Arc::clone( &self.entries );
		Ok( Scope::new(
			( 0..entries.len() )
				.map( move | index | entries[index] )
				.filter( move | entry | topic.as_deref().is_none_or(| topic | entry.group == topic ))
				.map( EntryPoint::plugin )
		))
	}

	fn load( &self, plugin: &Plugin ) -> Result<Value, GrapplerError> {
		self.lookup( plugin )
			.map( EntryPoint::load )
			.ok_or_else(|| GrapplerError::unknown_plugin( plugin, Self::ID ))
	}

}

fn sorted( mut entries: Vec<&'static EntryPoint> ) -> Vec<&'static EntryPoint> {
	entries.sort_by_key(| entry | ( entry.group, entry.name, entry.value ));
	entries
}

/// Lowercases `name` and collapses every run of `-`, `_` and `.` into one `_`.
fn normalize( name: &str ) -> String {
	let mut normalized = String::with_capacity( name.len() );
	for character in name.chars() {
		match character {
			'-' | '_' | '.' => if !normalized.ends_with( '_' ) { normalized.push( '_' ) },
			_ => normalized.extend( character.to_lowercase() ),
		}
	}
	normalized
}
