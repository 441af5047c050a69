use std::collections::HashSet ;
use serde::Deserialize ;
use tracing::trace ;

use crate::{ FilterMode, Plugin, WrapperConfig, WrapperGrappler };



/// A wrapper that hides denied plugins from its target.
///
/// ```
/// use grappler::{ Grappler, WrapperGrappler, grapplers::{ Bouncer, CompositeGrappler, StaticGrappler }};
///
/// # fn main() -> Result<(), grappler::GrapplerError> {
/// let grappler = CompositeGrappler::new()
/// 	.source( StaticGrappler::new()
/// 		.plugin([ "stable" ], 1 )
/// 		.plugin([ "stable", "experimental" ], 2 ))
/// 	.wrap( WrapperGrappler::detached( Bouncer::new().deny_topic( "experimental" )));
///
/// assert_eq!( grappler.find( Some( "stable" ))?.count(), 1 );
/// # Ok(())
/// # }
/// ```
pub type BouncerGrappler = WrapperGrappler<Bouncer>;

/// Denylist configuration of a [`BouncerGrappler`].
///
/// A plugin is denied when it is listed by source and plugin id, when its
/// package id is listed, or when any of its topics is listed. Denied plugins are
/// left out of `find` and fail to `load` through the bouncer.
///
/// Can be read from the host's configuration files:
///
/// ```toml
/// packages = [ "noisy_package" ]
/// topics = [ "experimental" ]
///
/// [[plugins]]
/// source = "grappler.grapplers.entry_point"
/// plugin = "name@:value@:group"
/// ```
#[derive( Debug, Clone, Default, Deserialize )]
#[serde( default, deny_unknown_fields )]
pub struct Bouncer {
	plugins: HashSet<DeniedPlugin>,
	packages: HashSet<String>,
	topics: HashSet<String>,
}

/// A single plugin denied by a [`Bouncer`].
#[derive( Debug, Clone, PartialEq, Eq, Hash, Deserialize )]
pub struct DeniedPlugin {
	/// Id of the grappler that produces the plugin
	pub source: String,
	/// Id of the plugin within that grappler
	pub plugin: String,
}

impl DeniedPlugin {

	/// The entry that would deny `plugin`.
	pub fn of( plugin: &Plugin ) -> Self {
		Self { source: plugin.source_id().to_string(), plugin: plugin.plugin_id().to_string() }
	}

}

impl Bouncer {

	/// Id of every bouncer.
	pub const ID: &'static str = "grappler.grapplers.bouncer" ;

	/// A bouncer that lets everything through.
	pub fn new() -> Self { Self::default() }

	/// Denies the plugin `plugin` produced by the grappler with id `source`.
	pub fn deny_plugin( mut self, source: impl Into<String>, plugin: impl Into<String> ) -> Self {
		self.plugins.insert( DeniedPlugin { source: source.into(), plugin: plugin.into() });
		self
	}

	/// Denies every plugin of the package with id `package`.
	pub fn deny_package( mut self, package: impl Into<String> ) -> Self {
		self.packages.insert( package.into() );
		self
	}

	/// Denies every plugin listing `topic`.
	pub fn deny_topic( mut self, topic: impl Into<String> ) -> Self {
		self.topics.insert( topic.into() );
		self
	}

	/// Whether `plugin` is denied.
	pub fn denies( &self, plugin: &Plugin ) -> bool {
		self.packages.contains( plugin.package().id() )
			|| plugin.topics().iter().any(| topic | self.topics.contains( topic ))
			|| self.plugins.contains( &DeniedPlugin::of( plugin ))
	}

}

impl WrapperConfig for Bouncer {

	fn id( &self ) -> &str { Self::ID }

	fn filter( &self, plugin: &Plugin, mode: FilterMode ) -> bool {
		let denied = self.denies( plugin );
		if denied { trace!( %mode, plugin = plugin.plugin_id(), "bouncer denied plugin" ); }
		denied
	}

}
