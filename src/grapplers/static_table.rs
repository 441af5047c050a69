use std::any::Any ;
use std::collections::HashMap ;
use std::sync::Arc ;
use uuid::Uuid ;

use crate::{ ExitStack, GrapplerError, Package, Plugin, Plugins, Value };
use crate::bases::{ BasicGrappler, IterationSlot };



/// A grappler over objects supplied by the host application.
///
/// Lets application components be loaded the same way as plugins: register an
/// object with the topics it belongs to and the grappler produces the matching
/// [`Plugin`] records. Every plugin shares the grappler's package, which
/// defaults to [`StaticGrappler::internal_package`].
///
/// Each scope works on a snapshot of the table taken when it opened; objects
/// registered later show up in the next scope. Plugin ids are random, so they
/// are only stable for the lifetime of this table.
#[derive( Clone )]
pub struct StaticGrappler {
	package: Arc<Package>,
	table: Arc<StaticTable>,
	slot: IterationSlot<Arc<StaticTable>>,
}

/// The registered objects, in registration order and indexed by plugin.
#[derive( Clone, Default )]
pub struct StaticTable {
	plugins: Vec<Plugin>,
	values: HashMap<Plugin, Value>,
}

impl StaticGrappler {

	/// Id of every static grappler.
	pub const ID: &'static str = "grappler.grapplers.static" ;

	/// The package used when none is given.
	pub fn internal_package() -> Package {
		Package::new(
			"Static Plugins",
			"0.0.0",
			"grappler.grapplers.static.internal-package",
			None,
		)
	}

	/// Creates an empty table using the internal package.
	pub fn new() -> Self { Self::with_package( Self::internal_package() )}

	/// Creates an empty table whose plugins all belong to `package`.
	pub fn with_package( package: Package ) -> Self {
		Self {
			package: Arc::new( package ),
			table: Arc::default(),
			slot: IterationSlot::new(),
		}
	}

	/// Registers `value` under `topics`.
	pub fn plugin(
		mut self,
		topics: impl IntoIterator<Item = impl Into<String>>,
		value: impl Any + Send + Sync,
	) -> Self {
		self.add_plugin( topics, value );
		self
	}

	/// Registers `value` under `topics` and returns the plugin describing it.
	pub fn add_plugin(
		&mut self,
		topics: impl IntoIterator<Item = impl Into<String>>,
		value: impl Any + Send + Sync,
	) -> Plugin {
		self.add_shared( topics, Arc::new( value ))
	}

	/// Registers an already shared `value` under `topics`.
	pub fn add_shared(
		&mut self,
		topics: impl IntoIterator<Item = impl Into<String>>,
		value: Value,
	) -> Plugin {
		let plugin = Plugin::new(
			Self::ID,
			Uuid::new_v4().to_string(),
			Arc::clone( &self.package ),
			topics,
		);
		let table = Arc::make_mut( &mut self.table );
		table.plugins.push( plugin.clone() );
		table.values.insert( plugin.clone(), value );
		plugin
	}

	/// Removes every registered object.
	pub fn clear( &mut self ) {
		self.table = Arc::default();
	}

	/// The package every plugin of this table belongs to.
	#[inline] pub fn package( &self ) -> &Package { &self.package }

	/// Number of registered objects.
	#[inline] pub fn len( &self ) -> usize { self.table.plugins.len() }

	/// Whether nothing is registered.
	#[inline] pub fn is_empty( &self ) -> bool { self.table.plugins.is_empty() }

}

impl Default for StaticGrappler {
	fn default() -> Self { Self::new() }
}

impl BasicGrappler for StaticGrappler {

	type Context = Arc<StaticTable>;

	fn id( &self ) -> &str { Self::ID }

	fn iteration_slot( &self ) -> &IterationSlot<Self::Context> { &self.slot }

	fn create_iteration_context(
		&self,
		topic: Option<&str>,
		_stack: &ExitStack,
	) -> Result<( Plugins, Self::Context ), GrapplerError> {
		let snapshot = Arc::clone( &self.table );
		let topic = topic.map( str::to_owned );
		let plugins: Plugins = Box::new({
			let snapshot = Arc::clone( &snapshot );
			( 0..snapshot.plugins.len() )
				.map( move | index | snapshot.plugins[index].clone() )
				.filter( move | plugin | plugin.matches( topic.as_deref() ))
		});
		Ok(( plugins, snapshot ))
	}

	fn load_from_context( &self, plugin: &Plugin, context: &Self::Context ) -> Result<Value, GrapplerError> {
		context.values.get( plugin )
			.map( Arc::clone )
			.ok_or_else(|| GrapplerError::unknown_plugin( plugin, Self::ID ))
	}

}

impl std::fmt::Debug for StaticGrappler {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "StaticGrappler" )
			.field( "package", &self.package )
			.field( "plugins", &self.table.plugins )
			.finish_non_exhaustive()
	}
}
