/// Wrapping grappler that only lets through every `n`-th plugin of its target.
#[derive( Clone )]
pub struct EveryNth {
	id: String,
	n: usize,
	target: Option<std::sync::Arc<dyn grappler::Grappler>>,
	slot: grappler::bases::IterationSlot<()>,
}

impl EveryNth {

	pub fn new( n: usize ) -> Self {
		Self {
			id: format!( "grappler.tests.every-{}-grappler", n ),
			n,
			target: None,
			slot: grappler::bases::IterationSlot::new(),
		}
	}

	pub fn around( n: usize, target: impl grappler::Grappler + 'static ) -> Self {
		Self { target: Some( std::sync::Arc::new( target )), ..Self::new( n ) }
	}

	fn target( &self ) -> Result<&std::sync::Arc<dyn grappler::Grappler>, grappler::GrapplerError> {
		self.target.as_ref().ok_or_else(|| grappler::GrapplerError::MissingTarget { grappler: self.id.clone() })
	}

}

impl grappler::bases::BasicGrappler for EveryNth {

	type Context = ();

	fn id( &self ) -> &str { &self.id }

	fn iteration_slot( &self ) -> &grappler::bases::IterationSlot<()> { &self.slot }

	fn create_iteration_context(
		&self,
		topic: Option<&str>,
		stack: &grappler::ExitStack,
	) -> Result<( grappler::Plugins, () ), grappler::GrapplerError> {
		let plugins: grappler::Plugins = Box::new( stack.enter( self.target()?.find( topic )? ).step_by( self.n ));
		Ok(( plugins, () ))
	}

	fn load_from_context( &self, plugin: &grappler::Plugin, _context: &() ) -> Result<grappler::Value, grappler::GrapplerError> {
		self.target()?.load( plugin )
	}

}

impl grappler::WrappingGrappler for EveryNth {

	fn wrapped( &self ) -> Option<std::sync::Arc<dyn grappler::Grappler>> { self.target.clone() }

	fn rewrap( &self, target: std::sync::Arc<dyn grappler::Grappler> ) -> std::sync::Arc<dyn grappler::WrappingGrappler> {
		std::sync::Arc::new( Self { target: Some( target ), ..Self::new( self.n ) })
	}

}
