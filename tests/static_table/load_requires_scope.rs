use grappler::{ Grappler, GrapplerError };
use grappler::grapplers::StaticGrappler ;

#[test]
fn static_table_load_outside_scope() {

	let grappler = StaticGrappler::new().plugin([ "foo" ], 1_u32 );
	let plugin = grappler.find( None ).expect( "Failed to open scope" ).next().expect( "No plugin found" );

	match grappler.load( &plugin ) {
		Err( GrapplerError::UnknownPlugin { plugin: rejected, grappler: id }) => {
			assert_eq!( rejected, plugin );
			assert_eq!( id, StaticGrappler::ID );
		}
		Ok( _ ) => panic!( "Expected UnknownPlugin, loaded a value instead" ),
		Err( err ) => panic!( "Expected UnknownPlugin, found: {}", err ),
	}

}

#[test]
fn static_table_load_from_other_table() {

	let first = StaticGrappler::new().plugin([ "foo" ], 1_u32 );
	let second = StaticGrappler::new().plugin([ "foo" ], 1_u32 );

	let mut first_scope = first.find( None ).expect( "Failed to open scope" );
	let _second_scope = second.find( None ).expect( "Failed to open scope" );
	let plugin = first_scope.next().expect( "No plugin found" );

	match second.load( &plugin ) {
		Err( err ) if err.is_unknown_plugin() => {}
		value => panic!( "Expected UnknownPlugin, found: {:?}", value.map(| _ | "a value" )),
	}
	assert!( first.load( &plugin ).is_ok() );

}

#[test]
fn static_table_load_is_repeatable() {

	let grappler = StaticGrappler::new().plugin([ "foo" ], String::from( "value" ));
	let mut scope = grappler.find( None ).expect( "Failed to open scope" );
	let plugin = scope.next().expect( "No plugin found" );

	let first = grappler.load( &plugin ).expect( "Failed to load plugin" );
	let second = grappler.load( &plugin ).expect( "Failed to load plugin" );
	assert_eq!( first.downcast_ref::<String>(), second.downcast_ref::<String>() );

}
