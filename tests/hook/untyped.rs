use grappler::Hook ;
use grappler::grapplers::StaticGrappler ;

#[test]
fn hook_without_type_yields_everything() {

	let grappler = StaticGrappler::new()
		.plugin([ "x" ], 1_u32 )
		.plugin([ "x" ], "two" )
		.plugin([ "y" ], 3.0_f64 );

	let hook: Hook = Hook::new( "x", grappler ).expect( "Failed to create hook" );
	let values = hook.grapple().expect( "Failed to grapple" )
		.collect::<Result<Vec<_>, _>>()
		.expect( "Failed to load plugin" );

	assert_eq!( values.len(), 2 );
	assert_eq!( values[0].downcast_ref::<u32>(), Some( &1 ));
	assert_eq!( values[1].downcast_ref::<&str>(), Some( &"two" ));
	assert!( hook.can_support( &values[0] ));

}
