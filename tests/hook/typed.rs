use std::sync::Arc ;
use grappler::Hook ;
use grappler::grapplers::{ CompositeGrappler, StaticGrappler };

#[derive( Debug, PartialEq )]
struct Foo( u32 );

#[derive( Debug, PartialEq )]
struct Bar( u32 );

#[test]
fn hook_skips_values_of_other_types() {

	let grappler = StaticGrappler::new()
		.plugin([ "x" ], Foo( 1 ))
		.plugin([ "x" ], Bar( 2 ))
		.plugin([ "x" ], Foo( 3 ));

	let hook = Hook::<Foo>::new( "x", grappler ).expect( "Failed to create hook" );
	let values = hook.grapple().expect( "Failed to grapple" )
		.collect::<Result<Vec<Arc<Foo>>, _>>()
		.expect( "Failed to load plugin" );

	assert_eq!( values, vec![ Arc::new( Foo( 1 )), Arc::new( Foo( 3 ))]);

}

#[test]
fn hook_grapple_is_restartable() {

	let grappler = CompositeGrappler::new()
		.source( StaticGrappler::new().plugin([ "x" ], Foo( 1 )))
		.source( StaticGrappler::new().plugin([ "x" ], Foo( 2 )).plugin([ "y" ], Foo( 3 )));
	let hook = Hook::<Foo>::new( "x", grappler ).expect( "Failed to create hook" );

	for _ in 0..2 {
		let values = hook.grapple().expect( "Failed to grapple" ).map(| value | value.map(| foo | foo.0 ))
			.collect::<Result<Vec<_>, _>>()
			.expect( "Failed to load plugin" );
		assert_eq!( values, vec![ 1, 2 ]);
	}

}

#[test]
fn hook_can_support() {

	let hook = Hook::<Foo>::new( "x", StaticGrappler::new() ).expect( "Failed to create hook" );
	assert!( hook.can_support( &( Arc::new( Foo( 1 )) as grappler::Value )));
	assert!( !hook.can_support( &( Arc::new( Bar( 1 )) as grappler::Value )));
	assert!( !hook.can_support( &( Arc::new( Arc::new( Foo( 1 ))) as grappler::Value )));

}
