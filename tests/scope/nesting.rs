use grappler::Grappler ;
use grappler::grapplers::StaticGrappler ;

use crate::{ Counting, numbers };

#[test]
fn scope_nested_scopes_on_one_grappler() {

	let mut grappler = StaticGrappler::new();
	let old = grappler.add_plugin([ "numeric" ], 1_u32 );
	let mut outer = grappler.find( None ).expect( "Failed to open scope" );
	assert_eq!( outer.next(), Some( old.clone() ));

	let new = grappler.add_plugin([ "numeric" ], 2_u32 );
	{
		let inner = grappler.find( None ).expect( "Failed to open scope" );
		assert_eq!( inner.count(), 2 );
		let mut inner = grappler.find( None ).expect( "Failed to open scope" );
		assert!( inner.next().is_some() );
		// The innermost open scope is the one loads are served from.
		assert!( grappler.load( &new ).is_ok() );
	}

	// Back to the outer scope, which predates the second registration.
	assert!( grappler.load( &old ).is_ok() );
	assert!( grappler.load( &new ).is_err_and(| err | err.is_unknown_plugin() ));

}

#[test]
fn scope_dropped_out_of_order() {

	let source = Counting::new( numbers( 0..3, &[ "numeric" ]));
	let first = source.find( None ).expect( "Failed to open scope" );
	let second = source.find( None ).expect( "Failed to open scope" );

	drop( first );
	assert_eq!( source.cleaned_up(), 1 );
	drop( second );
	assert_eq!( source.cleaned_up(), 2 );
	assert_eq!( source.created(), 2 );

}
