use std::panic::{ AssertUnwindSafe, catch_unwind };
use grappler::{ Grappler, GrapplerError };
use grappler::bases::BasicGrappler ;

use crate::{ Counting, numbers };

#[test]
fn scope_released_on_break() {

	let source = Counting::new( numbers( 0..10, &[ "numeric" ]));
	for plugin in source.find( None ).expect( "Failed to open scope" ) {
		if source.load( &plugin ).is_ok() { break }
	}
	assert_eq!( source.created(), 1 );
	assert_eq!( source.cleaned_up(), 1 );

}

#[test]
fn scope_released_on_error() {

	fn first_failure( source: &Counting ) -> Result<(), GrapplerError> {
		for plugin in source.find( None )? {
			source.load( &plugin )?;
			return Err( GrapplerError::Configuration( "stop".to_string() ));
		}
		Ok(())
	}

	let source = Counting::new( numbers( 0..10, &[ "numeric" ]));
	assert_eq!( first_failure( &source ), Err( GrapplerError::Configuration( "stop".to_string() )));
	assert_eq!( source.events(), vec![ "create source", "release source", "cleanup source" ]);

}

#[test]
fn scope_released_on_panic() {

	let source = Counting::new( numbers( 0..10, &[ "numeric" ]));
	let result = catch_unwind( AssertUnwindSafe(|| {
		for _ in source.find( None ).expect( "Failed to open scope" ) {
			panic!( "consumer failure" );
		}
	}));

	assert!( result.is_err() );
	assert_eq!( source.cleaned_up(), 1 );
	assert!( !BasicGrappler::iteration_slot( &source ).is_open() );

}

#[test]
fn scope_released_without_iteration() {

	let source = Counting::new( numbers( 0..10, &[ "numeric" ]));
	drop( source.find( None ).expect( "Failed to open scope" ));
	assert_eq!( source.events(), vec![ "create source", "release source", "cleanup source" ]);

}
