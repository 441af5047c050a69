use std::collections::BTreeSet ;
use grappler::grapplers::CompositeGrappler ;

use crate::{ EveryNth, load_all, numbers };

#[test]
fn composite_chains_wrappers_in_order() {

	let grappler = CompositeGrappler::new()
		.source( numbers( 0..50, &[ "numeric", "small" ]))
		.source( numbers( 50..100, &[ "numeric", "big" ]))
		.wrap( EveryNth::new( 3 ))
		.wrap( EveryNth::new( 2 ));

	let loaded = load_all::<u32>( &grappler, None ).into_iter().collect::<BTreeSet<_>>();
	let expected = ( 0..100 ).step_by( 3 ).step_by( 2 ).collect::<BTreeSet<u32>>();
	assert_eq!( loaded, expected );
	assert_eq!( expected.iter().take( 4 ).copied().collect::<Vec<_>>(), vec![ 0, 6, 12, 18 ]);

}

#[test]
fn composite_wrappers_see_topic_filtered_plugins() {

	let grappler = CompositeGrappler::new()
		.source( numbers( 0..50, &[ "numeric", "small" ]))
		.source( numbers( 50..100, &[ "numeric", "big" ]))
		.wrap( EveryNth::new( 2 ));

	let big = load_all::<u32>( &grappler, Some( "big" ));
	assert_eq!( big, ( 50..100 ).step_by( 2 ).collect::<Vec<_>>() );

	let small = load_all::<u32>( &grappler, Some( "small" ));
	assert_eq!( small.len(), 25 );
	assert!( small.iter().all(| n | n % 2 == 0 && *n < 50 ));

}
