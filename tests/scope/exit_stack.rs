use std::cell::RefCell ;
use std::rc::Rc ;
use grappler::{ ExitStack, Scope };

#[test]
fn exit_stack_runs_releases_in_reverse_order() {

	let order = Rc::new( RefCell::new( Vec::new() ));
	let stack = ExitStack::new();
	for n in 0..3 {
		let order = Rc::clone( &order );
		stack.callback( move || order.borrow_mut().push( n ));
	}
	assert_eq!( stack.len(), 3 );

	stack.close();
	assert_eq!( *order.borrow(), vec![ 2, 1, 0 ]);
	assert!( stack.is_empty() );

	stack.close();
	assert_eq!( order.borrow().len(), 3 );

}

#[test]
fn exit_stack_adopts_nested_scopes() {

	let order = Rc::new( RefCell::new( Vec::new() ));

	let nested_stack = ExitStack::new();
	let nested_order = Rc::clone( &order );
	nested_stack.callback( move || nested_order.borrow_mut().push( "nested" ));
	let nested = Scope::with_stack( std::iter::empty(), nested_stack );

	let stack = ExitStack::new();
	let outer_order = Rc::clone( &order );
	stack.callback( move || outer_order.borrow_mut().push( "outer" ));
	let plugins = stack.enter( nested );
	assert_eq!( plugins.count(), 0 );

	// Adopted releases only run when the adopting stack closes.
	assert!( order.borrow().is_empty() );
	stack.close();
	assert_eq!( *order.borrow(), vec![ "nested", "outer" ]);

}

#[test]
fn exit_stack_runs_releases_registered_while_closing() {

	let order = Rc::new( RefCell::new( Vec::new() ));
	let stack = ExitStack::new();

	let late_stack = stack.clone();
	let late_order = Rc::clone( &order );
	stack.callback( move || {
		late_order.borrow_mut().push( "first" );
		let late_order = Rc::clone( &late_order );
		late_stack.callback( move || late_order.borrow_mut().push( "late" ));
	});

	stack.close();
	assert_eq!( *order.borrow(), vec![ "first", "late" ]);

}

#[test]
fn scope_closes_stack_once() {

	let closed = Rc::new( RefCell::new( 0 ));
	let stack = ExitStack::new();
	let counter = Rc::clone( &closed );
	stack.callback( move || *counter.borrow_mut() += 1 );

	let scope = Scope::with_stack( std::iter::empty(), stack.clone() );
	scope.close();
	stack.close();
	assert_eq!( *closed.borrow(), 1 );

}
