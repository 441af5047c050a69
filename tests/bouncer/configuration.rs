use grappler::{ Package, Plugin };
use grappler::grapplers::{ Bouncer, DeniedPlugin };

const CONFIG: &str = r#"
packages = [ "noisy_package" ]
topics = [ "experimental" ]

[[plugins]]
source = "grappler.grapplers.entry_point"
plugin = "name@:value@:group"
"#;

fn plugin( source: &str, plugin_id: &str, package: &str, topic: &str ) -> Plugin {
	Plugin::new( source, plugin_id, Package::new( package, "1.0.0", package, None ), [ topic ])
}

#[test]
fn bouncer_reads_toml() {

	let bouncer: Bouncer = toml::from_str( CONFIG ).expect( "Failed to parse bouncer configuration" );

	assert!( bouncer.denies( &plugin( "any.source", "any", "noisy_package", "stable" )));
	assert!( bouncer.denies( &plugin( "any.source", "any", "quiet_package", "experimental" )));
	assert!( bouncer.denies( &plugin( "grappler.grapplers.entry_point", "name@:value@:group", "quiet_package", "stable" )));
	assert!( !bouncer.denies( &plugin( "grappler.grapplers.static", "name@:value@:group", "quiet_package", "stable" )));
	assert!( !bouncer.denies( &plugin( "any.source", "any", "quiet_package", "stable" )));

}

#[test]
fn bouncer_reads_partial_toml() {
	let bouncer: Bouncer = toml::from_str( r#"topics = [ "experimental" ]"# ).expect( "Failed to parse bouncer configuration" );
	assert!( !bouncer.denies( &plugin( "any.source", "any", "noisy_package", "stable" )));
	assert!( bouncer.denies( &plugin( "any.source", "any", "noisy_package", "experimental" )));
}

#[test]
fn bouncer_rejects_unknown_fields() {
	match toml::from_str::<Bouncer>( r#"topic = [ "experimental" ]"# ) {
		Err( err ) => assert!( err.to_string().contains( "topic" )),
		Ok( bouncer ) => panic!( "Expected a parse error, found: {:?}", bouncer ),
	}
}

#[test]
fn bouncer_denied_plugin_fields() {
	let denied = DeniedPlugin { source: "a".to_string(), plugin: "b".to_string() };
	assert_eq!( denied.clone(), denied );
}
