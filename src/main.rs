//! Browser entrypoint: mounts the hero swarm into `<body>`.

// The binary only needs the library; its dependency list is shared.
#![allow(unused_crate_dependencies)]

fn main() {
	swarm_canvas::init_logging();
	leptos::mount::mount_to_body(swarm_canvas::App);
}
