//! Browser entry point. The server side lives in the `relay` binary.

#[cfg(target_arch = "wasm32")]
fn main() {
    isa_portfolio::app::launch();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("this binary targets wasm32; run the `relay` binary for the server side");
}
