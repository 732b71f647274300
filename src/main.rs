mod app;
mod config;
mod error;
mod launch;
mod library;
mod runtime;
mod session;
mod store;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
