mod app;
mod configuration;
mod core;
mod execution;
mod plugin;
mod receiver;
mod results;

#[tokio::main]
async fn main() {
    std::process::exit(app::startup::startup().await);
}
