use std::io::Read;

use recipe_relay::{Config, relay_from_config, transport::event};

// One event in on stdin, one response out on stdout
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the response
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = Config::from_env()?;
    let relay = relay_from_config(&config);

    let mut raw_event = String::new();
    std::io::stdin().read_to_string(&mut raw_event)?;

    println!("{}", event::handle_json(&relay, &raw_event).await);
    Ok(())
}
