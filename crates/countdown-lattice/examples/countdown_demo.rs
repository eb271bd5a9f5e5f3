//! Runs one countdown cycle on the system clock and prints each label.
//!
//! ```text
//! cargo run --example countdown_demo -- [config.toml]
//! RUST_LOG=countdown_lattice::button=debug cargo run --example countdown_demo
//! ```

use std::time::Duration;

use countdown_lattice::{CountdownButton, CountdownConfig, CountdownResult, HeadlessEventLoop};
use tracing_subscriber::EnvFilter;

fn main() -> CountdownResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CountdownConfig::read_toml(path)?,
        None => CountdownConfig::new("Submit", 3),
    };
    let cycle = config.tick_interval() * config.validate()?.saturating_add(1);

    let mut event_loop = HeadlessEventLoop::new();
    let button = CountdownButton::new(config, event_loop.timer_host())?;
    println!("{}", button.text());
    button.text_changed.connect(|text| println!("{text}"));
    button.countdown_finished.connect(|_| println!("(enabled)"));

    let button = event_loop.add_widget(button);
    button.lock().click();
    event_loop.run_for(cycle + Duration::from_millis(100));

    Ok(())
}
