//! Poll scheduler loop
//!
//! One explicit loop instead of a timer callback that reschedules itself:
//! exactly one fetch per cycle, re-armed with the interval current at arm
//! time, and a cancellation token re-checked after every suspension point.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::engine::WeatherEngine;
use super::ports::{ConfigStore, NodeGraphWriter, WeatherProvider};

pub(crate) async fn run<P, G, S>(
    engine: Arc<WeatherEngine<P, G, S>>,
    mut stop_rx: watch::Receiver<bool>,
) where
    P: WeatherProvider + 'static,
    G: NodeGraphWriter + 'static,
    S: ConfigStore + 'static,
{
    loop {
        engine.poll_once().await;

        // A stop during the fetch must not re-arm the timer
        if *stop_rx.borrow() {
            break;
        }

        // Interval changes apply from the next arm, not retroactively
        let interval = engine.polling_interval().await;
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
            _ = stop_rx.changed() => {}
        }

        if *stop_rx.borrow() {
            break;
        }
    }

    log::debug!("Poll loop exited");
}
