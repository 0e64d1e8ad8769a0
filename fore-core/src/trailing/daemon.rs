use crate::engine::SignalEngine;
use log::info;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Background thread driving the trailing pass on a fixed interval. The
/// engine lock is released between passes, so inbound message handling is
/// only ever blocked for the duration of a single pass.
pub struct TrailingDaemon {
    engine: Arc<Mutex<SignalEngine>>,
    interval: Duration,
    running: Arc<Mutex<bool>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TrailingDaemon {
    pub fn new(engine: Arc<Mutex<SignalEngine>>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            running: Arc::new(Mutex::new(false)),
            handle: None,
        }
    }

    pub fn start(&mut self) {
        {
            let mut running = self.running.lock().unwrap();
            if *running {
                return;
            }
            *running = true;
        }

        let engine = self.engine.clone();
        let running = self.running.clone();
        let interval = self.interval;

        self.handle = Some(thread::spawn(move || {
            info!("trailing daemon started (interval {:?})", interval);
            while *running.lock().unwrap() {
                {
                    let mut engine = engine.lock().unwrap();
                    engine.trailing_tick();
                }
                thread::sleep(interval);
            }
            info!("trailing daemon exiting");
        }));
    }

    /// Stop scheduling further passes and join the thread. An in-flight pass
    /// runs to completion.
    pub fn stop(&mut self) {
        {
            let mut running = self.running.lock().unwrap();
            *running = false;
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
