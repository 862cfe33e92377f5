//! # Example: blocking
//!
//! Demonstrates blocking subscriptions.
//!
//! Shows how to:
//! - Hold the queue until an async listener is done ([`Block::Indefinite`]).
//! - Bound the wait with a timeout ([`Block::Timeout`]).
//! - Order follow-up work with [`Emitter::emit_then`].
//!
//! ## Flow
//! ```text
//! emit("upload", 1) ──► Uploader (300ms, waited for) ──► then: "upload 1 done"
//! emit("upload", 2) ──► Uploader ...
//! emit("audit", 3)  ──► stuck listener (never finishes) ──► released after 100ms
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example blocking
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use podium::{AsyncListener, Block, Done, Emitter, ListenerFn, Subscribe, SubscribeOptions};

/// Simulates a slow upload.
struct Uploader;

#[async_trait]
impl Subscribe<u32> for Uploader {
    async fn on_event(&self, id: Arc<u32>) {
        println!("[uploader] start {id}");
        tokio::time::sleep(Duration::from_millis(300)).await;
        println!("[uploader] end   {id}");
    }

    fn name(&self) -> &'static str {
        "uploader"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jobs: Emitter<u32> = Emitter::with_events(["upload", "audit"])?;

    jobs.on_with(
        "upload",
        SubscribeOptions::new().with_block(Block::Indefinite),
        AsyncListener::arc(Uploader),
    )?;

    // Keeps its `Done` alive without finishing it.
    let parked: Arc<std::sync::Mutex<Vec<Done>>> = Arc::default();
    let p = Arc::clone(&parked);
    jobs.on_with(
        "audit",
        SubscribeOptions::new().with_block(Block::millis(100)),
        ListenerFn::arc("stuck", move |id: Arc<u32>, done: Done| {
            println!("[audit] got {id}, never finishing");
            if let Ok(mut parked) = p.lock() {
                parked.push(done);
            }
        }),
    )?;

    let started = Instant::now();
    jobs.emit_then("upload", 1, || println!("[jobs] upload 1 done"))?;
    jobs.emit_then("upload", 2, || println!("[jobs] upload 2 done"))?;
    jobs.emit("audit", 3)?.await;

    println!("[jobs] all settled after {:?}", started.elapsed());
    Ok(())
}
