//! Simulated editor sync loop
//!
//! The editing surface is polled on a debounce interval; only ticks whose
//! Markdown actually changed are reported.
//!
//! Run with: cargo run --example change_tracking

use editmd_converter::ContentTracker;

fn main() {
    let ticks = [
        "<p>D</p>",
        "<p>Dra</p>",
        "<p>Draft</p>",
        "<p>Draft</p>",
        "",
        "<p><span>Draft</span></p><!-- caret -->",
        "<p>Draft <b>one</b></p>",
    ];

    let mut tracker = ContentTracker::new();
    tracker.set_markdown("D");

    for (tick, html) in ticks.iter().enumerate() {
        match tracker.update(html) {
            Some(markdown) => println!(
                "tick {}: changed -> {:?} ({})",
                tick,
                markdown,
                tracker.last_fingerprint().unwrap_or("-")
            ),
            None => println!("tick {}: unchanged", tick),
        }
    }
}
