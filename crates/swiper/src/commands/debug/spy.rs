use clap::Args;
#[cfg(windows)]
use std::sync::mpsc;
#[cfg(windows)]
use std::time::Duration;
#[cfg(windows)]
use swiper_windows::inspect::{self, SpySample, WindowSummary};

#[derive(Args)]
pub struct SpyArgs {
    /// Milliseconds between samples
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,
    /// Stop after this many samples (runs until Ctrl+C when omitted)
    #[arg(long)]
    pub count: Option<u64>,
}

#[cfg(windows)]
pub fn execute(args: &SpyArgs) {
    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = swiper_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Warning: Ctrl+C handler unavailable: {e}");
    }
    let interval = Duration::from_millis(args.interval_ms.max(1));

    println!("Sampling every {} ms (press Ctrl+C to stop)...", interval.as_millis());
    let mut last: Option<String> = None;
    let mut taken = 0;
    while args.count.is_none_or(|n| taken < n) {
        match inspect::sample() {
            Ok(sample) => {
                let text = render(&sample);
                // Only print when something changed, to keep the output readable.
                if last.as_deref() != Some(text.as_str()) {
                    println!("{text}");
                    last = Some(text);
                }
            }
            Err(e) => eprintln!("Sample failed: {e}"),
        }
        taken += 1;

        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(windows)]
fn render(sample: &SpySample) -> String {
    let mut out = String::from("----");
    match sample.cursor {
        Some(p) => out.push_str(&format!("\nCursor      ({}, {})", p.x, p.y)),
        None => out.push_str("\nCursor      unavailable"),
    }
    out.push_str(&format!(
        "\nUnder       {}",
        sample.under_cursor.as_ref().map_or("-".into(), brief)
    ));
    match &sample.foreground {
        Some(w) => {
            out.push_str(&format!("\nForeground  {}", brief(w)));
            out.push_str(&format!(
                "\n            style 0x{:08X}, visible {}, maximized {}",
                w.style, w.visible, w.maximized
            ));
            if let Some(r) = w.rect {
                out.push_str(&format!(
                    "\n            rect ({}, {}) {}x{}",
                    r.x, r.y, r.width, r.height
                ));
            }
        }
        None => out.push_str("\nForeground  -"),
    }
    for (i, d) in sample.displays.iter().enumerate() {
        out.push_str(&format!(
            "\nMonitor {}{}   bounds ({}, {}) {}x{}, work area ({}, {}) {}x{}",
            i + 1,
            if d.primary { "*" } else { " " },
            d.bounds.x,
            d.bounds.y,
            d.bounds.width,
            d.bounds.height,
            d.work_area.x,
            d.work_area.y,
            d.work_area.width,
            d.work_area.height
        ));
    }
    out
}

#[cfg(windows)]
fn brief(w: &WindowSummary) -> String {
    format!("0x{:X} \"{}\" [{}]", w.hwnd, w.title, w.class)
}
