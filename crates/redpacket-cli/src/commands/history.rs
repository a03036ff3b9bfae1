//! `redpacket history`: print the history a fresh screen starts with.

use redpacket_core::{History, ScreenConfig, format_timestamp};

pub fn render(history: &History, config: &ScreenConfig) -> Vec<String> {
    history
        .iter()
        .map(|r| {
            format!(
                "  #{:<3} {:<14} {:>14}  {}",
                r.id,
                r.code,
                r.amount.credited(&config.currency),
                format_timestamp(r.timestamp_ms, config.utc_offset_minutes)
            )
        })
        .collect()
}

pub fn run(config: &ScreenConfig, json: bool) {
    let history = if config.seed_history {
        History::seeded()
    } else {
        History::empty()
    };

    if json {
        match serde_json::to_string_pretty(&history) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize history: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if history.is_empty() {
        println!("No redemptions yet.");
        return;
    }

    println!("Redemption history ({} entries, newest first):\n", history.len());
    for line in render(&history, config) {
        println!("{line}");
    }
    println!(
        "\n  Total credited: {}",
        history.total().credited(&config.currency)
    );
}
