use redpacket_core::ScreenConfig;

pub fn run(config: &ScreenConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}
