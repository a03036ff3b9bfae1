use redpacket_core::{ScreenConfig, Simulator};

pub fn run(config: ScreenConfig, seed: Option<u64>) {
    let sim = Simulator::from_config(config, seed);
    let mut app = crate::tui::app::App::new(sim);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
