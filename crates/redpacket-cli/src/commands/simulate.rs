//! `redpacket simulate`: a full redemption on virtual time, no terminal UI.

use std::time::Duration;

use serde::Serialize;

use redpacket_core::{
    BiometricStatus, History, RedemptionRecord, ScreenConfig, Simulator, Timer,
    format_timestamp_long,
};

pub struct SimulateConfig<'a> {
    pub config: ScreenConfig,
    pub code: &'a str,
    pub method: &'a str,
    pub seed: Option<u64>,
    pub max_attempts: u32,
    pub json: bool,
}

/// What a headless run produced.
#[derive(Debug, Serialize)]
pub struct SimulateOutcome {
    pub code: String,
    pub method: String,
    pub attempts: u64,
    pub verified: bool,
    pub redeemed: Option<RedemptionRecord>,
    pub trace: Vec<String>,
    pub history: History,
}

/// Drive `sim` through unlock and redemption. Returns `Err` with a message
/// when the code is invalid.
pub fn simulate(
    sim: &mut Simulator,
    code: &str,
    method: redpacket_core::BiometricMethod,
    max_attempts: u32,
) -> Result<SimulateOutcome, String> {
    let mut trace = Vec::new();

    sim.screen_mut().set_input(code);
    let check = sim.screen().code_check();
    if let Some(msg) = check.message() {
        return Err(msg);
    }

    for _ in 0..max_attempts.max(1) {
        sim.authenticate(method);
        let fired = sim.run_until(|s| s.status().is_settled());
        record(&mut trace, sim, &fired);
        if sim.screen().status() == BiometricStatus::Success {
            break;
        }
    }

    let verified = sim.screen().status() == BiometricStatus::Success;
    let mut redeemed = None;
    if verified {
        match sim.submit() {
            Ok(_) => {
                trace.push(format!("{} submit accepted", stamp(sim.now())));
                let fired = sim.run_until(|s| !s.is_redeeming());
                record(&mut trace, sim, &fired);
                redeemed = sim.screen().history().latest().cloned();
                let fired = sim.run_until_idle();
                record(&mut trace, sim, &fired);
            }
            Err(blocked) => trace.push(format!("{} submit blocked: {blocked}", stamp(sim.now()))),
        }
    }

    Ok(SimulateOutcome {
        code: check.normalized,
        method: method.to_string(),
        attempts: sim.screen().attempts(),
        verified,
        redeemed,
        trace,
        history: sim.screen().history().clone(),
    })
}

fn stamp(t: Duration) -> String {
    format!("[+{:>7.3}s]", t.as_secs_f64())
}

fn record(trace: &mut Vec<String>, sim: &Simulator, fired: &[Timer]) {
    let screen = sim.screen();
    let at = stamp(sim.now());
    for timer in fired {
        let line = match timer {
            Timer::BiometricSettled { attempt, method } => match screen.auth_error() {
                Some(e) => format!("{at} attempt #{attempt} ({method}): {e}"),
                None => format!("{at} attempt #{attempt} ({method}): {}", screen.status_label()),
            },
            Timer::RedemptionSettled { seq } => match screen.last_success() {
                Some(s) => format!(
                    "{at} redemption #{seq}: +{} {} credited",
                    s.amount,
                    screen.config().currency
                ),
                None => format!("{at} redemption #{seq} settled"),
            },
            Timer::CelebrationOver { .. } => format!("{at} celebration over"),
        };
        trace.push(line);
    }
}

pub fn run(cfg: SimulateConfig<'_>) {
    let method = super::parse_method(cfg.method);
    let currency = cfg.config.currency.clone();
    let offset = cfg.config.utc_offset_minutes;
    let mut sim = Simulator::from_config(cfg.config, cfg.seed);

    let outcome = match simulate(&mut sim, cfg.code, method, cfg.max_attempts) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("Invalid code '{}': {msg}", cfg.code);
            std::process::exit(1);
        }
    };

    if cfg.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize outcome: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("Redeeming {} with {}\n", outcome.code, method.label());
        for line in &outcome.trace {
            println!("  {line}");
        }
        println!();
        match &outcome.redeemed {
            Some(r) => {
                println!("  \u{1F9E7} Red packet opened!");
                println!("     Amount:  {}", r.amount.credited(&currency));
                println!("     Code:    {}", r.code);
                println!("     Time:    {}", format_timestamp_long(r.timestamp_ms, offset));
                println!("\n  History now has {} entries.", outcome.history.len());
            }
            None => println!(
                "  Not verified after {} attempt(s); nothing redeemed.",
                outcome.attempts
            ),
        }
    }

    if outcome.redeemed.is_none() {
        std::process::exit(1);
    }
}
