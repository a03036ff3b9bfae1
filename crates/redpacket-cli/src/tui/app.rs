//! TUI application state and event loop.
//!
//! Single-threaded: the loop polls the keyboard every 50 ms, feeds key
//! presses to the screen and advances the simulator by the real time that
//! passed. Simulated latency lives entirely in the simulator's timer queue.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use redpacket_core::{BiometricMethod, RedeemScreen, Simulator};

/// Input poll interval, also the animation frame rate.
const FRAME: Duration = Duration::from_millis(50);

pub struct App {
    sim: Simulator,
    running: bool,
    /// Why the last Enter press did nothing.
    notice: Option<String>,
    frames: u64,
}

impl App {
    pub fn new(sim: Simulator) -> Self {
        Self {
            sim,
            running: true,
            notice: None,
            frames: 0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        let history = self.sim.screen().history();
        if let Some(latest) = self.sim.screen().last_success() {
            println!(
                "Last redemption: {} {} ({} entries in history)",
                latest.amount.credited(&self.sim.screen().config().currency),
                latest.code,
                history.len()
            );
        }

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.is_running() {
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(FRAME)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            let now = Instant::now();
            self.tick(now - last_tick);
            last_tick = now;
        }

        Ok(())
    }

    /// Advance simulated time by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        self.sim.advance(elapsed);
        self.frames = self.frames.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::F(1) => self.authenticate(BiometricMethod::Face),
            KeyCode::Char('f') if ctrl => self.authenticate(BiometricMethod::Face),
            KeyCode::F(2) => self.authenticate(BiometricMethod::Touch),
            KeyCode::Char('t') if ctrl => self.authenticate(BiometricMethod::Touch),
            KeyCode::Char('u') if ctrl => self.edit(RedeemScreen::clear_input),
            KeyCode::Char('l') if ctrl => self.edit(RedeemScreen::normalize_input),
            KeyCode::Enter => match self.sim.submit() {
                Ok(_) => self.notice = None,
                Err(blocked) => self.notice = Some(blocked.to_string()),
            },
            KeyCode::Backspace => self.edit(RedeemScreen::pop_char),
            KeyCode::Char(c) if !ctrl => self.edit(|s| s.push_char(c)),
            _ => {}
        }
    }

    fn authenticate(&mut self, method: BiometricMethod) {
        self.notice = None;
        self.sim.authenticate(method);
    }

    fn edit(&mut self, f: impl FnOnce(&mut RedeemScreen)) {
        self.notice = None;
        f(self.sim.screen_mut());
    }

    // -----------------------------------------------------------------------
    // Accessors for the UI
    // -----------------------------------------------------------------------

    pub fn screen(&self) -> &RedeemScreen {
        self.sim.screen()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Milliseconds into the running celebration.
    pub fn celebration_ms(&self) -> Option<u64> {
        self.sim
            .celebration_elapsed()
            .map(|d| d.as_millis() as u64)
    }

    pub fn spinner(&self) -> char {
        const FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];
        FRAMES[(self.frames as usize / 2) % FRAMES.len()]
    }
}
