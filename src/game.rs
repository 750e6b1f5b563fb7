//! Top-level screen flow: menu, play, game over

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::entities::Starfield;
use crate::session::{PlaySession, SessionStatus, TickInput};
use crate::settings::Settings;

const MENU_STAR_COUNT: usize = 190;
const GAME_OVER_STAR_COUNT: usize = 170;

/// One-shot player requests, delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start or restart a session
    Confirm,
    TogglePause,
    /// Pause while playing, leave from the menus
    Back,
    Quit,
}

/// Starfield and "press enter" blink shared by the idle screens
#[derive(Debug, Clone)]
pub struct Backdrop {
    pub starfield: Starfield,
    /// Own stream so idle screens never shift session seeds
    rng: Pcg32,
    blink: f32,
}

impl Backdrop {
    fn new(count: usize, settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            starfield: Starfield::new(count, settings.width, settings.height, &mut rng),
            rng,
            blink: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        self.starfield.update(dt, &mut self.rng);
        self.blink += dt;
    }

    /// The prompt is visible for the first half of every second
    pub fn prompt_visible(&self) -> bool {
        (self.blink * 2.0) as u64 % 2 == 0
    }
}

pub enum Screen {
    Menu(Backdrop),
    Play(Box<PlaySession>),
    GameOver { score: u64, backdrop: Backdrop },
}

impl Screen {
    pub fn get_name(&self) -> &'static str {
        match self {
            Screen::Menu(_) => "menu",
            Screen::Play(_) => "play",
            Screen::GameOver { .. } => "game over",
        }
    }
}

pub struct Game {
    settings: Settings,
    rng: Pcg32,
    screen: Screen,
    best_score: u64,
    running: bool,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let screen = Screen::Menu(Backdrop::new(MENU_STAR_COUNT, &settings, rng.random()));
        Self {
            settings,
            rng,
            screen,
            best_score: 0,
            running: true,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_command(&mut self, command: Command) {
        if command == Command::Quit {
            log::info!("Quit requested from {}", self.screen.get_name());
            self.running = false;
            return;
        }

        if let Screen::Play(session) = &mut self.screen {
            if matches!(command, Command::TogglePause | Command::Back) {
                session.toggle_pause();
            }
            return;
        }

        match command {
            Command::Confirm => self.start_session(),
            Command::Back => {
                log::info!("Leaving from {}", self.screen.get_name());
                self.running = false;
            }
            Command::TogglePause | Command::Quit => {}
        }
    }

    /// Advance whichever screen is active
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        match &mut self.screen {
            Screen::Menu(backdrop) | Screen::GameOver { backdrop, .. } => {
                backdrop.update(dt.max(0.0));
            }
            Screen::Play(session) => {
                if let SessionStatus::Over { final_score } = session.tick(dt, input) {
                    self.end_session(final_score);
                }
            }
        }
    }

    fn start_session(&mut self) {
        let seed = self.rng.random::<u64>();
        log::info!("Starting session from {}", self.screen.get_name());
        self.screen = Screen::Play(Box::new(PlaySession::new(self.settings.clone(), seed)));
    }

    fn end_session(&mut self, score: u64) {
        self.best_score = self.best_score.max(score);
        log::info!("Game over: score {score}, best {}", self.best_score);
        let backdrop = Backdrop::new(GAME_OVER_STAR_COUNT, &self.settings, self.rng.random());
        self.screen = Screen::GameOver { score, backdrop };
    }
}
