use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::game::Game;
use crate::input::InputManager;
use crate::renderer::GameRenderer;

/// Longest step fed to the simulation; a stalled terminal must not teleport
/// everything across the arena
const MAX_FRAME_DT: f32 = 0.05;

/// The frame loop tying terminal input, the game and the renderer together.
pub struct App {
    game: Game,
    input_manager: InputManager,
    renderer: GameRenderer,
    last_frame_time: Instant,
    fps: u32,
}

impl App {
    pub fn new(game: Game, reports_releases: bool) -> Self {
        Self {
            game,
            input_manager: InputManager::new(reports_releases),
            renderer: GameRenderer::new(),
            last_frame_time: Instant::now(),
            fps: 0,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let frame_time = self.game.settings().frame_time();

        while self.game.is_running() {
            let frame_start = Instant::now();
            let elapsed = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if elapsed.as_micros() > 0 {
                self.fps = (1_000_000 / elapsed.as_micros()) as u32;
            }
            let dt = elapsed.as_secs_f32().min(MAX_FRAME_DT);

            self.input_manager.poll_events()?;
            for &command in self.input_manager.commands() {
                self.game.handle_command(command);
            }
            if !self.game.is_running() {
                break;
            }

            let input = self.input_manager.tick_input(Instant::now());
            self.game.update(dt, &input);

            terminal.draw(|frame| self.renderer.render(frame, &self.game, self.fps))?;

            let spent = frame_start.elapsed();
            if spent < frame_time {
                std::thread::sleep(frame_time - spent);
            } else {
                std::thread::sleep(Duration::from_millis(1));
            }
        }

        log::info!("Exiting with best score {}", self.game.best_score());
        Ok(())
    }
}
