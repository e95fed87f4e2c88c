/// Which overlay controls the shell shows.
///
/// The layout only changes in response to `GameEvent`s, so the shell never
/// inspects the game condition to decide what is on screen.

use crate::entities::{Command, GameEvent};

pub const TITLE_TEXT: &str = "Flappy Bird";
pub const GET_READY_TEXT: &str = "Get Ready?";
pub const GAME_OVER_TEXT: &str = "Game Over";
pub const PAUSE_TEXT: &str = "Game Pause";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Start,
    Restart,
    Continue,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::Start => "Start Game!",
            Button::Restart => "Restart Game!",
            Button::Continue => "Continue!",
        }
    }

    pub fn command(self) -> Command {
        match self {
            Button::Start => Command::Start,
            Button::Restart => Command::Restart,
            Button::Continue => Command::Continue,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    /// Big centred label paired with `button`.
    pub title: Option<&'static str>,
    pub button: Option<Button>,
    /// Top label: "Get Ready?" and then the running score.
    pub banner: Option<String>,
    pub quit_visible: bool,
}

impl Layout {
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::WaitingToStart => {
                self.quit_visible = true;
                self.show(TITLE_TEXT, Button::Start);
            }
            GameEvent::Started => {
                self.banner = Some(GET_READY_TEXT.to_string());
                self.quit_visible = false;
                self.hide();
            }
            GameEvent::ScoreUpdated(score) => {
                self.banner = Some(score.to_string());
            }
            GameEvent::GameOver => {
                self.quit_visible = true;
                self.show(GAME_OVER_TEXT, Button::Restart);
            }
            GameEvent::Restarted => {
                self.banner = None;
                self.show(TITLE_TEXT, Button::Start);
            }
            GameEvent::Paused => {
                self.quit_visible = true;
                self.show(PAUSE_TEXT, Button::Continue);
            }
            GameEvent::Continued => {
                self.quit_visible = false;
                self.hide();
            }
        }
    }

    fn show(&mut self, title: &'static str, button: Button) {
        self.title = Some(title);
        self.button = Some(button);
    }

    fn hide(&mut self) {
        self.title = None;
        self.button = None;
    }
}
