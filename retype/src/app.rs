use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    Frame,
    style::Stylize,
    text::{Line, ToLine},
    widgets::Padding,
};
use rewind::{FrameTimer, PlaybackState, ReplaySession};
use tracing::{debug, warn};

use crate::config::Config;
use crate::preferences::PreferenceStore;
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};
use crate::view::{ClickTarget, ReplayView};

/// How long to wait for input while nothing is playing
const IDLE_POLL: Duration = Duration::from_millis(250);

const HELP: &str = "<SPACE> play/pause | <←/→> char | <CTRL-←/→> jump | <,/.> action | \
                    <[/]> speed | <HOME/END> | <P> peak | <A> adjusted | <1-9> segment | \
                    <M/N> mistake";

/// An app message
pub enum Message {
    /// Quit the application
    Quit,
}

/// Everything a key can ask the replay to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    TogglePlayback,
    Faster,
    Slower,
    StepActionBack,
    StepActionForward,
    CharBack,
    CharForward,
    JumpBack,
    JumpForward,
    SkipToStart,
    SkipToEnd,
    JumpToPeak,
    ToggleAdjusted,
    Segment(usize),
    NextMistake,
    PreviousMistake,
}

impl Command {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.has_mods(KeyModifiers::CONTROL);

        let command = match key.code {
            KeyCode::Char(' ') => Self::TogglePlayback,
            KeyCode::Char(']') => Self::Faster,
            KeyCode::Char('[') => Self::Slower,
            KeyCode::Char(',') => Self::StepActionBack,
            KeyCode::Char('.') => Self::StepActionForward,
            KeyCode::Left if ctrl => Self::JumpBack,
            KeyCode::Right if ctrl => Self::JumpForward,
            KeyCode::Left => Self::CharBack,
            KeyCode::Right => Self::CharForward,
            KeyCode::Home => Self::SkipToStart,
            KeyCode::End => Self::SkipToEnd,
            KeyCode::Char('p' | 'P') => Self::JumpToPeak,
            KeyCode::Char('a' | 'A') => Self::ToggleAdjusted,
            KeyCode::Char('m' | 'M') => Self::NextMistake,
            KeyCode::Char('n' | 'N') => Self::PreviousMistake,
            KeyCode::Char(digit @ '1'..='9') => {
                Self::Segment(digit as usize - '1' as usize)
            }
            KeyCode::Char('0') => Self::Segment(9),
            _ => return None,
        };

        Some(command)
    }
}

/// The app itself
pub struct App {
    session: ReplaySession,
    view: ReplayView,
    config: Config,
    preferences: Box<dyn PreferenceStore>,
    timer: FrameTimer,
}

impl App {
    /// Creates a new `App`
    pub fn new(
        session: ReplaySession,
        config: Config,
        preferences: Box<dyn PreferenceStore>,
    ) -> Self {
        let view = ReplayView::new(session.text().len());
        Self {
            session,
            view,
            config,
            preferences,
            timer: FrameTimer::new(),
        }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        let frame_interval = Duration::from_millis(self.config.settings.frame_interval);

        loop {
            let timeout = match self.session.state() {
                PlaybackState::Playing => frame_interval,
                PlaybackState::Paused => IDLE_POLL,
            };

            let event = event::poll(timeout)?.then(event::read).transpose()?;
            if let Some(Message::Quit) = event.and_then(|event| self.handle_event(&event)) {
                break;
            }

            if self.session.position().is_playing {
                self.session.tick(self.timer.now_ms());
            }

            let update = self.session.take_update();
            self.view.apply(&update);

            terminal.draw(|frame| self.draw(frame))?;
        }

        execute!(stdout(), DisableMouseCapture)?;
        ratatui::restore();

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("RETYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned())
            .title_top(self.status_line())
            .title_bottom(HELP.to_line().centered());

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.view.render(frame, content, &self.session, &self.config);
    }

    fn status_line(&self) -> Line<'static> {
        let position = self.session.position();
        let state = match position.state() {
            PlaybackState::Playing => "▶",
            PlaybackState::Paused => "⏸",
        };

        Line::raw(format!(
            "{state} {} | {} | {}",
            position.speed,
            self.session.time_base(),
            self.session.stats()
        ))
    }

    /// Global event handler
    fn handle_event(&mut self, event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.is_ctrl_press_char('q') => Some(Message::Quit),
            Event::Key(key) if key.is_press() => {
                if let Some(command) = Command::from_key(key) {
                    self.execute(command);
                }
                None
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(*mouse);
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        match self.view.hit(mouse.column, mouse.row, &self.session) {
            Some(ClickTarget::Char(index)) => self.session.seek_to_click(index, false),
            Some(ClickTarget::Segment(index)) => {
                self.session.seek_to_segment(index);
            }
            Some(ClickTarget::Mistake(index)) => self.select_mistake(index),
            None => (),
        }
    }

    pub fn execute(&mut self, command: Command) {
        debug!(%command, "Executing");
        let session = &mut self.session;

        match command {
            Command::TogglePlayback => {
                session.toggle_playback();
            }
            Command::Faster => {
                session.faster();
            }
            Command::Slower => {
                session.slower();
            }
            Command::StepActionBack => session.step_action_back(),
            Command::StepActionForward => session.step_action_forward(),
            Command::CharBack => session.seek_back_one_char(),
            Command::CharForward => session.seek_forward_one_char(),
            Command::JumpBack => session.jump_back(),
            Command::JumpForward => session.jump_forward(),
            Command::SkipToStart => session.skip_to_start(),
            Command::SkipToEnd => session.skip_to_end(),
            Command::JumpToPeak => {
                session.jump_to_peak_wpm(session.time_base());
            }
            Command::ToggleAdjusted => {
                let base = session.toggle_time_base();
                if let Err(error) = self.preferences.save(base.into()) {
                    warn!(%error, "Failed to save preferences");
                }
            }
            Command::Segment(index) => {
                session.seek_to_segment(index);
            }
            Command::NextMistake => self.cycle_mistake(true),
            Command::PreviousMistake => self.cycle_mistake(false),
        }
    }

    fn cycle_mistake(&mut self, forward: bool) {
        let count = self.session.mistakes().len();
        if count == 0 {
            return;
        }

        let next = match (self.view.selected_mistake(), forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        };
        self.select_mistake(next);
    }

    fn select_mistake(&mut self, index: usize) {
        if self.session.seek_to_mistake(index) {
            self.view.select_mistake(Some(index));
        }
    }
}
