//! Component trait: the interface every UI panel implements.
//!
//! Components own their widget state and render themselves from the shared
//! `FormState`. They never write to it: input turns into `Vec<Action>`, and
//! the App routes those actions to the upload controller.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::FormState;

pub trait Component {
    /// Handle a key event. Only called for the focused component.
    fn handle_key(&mut self, _key: KeyEvent, _state: &FormState) -> Vec<Action> {
        Vec::new()
    }

    /// Handle a mouse event anywhere on screen; components hit-test against
    /// the areas they last drew into.
    fn handle_mouse(&mut self, _event: MouseEvent, _state: &FormState) -> Vec<Action> {
        Vec::new()
    }

    /// Handle a bracketed paste.
    fn handle_paste(&mut self, _text: &str, _state: &FormState) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &FormState);

    /// Rows needed to render meaningfully; 0 hides the component.
    fn height(&self, _state: &FormState) -> u16 {
        3
    }
}
