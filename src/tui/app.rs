use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::controller::{UserAction, ViewController};
use crate::models::Filter;
use crate::storage::StorageError;

/// Interaction modes. Input-carrying variants own their buffer; everything
/// a buffer is submitted to lives in the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Add(String),
    Edit(String),
    Help,
}

/// UI state machine over the controller: the active mode, the list
/// selection, and the modal hit-test area for click-outside handling.
///
/// Invariant: `Mode::Edit` is active exactly while the controller's edit
/// workflow is in `Editing`.
pub struct TuiApp {
    pub controller: ViewController,
    pub mode: Mode,
    pub selected: usize,
    pub should_quit: bool,
    /// Set by the renderer each frame while the edit modal is visible.
    pub modal_area: Option<Rect>,
}

impl TuiApp {
    pub fn new(controller: ViewController) -> Self {
        Self {
            controller,
            mode: Mode::Browse,
            selected: 0,
            should_quit: false,
            modal_area: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), StorageError> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        match self.mode {
            Mode::Browse => self.handle_browse_key(key)?,
            Mode::Add(_) => self.handle_add_key(key)?,
            Mode::Edit(_) => self.handle_edit_key(key)?,
            Mode::Help => self.mode = Mode::Browse,
        }
        self.clamp_selection();
        Ok(())
    }

    /// Mouse input only matters while the edit modal is open: a left click
    /// outside the modal cancels the edit. Clicks inside are ignored.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), StorageError> {
        if !matches!(self.mode, Mode::Edit(_)) {
            return Ok(());
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let inside = self
                .modal_area
                .map(|area| area.contains(Position::new(mouse.column, mouse.row)))
                .unwrap_or(false);
            if !inside {
                log::debug!("ui: click outside modal cancels edit");
                self.controller.apply(UserAction::CancelEdit)?;
                self.mode = Mode::Browse;
            }
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Result<(), StorageError> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
            (KeyCode::Char('q'), _) => self.should_quit = true,
            (KeyCode::Char('?'), _) => self.mode = Mode::Help,
            (KeyCode::Char('a'), _) | (KeyCode::Char('i'), _) => {
                self.mode = Mode::Add(String::new());
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => self.select_prev(),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => self.select_next(),
            (KeyCode::Char(' '), _) | (KeyCode::Char('x'), _) => {
                if let Some(id) = self.selected_id() {
                    log::debug!("ui: toggle id={id}");
                    self.controller.apply(UserAction::Toggle(id))?;
                }
            }
            (KeyCode::Enter, _) | (KeyCode::Char('e'), _) => {
                if let Some(id) = self.selected_id() {
                    self.controller.apply(UserAction::RequestEdit(id))?;
                    if let Some(prefill) = self.controller.edit_prefill() {
                        self.mode = Mode::Edit(prefill);
                    }
                }
            }
            (KeyCode::Char('d'), _) => {
                if let Some(id) = self.selected_id() {
                    log::debug!("ui: delete id={id}");
                    self.controller.apply(UserAction::Delete(id))?;
                }
            }
            (KeyCode::Char('1'), _) => {
                self.controller.apply(UserAction::SetFilter(Filter::All))?;
            }
            (KeyCode::Char('2'), _) => {
                self.controller.apply(UserAction::SetFilter(Filter::Active))?;
            }
            (KeyCode::Char('3'), _) => {
                self.controller
                    .apply(UserAction::SetFilter(Filter::Completed))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> Result<(), StorageError> {
        match key.code {
            KeyCode::Esc => {
                // The typed text is discarded; an error indicator stays up
                // until a corrected add.
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                let text = match &self.mode {
                    Mode::Add(buffer) => buffer.clone(),
                    _ => return Ok(()),
                };
                self.controller.apply(UserAction::SubmitNew(text))?;
                if !self.controller.add_error() {
                    // Stay in add mode with a fresh buffer so several tasks
                    // can be entered in a row. A rejected submit keeps the
                    // buffer for correction.
                    log::debug!("ui: task added, {} active", self.controller.active_count());
                    self.mode = Mode::Add(String::new());
                }
            }
            KeyCode::Backspace => {
                if let Mode::Add(buffer) = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Add(buffer) = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<(), StorageError> {
        match key.code {
            KeyCode::Esc => {
                self.controller.apply(UserAction::CancelEdit)?;
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                let text = match &self.mode {
                    Mode::Edit(buffer) => buffer.clone(),
                    _ => return Ok(()),
                };
                self.controller.apply(UserAction::SubmitEdit(text))?;
                // Empty text keeps the workflow (and the modal) open.
                if !self.controller.is_editing() {
                    self.mode = Mode::Browse;
                }
            }
            KeyCode::Backspace => {
                if let Mode::Edit(buffer) = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Edit(buffer) = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn selected_id(&self) -> Option<String> {
        self.controller
            .visible_tasks()
            .get(self.selected)
            .map(|task| task.id.clone())
    }

    fn select_next(&mut self) {
        let count = self.controller.visible_tasks().len();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    // Mutations and filter switches can shrink the visible list under the
    // selection.
    fn clamp_selection(&mut self) {
        let count = self.controller.visible_tasks().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}
