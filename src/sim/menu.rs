//! Context-sensitive menus
//!
//! A menu is a list of items built for a context (top-level or pause). The
//! item list depends on whether a game is in progress, so callers `sync`
//! every frame and the list is rebuilt whenever either input changes.
//! Selecting an item yields a [`MenuAction`]; applying it is the state
//! machine's job.

use serde::{Deserialize, Serialize};

use super::tick::Buttons;
use crate::consts::MAX_SCALE;

/// Which menu is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuContext {
    Main,
    Pause,
}

/// What a menu item does when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Resume,
    NewGame,
    HighScores,
    Scale,
    /// Quit from the top-level menu, back to it from the pause menu
    Exit,
}

/// A single menu row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
    /// Label is regenerated from live values each refresh
    pub dynamic_label: bool,
}

impl MenuItem {
    fn fixed(label: &str, action: MenuAction) -> Self {
        Self {
            label: label.to_string(),
            action,
            dynamic_label: false,
        }
    }

    fn dynamic(action: MenuAction, scale: u8) -> Self {
        Self {
            label: dynamic_label_for(action, scale),
            action,
            dynamic_label: true,
        }
    }
}

fn dynamic_label_for(action: MenuAction, scale: u8) -> String {
    match action {
        MenuAction::Scale => format!("Scale: {scale}x"),
        MenuAction::Resume => "Resume Game".to_string(),
        MenuAction::NewGame => "New Game".to_string(),
        MenuAction::HighScores => "High Scores".to_string(),
        MenuAction::Exit => "Exit".to_string(),
    }
}

/// Next display scale, cycling 1..=MAX_SCALE
pub fn next_scale(scale: u8) -> u8 {
    (scale % MAX_SCALE) + 1
}

/// Build the item list for a context
pub fn build_items(context: MenuContext, has_active_game: bool, scale: u8) -> Vec<MenuItem> {
    match context {
        MenuContext::Main => {
            let mut items = Vec::with_capacity(5);
            if has_active_game {
                items.push(MenuItem::fixed("Resume Game", MenuAction::Resume));
            }
            items.push(MenuItem::fixed("New Game", MenuAction::NewGame));
            items.push(MenuItem::fixed("High Scores", MenuAction::HighScores));
            items.push(MenuItem::dynamic(MenuAction::Scale, scale));
            items.push(MenuItem::fixed("Exit", MenuAction::Exit));
            items
        }
        MenuContext::Pause => vec![
            MenuItem::fixed("Continue", MenuAction::Resume),
            MenuItem::fixed("Main Menu", MenuAction::Exit),
        ],
    }
}

/// Menu model: items plus a cursor
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
    selected: usize,
    /// (context, active game) the items were built for
    built_for: Option<(MenuContext, bool)>,
}

impl Menu {
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    /// Rebuild if the context or the active-game predicate changed.
    /// Returns true when a rebuild happened (cursor resets to the top).
    pub fn sync(&mut self, context: MenuContext, has_active_game: bool, scale: u8) -> bool {
        let key = (context, has_active_game);
        if self.built_for == Some(key) {
            return false;
        }
        self.items = build_items(context, has_active_game, scale);
        self.selected = 0;
        self.built_for = Some(key);
        log::debug!("Menu rebuilt for {:?} ({} items)", context, self.items.len());
        true
    }

    /// Regenerate dynamic labels in place, keeping the cursor
    pub fn refresh_labels(&mut self, scale: u8) {
        for item in self.items.iter_mut().filter(|i| i.dynamic_label) {
            item.label = dynamic_label_for(item.action, scale);
        }
    }

    /// Force the next `sync` to rebuild
    pub fn invalidate(&mut self) {
        self.built_for = None;
    }

    pub fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let n = self.items.len();
        self.selected = (self.selected + n - 1) % n;
    }

    pub fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Apply navigation input; returns the chosen action on select
    pub fn navigate(&mut self, pressed: &Buttons) -> Option<MenuAction> {
        if self.items.is_empty() {
            return None;
        }
        if pressed.up {
            self.move_up();
        }
        if pressed.down {
            self.move_down();
        }
        if pressed.confirm || pressed.fire {
            return self.selected_item().map(|item| item.action);
        }
        None
    }
}
