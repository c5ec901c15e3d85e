//! Command definitions
//!
//! Maps a line typed at the menu prompt to a command.

/// Menu commands, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuChoice {
    Add = 1,
    View = 2,
    Search = 3,
    Update = 4,
    Delete = 5,
    Exit = 6,
}

impl MenuChoice {
    /// All choices in menu order
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::View,
        MenuChoice::Search,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    /// Parse a menu line ("  3\n" → Search)
    ///
    /// Returns `None` for anything that is not exactly one of "1".."6".
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::View),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::Update),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Student Record",
            MenuChoice::View => "View All Students",
            MenuChoice::Search => "Search Student by ID",
            MenuChoice::Update => "Update Student Record",
            MenuChoice::Delete => "Delete Student Record",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }
}
