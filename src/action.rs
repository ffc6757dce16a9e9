//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::schema::Category;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to main app
    SplashComplete,
    /// Wizard finished; profile is ready to persist
    ProfileComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row in the record table
    NextItem,
    /// Move to previous row in the record table
    PrevItem,
    /// Jump to first row
    FirstItem,
    /// Jump to last row
    LastItem,
    /// Move to next category tab
    NextTab,
    /// Move to previous category tab
    PrevTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    /// Go to the next page
    NextPage,
    /// Go to the previous page
    PrevPage,
    /// Jump to a specific 1-based page
    GoToPage(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Record CRUD
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the add form for the active category
    OpenAddForm,
    /// Open the edit form for the selected record
    OpenEditForm,
    /// Open the read-only view for the selected record
    OpenViewDialog,
    /// Ask for confirmation before deleting the selected record
    OpenDeleteConfirm,
    /// Delete was confirmed
    ConfirmDelete { category: Category, record_id: u64 },
    /// Form dialog validated successfully; persist its values
    SubmitForm,
    /// Export the active category to CSV
    ExportCsv,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the help dialog
    OpenHelp,
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling (help / view overlays)
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::ProfileComplete => write!(f, "ProfileComplete"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::GoToPage(page) => write!(f, "GoToPage({})", page),
            Action::OpenAddForm => write!(f, "OpenAddForm"),
            Action::OpenEditForm => write!(f, "OpenEditForm"),
            Action::OpenViewDialog => write!(f, "OpenViewDialog"),
            Action::OpenDeleteConfirm => write!(f, "OpenDeleteConfirm"),
            Action::ConfirmDelete {
                category,
                record_id,
            } => write!(f, "ConfirmDelete({}, {})", category.name(), record_id),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
        }
    }
}
