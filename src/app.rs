//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. App is intentionally lean - it coordinates between
//! components but does not contain business logic itself.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, DeleteDialog, FormDialog, HelpDialog, HomeComponent, HomeRenderContext,
    ProfileWizard, QuitDialog, RecordTable, SplashComponent, TableActions, ViewDialog,
};
use crate::config::Config;
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, ModalStack};
use crate::model::record::Record;
use crate::model::schema::Category;
use crate::model::ui::AppMode;
use crate::services::{export_csv, RecordStore};
use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Next mode to transition to after splash
    pub next_mode_after_splash: AppMode,

    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Record and profile persistence
    pub store: RecordStore,

    /// Loaded configuration
    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Whether record data is still being loaded
    pub loading: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub home: HomeComponent,
    pub table: RecordTable,
    pub form_dialog: FormDialog,
    pub view_dialog: ViewDialog,
    pub delete_dialog: DeleteDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub wizard: ProfileWizard,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> App {
        let config = Config::load().unwrap_or_default();
        let store = RecordStore::new(&config.data_dir);

        let mut app = App {
            mode: AppMode::Splash,
            next_mode_after_splash: AppMode::Running,
            domain: DomainState::new(),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            loading: false,
            splash: SplashComponent::new(),
            home: HomeComponent::new(config.items_per_page),
            table: RecordTable::new(TableActions::all()),
            form_dialog: FormDialog::default(),
            view_dialog: ViewDialog::default(),
            delete_dialog: DeleteDialog,
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            wizard: ProfileWizard::new(),
            store,
            config,
        };

        match app.store.load_records() {
            Ok(records) => app.domain.records = records,
            Err(e) => app.error = Some(format!("Failed to load records: {}", e)),
        }

        app.domain.profile = app.store.load_profile();
        if app.domain.profile.is_none() {
            // First run: the wizard builds the profile
            app.next_mode_after_splash = AppMode::Wizard;
        }

        app.refresh();
        app
    }

    /// Re-derive pagination totals and keep the table highlight in range
    fn refresh(&mut self) {
        self.home
            .sync_pagination(&self.domain, &self.table.search_query);
        let page_len = self
            .home
            .page_records(&self.domain, &self.table.search_query)
            .len();
        self.table.clamp_selection(page_len);
    }

    fn page_len(&self) -> usize {
        self.home
            .page_records(&self.domain, &self.table.search_query)
            .len()
    }

    /// The record the table highlight currently points at
    fn selected_record(&self) -> Option<Record> {
        self.home
            .selected_record(&self.domain, &self.table.search_query, self.table.selected)
            .cloned()
    }

    /// Record targeted by an edit request: the viewed record when the view
    /// dialog is on top, else the table selection
    fn edit_target(&self) -> Option<(Category, Record)> {
        if let Some(Modal::ViewRecord {
            category,
            record_id,
        }) = self.modals.top()
        {
            let category = *category;
            return self
                .domain
                .record(category, *record_id)
                .cloned()
                .map(|r| (category, r));
        }
        self.selected_record()
            .map(|r| (self.home.active_category, r))
    }

    fn set_status(&mut self, message: String) {
        self.error = None;
        self.status_message = Some(message);
    }

    /// Persist the form dialog's values as a new or updated record
    fn save_form(&mut self) -> Result<()> {
        let (category, record_id, values) = match &self.form_dialog.schema {
            Some(schema) => (
                schema.category,
                self.form_dialog.record_id,
                self.form_dialog.values.clone(),
            ),
            None => return Ok(()),
        };

        match record_id {
            Some(id) => {
                self.store
                    .update_record(&mut self.domain.records, category, id, values)?;
                self.set_status(format!(
                    "{} updated at {}",
                    category.singular(),
                    Local::now().format("%H:%M:%S")
                ));
            }
            None => {
                self.store
                    .add_record(&mut self.domain.records, category, values)?;
                self.set_status(format!(
                    "{} added at {}",
                    category.singular(),
                    Local::now().format("%H:%M:%S")
                ));
            }
        }
        Ok(())
    }

    fn export_active_category(&mut self) {
        let category = self.home.active_category;
        let schema = category.schema();
        let records = self.domain.records_for(category).to_vec();
        let export_dir = self.store.data_dir().join("exports");

        match export_csv(&export_dir, &schema, &records) {
            Ok(path) => {
                self.set_status(format!(
                    "Exported {} record(s) to {}",
                    records.len(),
                    path.display()
                ));
            }
            Err(e) => self.error = Some(format!("Export failed: {}", e)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Wizard => self.wizard.handle_key_event(key),
            AppMode::Running => {
                // The top modal owns the keyboard
                match self.modals.top().cloned() {
                    Some(Modal::RecordForm { .. }) => self.form_dialog.handle_key_event(key),
                    Some(Modal::ViewRecord { .. }) => self.view_dialog.handle_key_event(key),
                    Some(Modal::DeleteConfirm {
                        category,
                        record_id,
                    }) => {
                        if DeleteDialog::confirms(&key) {
                            Ok(Some(Action::ConfirmDelete {
                                category,
                                record_id,
                            }))
                        } else {
                            self.delete_dialog.handle_key_event(key)
                        }
                    }
                    Some(Modal::Help { .. }) => self.help_dialog.handle_key_event(key),
                    Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
                    None => {
                        // Global keys first, then the table
                        if self.table.search_mode {
                            return self.table.handle_key_event(key);
                        }
                        match self.home.handle_key_event(key)? {
                            Some(action) => Ok(Some(action)),
                            None => self.table.handle_key_event(key),
                        }
                    }
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─── Lifecycle ────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(Action::Tick);
                }
            }
            Action::SplashComplete => {
                self.mode = self.next_mode_after_splash;
            }
            Action::ProfileComplete => {
                if let Some(profile) = self.wizard.profile() {
                    if let Err(e) = self.store.save_profile(&profile) {
                        self.error = Some(format!("Failed to save profile: {}", e));
                    } else {
                        self.set_status(format!("Welcome, {}!", profile.display_name()));
                    }
                    self.domain.profile = Some(profile);
                }
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─── Tabs ─────────────────────────────────────────────────────
            Action::NextTab => {
                self.home.next_tab();
                self.table.clear_search();
                self.refresh();
            }
            Action::PrevTab => {
                self.home.previous_tab();
                self.table.clear_search();
                self.refresh();
            }

            // ─── Search ───────────────────────────────────────────────────
            Action::EnterSearchMode => self.table.enter_search_mode(),
            Action::ExitSearchMode => self.table.exit_search_mode(),
            Action::SearchInput(c) => {
                self.table.search_input(c);
                self.home.pagination.reset();
                self.refresh();
            }
            Action::SearchBackspace => {
                self.table.search_backspace();
                self.home.pagination.reset();
                self.refresh();
            }

            // ─── Row selection ────────────────────────────────────────────
            Action::NextItem => {
                let len = self.page_len();
                self.table.select_next(len);
            }
            Action::PrevItem => self.table.select_prev(),
            Action::FirstItem => self.table.select_first(),
            Action::LastItem => {
                let len = self.page_len();
                self.table.select_last(len);
            }

            // ─── Pagination ───────────────────────────────────────────────
            Action::NextPage => {
                self.home.pagination.next_page();
                self.table.select_first();
            }
            Action::PrevPage => {
                self.home.pagination.prev_page();
                self.table.select_first();
            }
            Action::GoToPage(page) => {
                self.home.pagination.set_page(page);
                self.table.select_first();
            }

            // ─── Record CRUD ──────────────────────────────────────────────
            Action::OpenAddForm => {
                let category = self.home.active_category;
                self.form_dialog.open_add(category.schema());
                self.modals.push(Modal::RecordForm {
                    category,
                    record_id: None,
                });
            }
            Action::OpenEditForm => {
                if let Some((category, record)) = self.edit_target() {
                    self.form_dialog.open_edit(category.schema(), &record);
                    self.modals.push(Modal::RecordForm {
                        category,
                        record_id: Some(record.id),
                    });
                }
            }
            Action::OpenViewDialog => {
                if let Some(record) = self.selected_record() {
                    self.view_dialog.scroll = 0;
                    self.modals.push(Modal::ViewRecord {
                        category: self.home.active_category,
                        record_id: record.id,
                    });
                }
            }
            Action::OpenDeleteConfirm => {
                if let Some(record) = self.selected_record() {
                    self.modals.push(Modal::DeleteConfirm {
                        category: self.home.active_category,
                        record_id: record.id,
                    });
                }
            }
            Action::ConfirmDelete {
                category,
                record_id,
            } => {
                match self
                    .store
                    .delete_record(&mut self.domain.records, category, record_id)
                {
                    Ok(true) => self.set_status(format!("{} deleted", category.singular())),
                    Ok(false) => {}
                    Err(e) => self.error = Some(format!("Delete failed: {}", e)),
                }
                self.modals.pop();
                self.refresh();
            }
            Action::SubmitForm => {
                if let Err(e) = self.save_form() {
                    self.error = Some(format!("Save failed: {}", e));
                }
                self.form_dialog.close();
                self.modals.pop();
                self.refresh();
            }
            Action::ExportCsv => self.export_active_category(),

            // ─── Modals ───────────────────────────────────────────────────
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::CloseModal => {
                if let Some(Modal::RecordForm { .. }) = self.modals.top() {
                    self.form_dialog.close();
                }
                self.modals.pop();
            }

            // ─── Scrolling in overlays ────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                if let Some(Modal::ViewRecord { .. }) = self.modals.top() {
                    return self.view_dialog.update(action);
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area),
            AppMode::Wizard => self.wizard.draw(frame, area),
            AppMode::Running => {
                let ctx = HomeRenderContext {
                    domain: &self.domain,
                    config: &self.config,
                    loading: self.loading,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };
                draw_home_screen(frame, area, &mut self.home, &mut self.table, &ctx)?;

                // Modals render bottom to top
                let modals: Vec<Modal> = self.modals.iter().cloned().collect();
                for modal in modals {
                    match modal {
                        Modal::RecordForm { .. } => self.form_dialog.draw(frame, area)?,
                        Modal::ViewRecord {
                            category,
                            record_id,
                        } => {
                            if let Some(record) = self.domain.record(category, record_id) {
                                let schema = category.schema();
                                self.view_dialog
                                    .draw_with_record(frame, area, &schema, record)?;
                            }
                        }
                        Modal::DeleteConfirm {
                            category,
                            record_id,
                        } => {
                            if let Some(record) = self.domain.record(category, record_id) {
                                let schema = category.schema();
                                self.delete_dialog
                                    .draw_with_record(frame, area, &schema, record)?;
                            }
                        }
                        Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
                        Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::Category;
    use std::collections::BTreeMap;

    fn test_app(tag: &str) -> App {
        let dir = std::env::temp_dir().join(format!("fims-app-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut app = App::default();
        app.store = RecordStore::new(&dir);
        app.domain = DomainState::new();
        app.mode = AppMode::Running;
        app
    }

    fn add_award(app: &mut App, title: &str, year: &str) {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), title.to_string());
        fields.insert("agency".to_string(), "UGC".to_string());
        fields.insert("year".to_string(), year.to_string());
        app.store
            .add_record(&mut app.domain.records, Category::Awards, fields)
            .unwrap();
    }

    #[test]
    fn test_add_form_flow_persists_record() {
        let mut app = test_app("add-flow");
        app.update(Action::OpenAddForm).unwrap();
        assert!(matches!(
            app.modals.top(),
            Some(Modal::RecordForm { record_id: None, .. })
        ));

        app.form_dialog
            .values
            .insert("title".to_string(), "Best Teacher".to_string());
        app.form_dialog
            .values
            .insert("agency".to_string(), "UGC".to_string());
        app.form_dialog
            .values
            .insert("year".to_string(), "2024".to_string());

        app.update(Action::SubmitForm).unwrap();
        assert!(app.modals.is_empty());
        assert_eq!(app.domain.records_for(Category::Awards).len(), 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_delete_flow_removes_record() {
        let mut app = test_app("delete-flow");
        add_award(&mut app, "Best Teacher", "2020");
        app.refresh();

        app.update(Action::OpenDeleteConfirm).unwrap();
        let (category, record_id) = match app.modals.top() {
            Some(Modal::DeleteConfirm {
                category,
                record_id,
            }) => (*category, *record_id),
            other => panic!("expected delete confirm, got {:?}", other),
        };

        app.update(Action::ConfirmDelete {
            category,
            record_id,
        })
        .unwrap();
        assert!(app.modals.is_empty());
        assert!(app.domain.records_for(Category::Awards).is_empty());
    }

    #[test]
    fn test_search_resets_page_and_filters() {
        let mut app = test_app("search");
        for i in 0..25 {
            add_award(&mut app, &format!("Award {}", i + 1), "2020");
        }
        app.refresh();
        app.update(Action::GoToPage(3)).unwrap();
        assert_eq!(app.home.pagination.current_page, 3);

        app.update(Action::EnterSearchMode).unwrap();
        for c in "Award 25".chars() {
            app.update(Action::SearchInput(c)).unwrap();
        }
        assert_eq!(app.home.pagination.current_page, 1);
        assert_eq!(app.page_len(), 1);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut app = test_app("pages");
        for i in 0..15 {
            add_award(&mut app, &format!("Award {}", i + 1), "2021");
        }
        app.refresh();

        app.update(Action::GoToPage(99)).unwrap();
        assert_eq!(app.home.pagination.current_page, 2);
        app.update(Action::NextPage).unwrap();
        assert_eq!(app.home.pagination.current_page, 2);
        app.update(Action::PrevPage).unwrap();
        assert_eq!(app.home.pagination.current_page, 1);
    }

    #[test]
    fn test_close_modal_resets_form() {
        let mut app = test_app("close-form");
        app.update(Action::OpenAddForm).unwrap();
        assert!(app.form_dialog.is_open());
        app.update(Action::CloseModal).unwrap();
        assert!(!app.form_dialog.is_open());
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_edit_from_view_dialog_targets_viewed_record() {
        let mut app = test_app("edit-view");
        add_award(&mut app, "Young Scientist", "2019");
        app.refresh();

        app.update(Action::OpenViewDialog).unwrap();
        app.update(Action::OpenEditForm).unwrap();

        assert!(matches!(
            app.modals.top(),
            Some(Modal::RecordForm {
                record_id: Some(_),
                ..
            })
        ));
        assert_eq!(
            app.form_dialog.values.get("title").map(String::as_str),
            Some("Young Scientist")
        );
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = test_app("quit");
        app.update(Action::OpenQuitDialog).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
    }
}
