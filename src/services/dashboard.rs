//! Dashboard controller.
//!
//! A [`Dashboard`] owns the full lead list, the view state and the modal
//! session of one user. Every user interaction is an [`Action`] handed to
//! [`Dashboard::dispatch`], which returns the notices the user has to see.
//! Mutations are never patched into the local list: a successful create,
//! update or delete is always followed by a full reload.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::lead::{Lead, LeadField, LeadFields};
use crate::domain::types::LeadId;
use crate::domain::view::ViewState;
use crate::dto::dashboard::DashboardPageData;
use crate::forms::lead::LeadForm;
use crate::pipeline::{self, PipelineOutput};
use crate::repository::{LeadReader, LeadStore, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// User interactions understood by the controller.
#[derive(Debug, Clone)]
pub enum Action {
    /// Fetch the full lead list, replacing whatever is loaded.
    Load,
    Search(String),
    FilterStage(String),
    Sort(LeadField),
    GoToPage(usize),
    OpenAdd,
    OpenEdit(LeadId),
    CloseModal,
    Submit(LeadForm),
    /// Ask for confirmation before deleting.
    RequestDelete(LeadId),
    ConfirmDelete,
    CancelDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Open add/edit modal. No target means the modal creates a new lead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalSession {
    pub target: Option<LeadId>,
    pub fields: LeadFields,
}

impl ModalSession {
    pub fn create() -> Self {
        Self {
            target: None,
            fields: LeadFields::blank(),
        }
    }

    pub fn edit(id: LeadId, lead: &Lead) -> Self {
        Self {
            target: Some(id),
            fields: LeadFields::from_lead(lead),
        }
    }

    pub fn is_create(&self) -> bool {
        self.target.is_none()
    }
}

pub struct Dashboard<S: ?Sized = dyn LeadStore> {
    store: Arc<S>,
    leads: Vec<Lead>,
    view: ViewState,
    modal: Option<ModalSession>,
    pending_delete: Option<LeadId>,
    initialized: bool,
}

impl<S> Dashboard<S>
where
    S: LeadReader + LeadWriter + ?Sized,
{
    pub fn new(store: Arc<S>, per_page: usize) -> Self {
        Self {
            store,
            leads: Vec::new(),
            view: ViewState::new(per_page),
            modal: None,
            pending_delete: None,
            initialized: false,
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Notice> {
        match action {
            Action::Load => self.reload(),
            Action::Search(term) => {
                self.view.set_search(term);
                Vec::new()
            }
            Action::FilterStage(stage) => {
                self.view.set_stage_filter(stage);
                Vec::new()
            }
            Action::Sort(column) => {
                self.view.sort_by(column);
                Vec::new()
            }
            Action::GoToPage(page) => {
                let total_pages = self.output().page.total_pages;
                self.view.go_to_page(page, total_pages);
                Vec::new()
            }
            Action::OpenAdd => {
                self.modal = Some(ModalSession::create());
                self.pending_delete = None;
                Vec::new()
            }
            Action::OpenEdit(id) => {
                if let Err(err) = self.open_edit(id) {
                    log::debug!("Ignoring edit request: {err}");
                }
                Vec::new()
            }
            Action::CloseModal => {
                self.modal = None;
                self.pending_delete = None;
                Vec::new()
            }
            Action::Submit(form) => self.submit(form),
            Action::RequestDelete(id) => {
                if self.find_lead(&id).is_some() {
                    self.pending_delete = Some(id);
                } else {
                    log::debug!("Ignoring delete request: {}", ServiceError::NotFoundLocally(id));
                }
                Vec::new()
            }
            Action::ConfirmDelete => self.confirm_delete(),
            Action::CancelDelete => {
                self.pending_delete = None;
                Vec::new()
            }
        }
    }

    /// Runs the view pipeline over the loaded leads.
    pub fn output(&self) -> PipelineOutput<'_> {
        pipeline::run(&self.leads, &self.view)
    }

    /// Everything the renderer needs for one page view.
    pub fn page_data(&self) -> DashboardPageData {
        DashboardPageData::new(
            &self.output(),
            &self.view,
            self.modal.as_ref(),
            self.pending_delete(),
        )
    }

    /// Looks up a loaded lead, comparing identifiers as strings.
    pub fn find_lead(&self, id: &LeadId) -> Option<&Lead> {
        self.leads
            .iter()
            .find(|lead| lead.id().as_ref() == Some(id))
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn modal(&self) -> Option<&ModalSession> {
        self.modal.as_ref()
    }

    /// Lead awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&Lead> {
        self.pending_delete
            .as_ref()
            .and_then(|id| self.find_lead(id))
    }

    /// Whether the initial load has been attempted.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn load(&mut self) -> ServiceResult<()> {
        self.initialized = true;
        let leads = self.store.list_leads().map_err(|err| {
            log::error!("Failed to load leads: {err}");
            err
        })?;
        log::info!("Loaded {} leads", leads.len());
        self.leads = leads;
        Ok(())
    }

    fn reload(&mut self) -> Vec<Notice> {
        match self.load() {
            Ok(()) => Vec::new(),
            Err(err) => vec![Notice::error(format!(
                "Error initializing dashboard: {err}"
            ))],
        }
    }

    fn open_edit(&mut self, id: LeadId) -> ServiceResult<()> {
        let lead = self
            .find_lead(&id)
            .ok_or_else(|| ServiceError::NotFoundLocally(id.clone()))?;
        self.modal = Some(ModalSession::edit(id, lead));
        Ok(())
    }

    fn submit(&mut self, form: LeadForm) -> Vec<Notice> {
        let Some(modal) = self.modal.as_mut() else {
            log::warn!("Lead form submitted without an open modal");
            return vec![Notice::error("The lead form is no longer open.")];
        };
        // Keep what the user typed in case the save fails.
        modal.fields = LeadFields::from(&form);
        let target = modal.target.clone();

        match self.save(target.as_ref(), form) {
            Ok(verb) => {
                self.modal = None;
                let mut notices = vec![Notice::success(format!("Lead {verb} successfully!"))];
                notices.extend(self.reload());
                notices
            }
            Err(ServiceError::Form(message)) => vec![Notice::error(message)],
            Err(err) => vec![Notice::error(format!("Operation failed: {err}"))],
        }
    }

    fn save(&self, target: Option<&LeadId>, form: LeadForm) -> ServiceResult<&'static str> {
        let fields = form.into_fields().map_err(|err| {
            log::error!("Failed to validate form: {err}");
            err
        })?;

        match target {
            None => {
                let id = self.store.create_lead(&fields).map_err(|err| {
                    log::error!("Failed to add a lead: {err}");
                    err
                })?;
                match id {
                    Some(id) => log::info!("Added lead {id}"),
                    None => log::info!("Added lead"),
                }
                Ok("added")
            }
            Some(id) => {
                self.store.update_lead(id, &fields).map_err(|err| {
                    log::error!("Failed to update lead {id}: {err}");
                    err
                })?;
                log::info!("Updated lead {id}");
                Ok("updated")
            }
        }
    }

    fn confirm_delete(&mut self) -> Vec<Notice> {
        let Some(id) = self.pending_delete.take() else {
            return Vec::new();
        };

        if let Err(err) = self.store.delete_lead(&id) {
            log::error!("Failed to delete lead {id}: {err}");
            return vec![Notice::error(format!("Deletion failed: {err}"))];
        }
        log::info!("Deleted lead {id}");

        if self.modal.as_ref().and_then(|modal| modal.target.as_ref()) == Some(&id) {
            self.modal = None;
        }

        let mut notices = vec![Notice::success(format!("Lead {id} deleted successfully."))];
        notices.extend(self.reload());
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::SortDirection;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn lead(id: i64, name: &str, stage: &str) -> Lead {
        Lead::default()
            .with(LeadField::LeadId, id)
            .with(LeadField::ClientName, name)
            .with(LeadField::LeadStage, stage)
    }

    fn sample() -> Vec<Lead> {
        vec![lead(1, "Jane Doe", "New"), lead(2, "Bob", "Won")]
    }

    fn id(raw: &str) -> LeadId {
        LeadId::new(raw).unwrap()
    }

    fn form(name: &str) -> LeadForm {
        LeadForm {
            client_name: name.to_string(),
            ..LeadForm::default()
        }
    }

    fn loaded(mut repo: MockRepository, reloads: usize) -> Dashboard<MockRepository> {
        let leads = sample();
        repo.expect_list_leads()
            .times(1 + reloads)
            .returning(move || Ok(leads.clone()));
        let mut dashboard = Dashboard::new(Arc::new(repo), 10);
        assert!(dashboard.dispatch(Action::Load).is_empty());
        dashboard
    }

    #[test]
    fn load_replaces_the_lead_list() {
        let dashboard = loaded(MockRepository::new(), 0);
        assert!(dashboard.is_initialized());
        assert_eq!(dashboard.leads().len(), 2);
        assert_eq!(dashboard.output().metrics.total, 2);
    }

    #[test]
    fn initial_load_failure_notifies_once() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .times(1)
            .returning(|| Err(RepositoryError::Application("Sheet missing".into())));
        let mut dashboard = Dashboard::new(Arc::new(repo), 10);

        let notices = dashboard.dispatch(Action::Load);
        assert_eq!(
            notices,
            vec![Notice::error("Error initializing dashboard: Sheet missing")]
        );
        assert!(dashboard.is_initialized());
        assert!(dashboard.leads().is_empty());
    }

    #[test]
    fn view_changes_reset_page_but_navigation_does_not() {
        let mut repo = MockRepository::new();
        let leads: Vec<Lead> = (1..=25)
            .map(|i| lead(i, &format!("Client {i}"), "New"))
            .collect();
        repo.expect_list_leads()
            .times(1)
            .returning(move || Ok(leads.clone()));
        let mut dashboard = Dashboard::new(Arc::new(repo), 10);
        dashboard.dispatch(Action::Load);

        dashboard.dispatch(Action::GoToPage(3));
        assert_eq!(dashboard.view().page, 3);
        dashboard.dispatch(Action::GoToPage(9));
        assert_eq!(dashboard.view().page, 3);

        dashboard.dispatch(Action::Search("client".into()));
        assert_eq!(dashboard.view().page, 1);

        dashboard.dispatch(Action::GoToPage(2));
        dashboard.dispatch(Action::FilterStage("New".into()));
        assert_eq!(dashboard.view().page, 1);

        dashboard.dispatch(Action::GoToPage(2));
        dashboard.dispatch(Action::Sort(LeadField::ClientName));
        assert_eq!(dashboard.view().page, 1);
        assert_eq!(dashboard.view().sort_direction, SortDirection::Asc);
        dashboard.dispatch(Action::Sort(LeadField::ClientName));
        assert_eq!(dashboard.view().sort_direction, SortDirection::Desc);
    }

    #[test]
    fn open_edit_prefills_from_loaded_lead() {
        let mut dashboard = loaded(MockRepository::new(), 0);

        dashboard.dispatch(Action::OpenEdit(id("2")));
        let modal = dashboard.modal().unwrap();
        assert_eq!(modal.target, Some(id("2")));
        assert_eq!(modal.fields.get(LeadField::ClientName), "Bob");
        assert_eq!(modal.fields.get(LeadField::Notes), "");
    }

    #[test]
    fn open_edit_for_unknown_lead_is_a_silent_no_op() {
        let mut dashboard = loaded(MockRepository::new(), 0);
        let notices = dashboard.dispatch(Action::OpenEdit(id("99")));
        assert!(notices.is_empty());
        assert!(dashboard.modal().is_none());
    }

    #[test]
    fn open_add_then_close_clears_session() {
        let mut dashboard = loaded(MockRepository::new(), 0);
        dashboard.dispatch(Action::OpenAdd);
        assert!(dashboard.modal().unwrap().is_create());
        dashboard.dispatch(Action::CloseModal);
        assert!(dashboard.modal().is_none());
    }

    #[test]
    fn successful_create_closes_modal_and_reloads() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead()
            .withf(|fields| fields.get(LeadField::ClientName) == "Alice")
            .times(1)
            .returning(|_| Ok(Some(LeadId::new("3").unwrap())));
        let mut dashboard = loaded(repo, 1);

        dashboard.dispatch(Action::OpenAdd);
        let notices = dashboard.dispatch(Action::Submit(form("Alice")));

        assert_eq!(notices, vec![Notice::success("Lead added successfully!")]);
        assert!(dashboard.modal().is_none());
    }

    #[test]
    fn failed_update_keeps_modal_open_and_skips_reload() {
        let mut repo = MockRepository::new();
        repo.expect_update_lead()
            .withf(|id, fields| id.as_str() == "1" && fields.get(LeadField::ClientName) == "Janet")
            .times(1)
            .returning(|_, _| Err(RepositoryError::Transport("timed out".into())));
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::OpenEdit(id("1")));
        let notices = dashboard.dispatch(Action::Submit(form("Janet")));

        assert_eq!(
            notices,
            vec![Notice::error("Operation failed: Connection error: timed out")]
        );
        let modal = dashboard.modal().unwrap();
        assert_eq!(modal.target, Some(id("1")));
        assert_eq!(modal.fields.get(LeadField::ClientName), "Janet");
    }

    #[test]
    fn invalid_form_never_reaches_the_store() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead().never();
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::OpenAdd);
        let notices = dashboard.dispatch(Action::Submit(form("  ")));
        assert_eq!(notices, vec![Notice::error("Client Name is required")]);
        assert!(dashboard.modal().is_some());
    }

    #[test]
    fn submit_without_modal_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead().never();
        let mut dashboard = loaded(repo, 0);

        let notices = dashboard.dispatch(Action::Submit(form("Alice")));
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_error());
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead().never();
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::RequestDelete(id("2")));
        assert_eq!(
            dashboard.pending_delete().map(|l| l.text(LeadField::ClientName)),
            Some("Bob".to_string())
        );
        dashboard.dispatch(Action::CancelDelete);
        assert!(dashboard.pending_delete().is_none());
        assert!(dashboard.dispatch(Action::ConfirmDelete).is_empty());
    }

    #[test]
    fn opening_add_modal_drops_pending_delete() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead().never();
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::RequestDelete(id("2")));
        dashboard.dispatch(Action::OpenAdd);

        assert!(dashboard.pending_delete().is_none());
        assert!(dashboard.page_data().delete_confirmation.is_none());
        assert!(dashboard.dispatch(Action::ConfirmDelete).is_empty());
    }

    #[test]
    fn closing_modal_drops_pending_delete() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead().never();
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::OpenEdit(id("2")));
        dashboard.dispatch(Action::RequestDelete(id("2")));
        dashboard.dispatch(Action::CloseModal);

        assert!(dashboard.modal().is_none());
        assert!(dashboard.pending_delete().is_none());
        assert!(dashboard.dispatch(Action::ConfirmDelete).is_empty());
    }

    #[test]
    fn confirmed_delete_reloads_and_closes_matching_modal() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead()
            .withf(|id| id.as_str() == "2")
            .times(1)
            .returning(|_| Ok(()));
        let mut dashboard = loaded(repo, 1);

        dashboard.dispatch(Action::OpenEdit(id("2")));
        dashboard.dispatch(Action::RequestDelete(id("2")));
        let notices = dashboard.dispatch(Action::ConfirmDelete);

        assert_eq!(notices, vec![Notice::success("Lead 2 deleted successfully.")]);
        assert!(dashboard.modal().is_none());
        assert!(dashboard.pending_delete().is_none());
    }

    #[test]
    fn delete_of_other_lead_leaves_modal_open() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead().times(1).returning(|_| Ok(()));
        let mut dashboard = loaded(repo, 1);

        dashboard.dispatch(Action::OpenEdit(id("1")));
        dashboard.dispatch(Action::RequestDelete(id("2")));
        dashboard.dispatch(Action::ConfirmDelete);
        assert_eq!(dashboard.modal().unwrap().target, Some(id("1")));
    }

    #[test]
    fn failed_delete_skips_reload() {
        let mut repo = MockRepository::new();
        repo.expect_delete_lead()
            .times(1)
            .returning(|_| Err(RepositoryError::Application("Row locked".into())));
        let mut dashboard = loaded(repo, 0);

        dashboard.dispatch(Action::RequestDelete(id("1")));
        let notices = dashboard.dispatch(Action::ConfirmDelete);
        assert_eq!(notices, vec![Notice::error("Deletion failed: Row locked")]);
        assert_eq!(dashboard.leads().len(), 2);
    }

    #[test]
    fn reload_failure_after_mutation_is_reported_too() {
        let mut repo = MockRepository::new();
        let mut calls = 0;
        repo.expect_list_leads().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(sample())
            } else {
                Err(RepositoryError::Transport("HTTP error, status: 502 Bad Gateway".into()))
            }
        });
        repo.expect_delete_lead().times(1).returning(|_| Ok(()));
        let mut dashboard = Dashboard::new(Arc::new(repo), 10);
        dashboard.dispatch(Action::Load);

        dashboard.dispatch(Action::RequestDelete(id("1")));
        let notices = dashboard.dispatch(Action::ConfirmDelete);
        assert_eq!(notices.len(), 2);
        assert!(!notices[0].is_error());
        assert!(notices[1].is_error());
        // Last known list stays on screen.
        assert_eq!(dashboard.leads().len(), 2);
    }
}
