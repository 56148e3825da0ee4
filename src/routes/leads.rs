use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};

use crate::domain::types::LeadId;
use crate::forms::lead::{LeadForm, LeadIdForm};
use crate::routes::{dispatch_and_redirect, redirect};
use crate::services::dashboard::Action;
use crate::services::registry::DashboardRegistry;

fn parse_id(raw: &str) -> Option<LeadId> {
    LeadId::new(raw)
        .map_err(|err| log::debug!("Rejected lead id '{raw}': {err}"))
        .ok()
}

#[post("/leads/new")]
pub async fn open_add(registry: web::Data<DashboardRegistry>, session: Session) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::OpenAdd]).await
}

#[post("/leads/edit")]
pub async fn open_edit(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    web::Form(form): web::Form<LeadIdForm>,
) -> HttpResponse {
    match parse_id(&form.id) {
        Some(id) => dispatch_and_redirect(registry, session, vec![Action::OpenEdit(id)]).await,
        None => redirect("/"),
    }
}

#[post("/leads/close")]
pub async fn close_modal(
    registry: web::Data<DashboardRegistry>,
    session: Session,
) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::CloseModal]).await
}

#[post("/leads/save")]
pub async fn save_lead(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    web::Form(form): web::Form<LeadForm>,
) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::Submit(form)]).await
}

#[post("/leads/delete")]
pub async fn request_delete(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    web::Form(form): web::Form<LeadIdForm>,
) -> HttpResponse {
    match parse_id(&form.id) {
        Some(id) => {
            dispatch_and_redirect(registry, session, vec![Action::RequestDelete(id)]).await
        }
        None => redirect("/"),
    }
}

#[post("/leads/delete/confirm")]
pub async fn confirm_delete(
    registry: web::Data<DashboardRegistry>,
    session: Session,
) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::ConfirmDelete]).await
}

#[post("/leads/delete/cancel")]
pub async fn cancel_delete(
    registry: web::Data<DashboardRegistry>,
    session: Session,
) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::CancelDelete]).await
}
