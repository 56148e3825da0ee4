use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::lead::LeadField;
use crate::routes::{
    alert_level_to_str, dispatch_and_redirect, load_page, notice_level_to_str, render_template,
};
use crate::services::dashboard::Action;
use crate::services::registry::DashboardRegistry;

#[derive(Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub stage: String,
}

#[get("/")]
pub async fn show_dashboard(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (notices, page) = match load_page(registry, &session).await {
        Ok(result) => result,
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .chain(
            notices
                .into_iter()
                .map(|n| (n.message, notice_level_to_str(n.level))),
        )
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("dashboard", &page);

    render_template(&tera, "dashboard/index.html", &context)
}

#[post("/reload")]
pub async fn reload(registry: web::Data<DashboardRegistry>, session: Session) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::Load]).await
}

#[post("/filter")]
pub async fn filter(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    web::Form(form): web::Form<FilterForm>,
) -> impl Responder {
    let actions = vec![Action::Search(form.search), Action::FilterStage(form.stage)];
    dispatch_and_redirect(registry, session, actions).await
}

#[post("/sort/{column}")]
pub async fn sort(
    column: web::Path<String>,
    registry: web::Data<DashboardRegistry>,
    session: Session,
) -> impl Responder {
    let Some(column) = LeadField::from_slug(&column) else {
        log::debug!("Unknown sort column '{column}'");
        return HttpResponse::NotFound().finish();
    };
    dispatch_and_redirect(registry, session, vec![Action::Sort(column)]).await
}

#[post("/page/{page}")]
pub async fn go_to_page(
    page: web::Path<usize>,
    registry: web::Data<DashboardRegistry>,
    session: Session,
) -> impl Responder {
    dispatch_and_redirect(registry, session, vec![Action::GoToPage(page.into_inner())]).await
}
