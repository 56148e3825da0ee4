//! HTTP handlers translating browser events into dashboard actions.

use actix_session::Session;
use actix_web::{HttpResponse, http::header, web};
use actix_web_flash_messages::{FlashMessage, Level};
use tera::{Context, Tera};
use uuid::Uuid;

use crate::dto::dashboard::DashboardPageData;
use crate::services::dashboard::{Action, Dashboard, Notice, NoticeLevel};
use crate::services::registry::DashboardRegistry;
use crate::services::{ServiceError, ServiceResult};

pub mod dashboard;
pub mod leads;

/// Session cookie entry holding the browser's dashboard id.
pub const SESSION_KEY: &str = "dashboard_id";

/// Maps flash message levels to Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn notice_level_to_str(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Error => "danger",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Id of the browser's dashboard, minted on first visit.
pub fn session_id(session: &Session) -> actix_web::Result<Uuid> {
    if let Some(id) = session.get::<Uuid>(SESSION_KEY)? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(SESSION_KEY, id)?;
    Ok(id)
}

pub fn flash_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Success => FlashMessage::success(notice.message.clone()).send(),
            NoticeLevel::Error => FlashMessage::error(notice.message.clone()).send(),
        }
    }
}

/// Runs `f` against the session's dashboard on the blocking pool.
///
/// A dashboard that was never loaded is loaded first; the notices of that
/// load are returned alongside the result of `f`.
async fn with_dashboard<T, F>(
    registry: web::Data<DashboardRegistry>,
    session: &Session,
    f: F,
) -> actix_web::Result<(Vec<Notice>, T)>
where
    F: FnOnce(&mut Dashboard) -> T + Send + 'static,
    T: Send + 'static,
{
    let id = session_id(session)?;

    let result = web::block(move || -> ServiceResult<(Vec<Notice>, T)> {
        let dashboard = registry.get_or_create(id)?;
        let mut dashboard = dashboard
            .lock()
            .map_err(|err| ServiceError::Internal(err.to_string()))?;

        let notices = if dashboard.is_initialized() {
            Vec::new()
        } else {
            dashboard.dispatch(Action::Load)
        };
        Ok((notices, f(&mut *dashboard)))
    })
    .await?;

    result.map_err(|err| {
        log::error!("Failed to access dashboard: {err}");
        actix_web::error::ErrorInternalServerError(err)
    })
}

/// Notices raised while preparing the page, and the page itself.
pub async fn load_page(
    registry: web::Data<DashboardRegistry>,
    session: &Session,
) -> actix_web::Result<(Vec<Notice>, DashboardPageData)> {
    with_dashboard(registry, session, |dashboard| dashboard.page_data()).await
}

/// Dispatches `actions` in order, flashes the resulting notices and sends
/// the browser back to the dashboard.
pub async fn dispatch_and_redirect(
    registry: web::Data<DashboardRegistry>,
    session: Session,
    actions: Vec<Action>,
) -> HttpResponse {
    let result = with_dashboard(registry, &session, move |dashboard| {
        actions
            .into_iter()
            .flat_map(|action| dashboard.dispatch(action))
            .collect::<Vec<_>>()
    })
    .await;

    match result {
        Ok((mut notices, rest)) => {
            notices.extend(rest);
            flash_notices(&notices);
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to dispatch dashboard action: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
