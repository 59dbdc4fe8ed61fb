use std::sync::Arc;

use rocket::fs::{relative, FileServer};
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::State;
use serde_derive::Serialize;
use straits_covered::error::{AppError, AppResult};
use straits_covered::render::page::PageRenderer;
use straits_covered::util::{settings::Settings, DateTimeUtils};
use straits_covered::App;

#[macro_use]
extern crate rocket;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Cross-Origin-Resource-Sharing Fairing",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

type Reply = (Status, (ContentType, String));

fn status_of(code: u16) -> Status {
    Status::from_code(code).unwrap_or(Status::InternalServerError)
}

fn json_reply<T: serde::Serialize>(result: AppResult<T>) -> Reply {
    let outcome = result.and_then(|value| Ok(serde_json::to_string(&value)?));

    match outcome {
        Ok(body) => (Status::Ok, (ContentType::JSON, body)),
        Err(err) => (
            status_of(err.http_status()),
            (
                ContentType::JSON,
                serde_json::json!({ "error": err.to_string() }).to_string(),
            ),
        ),
    }
}

// Sheet fetches block on curl; keep them off the async workers.
async fn blocking<T, F>(app: &State<Arc<App>>, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&App) -> AppResult<T> + Send + 'static,
{
    let app = Arc::clone(app.inner());

    match tokio::task::spawn_blocking(move || f(&app)).await {
        Ok(result) => result,
        Err(err) => Err(AppError::Config(format!("worker failed: {}", err))),
    }
}

#[options("/<_..>")]
fn all_options() {
    /* Intentionally left empty */
}

#[get("/?<date>")]
async fn index(date: Option<String>, app: &State<Arc<App>>) -> Reply {
    let app = Arc::clone(app.inner());

    let page = tokio::task::spawn_blocking(move || PageRenderer::render(&app, date.as_deref())).await;

    match page {
        Ok(page) => (status_of(page.status), (ContentType::HTML, page.html)),
        Err(_) => (
            Status::InternalServerError,
            (ContentType::Text, "rendering failed".to_string()),
        ),
    }
}

#[get("/api/day/<date>")]
async fn day(date: &str, app: &State<Arc<App>>) -> Reply {
    let date = date.to_string();

    json_reply(
        blocking(app, move |app| {
            let date = DateTimeUtils::parse_date(&date)?;
            app.day_view(date)
        })
        .await,
    )
}

#[get("/api/dates")]
fn dates(app: &State<Arc<App>>) -> Reply {
    let labels = app.available_dates().map(|dates| {
        dates
            .into_iter()
            .map(DateTimeUtils::format_date)
            .collect::<Vec<String>>()
    });

    json_reply(labels)
}

#[derive(Serialize)]
struct Invalidated {
    removed: usize,
}

#[post("/api/cache/invalidate?<date>")]
fn invalidate(date: Option<&str>, app: &State<Arc<App>>) -> Result<Json<Invalidated>, Reply> {
    let date = match date {
        Some(value) => Some(DateTimeUtils::parse_date(value).map_err(|err| json_reply::<()>(Err(err)))?),
        None => None,
    };

    Ok(Json(Invalidated {
        removed: app.invalidate_cache(date),
    }))
}

#[launch]
fn rocket() -> _ {
    let app = Settings::load().and_then(App::from_settings);

    let app = match app {
        Ok(app) => Arc::new(app),
        Err(err) => {
            eprintln!("Unable to start: {}", err);
            std::process::exit(1);
        }
    };

    rocket::build()
        .attach(Cors)
        .manage(app)
        .mount("/", routes![index, day, dates, invalidate, all_options])
        .mount("/static", FileServer::from(relative!("static")))
}
