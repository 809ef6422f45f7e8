mod charts;
mod page;

use std::{
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use actix_web::{
    get, http::header::ContentType, middleware::Logger, web, App, HttpResponse, HttpServer,
};
use clap::Parser;
use log::info;
use serde::Deserialize;
use watch_wrapped::{
    filter::{FilterState, RankingMode, YearSelection},
    loader::{HistoryCache, DEFAULT_HISTORY_PATH},
    report::{build_report, Report},
};

#[derive(Parser)]
struct Opts {
    #[arg(default_value = DEFAULT_HISTORY_PATH)]
    history_file: PathBuf,
    #[arg(default_value = "19406")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let data = web::Data::new(Data {
        history_file: opts.history_file,
        cache: Mutex::new(HistoryCache::new()),
    });
    // Parse once up front so the first page view is fast.
    data.report(FilterState::default());

    info!("Serving on http://127.0.0.1:{}/", opts.port);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(index)
            .service(api_report)
            .wrap(Logger::default())
    })
    .bind(("127.0.0.1", opts.port))?
    .run()
    .await?)
}

struct Data {
    history_file: PathBuf,
    cache: Mutex<HistoryCache>,
}

impl Data {
    fn report(&self, filter: FilterState) -> Report {
        let history = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_load(&self.history_file);
        build_report(&self.history_file, history.as_deref(), filter)
    }
}

#[derive(Deserialize)]
struct FilterQuery {
    #[serde(default)]
    year: YearSelection,
    #[serde(default)]
    mode: RankingMode,
}

impl From<FilterQuery> for FilterState {
    fn from(query: FilterQuery) -> Self {
        FilterState::builder()
            .year(query.year)
            .mode(query.mode)
            .build()
    }
}

#[get("/")]
async fn index(web_data: web::Data<Data>, query: web::Query<FilterQuery>) -> HttpResponse {
    let report = web_data.report(query.into_inner().into());
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::render_page(&report))
}

#[get("/api/report")]
async fn api_report(web_data: web::Data<Data>, query: web::Query<FilterQuery>) -> HttpResponse {
    HttpResponse::Ok().json(web_data.report(query.into_inner().into()))
}
