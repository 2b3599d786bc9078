//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! The scoreboard is stored as JSON files under DATA_DIR (default `data`).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use scoreboard_web::{
    export::history_csv, FileStore, LedgerError, Player, RegisteredPlayer, ScoreHistoryEntry,
    ScoreLedger,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The one scoreboard this server owns, persisted to DATA_DIR after every change.
type AppState = Data<RwLock<ScoreLedger<FileStore>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Snapshot sent to the page after every call: the three collections plus what the UI
/// needs to enable buttons.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerView<'a> {
    players: &'a [Player],
    history: &'a [ScoreHistoryEntry],
    registered_players: &'a [RegisteredPlayer],
    undoable_history_ids: Vec<&'a str>,
    can_add_player: bool,
    can_remove_player: bool,
    name_suggestions: Vec<&'a str>,
}

impl<'a> LedgerView<'a> {
    fn of(ledger: &'a ScoreLedger<FileStore>) -> Self {
        Self {
            players: ledger.players(),
            history: ledger.history(),
            registered_players: ledger.registered_players(),
            undoable_history_ids: ledger.undoable_history_ids(),
            can_add_player: ledger.can_add_player(),
            can_remove_player: ledger.can_remove_player(),
            name_suggestions: ledger.unseated_registered_names(),
        }
    }
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct AddScoreBody {
    delta: i32,
}

/// Path segment: any entity id (e.g. /api/players/{id}/name)
#[derive(Deserialize)]
struct IdPath {
    id: String,
}

fn snapshot(ledger: &ScoreLedger<FileStore>) -> HttpResponse {
    HttpResponse::Ok().json(LedgerView::of(ledger))
}

/// User-facing failures become 400 with a notice; silent no-ops return the unchanged snapshot.
fn respond<T>(ledger: &ScoreLedger<FileStore>, result: Result<T, LedgerError>) -> HttpResponse {
    match result {
        Ok(_) => snapshot(ledger),
        Err(e) => match e.notice() {
            Some(notice) => HttpResponse::BadRequest().json(serde_json::json!({ "error": notice })),
            None => snapshot(ledger),
        },
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "scoreboard-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Current snapshot.
#[get("/api/ledger")]
async fn api_get_ledger(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    snapshot(&g)
}

/// Seat another player (up to the table limit).
#[post("/api/players")]
async fn api_add_player(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.add_player();
    respond(&g, result)
}

/// Remove the last-seated player and their history.
#[delete("/api/players/last")]
async fn api_remove_last_player(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.remove_last_player();
    respond(&g, result)
}

/// Rename a player; history entries follow the new name.
#[put("/api/players/{id}/name")]
async fn api_rename_player(
    state: AppState,
    path: Path<IdPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.update_player_name(&path.id, &body.name);
    respond(&g, result)
}

/// Add a (signed) delta to a player's score.
#[post("/api/players/{id}/scores")]
async fn api_add_score(
    state: AppState,
    path: Path<IdPath>,
    body: Json<AddScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.add_score(&path.id, body.delta);
    respond(&g, result)
}

/// Undo one history entry (must be the newest of its player).
#[post("/api/history/{id}/undo")]
async fn api_undo_history(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.undo_history(&path.id);
    respond(&g, result)
}

/// History grouped by turn, latest turn first.
#[get("/api/history/turns")]
async fn api_history_turns(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.history_by_turn())
}

/// Download the history as CSV.
#[get("/api/history/export.csv")]
async fn api_export_history(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match history_csv(g.history()) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"score-history.csv\"",
            ))
            .body(bytes),
        Err(e) => {
            log::error!("History export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

/// Default four seats, empty history. Registered names are kept.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.reset_all();
    snapshot(&g)
}

/// Register a reusable name (rejected if blank or already registered).
#[post("/api/registered-players")]
async fn api_add_registered_player(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = match g.check_registered_name(&body.name, None) {
        Ok(name) => g.add_registered_player(&name).map(|_| ()),
        Err(e) => Err(e),
    };
    respond(&g, result)
}

/// Rename a registered name (rejected if blank or taken by another entry).
#[put("/api/registered-players/{id}")]
async fn api_update_registered_player(
    state: AppState,
    path: Path<IdPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = match g.check_registered_name(&body.name, Some(path.id.as_str())) {
        Ok(name) => g.update_registered_player(&path.id, &name),
        Err(e) => Err(e),
    };
    respond(&g, result)
}

#[delete("/api/registered-players/{id}")]
async fn api_delete_registered_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let result = g.delete_registered_player(&path.id);
    respond(&g, result)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());

    let store = FileStore::open(&data_dir).map_err(|e| {
        log::error!("Cannot open data directory {}: {}", data_dir, e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    log::info!("Using data directory {}", store.dir().display());
    let state = Data::new(RwLock::new(ScoreLedger::open(store)));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_ledger)
            .service(api_add_player)
            .service(api_remove_last_player)
            .service(api_rename_player)
            .service(api_add_score)
            .service(api_history_turns)
            .service(api_export_history)
            .service(api_undo_history)
            .service(api_reset)
            .service(api_add_registered_player)
            .service(api_update_registered_player)
            .service(api_delete_registered_player)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
