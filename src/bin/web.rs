//! Single binary web server: JSON API over the scheduling library.
//! Run with: cargo run --bin web
//! Binds 0.0.0.0:8080 by default so the app works behind DNS on a small VPS;
//! override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8081).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tennis_mixer_web::{
    by_standings, complete_event, generate_event_round, report_match_result, set_round_result,
    start_event, submit_round_results, Event, EventId, EventKind, Gender, MatchScore, PlayerId,
    PlayerStats, Team,
};
use uuid::Uuid;

/// Per-event entry: event data + last activity time (for auto-cleanup).
struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// In-memory state: many events by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

/// Inactivity threshold: events not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateEventBody {
    #[serde(default = "default_event_name")]
    name: String,
    #[serde(default)]
    kind: EventKind,
    #[serde(default = "default_courts")]
    courts: u32,
}

fn default_event_name() -> String {
    "Club night".to_string()
}

fn default_courts() -> u32 {
    2
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    gender: Option<Gender>,
}

#[derive(Deserialize)]
struct CourtsBody {
    courts: u32,
}

#[derive(Deserialize)]
struct KindBody {
    kind: EventKind,
}

#[derive(Deserialize)]
struct SeedBody {
    seed: u32,
}

#[derive(Deserialize)]
struct RoundResultBody {
    court: u32,
    winner: Team,
    #[serde(default)]
    games_won: u32,
    #[serde(default)]
    games_lost: u32,
}

#[derive(Deserialize)]
struct BracketResultBody {
    match_number: u32,
    winner: Team,
    #[serde(default)]
    games_won: u32,
    #[serde(default)]
    games_lost: u32,
}

#[derive(serde::Serialize)]
struct StandingRow {
    id: PlayerId,
    name: String,
    gender: Option<Gender>,
    stats: PlayerStats,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and player id (e.g. /api/events/{id}/players/{player_id})
#[derive(Deserialize)]
struct EventPlayerPath {
    id: EventId,
    player_id: Uuid,
}

/// Lock the store, look up the event, refresh its activity stamp, and hand it
/// to `f`. Unknown ids get a 404; a poisoned lock gets a 500.
fn with_event<F>(state: &AppState, id: EventId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Event) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.event)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    }
}

/// Standard mutation response: the whole event on success, `400 {"error"}` otherwise.
fn updated<E: std::fmt::Display>(event: &Event, outcome: Result<(), E>) -> HttpResponse {
    match outcome {
        Ok(()) => HttpResponse::Ok().json(event),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-mixer-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Option<Json<CreateEventBody>>) -> HttpResponse {
    let (name, kind, courts) = match body {
        Some(b) => (b.name.clone(), b.kind, b.courts),
        None => (default_event_name(), EventKind::default(), default_courts()),
    };
    let event = Event::new(name, kind, courts.max(1));
    let id = event.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(EventEntry {
        event,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.event)
}

/// Get an event by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Current standings: players with stats, wins then game differential.
#[get("/api/events/{id}/standings")]
async fn api_standings(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let rows: Vec<StandingRow> = by_standings(&t.players)
            .into_iter()
            .map(|p| StandingRow {
                id: p.id,
                name: p.name.clone(),
                gender: p.gender,
                stats: p.stats(),
            })
            .collect();
        HttpResponse::Ok().json(rows)
    })
}

/// Add a player (Setup, or between mixer rounds).
#[post("/api/events/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<EventPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.add_player(body.name.trim(), body.gender);
        updated(t, outcome)
    })
}

/// Import roster rows from a CSV body: `name[,gender]` per line, no header
/// required (a leading "name" header row is skipped). Gender accepts
/// m/male or f/female; anything else is left untagged.
#[post("/api/events/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<EventPath>, body: String) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        for record in rdr.records() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    return HttpResponse::BadRequest()
                        .json(serde_json::json!({ "error": format!("Bad CSV: {}", e) }))
                }
            };
            let name = record.get(0).unwrap_or("").trim();
            if name.is_empty() || name.eq_ignore_ascii_case("name") {
                continue;
            }
            let gender = record.get(1).and_then(parse_gender);
            if let Err(e) = t.add_player(name, gender) {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": e.to_string() }));
            }
        }
        HttpResponse::Ok().json(&*t)
    })
}

/// Remove a player by id (event must be in Setup).
#[delete("/api/events/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<EventPlayerPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.remove_player(path.player_id);
        updated(t, outcome)
    })
}

/// Set a player's seed rank for the draw (Setup only).
#[put("/api/events/{id}/players/{player_id}/seed")]
async fn api_set_player_seed(
    state: AppState,
    path: Path<EventPlayerPath>,
    body: Json<SeedBody>,
) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.set_player_seed(path.player_id, body.seed);
        updated(t, outcome)
    })
}

/// Deal a random seed order (Setup only).
#[post("/api/events/{id}/players/shuffle")]
async fn api_shuffle_seeds(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.shuffle_seeds();
        updated(t, outcome)
    })
}

/// Update the number of courts (Setup only).
#[put("/api/events/{id}/courts")]
async fn api_set_courts(
    state: AppState,
    path: Path<EventPath>,
    body: Json<CourtsBody>,
) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.set_courts(body.courts);
        updated(t, outcome)
    })
}

/// Change the event kind, mixer format or elimination (Setup only).
#[put("/api/events/{id}/kind")]
async fn api_set_kind(state: AppState, path: Path<EventPath>, body: Json<KindBody>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.set_kind(body.kind);
        updated(t, outcome)
    })
}

/// Start the event (Setup -> Rounds for mixers, Setup -> Knockout for elimination).
#[post("/api/events/{id}/start")]
async fn api_start_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = start_event(t);
        updated(t, outcome)
    })
}

/// Generate the next mixer round from current standings.
#[post("/api/events/{id}/rounds/generate")]
async fn api_generate_round(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = generate_event_round(t);
        updated(t, outcome)
    })
}

/// Stage the score for one court of the current round.
#[put("/api/events/{id}/rounds/result")]
async fn api_set_round_result(
    state: AppState,
    path: Path<EventPath>,
    body: Json<RoundResultBody>,
) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let score = MatchScore {
            winner: body.winner,
            games_won: body.games_won,
            games_lost: body.games_lost,
        };
        let outcome = set_round_result(t, body.court, score);
        updated(t, outcome)
    })
}

/// Submit the current round's staged results.
#[post("/api/events/{id}/rounds/submit")]
async fn api_submit_round(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = submit_round_results(t);
        updated(t, outcome)
    })
}

/// Report a completed bracket match; winners advance automatically.
#[put("/api/events/{id}/bracket/result")]
async fn api_report_bracket_result(
    state: AppState,
    path: Path<EventPath>,
    body: Json<BracketResultBody>,
) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let score = MatchScore {
            winner: body.winner,
            games_won: body.games_won,
            games_lost: body.games_lost,
        };
        let outcome = report_match_result(t, body.match_number, score);
        updated(t, outcome)
    })
}

/// Close a mixer event.
#[post("/api/events/{id}/complete")]
async fn api_complete_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = complete_event(t);
        updated(t, outcome)
    })
}

/// Restart the event: back to Setup with the same roster names.
#[post("/api/events/{id}/restart")]
async fn api_restart_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    with_event(&state, path.id, |t| {
        let outcome = t.restart();
        updated(t, outcome)
    })
}

fn parse_gender(s: &str) -> Option<Gender> {
    match s.trim().to_ascii_lowercase().as_str() {
        "m" | "male" | "man" => Some(Gender::Male),
        "f" | "female" | "woman" => Some(Gender::Female),
        _ => None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<EventId, EventEntry>::new()));

    // Background task: every 30 minutes, remove events inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive event(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_standings)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_player_seed)
            .service(api_shuffle_seeds)
            .service(api_set_courts)
            .service(api_set_kind)
            .service(api_start_event)
            .service(api_generate_round)
            .service(api_set_round_result)
            .service(api_submit_round)
            .service(api_report_bracket_result)
            .service(api_complete_event)
            .service(api_restart_event)
    })
    .bind(bind)?
    .run()
    .await
}
