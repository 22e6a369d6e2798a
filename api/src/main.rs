//! An api for querying arrival delays and cancellations in on-time flight data.

#[macro_use]
extern crate rocket;

mod helpers;
mod responses;

use anyhow::anyhow;
use clap::Parser;
use helpers::{ApiErrorBody, ApiErrorKind, ApiResult, CorsFairing, RequestTimingFairing};
use ontime_common::query::{FlightDelay, parse_group_keys};
use ontime_common::{DEFAULT_BUCKET_WIDTH, FlightStore, QueryConfig, dataset};
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket, State};
use rocket_prometheus::PrometheusMetrics;
use serde_json::{Value, json};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The JSON file holding the flight records to serve
    #[arg(
        short,
        long,
        default_value = "data/ontime_data_test.json",
        env = "ONTIME_DATA"
    )]
    data: PathBuf,

    /// Width of each distance bucket in miles
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_WIDTH, env = "ONTIME_BUCKET_WIDTH")]
    bucket_width: NonZeroU32,
}

/// Every flight in the dataset.
#[get("/")]
fn list_flights(store: &State<FlightStore>) -> Json<Value> {
    Json(json!({ "flights_data": store.records() }))
}

/// Arrival delay summary for flights from an origin, optionally grouped.
#[get("/arrival_delay/origin/<origin>?<groupby>")]
fn arrival_delay(
    origin: &str,
    groupby: Vec<String>,
    store: &State<FlightStore>,
) -> ApiResult<Value> {
    let keys = parse_group_keys(&groupby).map_err(helpers::query_error)?;
    let report = store
        .arrival_delay(origin, &keys)
        .map_err(helpers::query_error)?;
    Ok(Json(responses::delay_body(&report)))
}

/// How each flight from an origin arrived.
#[get("/arrival_delay/origin/<origin>/flights")]
fn arrival_delay_flights(
    origin: &str,
    store: &State<FlightStore>,
) -> ApiResult<Vec<FlightDelay>> {
    store
        .delay_statuses(origin)
        .map(Json)
        .map_err(helpers::query_error)
}

/// Cancellation rate for flights from an origin, optionally grouped.
#[get("/cancellation_pct/origin/<origin>?<groupby>")]
fn cancellation_pct(
    origin: &str,
    groupby: Vec<String>,
    store: &State<FlightStore>,
) -> ApiResult<Value> {
    let keys = parse_group_keys(&groupby).map_err(helpers::query_error)?;
    let report = store
        .cancellation(origin, &keys)
        .map_err(helpers::query_error)?;
    Ok(Json(responses::cancellation_body(&report)))
}

#[catch(400)]
fn bad_request(_req: &Request) -> Json<ApiErrorBody> {
    Json(ApiErrorBody::new(ApiErrorKind::BadRequest, "Bad request"))
}

#[catch(404)]
fn not_found(_req: &Request) -> Json<ApiErrorBody> {
    Json(ApiErrorBody::new(
        ApiErrorKind::NotFound,
        "The requested resource could not be found.",
    ))
}

fn build_rocket(store: FlightStore) -> Rocket<Build> {
    let prometheus = PrometheusMetrics::new();
    rocket::build()
        .attach(RequestTimingFairing)
        .attach(CorsFairing)
        .attach(prometheus.clone())
        .manage(store)
        .mount(
            "/",
            routes![
                list_flights,
                arrival_delay,
                arrival_delay_flights,
                cancellation_pct
            ],
        )
        .mount("/metrics", prometheus)
        .register("/", catchers![bad_request, not_found])
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let records = dataset::load_dataset(&cli.data)?;
    let store = FlightStore::new(records, QueryConfig::new(cli.bucket_width));

    build_rocket(store)
        .launch()
        .await
        .map_err(|e| anyhow!("Server failed: {e}"))?;
    Ok(())
}
