#![warn(clippy::pedantic)]

mod config;
mod error;
mod extract;
mod model;
mod route;
mod session;
mod store;
mod trace;
mod view;

use std::sync::Arc;

use argon2::Argon2;
use axum::{extract::Request, response::Redirect, routing::get, Router, ServiceExt};
use tower::Layer;
use tower_http::{normalize_path::NormalizePathLayer, trace::TraceLayer};

use crate::store::{JokeStore, Jokes, MemoryStore, PgStore, SessionStore, Sessions, UserStore, Users};

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The shared application state.
///
/// Handlers only see the stores through their traits, so the same routes
/// run against Postgres or the in-memory store.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub jokes: Jokes,
	pub sessions: Sessions,
	pub users: Users,
	pub hasher: Argon2<'static>,
}

impl State {
	/// Uses `store` for jokes, sessions and users alike.
	pub fn new<T>(store: Arc<T>) -> Self
	where
		T: JokeStore + SessionStore + UserStore + 'static,
	{
		Self {
			jokes: store.clone(),
			sessions: store.clone(),
			users: store,
			hasher: Argon2::default(),
		}
	}
}

pub fn app(state: State) -> Router {
	Router::new()
		.route("/", get(|| async { Redirect::to("/jokes") }))
		.merge(route::auth::routes())
		.nest("/jokes", route::jokes::routes().merge(route::joke::routes()))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();

	let config = config::Config::from_env()?;
	let _guard = trace::init_tracing_subscriber(config.otlp_endpoint.as_deref())?;

	let state = if let Some(url) = &config.database_url {
		let store = PgStore::new(Database::connect(url).await?);

		store.migrate().await?;
		State::new(Arc::new(store))
	} else {
		tracing::warn!("DATABASE_URL is not set, jokes are kept in memory");
		State::new(Arc::new(MemoryStore::new()))
	};

	let app = NormalizePathLayer::trim_trailing_slash().layer(app(state));
	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!("listening on {}", listener.local_addr()?);

	axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

	Ok(())
}
