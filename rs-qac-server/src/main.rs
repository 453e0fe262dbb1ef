mod routes;

use std::io;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::{error, info};

use rs_qac_core::model::language_model::LanguageModel;
use rs_qac_core::model::request::{Limits, DEFAULT_MAX_WORK};
use routes::SharedData;

/// Query autocompletion service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct ServerConfig {
	/// Address to bind.
	#[arg(long, env = "QAC_HOST", default_value = "127.0.0.1")]
	host: String,

	#[arg(long, env = "QAC_PORT", default_value_t = 8091)]
	port: u16,

	/// Directory holding the four model tables.
	#[arg(long, env = "QAC_MODEL_DIR", default_value = "./data/autocomplete_query")]
	model_dir: PathBuf,

	/// Largest `branches x levels` a single request may ask for.
	#[arg(long, env = "QAC_MAX_WORK", default_value_t = DEFAULT_MAX_WORK)]
	max_work: usize,
}

/// Main entry point for the server.
///
/// Loads the persisted model once, shares it read-only between workers
/// and starts an Actix-web HTTP server. A missing or inconsistent model
/// aborts startup before binding.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let config = ServerConfig::parse();

	let model = LanguageModel::load(&config.model_dir).map_err(|e| {
		error!("Cannot load model from {}: {e}", config.model_dir.display());
		io::Error::other(e)
	})?;

	let shared_data = web::Data::new(SharedData { model, limits: Limits { max_work: config.max_work } });

	info!("Listening on {}:{} (max work {})", config.host, config.port, config.max_work);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(Logger::default())
			.app_data(shared_data.clone())
			.configure(routes::configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
