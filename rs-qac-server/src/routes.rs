use actix_web::{get, post, web, HttpResponse, Responder};
use log::debug;
use serde::{Deserialize, Serialize};

use rs_qac_core::model::expander::QueryExpander;
use rs_qac_core::model::language_model::LanguageModel;
use rs_qac_core::model::request::{Limits, SuggestRequest};

/// Read-only state shared by every worker.
pub struct SharedData {
	pub model: LanguageModel,
	pub limits: Limits,
}

/// Body of a rejected request.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
	pub error: String,
}

/// HTTP POST endpoint `/query_autocomplete/`
///
/// Expands the query into a JSON list of suggestions, shallowest first.
/// Requests asking for more than `branches x levels` allows are answered with 422.
#[post("/query_autocomplete/")]
async fn post_query_autocomplete(data: web::Data<SharedData>, request: web::Json<SuggestRequest>) -> impl Responder {
	debug!("Query '{}' (branches {:?}, levels {:?})", request.query, request.branches, request.levels);

	match QueryExpander::new(&data.model).answer(&request, &data.limits) {
		Ok(suggestions) => HttpResponse::Ok().json(suggestions),
		Err(e) => HttpResponse::UnprocessableEntity().json(ErrorBody { error: e.to_string() }),
	}
}

#[get("/v1/model")]
async fn get_model(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(data.model.summary())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(post_query_autocomplete).service(get_model);
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::{test, App};
	use rs_qac_core::model::language_model::ModelSummary;
	use rs_qac_core::model::ngram_model::NGramTable;

	type Entries = Vec<(Vec<&'static str>, Vec<(&'static str, u32)>)>;

	fn shared_data(max_work: usize) -> web::Data<SharedData> {
		with_bigrams(vec![("cat", 4), ("dog", 1)], max_work)
	}

	fn with_bigrams(after_the: Vec<(&'static str, u32)>, max_work: usize) -> web::Data<SharedData> {
		let model = LanguageModel::from_tables(
			[("the", 5), ("cat", 3), ("cap", 2)].into_iter().collect(),
			NGramTable::from_counts(2, vec![(vec!["the"], after_the)]),
			NGramTable::from_counts(3, Entries::new()),
			NGramTable::from_counts(4, Entries::new()),
		)
		.unwrap();
		web::Data::new(SharedData { model, limits: Limits { max_work } })
	}

	#[actix_web::test]
	async fn suggestions_are_returned_as_json() {
		let app = test::init_service(App::new().app_data(shared_data(20)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.set_json(SuggestRequest { query: "the ".to_owned(), branches: Some(2), levels: Some(1) })
			.to_request();

		let suggestions: Vec<String> = test::call_and_read_body_json(&app, request).await;
		assert_eq!(suggestions, vec!["the cat", "the dog"]);
	}

	#[actix_web::test]
	async fn missing_parameters_take_defaults() {
		let app = test::init_service(App::new().app_data(with_bigrams(vec![("dog", 1)], 20)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.set_json(SuggestRequest::new("the ca"))
			.to_request();

		let suggestions: Vec<String> = test::call_and_read_body_json(&app, request).await;
		assert_eq!(suggestions, vec!["the cat", "the cap"]);
	}

	#[actix_web::test]
	async fn negative_levels_yield_an_empty_list() {
		let app = test::init_service(App::new().app_data(shared_data(20)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.set_json(SuggestRequest { query: "the".to_owned(), branches: Some(3), levels: Some(-2) })
			.to_request();

		let suggestions: Vec<String> = test::call_and_read_body_json(&app, request).await;
		assert!(suggestions.is_empty());
	}

	#[actix_web::test]
	async fn expensive_requests_are_rejected() {
		let app = test::init_service(App::new().app_data(shared_data(4)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.set_json(SuggestRequest { query: "the".to_owned(), branches: Some(3), levels: Some(2) })
			.to_request();

		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
		let body: ErrorBody = test::read_body_json(response).await;
		assert!(body.error.contains("exceeds the limit of 4"));
	}

	#[actix_web::test]
	async fn malformed_json_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(shared_data(20)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.insert_header(("content-type", "application/json"))
			.set_payload("{\"branches\": 2")
			.to_request();

		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn summary_reports_table_sizes() {
		let app = test::init_service(App::new().app_data(shared_data(20)).configure(configure)).await;
		let request = test::TestRequest::get().uri("/v1/model").to_request();

		let summary: ModelSummary = test::call_and_read_body_json(&app, request).await;
		assert_eq!(
			summary,
			ModelSummary { vocabulary: 3, bigram_contexts: 1, trigram_contexts: 0, quadgram_contexts: 0 }
		);
	}

	#[actix_web::test]
	async fn context_match_beats_vocabulary() {
		let app = test::init_service(App::new().app_data(shared_data(20)).configure(configure)).await;
		let request = test::TestRequest::post()
			.uri("/query_autocomplete/")
			.set_json(SuggestRequest::new("the ca"))
			.to_request();

		let suggestions: Vec<String> = test::call_and_read_body_json(&app, request).await;
		assert_eq!(suggestions, vec!["the cat"]);
	}
}
