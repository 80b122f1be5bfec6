mod basic;
mod generate;

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::api_underlying::Underlying;
use imagify_common::config;

fn server_base_url() -> String {
    config::get("SERVER_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

pub struct ApiClient {
    pub basic: basic::BasicApi,
    pub generate: generate::GenerateApi,
}

static API_CLIENT: Lazy<Arc<ApiClient>> = Lazy::new(|| Arc::new(new_client(server_base_url())));

pub fn get_client() -> Arc<ApiClient> {
    API_CLIENT.clone()
}

fn new_client(base_url: String) -> ApiClient {
    let underlying = Underlying::new_shared(base_url);
    ApiClient {
        basic: basic::BasicApi {
            underlying: Arc::clone(&underlying),
        },
        generate: generate::GenerateApi {
            underlying: Arc::clone(&underlying),
        },
    }
}
