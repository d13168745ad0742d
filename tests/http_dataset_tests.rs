use std::net::SocketAddr;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpResponse, HttpServer};

use clashgen::kv::{ConfiguredDatasetStore, DatasetError, DatasetStore, HttpDatasetStore};
use clashgen::{get_cl_warp_config, ClashBuilders, GenerateError, Settings};

const DATASET: &str = r#"{
    "warpAccounts": [
        {"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128", "reserved": [1, 2, 3]},
        {"privateKey": "c", "publicKey": "d", "warpIPv6": "2606::2/128", "reserved": "AQID"}
    ]
}"#;

async fn dataset() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(DATASET)
}

async fn unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().finish()
}

async fn slow() -> HttpResponse {
    actix_web::rt::time::sleep(Duration::from_secs(3)).await;
    dataset().await
}

/// Serve the dataset routes on an ephemeral local port
fn start_server() -> (SocketAddr, ServerHandle) {
    let server = HttpServer::new(|| {
        App::new()
            .route("/dataset.json", web::get().to(dataset))
            .route("/unavailable.json", web::get().to(unavailable))
            .route("/slow.json", web::get().to(slow))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (addr, handle)
}

fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}

#[cfg(test)]
mod http_dataset_tests {
    use super::*;

    #[actix_web::test]
    async fn test_fetches_dataset() {
        let (addr, handle) = start_server();
        let store = HttpDatasetStore::new(url(addr, "/dataset.json"));

        let dataset = store.fetch_dataset().await.unwrap();
        assert_eq!(dataset.warp_accounts.len(), 2);
        assert_eq!(dataset.warp_accounts[1].reserved, vec![1, 2, 3]);
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn test_status_mapping() {
        let (addr, handle) = start_server();

        let missing = HttpDatasetStore::new(url(addr, "/missing.json"));
        assert!(matches!(
            missing.fetch_dataset().await,
            Err(DatasetError::NotFound(_))
        ));

        let unavailable = HttpDatasetStore::new(url(addr, "/unavailable.json"));
        assert!(matches!(
            unavailable.fetch_dataset().await,
            Err(DatasetError::Network(_))
        ));
        handle.stop(true).await;
    }

    #[actix_web::test]
    async fn test_timeout_is_network_error() {
        let (addr, handle) = start_server();
        let store = HttpDatasetStore::new(url(addr, "/slow.json"))
            .with_timeout(Duration::from_millis(200));

        assert!(matches!(
            store.fetch_dataset().await,
            Err(DatasetError::Network(_))
        ));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_warp_document_over_http() {
        let (addr, handle) = start_server();
        let mut settings = Settings::new();
        settings.warp_endpoints = vec!["engage.cloudflareclient.com:2408".to_string()];
        let builders = ClashBuilders::new(&settings);

        let store = ConfiguredDatasetStore::from_location(&url(addr, "/dataset.json"));
        let document = get_cl_warp_config(&settings, &builders, &store, false)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&document.content).unwrap();
        let proxies = value["proxies"].as_array().unwrap();
        assert_eq!(proxies.len(), 2);
        assert_eq!(proxies[0]["private-key"], "a");
        assert_eq!(proxies[1]["reserved"], serde_json::json!([1, 2, 3]));

        let store = ConfiguredDatasetStore::from_location(&url(addr, "/unavailable.json"));
        let result = get_cl_warp_config(&settings, &builders, &store, false).await;
        assert!(matches!(
            result,
            Err(GenerateError::Dataset(DatasetError::Network(_)))
        ));
        handle.stop(true).await;
    }
}
