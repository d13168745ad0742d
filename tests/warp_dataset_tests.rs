use std::io::Write;

use tempfile::NamedTempFile;

use clashgen::kv::{ConfiguredDatasetStore, DatasetError, DatasetStore, FileDatasetStore};
use clashgen::{get_cl_warp_config, ClashBuilders, GenerateError, Settings};

const DATASET: &str = r#"{
    "warpAccounts": [
        {
            "privateKey": "uKVSk9F2LgJyP4lbl8qs8pO0YvEeK7I0iYhTAkGSs3A=",
            "publicKey": "bmXOC+F1FxEMF9dyiK2H5/1SUtzH0JuVo51h2wPfgyo=",
            "warpIPv6": "2606:4700:110:8a36:df92:102a:9602:fa18/128",
            "reserved": [78, 135, 76]
        },
        {
            "privateKey": "SIu0i2dQCzP6ok0Yl8pj+2DkTPd6cqhNq2G0VWlXKHc=",
            "publicKey": "bmXOC+F1FxEMF9dyiK2H5/1SUtzH0JuVo51h2wPfgyo=",
            "warpIPv6": "2606:4700:110:8d4e:9a56:3c5b:1f7e:2b61/128",
            "reserved": "ToeM"
        }
    ]
}"#;

fn dataset_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn settings() -> Settings {
    let mut settings = Settings::new();
    settings.warp_endpoints = vec![
        "engage.cloudflareclient.com:2408".to_string(),
        "[2606:4700:d0::a29f:c001]:2408".to_string(),
    ];
    settings
}

#[cfg(test)]
mod warp_dataset_tests {
    use super::*;

    #[actix_web::test]
    async fn test_file_store_reads_accounts() {
        let file = dataset_file(DATASET);
        let store = FileDatasetStore::new(file.path());
        let dataset = store.fetch_dataset().await.unwrap();

        assert_eq!(dataset.warp_accounts.len(), 2);
        assert_eq!(dataset.warp_accounts[1].reserved, vec![78, 135, 140]);
    }

    #[actix_web::test]
    async fn test_missing_file_is_not_found() {
        let store = FileDatasetStore::new("/nonexistent/clashgen/dataset.json");
        assert!(matches!(
            store.fetch_dataset().await,
            Err(DatasetError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_warp_document_from_file() {
        let file = dataset_file(DATASET);
        let settings = settings();
        let builders = ClashBuilders::new(&settings);
        let store = ConfiguredDatasetStore::from_location(&file.path().display().to_string());

        let document = get_cl_warp_config(&settings, &builders, &store, true)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&document.content).unwrap();

        let proxies = value["proxies"].as_array().unwrap();
        assert_eq!(proxies.len(), 4);
        assert_eq!(proxies[0]["name"], "💦 1 - Warp Pro 🇮🇷");
        assert_eq!(proxies[0]["amnezia-wg-option"]["jmin"], 50);
        assert!(proxies[1].get("amnezia-wg-option").is_none());
        assert_eq!(proxies[1]["dialer-proxy"], "💦 1 - Warp Pro 🇮🇷");
        assert_eq!(proxies[2]["server"], "2606:4700:d0::a29f:c001");
        assert_eq!(proxies[3]["reserved"], serde_json::json!([78, 135, 140]));

        let groups = value["proxy-groups"].as_array().unwrap();
        assert_eq!(groups[1]["name"], "💦 Warp Pro - Best Ping 🚀");
        assert_eq!(groups[2]["name"], "💦 WoW Pro - Best Ping 🚀");
        assert_eq!(groups[2]["tolerance"], 300);
        assert_eq!(value["dns"]["prefer-h3"], true);
        assert!(value.get("keep-alive-idle").is_none());
    }

    #[actix_web::test]
    async fn test_single_account_is_fatal() {
        let file = dataset_file(
            r#"{"warpAccounts": [{"privateKey": "a", "publicKey": "b", "warpIPv6": "2606::1/128", "reserved": [0, 0, 0]}]}"#,
        );
        let settings = settings();
        let builders = ClashBuilders::new(&settings);
        let store = FileDatasetStore::new(file.path());

        let result = get_cl_warp_config(&settings, &builders, &store, false).await;
        assert!(matches!(
            result,
            Err(GenerateError::Dataset(DatasetError::Incomplete(_)))
        ));
    }

    async fn warp_result(dataset: &str) -> Result<clashgen::ClashDocument, GenerateError> {
        let file = dataset_file(dataset);
        let settings = settings();
        let builders = ClashBuilders::new(&settings);
        let store = FileDatasetStore::new(file.path());
        get_cl_warp_config(&settings, &builders, &store, false).await
    }

    #[actix_web::test]
    async fn test_malformed_reserved_is_fatal() {
        let result = warp_result(&DATASET.replace(r#""ToeM""#, r#""***""#)).await;
        assert!(matches!(
            result,
            Err(GenerateError::Dataset(DatasetError::Parse(_)))
        ));

        let result = warp_result(&DATASET.replace("[78, 135, 76]", "[78, 135]")).await;
        assert!(matches!(
            result,
            Err(GenerateError::Dataset(DatasetError::Parse(_)))
        ));
    }

    #[actix_web::test]
    async fn test_missing_ipv6_is_fatal() {
        let dataset = DATASET.replace(
            r#""warpIPv6": "2606:4700:110:8a36:df92:102a:9602:fa18/128","#,
            "",
        );
        assert!(matches!(
            warp_result(&dataset).await,
            Err(GenerateError::Dataset(DatasetError::Parse(_)))
        ));
    }

    #[actix_web::test]
    async fn test_blank_private_key_is_fatal() {
        let dataset = DATASET.replace(
            r#""privateKey": "uKVSk9F2LgJyP4lbl8qs8pO0YvEeK7I0iYhTAkGSs3A=""#,
            r#""privateKey": """#,
        );
        assert!(matches!(
            warp_result(&dataset).await,
            Err(GenerateError::Dataset(DatasetError::Incomplete(_)))
        ));
    }
}
