use std::io::Write;

use tempfile::NamedTempFile;

use clashgen::settings::SettingsError;
use clashgen::Settings;

#[cfg(test)]
mod settings_tests {
    use clashgen::constants::log_level::ClashLogLevel;
    use clashgen::models::Protocol;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.listen_address, "127.0.0.1");
        assert_eq!(settings.listen_port, 25500);
        assert_eq!(settings.ports, vec![443]);
        assert_eq!(settings.protocols(), vec![Protocol::Vless, Protocol::Trojan]);
        assert_eq!(settings.clash_log_level(), ClashLogLevel::Warning);
        assert_eq!(settings.warp_endpoints, vec!["engage.cloudflareclient.com:2408"]);
    }

    #[test]
    fn test_yaml_settings() {
        let yaml_content = r#"
common:
  log_level: none
  host_name: panel.example.workers.dev
  uuid: 1d0ad6f6-7ba6-4b7b-8a3a-0d6e4a7ef8a1
proxy:
  ports: [443, 2053]
  clean_ips: ["104.16.1.1"]
  proxy_ips: ["bpb.example.com"]
  trojan_enabled: false
routing:
  block_ads: true
"#;
        let settings = Settings::load_from_content(yaml_content).unwrap();
        assert_eq!(settings.host_name, "panel.example.workers.dev");
        assert_eq!(settings.ports, vec![443, 2053]);
        assert_eq!(settings.protocols(), vec![Protocol::Vless]);
        assert_eq!(settings.clash_log_level(), ClashLogLevel::Silent);
        assert!(settings.block_ads);
        assert_eq!(settings.fingerprint, "randomized");
    }

    #[test]
    fn test_toml_settings() {
        let toml_content = r#"
[proxy]
out_proxy = "socks5://10.0.0.1:1080"
enable_ipv6 = false

[dns]
fake_dns = true

[warp]
endpoints = ["162.159.192.1:2408", "[2606:4700:d0::a29f:c001]:2408"]
amnezia_noise_count = 8
"#;
        let settings = Settings::load_from_content(toml_content).unwrap();
        assert_eq!(settings.out_proxy, "socks5://10.0.0.1:1080");
        assert!(!settings.enable_ipv6);
        assert!(settings.fake_dns);
        assert_eq!(settings.warp_endpoints.len(), 2);
        assert_eq!(settings.amnezia_noise_count, 8);
        assert_eq!(settings.amnezia_noise_size_max, 100);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            "[proxy]\nports = [443, 0]\n",
            "[common]\nuuid = \"not-a-uuid\"\n",
            "[common]\nlog_level = \"verbose\"\n",
            "[warp]\nendpoints = [\"engage.cloudflareclient.com\"]\n",
        ];
        for content in cases {
            assert!(
                matches!(
                    Settings::load_from_content(content),
                    Err(SettingsError::Invalid(_))
                ),
                "expected validation error for {}",
                content
            );
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Settings::load_from_content("common:\n  listen_port: [1, 2]\n"),
            Err(SettingsError::Yaml(_))
        ));
        assert!(matches!(
            Settings::load_from_content("[proxy\nports = 1"),
            Err(SettingsError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "common:\n  listen_port: 9090\n  allow_lan_connection: true").unwrap();

        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.listen_port, 9090);
        assert!(settings.allow_lan_connection);
        assert_eq!(settings.pref_path, file.path().display().to_string());

        assert!(matches!(
            Settings::load_from_file("/nonexistent/clashgen.toml"),
            Err(SettingsError::Io(_))
        ));
    }
}
