use crate::config::{ControllerConfig, LinkPreset};
use crate::topo::{LinkProfile, LinkProfiles};

#[test]
fn config_defaults_to_k4_with_default_links() {
    let cfg: ControllerConfig = serde_json::from_str(r#"{ "k": 4 }"#).unwrap();
    assert_eq!(cfg.k, 4);
    assert_eq!(cfg.link_preset, LinkPreset::Default);
    assert_eq!(cfg.link_profiles(), LinkProfiles::default());
    assert_eq!(cfg.build_topology().unwrap().hosts().len(), 16);
}

#[test]
fn explicit_links_override_preset() {
    let cfg: ControllerConfig = serde_json::from_str(
        r#"
{
    "k": 6,
    "link_preset": "legacy",
    "links": {
        "host": { "bandwidth_mbps": 100 },
        "pod": { "bandwidth_mbps": 200, "max_queue_size": 1000 },
        "core": {}
    }
}
        "#,
    )
    .unwrap();
    let profiles = cfg.link_profiles();
    assert_eq!(profiles.host, LinkProfile::new(Some(100), None));
    assert_eq!(profiles.pod, LinkProfile::new(Some(200), Some(1000)));
    assert_eq!(profiles.core, LinkProfile::default());

    let legacy: ControllerConfig =
        serde_json::from_str(r#"{ "k": 4, "link_preset": "legacy" }"#).unwrap();
    assert_eq!(legacy.link_profiles(), LinkProfiles::legacy());
}

#[test]
fn bad_k_in_config_fails_at_build() {
    let cfg: ControllerConfig = serde_json::from_str(r#"{ "k": 5 }"#).unwrap();
    assert!(cfg.build_topology().is_err());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = ControllerConfig::from_json_file(std::path::Path::new("/nonexistent/ctl.json"))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/ctl.json"));
}
