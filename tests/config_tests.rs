// Threshold defaults and validation tests

use preflight::config::Thresholds;

#[test]
fn test_default_thresholds() {
    let t = Thresholds::default();
    assert_eq!(t.min_cores, 4);
    assert_eq!(t.min_ram_gb, 16.0);
    assert_eq!(t.min_disk_gb, 300.0);
    assert_eq!(t.min_download_mbps, 40.0);
    assert_eq!(t.min_upload_mbps, 10.0);
    assert_eq!(t.max_ping_ms, 250.0);
}

#[test]
fn test_default_thresholds_validate() {
    Thresholds::default().validate().expect("defaults valid");
}

#[test]
fn test_validation_rejects_zero_cores() {
    let t = Thresholds {
        min_cores: 0,
        ..Thresholds::default()
    };
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("min_cores"));
}

#[test]
fn test_validation_rejects_zero_ram() {
    let t = Thresholds {
        min_ram_gb: 0.0,
        ..Thresholds::default()
    };
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("min_ram_gb"));
}

#[test]
fn test_validation_rejects_negative_download() {
    let t = Thresholds {
        min_download_mbps: -1.0,
        ..Thresholds::default()
    };
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("min_download_mbps"));
}

#[test]
fn test_validation_rejects_zero_ping_bound() {
    let t = Thresholds {
        max_ping_ms: 0.0,
        ..Thresholds::default()
    };
    let err = t.validate().unwrap_err();
    assert!(err.to_string().contains("max_ping_ms"));
}
