use super::*;

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.glossa.log_level, "info");
    assert_eq!(cfg.catalog.root, "translations");
    assert_eq!(cfg.catalog.default_locale, "fr-FR");
    assert_eq!(cfg.catalog.fallback_locales, vec!["en-US"]);
    assert_eq!(cfg.catalog.default_namespace, "portals/console");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let toml_str = r#"
        [catalog]
        default_locale = "en-US"
        fallback_locales = []
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.catalog.default_locale, "en-US");
    assert!(cfg.catalog.fallback_locales.is_empty());
    assert_eq!(cfg.catalog.root, "translations");
    assert_eq!(cfg.glossa.log_level, "info");
}

#[test]
fn test_empty_toml_is_all_defaults() {
    let cfg: Config = toml::from_str("").unwrap();
    assert_eq!(cfg.catalog.default_namespace, "portals/console");
}

#[test]
fn test_validate_rejects_bad_locale_and_namespace() {
    let mut cfg = Config::default();
    cfg.catalog.fallback_locales = vec!["english".into()];
    assert!(matches!(cfg.validate(), Err(GlossaError::Config(_))));

    let mut cfg = Config::default();
    cfg.catalog.default_namespace = "a:b".into();
    assert!(matches!(cfg.validate(), Err(GlossaError::Config(_))));
}

#[test]
fn test_shellexpand() {
    assert_eq!(shellexpand("translations"), "translations");
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            shellexpand("~/i18n"),
            format!("{}/i18n", home.to_string_lossy())
        );
    }
}

#[test]
fn test_load_missing_file_is_none() {
    let cfg = load("/nonexistent/__glossa__/glossa.toml").unwrap();
    assert!(cfg.is_none(), "a missing file leaves the fallback to the caller");
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join("__glossa_test_config__");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("glossa.toml");
    std::fs::write(
        &good,
        "[glossa]\nlog_level = \"debug\"\n\n[catalog]\nroot = \"i18n\"\n",
    )
    .unwrap();
    let cfg = load(good.to_str().unwrap()).unwrap().expect("file exists");
    assert_eq!(cfg.glossa.log_level, "debug");
    assert_eq!(cfg.catalog.root_path(), PathBuf::from("i18n"));

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "[catalog\nroot = ").unwrap();
    assert!(matches!(load(bad.to_str().unwrap()), Err(GlossaError::Config(_))));

    let invalid = dir.join("invalid.toml");
    std::fs::write(&invalid, "[catalog]\ndefault_locale = \"xx_YY\"\n").unwrap();
    assert!(matches!(load(invalid.to_str().unwrap()), Err(GlossaError::Config(_))));

    let _ = std::fs::remove_dir_all(&dir);
}
