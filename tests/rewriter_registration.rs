use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{Local, TimeZone};
use tempfile::tempdir;
use versioned_assets::driver::{Driver, DriverOptions};
use versioned_assets::{
    App, Application, StaticConfig, TemplateFilter, Versioned, VersionedError, FILTER_NAME,
};

fn write_asset(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "asset").unwrap();
    let mtime: SystemTime = Local
        .with_ymd_and_hms(2021, 3, 4, 15, 30, 0)
        .single()
        .expect("unambiguous local time")
        .into();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

struct PrefixDriver {
    prefix: String,
}

impl Driver for PrefixDriver {
    fn version(&self, stream: &str) -> Result<String, VersionedError> {
        Ok(format!("{}{}", self.prefix, stream))
    }
}

fn construct_prefix(
    options: &DriverOptions,
    _config: &StaticConfig,
) -> Result<Box<dyn Driver>, VersionedError> {
    Ok(Box::new(PrefixDriver {
        prefix: options.format.clone(),
    }))
}

#[test]
fn init_app_registers_versioned_filter() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "static/css/app.css");
    let mut app = App::new(StaticConfig::new(dir.path()));

    let versioned = Arc::new(Versioned::new(DriverOptions::default()));
    assert!(!versioned.is_initialized());
    versioned.init_app(&mut app).unwrap();

    assert!(versioned.is_initialized());
    assert!(app.filters.contains(FILTER_NAME));
    assert_eq!(
        app.filters.apply("versioned", "/static/css/app.css").unwrap(),
        "/version-20210304T153000/static/css/app.css"
    );
    assert_eq!(
        versioned.version("/static/css/app.css").unwrap(),
        "/version-20210304T153000/static/css/app.css"
    );
}

#[test]
fn with_app_binds_immediately() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "static/app.js");
    let mut app = App::new(StaticConfig::new(dir.path()));

    let versioned = Versioned::with_app(&mut app, DriverOptions::with_format("%(path)s@%(version)s")).unwrap();

    assert_eq!(versioned.version("/static/app.js").unwrap(), "static/app.js@20210304T153000");
    assert_eq!(
        app.template_filters().apply(FILTER_NAME, "/static/app.js").unwrap(),
        "static/app.js@20210304T153000"
    );
}

#[test]
fn invariant_registration_does_not_clobber() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "static/app.js");
    let mut app = App::new(StaticConfig::new(dir.path()));

    let first = Versioned::with_app(&mut app, DriverOptions::with_format("first:%(path)s")).unwrap();
    let second = Versioned::with_app(&mut app, DriverOptions::with_format("second:%(path)s")).unwrap();

    assert_eq!(app.filters.len(), 1);
    assert_eq!(app.filters.apply(FILTER_NAME, "/static/app.js").unwrap(), "first:static/app.js");

    // Both rewriters still work when called directly.
    assert_eq!(first.version("/static/app.js").unwrap(), "first:static/app.js");
    assert_eq!(second.version("/static/app.js").unwrap(), "second:static/app.js");
}

#[test]
fn invariant_existing_filter_is_kept() {
    let dir = tempdir().unwrap();
    let mut app = App::new(StaticConfig::new(dir.path()));

    let original = |value: &str| -> Result<String, VersionedError> { Ok(format!("original:{value}")) };
    assert!(app.filters.insert_if_absent(FILTER_NAME, Arc::new(original)));

    let versioned = Arc::new(Versioned::new(DriverOptions::default()));
    versioned.init_app(&mut app).unwrap();
    versioned.init_app(&mut app).unwrap();

    assert_eq!(app.filters.apply(FILTER_NAME, "x").unwrap(), "original:x");
    assert!(versioned.is_initialized());
}

#[test]
fn driver_is_built_once() {
    let first_root = tempdir().unwrap();
    let second_root = tempdir().unwrap();
    write_asset(first_root.path(), "static/only-first.css");

    let mut first_app = App::new(StaticConfig::new(first_root.path()));
    let mut second_app = App::new(StaticConfig::new(second_root.path()));

    let versioned = Arc::new(Versioned::new(DriverOptions::default()));
    versioned.init_app(&mut first_app).unwrap();
    versioned.init_app(&mut second_app).unwrap();

    // The driver keeps the layout of the first application.
    assert_eq!(
        second_app.filters.apply(FILTER_NAME, "/static/only-first.css").unwrap(),
        "/version-20210304T153000/static/only-first.css"
    );
}

#[test]
fn custom_driver_is_used() {
    let dir = tempdir().unwrap();
    let mut app = App::new(StaticConfig::new(dir.path()));

    let versioned = Arc::new(Versioned::with_driver(
        construct_prefix,
        DriverOptions::with_format("/cdn"),
    ));
    versioned.init_app(&mut app).unwrap();

    assert_eq!(app.filters.apply(FILTER_NAME, "/static/a.png").unwrap(), "/cdn/static/a.png");
}

#[test]
fn call_before_init_fails() {
    let versioned = Versioned::new(DriverOptions::default());

    assert!(matches!(
        versioned.version("/static/app.css"),
        Err(VersionedError::NotInitialized)
    ));
    assert!(matches!(
        versioned.filter("/static/app.css"),
        Err(VersionedError::NotInitialized)
    ));
}

#[test]
fn missing_file_error_passes_through_filter() {
    let dir = tempdir().unwrap();
    let mut app = App::new(StaticConfig::new(dir.path()));
    Versioned::with_app(&mut app, DriverOptions::default()).unwrap();

    let err = app.filters.apply(FILTER_NAME, "/static/missing.js").unwrap_err();

    match err {
        VersionedError::NoSuchFile(path) => {
            assert_eq!(path, dir.path().join("static").join("missing.js"))
        }
        other => panic!("expected NoSuchFile, got {other:?}"),
    }
}

#[test]
fn invalid_format_fails_init_without_registering() {
    let dir = tempdir().unwrap();
    let mut app = App::new(StaticConfig::new(dir.path()));

    let versioned = Arc::new(Versioned::new(DriverOptions::with_format("%(nope)s")));
    let result = versioned.init_app(&mut app);

    assert!(matches!(result, Err(VersionedError::InvalidFormat(_))));
    assert!(!versioned.is_initialized());
    assert!(app.filters.is_empty());
}

#[test]
fn unknown_filter_is_an_error() {
    let dir = tempdir().unwrap();
    let app = App::new(StaticConfig::new(dir.path()));

    assert!(matches!(
        app.filters.apply("missing", "x"),
        Err(VersionedError::UnknownFilter(name)) if name == "missing"
    ));
}

#[test]
fn shared_rewriter_serves_concurrent_calls() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "static/app.css");
    let mut app = App::new(StaticConfig::new(dir.path()));
    let versioned = Versioned::with_app(&mut app, DriverOptions::default()).unwrap();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let versioned = Arc::clone(&versioned);
                scope.spawn(move || versioned.version("/static/app.css").unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(outputs
        .iter()
        .all(|out| out == "/version-20210304T153000/static/app.css"));
}
