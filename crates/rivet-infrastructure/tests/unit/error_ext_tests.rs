//! Error context extension tests

use rivet_domain::Error;
use rivet_infrastructure::error_ext::ErrorContext;
use std::io;

fn not_found() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
}

#[test]
fn test_io_context() {
    let err = not_found().io_context("Failed to read config").unwrap_err();
    match err {
        Error::Io { message, source } => {
            assert_eq!(message, "Failed to read config: gone");
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_context() {
    let err = not_found().config_context("Bad config").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("Bad config: gone"));
}

#[test]
fn test_with_context_is_lazy() {
    let mut called = false;
    let ok: Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| {
            called = true;
            "never"
        })
        .unwrap();
    assert_eq!(value, 1);
    assert!(!called);

    let err = not_found().with_context(|| "Lazy").unwrap_err();
    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("Lazy: gone"));
}
