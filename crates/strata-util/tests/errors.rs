use strata_util::errors::StrataError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = StrataError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_config_error_display() {
    let err = StrataError::Config {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Configuration error: bad syntax");
}

#[test]
fn test_traversal_error_display() {
    let err = StrataError::traversal("visit_node called before start");
    assert_eq!(
        err.to_string(),
        "Graph traversal failed: visit_node called before start"
    );
}

#[test]
fn test_missing_node_display() {
    let err = StrataError::MissingNode { index: 7 };
    assert_eq!(err.to_string(), "Node 7 is not part of the resolution graph");
}

#[test]
fn test_generic_error_display() {
    let err = StrataError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: StrataError = io_err.into();
    assert!(matches!(err, StrataError::Io(_)));
}

#[test]
fn test_traversal_error_converts_to_report() {
    let report: miette::Report = StrataError::traversal("second start").into();
    assert!(report.to_string().contains("second start"));
}

#[test]
fn test_init_logging_is_idempotent() {
    strata_util::logging::init_logging("warn");
    strata_util::logging::init_logging("debug");
}
