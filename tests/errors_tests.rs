use std::error::Error;
use songsense::errors::SummaryError;

#[test]
fn test_summary_error_implements_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    let error = SummaryError::Parse("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_summary_error_display() {
    assert_eq!(format!("{}", SummaryError::NotFound), "Lyrics does not exist");

    let error = SummaryError::provider(Some(401), "Unauthorized request");
    assert_eq!(format!("{error}"), "Unauthorized request");

    let error = SummaryError::Parse("expected value at line 1 column 1".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to parse hosted model response: expected value at line 1 column 1"
    );

    let error = SummaryError::Generation("Model offline".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to run local generation pipeline: Model offline"
    );
}

#[test]
fn test_summary_error_from_conversions() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let summary_err: SummaryError = err.into();
    assert!(matches!(summary_err, SummaryError::Parse(_)));

    let err = url::Url::parse("not a url").unwrap_err();
    let summary_err: SummaryError = err.into();
    match summary_err {
        SummaryError::Provider { code, message } => {
            assert_eq!(code, None);
            assert!(message.contains("Invalid provider URL"));
        }
        other => panic!("Unexpected error type: {other:?}"),
    }

    // Only checks that the conversion exists.
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SummaryError {
        SummaryError::from(err)
    }
}

#[test]
fn test_only_not_found_is_benign() {
    assert!(SummaryError::NotFound.is_not_found());
    assert!(!SummaryError::provider(Some(404), "x").is_not_found());
}
