use serial_test::serial;
use ssm_env::{
    Environment, InMemoryEnvironment, LoaderError, LocalParameterStore, Parameter,
    PathEnvironmentLoader, ProcessEnvironment,
};

const PREFIX: &str = "/service/prod/";

fn param(name: &str, value: &str) -> Parameter {
    Parameter::new(format!("{PREFIX}{name}"), value)
}

#[tokio::test]
async fn test_database_parameters_scenario() {
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![
            param("DB_HOST", "db1"),
            param("DB_PORT", "5432"),
            param("EMPTY", ""),
        ]),
        InMemoryEnvironment::new(),
    );

    loader.load(PREFIX).await.unwrap();

    let environment = loader.environment();
    assert_eq!(environment.get("DB_HOST"), Some("db1".to_string()));
    assert_eq!(environment.get("DB_PORT"), Some("5432".to_string()));
    assert_eq!(environment.get("EMPTY"), None);
    assert_eq!(environment.len(), 2);
}

#[tokio::test]
async fn test_prefix_does_not_match_sibling_namespace() {
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![
            Parameter::new("/app/TOKEN", "mine"),
            Parameter::new("/app2/TOKEN", "sibling"),
            Parameter::new("/app2/OTHER", "sibling"),
        ]),
        InMemoryEnvironment::new(),
    );

    loader.load("/app").await.unwrap();

    assert_eq!(loader.environment().get("TOKEN"), Some("mine".to_string()));
    assert_eq!(loader.environment().get("OTHER"), None);
    assert_eq!(loader.environment().get("2/OTHER"), None);
}

#[tokio::test]
async fn test_failed_page_keeps_earlier_pages_only() {
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![
            param("PAGE1_A", "a"),
            param("PAGE1_B", "b"),
            param("PAGE2_A", "c"),
            param("PAGE2_B", "d"),
            param("PAGE3_A", "e"),
        ])
        .page_size(2)
        .fail_on_page(2, "ThrottlingException: Rate exceeded"),
        InMemoryEnvironment::new(),
    );

    let err = loader.load(PREFIX).await.unwrap_err();

    assert_eq!(
        err,
        LoaderError::fetch_page(PREFIX, "ThrottlingException: Rate exceeded")
    );
    let environment = loader.environment();
    assert_eq!(environment.get("PAGE1_A"), Some("a".to_string()));
    assert_eq!(environment.get("PAGE1_B"), Some("b".to_string()));
    assert_eq!(environment.get("PAGE2_A"), None);
    assert_eq!(environment.get("PAGE3_A"), None);
    assert_eq!(loader.store().request_count(), 2);
}

#[tokio::test]
async fn test_every_page_is_fetched() {
    let parameters = (0..23).map(|i| param(&format!("VAR_{i}"), "x")).collect();
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(parameters),
        InMemoryEnvironment::new(),
    )
    .page_size(Some(5));

    let report = loader.load_with_report(PREFIX).await.unwrap();

    assert_eq!(report.pages, 5);
    assert_eq!(report.applied.len(), 23);
    assert_eq!(loader.environment().len(), 23);
}

#[tokio::test]
async fn test_repeated_loads_are_idempotent() {
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![param("A", "1"), param("B", "2")]),
        InMemoryEnvironment::with_vars([("UNRELATED", "keep")]),
    );

    loader.load(PREFIX).await.unwrap();
    let first = loader.environment().snapshot();
    loader.load(PREFIX).await.unwrap();

    assert_eq!(loader.environment().snapshot(), first);
    assert_eq!(first.get("UNRELATED"), Some(&"keep".to_string()));
}

#[tokio::test]
#[serial]
async fn test_loads_into_process_environment() {
    unsafe {
        std::env::set_var("SSM_ENV_IT_DB_HOST", "stale");
        std::env::remove_var("SSM_ENV_IT_SKIPPED");
    }
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![
            param("SSM_ENV_IT_DB_HOST", "db1"),
            param("SSM_ENV_IT_SKIPPED", ""),
        ]),
        ProcessEnvironment::new(),
    );

    loader.load(PREFIX.trim_end_matches('/')).await.unwrap();

    assert_eq!(std::env::var("SSM_ENV_IT_DB_HOST").unwrap(), "db1");
    assert!(std::env::var("SSM_ENV_IT_SKIPPED").is_err());

    unsafe {
        std::env::remove_var("SSM_ENV_IT_DB_HOST");
    }
}

#[tokio::test]
#[serial]
async fn test_invalid_variable_name_aborts_load() {
    let loader = PathEnvironmentLoader::new(
        LocalParameterStore::with_parameters(vec![
            param("SSM_ENV_IT_BEFORE", "ok"),
            param("BAD=NAME", "x"),
            param("SSM_ENV_IT_AFTER", "never"),
        ]),
        ProcessEnvironment::new(),
    );

    let err = loader.load(PREFIX).await.unwrap_err();

    assert!(matches!(err, LoaderError::EnvironmentWrite { ref name, .. } if name == "BAD=NAME"));
    assert_eq!(std::env::var("SSM_ENV_IT_BEFORE").unwrap(), "ok");
    assert!(std::env::var("SSM_ENV_IT_AFTER").is_err());

    unsafe {
        std::env::remove_var("SSM_ENV_IT_BEFORE");
    }
}

#[tokio::test]
async fn test_empty_path_skips_aws_entirely() {
    ssm_env::load("").await.unwrap();
}
