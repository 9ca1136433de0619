use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use fahras_config::Error;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

/// Renders the sample config with one key of one table replaced.
fn sample_toml_with(table: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut cursor = &mut root;

	for name in table {
		cursor = cursor
			.get_mut(*name)
			.expect("Template config must include the requested table.");
	}

	cursor
		.as_table_mut()
		.expect("Template path must point at a table.")
		.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("fahras_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load(payload: String) -> fahras_config::Result<fahras_config::Config> {
	let path = write_temp_config(payload);
	let result = fahras_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load(SAMPLE_CONFIG_TEMPLATE_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.search.default_limit, 50);
	assert_eq!(cfg.search.max_limit, 200);
	assert_eq!(cfg.remote.timeout_ms, 15_000);
	assert_eq!(cfg.remote.user_agent, "fahras-modern");
	assert_eq!(
		cfg.remote.fallback.zajal.as_deref(),
		Some("https://zajal.example/api/search?q={{query}}")
	);
	assert_eq!(cfg.remote.fallback.jadal, None);
	assert_eq!(cfg.remote.fallback.namaa.as_deref(), Some("https://namaa.example/clients/{{query}}"));
	assert_eq!(cfg.security.api_auth_token, None);
	assert_eq!(cfg.security.admin_auth_token.as_deref(), Some("admin-secret"));
}

#[test]
fn default_limit_must_not_exceed_max() {
	let err = load(sample_toml_with(&["search"], "default_limit", Value::Integer(500)))
		.expect_err("Expected limit validation error.");

	assert!(
		err.to_string().contains("search.default_limit must not exceed search.max_limit."),
		"Unexpected error: {err}"
	);
}

#[test]
fn timeout_must_be_positive() {
	let err = load(sample_toml_with(&["remote"], "timeout_ms", Value::Integer(0)))
		.expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("remote.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn pool_size_must_be_positive() {
	let err = load(sample_toml_with(&["storage", "postgres"], "pool_max_conns", Value::Integer(0)))
		.expect_err("Expected pool validation error.");

	assert!(
		err.to_string().contains("storage.postgres.pool_max_conns must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn fallback_templates_must_be_http_urls() {
	let payload = sample_toml_with(
		&["remote", "fallback"],
		"bseel",
		Value::String("ftp://bseel.example/{{query}}".to_string()),
	);
	let err = load(payload).expect_err("Expected fallback validation error.");

	assert!(
		err.to_string().contains("remote.fallback.bseel must be an http or https URL template."),
		"Unexpected error: {err}"
	);
}

#[test]
fn user_agent_must_be_non_empty() {
	let err = load(sample_toml_with(&["remote"], "user_agent", Value::String(" ".to_string())))
		.expect_err("Expected user agent validation error.");

	assert!(
		err.to_string().contains("remote.user_agent must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_security_table_is_a_parse_error() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove("security");

	let err = load(toml::to_string(&root).expect("Failed to render template config."))
		.expect_err("Expected parse error.");

	match err {
		Error::ParseConfig { source, .. } =>
			assert!(source.to_string().contains("security"), "Unexpected error: {source}"),
		err => panic!("Expected parse config error, got {err}"),
	}
}

#[test]
fn missing_file_is_a_read_error() {
	let mut path = env::temp_dir();

	path.push("fahras_config_test_missing.toml");

	let err = fahras_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}
