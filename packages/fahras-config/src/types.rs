use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub remote: Remote,
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Local result cap used when a request does not carry `limit`.
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Hard ceiling applied to every requested `limit`.
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { default_limit: default_limit(), max_limit: default_max_limit() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Remote {
	/// Per-provider deadline for the whole call.
	#[serde(default = "default_remote_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
	/// Built-in providers used only while the source catalog has no enabled entries.
	#[serde(default)]
	pub fallback: RemoteFallback,
}
impl Default for Remote {
	fn default() -> Self {
		Self {
			timeout_ms: default_remote_timeout_ms(),
			user_agent: default_user_agent(),
			fallback: RemoteFallback::default(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteFallback {
	#[serde(default)]
	pub zajal: Option<String>,
	#[serde(default)]
	pub jadal: Option<String>,
	#[serde(default)]
	pub namaa: Option<String>,
	#[serde(default)]
	pub bseel: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	#[serde(default)]
	pub api_auth_token: Option<String>,
	#[serde(default)]
	pub admin_auth_token: Option<String>,
}

fn default_limit() -> u32 {
	50
}

fn default_max_limit() -> u32 {
	200
}

fn default_remote_timeout_ms() -> u64 {
	15_000
}

fn default_user_agent() -> String {
	"fahras-modern".to_string()
}
