pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://activity_hub.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 1;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_SECURE_COOKIES: bool = false;
pub const MIN_JWT_SECRET_LEN: usize = 16;
pub const DEFAULT_POKEDEX_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_POKEDEX_TIMEOUT_SECS: i64 = 5;
