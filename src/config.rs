use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";
pub const DEFAULT_PATH: &str = "/vacancies";
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 50;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"))
});

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub path: String,
    pub access_token: String,
    pub user_agent: String,
    pub per_page: u32,
    /// `0` disables the cap.
    pub max_pages: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("environment variable {key} has invalid value {value:?}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // Load .env file if present
        Ok(Config {
            base_url: get_env_or_default("HH_API_BASE_URL", DEFAULT_BASE_URL),
            path: get_env_or_default("HH_API_PATH", DEFAULT_PATH),
            access_token: get_env_or_default("HH_ACCESS_TOKEN", ""),
            user_agent: get_env_or_default("HH_USER_AGENT", ""),
            per_page: parse_env_or_default("PROBE_PER_PAGE", DEFAULT_PER_PAGE)?,
            max_pages: parse_env_or_default("PROBE_MAX_PAGES", DEFAULT_MAX_PAGES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            path: DEFAULT_PATH.to_string(),
            access_token: String::new(),
            user_agent: String::new(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError {
            key: key.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[test]
fn test_parse_env_or_default() {
    // Unique keys so parallel tests never race on the same variable.
    let key = "VACANCY_PROBE_TEST_PARSE_OK";
    unsafe { env::set_var(key, " 7 ") };
    assert_eq!(parse_env_or_default::<u32>(key, 1).unwrap(), 7);

    let key = "VACANCY_PROBE_TEST_PARSE_BAD";
    unsafe { env::set_var(key, "many") };
    let err = parse_env_or_default::<u32>(key, 1).unwrap_err();
    assert_eq!(err.key, key);
    assert_eq!(err.value, "many");

    assert_eq!(
        parse_env_or_default::<u32>("VACANCY_PROBE_TEST_PARSE_UNSET", 42).unwrap(),
        42
    );
}
