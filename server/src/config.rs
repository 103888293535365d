use std::time::Duration;

pub const DEFAULT_COUNTIES_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";
pub const DEFAULT_EDUCATION_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_DATASET_REFRESH_SECS: u64 = 3600; // re-fetch hourly
pub const DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 3;

pub const DATASET_CACHE_CONTROL: &str = "public, max-age=3600";

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn positive_secs(name: &str, default: u64) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> String {
    non_empty_var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned())
}

pub fn counties_url() -> String {
    non_empty_var("COUNTIES_URL").unwrap_or_else(|| DEFAULT_COUNTIES_URL.to_owned())
}

pub fn education_url() -> String {
    non_empty_var("EDUCATION_URL").unwrap_or_else(|| DEFAULT_EDUCATION_URL.to_owned())
}

pub fn dataset_refresh_interval() -> Duration {
    positive_secs("DATASET_REFRESH_SECS", DEFAULT_DATASET_REFRESH_SECS)
}

pub fn upstream_http_timeout() -> Duration {
    positive_secs(
        "UPSTREAM_HTTP_TIMEOUT_SECS",
        DEFAULT_UPSTREAM_HTTP_TIMEOUT_SECS,
    )
}

pub fn upstream_connect_timeout() -> Duration {
    positive_secs(
        "UPSTREAM_CONNECT_TIMEOUT_SECS",
        DEFAULT_UPSTREAM_CONNECT_TIMEOUT_SECS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        temp_env::with_vars_unset(
            [
                "SERVER_PORT",
                "STATIC_DIR",
                "COUNTIES_URL",
                "DATASET_REFRESH_SECS",
            ],
            || {
                assert_eq!(server_port(), 3000);
                assert_eq!(static_dir(), "client/dist");
                assert_eq!(counties_url(), DEFAULT_COUNTIES_URL);
                assert_eq!(dataset_refresh_interval(), Duration::from_secs(3600));
            },
        );
    }

    #[test]
    fn overrides_are_read_from_env() {
        temp_env::with_vars(
            [
                ("SERVER_PORT", Some("8080")),
                ("STATIC_DIR", Some(" /srv/www ")),
                ("EDUCATION_URL", Some("http://localhost:9000/edu.json")),
                ("UPSTREAM_HTTP_TIMEOUT_SECS", Some("30")),
            ],
            || {
                assert_eq!(server_port(), 8080);
                assert_eq!(static_dir(), "/srv/www");
                assert_eq!(education_url(), "http://localhost:9000/edu.json");
                assert_eq!(upstream_http_timeout(), Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn invalid_or_zero_values_fall_back() {
        temp_env::with_vars(
            [
                ("SERVER_PORT", Some("0")),
                ("STATIC_DIR", Some("   ")),
                ("DATASET_REFRESH_SECS", Some("soon")),
                ("UPSTREAM_CONNECT_TIMEOUT_SECS", Some("0")),
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(static_dir(), DEFAULT_STATIC_DIR);
                assert_eq!(dataset_refresh_interval(), Duration::from_secs(3600));
                assert_eq!(upstream_connect_timeout(), Duration::from_secs(3));
            },
        );
    }
}
