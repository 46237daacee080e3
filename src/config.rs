use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::args::Args;
use crate::error::Error;
use crate::utils::redact_secret;

/// Validated settings for one run.
#[derive(Clone)]
pub struct Config {
    pub zone_id: String,
    pub api_token: String,
    pub endpoint: Url,
    pub readme_path: PathBuf,
    pub dry_run: bool,
    pub allow_missing_markers: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, Error> {
        let zone_id = required(args.zone_id.as_deref(), "zone id", "CLOUDFLARE_ZONE_ID")?;
        if let Some(bad) = zone_id
            .chars()
            .find(|c| *c == '"' || *c == '\\' || c.is_whitespace())
        {
            return Err(Error::Config(format!(
                "zone id contains invalid character {bad:?}"
            )));
        }

        let api_token = required(args.api_token.as_deref(), "API token", "CLOUDFLARE_API_TOKEN")?;

        let endpoint = Url::parse(args.endpoint.trim())
            .map_err(|e| Error::Config(format!("invalid endpoint '{}': {e}", args.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "endpoint must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        if args.readme.as_os_str().is_empty() {
            return Err(Error::Config("readme path is empty".into()));
        }

        Ok(Self {
            zone_id,
            api_token,
            endpoint,
            readme_path: args.readme.clone(),
            dry_run: args.dry_run,
            allow_missing_markers: args.allow_missing_markers,
        })
    }
}

fn required(value: Option<&str>, name: &str, env_var: &str) -> Result<String, Error> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        Some(_) => Err(Error::Config(format!("{name} is empty (set {env_var})"))),
        None => Err(Error::Config(format!("{name} is missing (set {env_var})"))),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("zone_id", &self.zone_id)
            .field("api_token", &redact_secret(&self.api_token))
            .field("endpoint", &self.endpoint.as_str())
            .field("readme_path", &self.readme_path)
            .field("dry_run", &self.dry_run)
            .field("allow_missing_markers", &self.allow_missing_markers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::DEFAULT_ENDPOINT;

    fn args(zone_id: Option<&str>, api_token: Option<&str>) -> Args {
        Args {
            zone_id: zone_id.map(String::from),
            api_token: api_token.map(String::from),
            readme: PathBuf::from("README.md"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            dry_run: false,
            allow_missing_markers: false,
            verbose: false,
        }
    }

    #[test]
    fn accepts_complete_configuration() {
        let config = Config::from_args(&args(Some("0123abcd"), Some("secret-token"))).unwrap();
        assert_eq!(config.zone_id, "0123abcd");
        assert_eq!(config.api_token, "secret-token");
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.readme_path, PathBuf::from("README.md"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let config = Config::from_args(&args(Some("  zone\n"), Some(" token "))).unwrap();
        assert_eq!(config.zone_id, "zone");
        assert_eq!(config.api_token, "token");
    }

    #[test]
    fn rejects_missing_zone() {
        let err = Config::from_args(&args(None, Some("token"))).unwrap_err();
        assert!(err.to_string().contains("CLOUDFLARE_ZONE_ID"));
    }

    #[test]
    fn rejects_blank_token() {
        let err = Config::from_args(&args(Some("zone"), Some("   "))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("API token is empty"));
    }

    #[test]
    fn rejects_zone_that_would_break_the_query() {
        let err = Config::from_args(&args(Some("abc\"} evil"), Some("token"))).unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut a = args(Some("zone"), Some("token"));
        a.endpoint = "ftp://example.com/graphql".into();
        assert!(Config::from_args(&a).is_err());

        a.endpoint = "not a url".into();
        assert!(Config::from_args(&a).is_err());
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Config::from_args(&args(Some("zone"), Some("supersecrettoken"))).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecrettoken"));
        assert!(debug.contains("supe********"));
    }
}
