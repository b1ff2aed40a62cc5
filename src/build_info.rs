use chrono::{DateTime, Utc};
use serde::Serialize;

/// Version details of this plugin build, printed at startup.
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub canonical: &'static str,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub architecture: &'static str,
    pub build_date: Option<DateTime<Utc>>,
    pub compiler: &'static str,
    pub git_commit: &'static str,
    pub operating_system: &'static str,
}

impl BuildInfo {
    pub fn new() -> Self {
        let build_date = env!("BUILD_TIMESTAMP")
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self {
            canonical: concat!("v", env!("CARGO_PKG_VERSION")),
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or_default(),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or_default(),
            patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or_default(),
            metadata: Metadata {
                architecture: std::env::consts::ARCH,
                build_date,
                compiler: "rustc",
                git_commit: env!("GIT_COMMIT"),
                operating_system: std::env::consts::OS,
            },
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = BuildInfo::new();
        assert_eq!(info.canonical, concat!("v", env!("CARGO_PKG_VERSION")));
        assert!(info.metadata.build_date.is_some());

        let json: serde_json::Value = serde_json::from_str(&info.to_pretty_json().unwrap()).unwrap();
        assert_eq!(json["metadata"]["compiler"], "rustc");
        assert!(json["metadata"].get("git_commit").is_some());
    }
}
