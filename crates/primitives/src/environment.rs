use std::{fmt, str::FromStr};

pub const BALLOT_DEPLOYMENT_VAR_NAME: &str = "BALLOT_DEPLOYMENT";
pub const BALLOT_PRETTY_PRINT_LOGS_VAR_NAME: &str = "BALLOT_PRETTY_PRINT_LOGS";

/// Whether the node runs on a developer machine or as a deployed service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    #[default]
    Local,
    Deployed,
}

impl Deployment {
    /// Reads `BALLOT_DEPLOYMENT`. Missing or unrecognised values mean local.
    pub fn from_env() -> Self {
        std::env::var(BALLOT_DEPLOYMENT_VAR_NAME)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Deployment::Local)
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deployment::Local => write!(f, "local"),
            Deployment::Deployed => write!(f, "deployed"),
        }
    }
}

impl FromStr for Deployment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Deployment::Local),
            "deployed" => Ok(Deployment::Deployed),
            _ => Err(crate::Error::InvalidDeployment(s.to_string())),
        }
    }
}

/// Log output settings taken from the process environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    /// Compact human-readable lines instead of JSON
    pub pretty: bool,
    /// Annotate records with file, line and target
    pub annotate_source: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let pretty = std::env::var(BALLOT_PRETTY_PRINT_LOGS_VAR_NAME)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        LogSettings {
            pretty,
            annotate_source: Deployment::from_env().is_local(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deployment_names() {
        assert_eq!("local".parse::<Deployment>().unwrap(), Deployment::Local);
        assert_eq!(" Deployed ".parse::<Deployment>().unwrap(), Deployment::Deployed);
        assert!("mainnet".parse::<Deployment>().is_err());
    }

    #[test]
    fn only_local_deployments_annotate_source() {
        assert!(Deployment::Local.is_local());
        assert!(!Deployment::Deployed.is_local());
        assert_eq!(Deployment::Deployed.to_string(), "deployed");
    }
}
