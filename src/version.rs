use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A Terraform CLI release number, as reported by `terraform version`
/// or requested through the plugin configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TerraformVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl TerraformVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Whether this release understands the global `-chdir=<dir>` flag
    /// (added in 0.14). Older releases take the directory as a trailing
    /// positional argument instead.
    pub fn supports_chdir(&self) -> bool {
        self.major >= 1 || (self.major == 0 && self.minor >= 14)
    }

    /// Pull the version out of `terraform version` output, whose first
    /// line reads `Terraform v1.5.7`.
    pub fn from_version_output(output: &str) -> Result<Self, Error> {
        let line = output.lines().next().unwrap_or_default().trim();
        let raw = line.strip_prefix("Terraform").unwrap_or(line).trim();
        raw.parse()
    }
}

impl FromStr for TerraformVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidVersion(s.to_string());

        let raw = s.trim();
        let raw = raw.strip_prefix('v').unwrap_or(raw);
        // drop pre-release and build metadata, e.g. 1.6.0-beta1+abc
        let core = raw.split(['-', '+']).next().unwrap_or_default();

        let mut parts = core.split('.');
        let mut next = |required: bool| -> Result<u64, Error> {
            match parts.next() {
                Some(p) => p.parse::<u64>().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for TerraformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_chdir() {
        assert!(TerraformVersion::new(1, 0, 0).supports_chdir());
        assert!(TerraformVersion::new(1, 5, 7).supports_chdir());
        assert!(TerraformVersion::new(2, 0, 0).supports_chdir());
        assert!(TerraformVersion::new(0, 14, 0).supports_chdir());
        assert!(TerraformVersion::new(0, 15, 5).supports_chdir());

        assert!(!TerraformVersion::new(0, 13, 7).supports_chdir());
        assert!(!TerraformVersion::new(0, 12, 31).supports_chdir());
        assert!(!TerraformVersion::new(0, 11, 0).supports_chdir());
        assert!(!TerraformVersion::default().supports_chdir());
    }

    #[test]
    fn test_parse() {
        assert_eq!("1.5.0".parse::<TerraformVersion>().unwrap(), TerraformVersion::new(1, 5, 0));
        assert_eq!("v0.13.7".parse::<TerraformVersion>().unwrap(), TerraformVersion::new(0, 13, 7));
        assert_eq!("0.14".parse::<TerraformVersion>().unwrap(), TerraformVersion::new(0, 14, 0));
        assert_eq!("1.6.0-beta1".parse::<TerraformVersion>().unwrap(), TerraformVersion::new(1, 6, 0));
        assert_eq!(" 1.2.3+ent ".parse::<TerraformVersion>().unwrap(), TerraformVersion::new(1, 2, 3));

        for bad in ["", "1", "latest", "1.x.0", "1.2.3.4", "v"] {
            assert!(bad.parse::<TerraformVersion>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_from_version_output() {
        let output = "Terraform v1.5.7\non linux_amd64\n";
        assert_eq!(
            TerraformVersion::from_version_output(output).unwrap(),
            TerraformVersion::new(1, 5, 7)
        );

        let output = "Terraform v0.13.0\n\nYour version of Terraform is out of date!";
        assert_eq!(
            TerraformVersion::from_version_output(output).unwrap(),
            TerraformVersion::new(0, 13, 0)
        );

        assert!(TerraformVersion::from_version_output("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TerraformVersion::new(0, 14, 2).to_string(), "0.14.2");
    }
}
