/// Implements the directory/version plumbing shared by every record.
macro_rules! action_common {
    () => {
        fn directory(&self) -> &str {
            &self.directory
        }

        fn directory_mut(&mut self) -> &mut String {
            &mut self.directory
        }

        fn version(&self) -> $crate::version::TerraformVersion {
            self.version
        }

        fn set_version(&mut self, version: $crate::version::TerraformVersion) {
            self.version = version;
        }
    };
}

pub mod apply;
pub mod destroy;
pub mod fmt;
pub mod init;
pub mod plan;
pub mod validate;

use std::str::FromStr;

use crate::command::{render, CommandSpec, Flag};
use crate::error::Error;
use crate::version::TerraformVersion;

pub use apply::Apply;
pub use destroy::Destroy;
pub use fmt::Fmt;
pub use init::Init;
pub use plan::Plan;
pub use validate::Validation;

/// The terraform subcommand selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Apply,
    Destroy,
    Fmt,
    Init,
    Plan,
    Validate,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Apply,
        Action::Destroy,
        Action::Fmt,
        Action::Init,
        Action::Plan,
        Action::Validate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Apply => "apply",
            Action::Destroy => "destroy",
            Action::Fmt => "fmt",
            Action::Init => "init",
            Action::Plan => "plan",
            Action::Validate => "validate",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::InvalidAction {
                provided: s.to_string(),
                valid: Action::ALL.map(|a| a.as_str()).join(", "),
            })
    }
}

/// Configuration record for one terraform subcommand.
pub trait ActionConfig {
    const VERB: &'static str;

    fn directory(&self) -> &str;
    fn directory_mut(&mut self) -> &mut String;
    fn version(&self) -> TerraformVersion;
    fn set_version(&mut self, version: TerraformVersion);

    /// Flags in the order terraform receives them.
    fn flags(&self) -> Vec<Flag<'_>>;

    fn command(&self) -> CommandSpec {
        tracing::trace!("creating terraform {} command from plugin configuration", Self::VERB);
        render(Self::VERB, self.directory(), self.version(), &self.flags())
    }

    /// Fill defaults; an unset directory means the current one.
    fn validate(&mut self) -> Result<(), Error> {
        tracing::trace!("validating {} plugin configuration", Self::VERB);

        let dir = self.directory_mut();
        if dir.is_empty() {
            *dir = ".".into();
        }
        if dir.as_str() == "." {
            tracing::warn!("terraform {} will run in current dir", Self::VERB);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_action_from_str_invalid() {
        let err = "teardown".parse::<Action>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid action provided: teardown (Valid actions: apply, destroy, fmt, init, plan, validate)"
        );

        // names are matched exactly
        assert!("Apply".parse::<Action>().is_err());
        assert!("validation".parse::<Action>().is_err());
    }

    #[test]
    fn test_validate_defaults_directory() {
        let mut apply = Apply::default();
        assert_eq!(apply.directory(), "");
        apply.validate().unwrap();
        assert_eq!(apply.directory(), ".");

        let mut plan = Plan { directory: "foobar/".into(), ..Default::default() };
        plan.validate().unwrap();
        assert_eq!(plan.directory(), "foobar/");
    }
}
