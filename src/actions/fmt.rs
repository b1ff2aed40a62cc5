use super::ActionConfig;
use crate::command::Flag;
use crate::version::TerraformVersion;

/// Settings for `terraform fmt`.
///
/// `list` and `write` default to true inside terraform, so they are only
/// passed along when turned off; `diff` and `check` only when turned on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fmt {
    /// validate if the input is formatted
    pub check: bool,
    /// display diffs of formatting changes
    pub diff: bool,
    /// terraform file or directory to format
    pub directory: String,
    /// list files whose formatting differs
    pub list: bool,
    /// write result to source file instead of STDOUT
    pub write: bool,
    pub version: TerraformVersion,
}

impl ActionConfig for Fmt {
    const VERB: &'static str = "fmt";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Explicit { name: "list", value: self.list, emit: !self.list },
            Flag::Explicit { name: "write", value: self.write, emit: !self.write },
            Flag::Explicit { name: "diff", value: self.diff, emit: self.diff },
            Flag::Explicit { name: "check", value: self.check, emit: self.check },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TERRAFORM_BIN;

    #[test]
    fn test_command() {
        let fmt = Fmt {
            check: true,
            diff: true,
            directory: "foobar/".into(),
            list: false,
            write: false,
            version: TerraformVersion::new(1, 0, 0),
        };

        assert_eq!(
            fmt.command().argv(),
            vec![TERRAFORM_BIN, "-chdir=foobar/", "fmt", "-list=false", "-write=false", "-diff=true", "-check=true"]
        );
    }

    #[test]
    fn test_command_tf13() {
        let fmt = Fmt {
            check: true,
            diff: true,
            directory: "foobar/".into(),
            list: false,
            write: false,
            version: TerraformVersion::new(0, 13, 0),
        };

        assert_eq!(
            fmt.command().argv(),
            vec![TERRAFORM_BIN, "fmt", "-list=false", "-write=false", "-diff=true", "-check=true", "foobar/"]
        );
    }

    #[test]
    fn test_command_terraform_defaults() {
        let fmt = Fmt { directory: ".".into(), list: true, write: true, ..Default::default() };
        assert_eq!(fmt.command().argv(), vec![TERRAFORM_BIN, "fmt"]);
    }
}
