use std::time::Duration;

use super::ActionConfig;
use crate::command::Flag;
use crate::version::TerraformVersion;

/// Settings for `terraform destroy`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Destroy {
    /// skip interactive approval before destroying, "-auto-approve"
    pub auto_approve: bool,
    /// path to backup the existing state file before modifying, "-backup=path"
    pub backup: String,
    /// terraform file or directory to destroy
    pub directory: String,
    /// "-lock=true"
    pub lock: bool,
    /// "-lock-timeout=0s"
    pub lock_timeout: Duration,
    /// "-no-color"
    pub no_color: bool,
    /// "-parallelism=n"
    pub parallelism: i64,
    /// "-refresh=true"
    pub refresh: bool,
    /// "-state=path"
    pub state: String,
    /// "-state-out=path"
    pub state_out: String,
    /// "-target=resource"
    pub target: String,
    pub vars: Vec<String>,
    pub var_files: Vec<String>,
    pub version: TerraformVersion,
}

impl ActionConfig for Destroy {
    const VERB: &'static str = "destroy";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Switch("auto-approve", self.auto_approve),
            Flag::Text("backup", &self.backup),
            Flag::Enabled("lock", self.lock),
            Flag::Timeout("lock-timeout", self.lock_timeout),
            Flag::Switch("no-color", self.no_color),
            Flag::Count("parallelism", self.parallelism),
            Flag::Enabled("refresh", self.refresh),
            Flag::Text("state", &self.state),
            Flag::Text("state-out", &self.state_out),
            Flag::Text("target", &self.target),
            Flag::Repeated("var", &self.vars),
            Flag::Repeated("var-file", &self.var_files),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TERRAFORM_BIN;

    fn full(version: TerraformVersion) -> Destroy {
        Destroy {
            auto_approve: true,
            backup: "backup/".into(),
            directory: "foobar/".into(),
            lock: true,
            lock_timeout: Duration::from_secs(1),
            no_color: true,
            parallelism: 1,
            refresh: true,
            state: "state.tf".into(),
            state_out: "stateout.tf".into(),
            target: "target.tf".into(),
            vars: vec!["foo=bar".into(), "bar=foo".into()],
            var_files: vec!["vars1.tf".into(), "vars2.tf".into()],
            version,
        }
    }

    #[test]
    fn test_command() {
        let destroy = full(TerraformVersion::new(1, 0, 0));
        assert_eq!(
            destroy.command().argv(),
            vec![
                TERRAFORM_BIN,
                "-chdir=foobar/",
                "destroy",
                "-auto-approve",
                "-backup=backup/",
                "-lock=true",
                "-lock-timeout=1s",
                "-no-color",
                "-parallelism=1",
                "-refresh=true",
                "-state=state.tf",
                "-state-out=stateout.tf",
                "-target=target.tf",
                "-var=foo=bar",
                "-var=bar=foo",
                "-var-file=vars1.tf",
                "-var-file=vars2.tf",
            ]
        );
    }

    #[test]
    fn test_command_tf13() {
        let destroy = full(TerraformVersion::new(0, 13, 0));
        let spec = destroy.command();
        let argv = spec.argv();

        assert_eq!(argv[1], "destroy");
        assert_eq!(argv.last(), Some(&"foobar/"));
        assert!(!argv.iter().any(|a| a.starts_with("-chdir=")));
        // apply-only flag never shows up
        assert!(!argv.contains(&"-input=true"));
    }

    #[test]
    fn test_command_defaults() {
        let destroy = Destroy { directory: ".".into(), ..Default::default() };
        assert_eq!(destroy.command().argv(), vec![TERRAFORM_BIN, "destroy"]);
    }
}
