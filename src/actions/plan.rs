use std::time::Duration;

use super::ActionConfig;
use crate::command::Flag;
use crate::version::TerraformVersion;

/// Settings for `terraform plan`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    /// generate a plan that destroys every managed resource, "-destroy"
    pub destroy: bool,
    /// return detailed exit codes when the command exits, "-detailed-exitcode"
    pub detailed_exit_code: bool,
    /// terraform file or directory to plan
    pub directory: String,
    /// "-input=true"
    pub input: bool,
    /// "-lock=true"
    pub lock: bool,
    /// "-lock-timeout=0s"
    pub lock_timeout: Duration,
    /// depth of modules to show in the output, "-module-depth=n"
    pub module_depth: i64,
    /// "-no-color"
    pub no_color: bool,
    /// write the plan file to the given path, "-out=path"
    pub out: String,
    /// "-parallelism=n"
    pub parallelism: i64,
    /// "-refresh=true"
    pub refresh: bool,
    /// "-state=path"
    pub state: String,
    /// "-target=resource"
    pub target: String,
    pub vars: Vec<String>,
    pub var_files: Vec<String>,
    pub version: TerraformVersion,
}

impl ActionConfig for Plan {
    const VERB: &'static str = "plan";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Switch("destroy", self.destroy),
            Flag::Switch("detailed-exitcode", self.detailed_exit_code),
            Flag::Enabled("input", self.input),
            Flag::Enabled("lock", self.lock),
            Flag::Timeout("lock-timeout", self.lock_timeout),
            Flag::Count("module-depth", self.module_depth),
            Flag::Switch("no-color", self.no_color),
            Flag::Text("out", &self.out),
            Flag::Count("parallelism", self.parallelism),
            Flag::Enabled("refresh", self.refresh),
            Flag::Text("state", &self.state),
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

    fn full(version: TerraformVersion) -> Plan {
        Plan {
            destroy: true,
            detailed_exit_code: true,
            directory: "foobar/".into(),
            input: true,
            lock: true,
            lock_timeout: Duration::from_secs(1),
            module_depth: 1,
            no_color: true,
            out: "foobar.tfplan".into(),
            parallelism: 1,
            refresh: true,
            state: "state.tf".into(),
            target: "target.tf".into(),
            vars: vec!["foo=bar".into(), "bar=foo".into()],
            var_files: vec!["vars1.tf".into(), "vars2.tf".into()],
            version,
        }
    }

    const FLAGS: [&str; 16] = [
        "-destroy",
        "-detailed-exitcode",
        "-input=true",
        "-lock=true",
        "-lock-timeout=1s",
        "-module-depth=1",
        "-no-color",
        "-out=foobar.tfplan",
        "-parallelism=1",
        "-refresh=true",
        "-state=state.tf",
        "-target=target.tf",
        "-var=foo=bar",
        "-var=bar=foo",
        "-var-file=vars1.tf",
        "-var-file=vars2.tf",
    ];

    #[test]
    fn test_command() {
        let plan = full(TerraformVersion::new(0, 14, 0));

        let mut want = vec![TERRAFORM_BIN, "-chdir=foobar/", "plan"];
        want.extend(FLAGS);
        assert_eq!(plan.command().argv(), want);
    }

    #[test]
    fn test_command_tf13() {
        let plan = full(TerraformVersion::new(0, 13, 5));

        let mut want = vec![TERRAFORM_BIN, "plan"];
        want.extend(FLAGS);
        want.push("foobar/");
        assert_eq!(plan.command().argv(), want);
    }

    #[test]
    fn test_command_var_files_order() {
        let files: Vec<String> = (1..=5).map(|i| format!("env{i}.tfvars")).collect();
        let plan = Plan { directory: ".".into(), var_files: files.clone(), ..Default::default() };

        let got: Vec<String> = plan
            .command()
            .args
            .into_iter()
            .filter(|a| a.starts_with("-var-file="))
            .collect();
        let want: Vec<String> = files.iter().map(|f| format!("-var-file={f}")).collect();
        assert_eq!(got, want);
    }
}
