use std::time::Duration;

use super::ActionConfig;
use crate::command::Flag;
use crate::version::TerraformVersion;

/// Settings for `terraform apply`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Apply {
    /// skip interactive approval of plan before applying, "-auto-approve"
    pub auto_approve: bool,
    /// path to backup the existing state file before modifying, "-backup=path"
    pub backup: String,
    /// terraform file or directory to apply
    pub directory: String,
    /// ask for input for variables if not directly set, "-input=true"
    pub input: bool,
    /// lock the state file when locking is supported, "-lock=true"
    pub lock: bool,
    /// duration to retry a state lock, "-lock-timeout=0s"
    pub lock_timeout: Duration,
    /// "-no-color"
    pub no_color: bool,
    /// limit the number of parallel resource operations, "-parallelism=n"
    pub parallelism: i64,
    /// update state prior to checking for differences, "-refresh=true"
    pub refresh: bool,
    /// path to read and save state, "-state=path"
    pub state: String,
    /// path to write state to that is different than state, "-state-out=path"
    pub state_out: String,
    /// resource to target, "-target=resource"
    pub target: String,
    /// variable assignments, one "-var=foo=bar" each
    pub vars: Vec<String>,
    /// variable files, one "-var-file=foo" each
    pub var_files: Vec<String>,
    pub version: TerraformVersion,
}

impl ActionConfig for Apply {
    const VERB: &'static str = "apply";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Switch("auto-approve", self.auto_approve),
            Flag::Text("backup", &self.backup),
            Flag::Enabled("lock", self.lock),
            Flag::Timeout("lock-timeout", self.lock_timeout),
            Flag::Enabled("input", self.input),
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
