use super::ActionConfig;
use crate::command::Flag;
use crate::version::TerraformVersion;

/// Settings for `terraform validate`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    /// check that all required variables have been specified,
    /// "-check-variables=true"; only passed when enabled
    pub check_variables: bool,
    /// terraform file or directory to validate
    pub directory: String,
    /// "-no-color"
    pub no_color: bool,
    pub vars: Vec<String>,
    pub var_files: Vec<String>,
    pub version: TerraformVersion,
}

impl ActionConfig for Validation {
    const VERB: &'static str = "validate";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Explicit {
                name: "check-variables",
                value: self.check_variables,
                emit: self.check_variables,
            },
            Flag::Switch("no-color", self.no_color),
            Flag::Repeated("var", &self.vars),
            Flag::Repeated("var-file", &self.var_files),
        ]
    }
}
