use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser};

use crate::actions::{Apply, Destroy, Fmt, Init, Plan, Validation};
use crate::config::{Config, Netrc};
use crate::duration::parse_duration;
use crate::error::Result;
use crate::plugin::Plugin;
use crate::version::TerraformVersion;

#[derive(Parser, Debug)]
#[command(name = "vela-terraform", version, about = "Vela Terraform plugin for running Terraform")]
pub struct Cli {
    /// Log level - options: (trace|debug|info|warn|error|fatal|panic)
    #[arg(id = "log.level", long = "log.level", env = "PARAMETER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Terraform version to install and run
    #[arg(id = "terraform.version", long = "terraform.version", env = "PARAMETER_VERSION")]
    pub terraform_version: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten, next_help_heading = "Apply")]
    pub apply: ApplyArgs,

    #[command(flatten, next_help_heading = "Destroy")]
    pub destroy: DestroyArgs,

    #[command(flatten, next_help_heading = "Fmt")]
    pub fmt: FmtArgs,

    #[command(flatten, next_help_heading = "Init")]
    pub init: InitArgs,

    #[command(flatten, next_help_heading = "Plan")]
    pub plan: PlanArgs,

    #[command(flatten, next_help_heading = "Validation")]
    pub validation: ValidationArgs,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// The action to have terraform perform
    #[arg(id = "config.action", long = "config.action", env = "PARAMETER_ACTION", default_value = "")]
    pub action: String,

    /// Remote machine name to communicate with
    #[arg(id = "config.netrc.machine", long = "config.netrc.machine", env = "PARAMETER_NETRC_MACHINE", default_value = "")]
    pub netrc_machine: String,

    /// User name for communication with the remote machine
    #[arg(id = "config.netrc.username", long = "config.netrc.username", env = "PARAMETER_NETRC_USERNAME", default_value = "")]
    pub netrc_username: String,

    /// Password for communication with the remote machine
    #[arg(
        id = "config.netrc.password",
        long = "config.netrc.password",
        env = "PARAMETER_NETRC_PASSWORD",
        hide_env_values = true,
        default_value = ""
    )]
    pub netrc_password: String,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Skip interactive approval of running command
    #[arg(id = "apply.auto-approve", long = "apply.auto-approve", env = "PARAMETER_AUTO_APPROVE",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub auto_approve: bool,

    /// Path to backup the existing state file
    #[arg(id = "apply.backup", long = "apply.backup", alias = "apply.back-up", env = "PARAMETER_BACKUP", default_value = "")]
    pub backup: String,

    /// The directory for action to be performed on
    #[arg(id = "apply.directory", long = "apply.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Ask for input for variables if not directly set
    #[arg(id = "apply.input", long = "apply.input", env = "PARAMETER_INPUT",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub input: bool,

    /// Lock the state file when locking is supported
    #[arg(id = "apply.lock", long = "apply.lock", env = "PARAMETER_LOCK",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub lock: bool,

    /// Duration to retry a state lock
    #[arg(id = "apply.lock-timeout", long = "apply.lock-timeout", env = "PARAMETER_LOCK_TIMEOUT",
        default_value = "0s", value_parser = parse_duration)]
    pub lock_timeout: Duration,

    /// Disables colors in output
    #[arg(id = "apply.no-color", long = "apply.no-color", env = "PARAMETER_NO_COLOR",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub no_color: bool,

    /// Number of concurrent operations as Terraform walks its graph
    #[arg(id = "apply.parallelism", long = "apply.parallelism", env = "PARAMETER_PARALLELISM",
        default_value_t = 0, allow_negative_numbers = true)]
    pub parallelism: i64,

    /// Update state prior to checking for differences
    #[arg(id = "apply.refresh", long = "apply.refresh", env = "PARAMETER_REFRESH",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub refresh: bool,

    /// Path to read and save state
    #[arg(id = "apply.state", long = "apply.state", env = "PARAMETER_STATE", default_value = "")]
    pub state: String,

    /// Path to write updated state file
    #[arg(id = "apply.state-out", long = "apply.state-out", env = "PARAMETER_STATE_OUT", default_value = "")]
    pub state_out: String,

    /// Resource to target
    #[arg(id = "apply.target", long = "apply.target", env = "PARAMETER_TARGET", default_value = "")]
    pub target: String,

    /// Variables to pass to terraform (`<key>=<value>`)
    #[arg(id = "apply.vars", long = "apply.vars", env = "PARAMETER_VARS", value_delimiter = ',')]
    pub vars: Vec<String>,

    /// Var files to use
    #[arg(id = "apply.var-files", long = "apply.var-files", env = "PARAMETER_VAR_FILES", value_delimiter = ',')]
    pub var_files: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// Skip interactive approval of running command
    #[arg(id = "destroy.auto-approve", long = "destroy.auto-approve", env = "PARAMETER_AUTO_APPROVE",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub auto_approve: bool,

    /// Path to backup the existing state file
    #[arg(id = "destroy.backup", long = "destroy.backup", alias = "destroy.back-up", env = "PARAMETER_BACKUP", default_value = "")]
    pub backup: String,

    /// The directory for action to be performed on
    #[arg(id = "destroy.directory", long = "destroy.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Lock the state file when locking is supported
    #[arg(id = "destroy.lock", long = "destroy.lock", env = "PARAMETER_LOCK",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub lock: bool,

    /// Duration to retry a state lock
    #[arg(id = "destroy.lock-timeout", long = "destroy.lock-timeout", env = "PARAMETER_LOCK_TIMEOUT",
        default_value = "0s", value_parser = parse_duration)]
    pub lock_timeout: Duration,

    /// Disables colors in output
    #[arg(id = "destroy.no-color", long = "destroy.no-color", env = "PARAMETER_NO_COLOR",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub no_color: bool,

    /// Number of concurrent operations as Terraform walks its graph
    #[arg(id = "destroy.parallelism", long = "destroy.parallelism", env = "PARAMETER_PARALLELISM",
        default_value_t = 0, allow_negative_numbers = true)]
    pub parallelism: i64,

    /// Update state prior to checking for differences
    #[arg(id = "destroy.refresh", long = "destroy.refresh", env = "PARAMETER_REFRESH",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub refresh: bool,

    /// Path to read and save state
    #[arg(id = "destroy.state", long = "destroy.state", env = "PARAMETER_STATE", default_value = "")]
    pub state: String,

    /// Path to write updated state file
    #[arg(id = "destroy.state-out", long = "destroy.state-out", env = "PARAMETER_STATE_OUT", default_value = "")]
    pub state_out: String,

    /// Resource to target
    #[arg(id = "destroy.target", long = "destroy.target", env = "PARAMETER_TARGET", default_value = "")]
    pub target: String,

    /// Variables to pass to terraform (`<key>=<value>`)
    #[arg(id = "destroy.vars", long = "destroy.vars", env = "PARAMETER_VARS", value_delimiter = ',')]
    pub vars: Vec<String>,

    /// Var files to use
    #[arg(id = "destroy.var-files", long = "destroy.var-files", env = "PARAMETER_VAR_FILES", value_delimiter = ',')]
    pub var_files: Vec<String>,
}

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Validate if the input is formatted
    #[arg(id = "fmt.check", long = "fmt.check", env = "PARAMETER_CHECK",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub check: bool,

    /// Diffs of formatting changes
    #[arg(id = "fmt.diff", long = "fmt.diff", env = "PARAMETER_DIFF",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub diff: bool,

    /// The directory for action to be performed on
    #[arg(id = "fmt.directory", long = "fmt.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// List files whose formatting differs
    #[arg(id = "fmt.list", long = "fmt.list", env = "PARAMETER_LIST",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub list: bool,

    /// Write result to source file instead of STDOUT
    #[arg(id = "fmt.write", long = "fmt.write", env = "PARAMETER_WRITE",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub write: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// The directory for action to be performed on
    #[arg(id = "init.directory", long = "init.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Properties to set on terraform init action, as JSON
    #[arg(id = "init.options", long = "init.options", env = "PARAMETER_INIT_OPTIONS", default_value = "")]
    pub options: String,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Destroy all resources managed by the given configuration and state
    #[arg(id = "plan.destroy", long = "plan.destroy", env = "PARAMETER_DESTROY",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub destroy: bool,

    /// Return detailed exit codes when the command exits
    #[arg(id = "plan.detailed-exit-code", long = "plan.detailed-exit-code", env = "PARAMETER_DETAILED_EXIT_CODE",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub detailed_exit_code: bool,

    /// The directory for action to be performed on
    #[arg(id = "plan.directory", long = "plan.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Ask for input for variables if not directly set
    #[arg(id = "plan.input", long = "plan.input", env = "PARAMETER_INPUT",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub input: bool,

    /// Lock the state file when locking is supported
    #[arg(id = "plan.lock", long = "plan.lock", env = "PARAMETER_LOCK",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub lock: bool,

    /// Duration to retry a state lock
    #[arg(id = "plan.lock-timeout", long = "plan.lock-timeout", env = "PARAMETER_LOCK_TIMEOUT",
        default_value = "0s", value_parser = parse_duration)]
    pub lock_timeout: Duration,

    /// Depth of modules to show in the output
    #[arg(id = "plan.module-depth", long = "plan.module-depth", env = "PARAMETER_MODULE_DEPTH",
        default_value_t = 0, allow_negative_numbers = true)]
    pub module_depth: i64,

    /// Disables colors in output
    #[arg(id = "plan.no-color", long = "plan.no-color", env = "PARAMETER_NO_COLOR",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub no_color: bool,

    /// Path to write the plan to
    #[arg(id = "plan.out", long = "plan.out", env = "PARAMETER_OUT", default_value = "")]
    pub out: String,

    /// Number of concurrent operations as Terraform walks its graph
    #[arg(id = "plan.parallelism", long = "plan.parallelism", env = "PARAMETER_PARALLELISM",
        default_value_t = 0, allow_negative_numbers = true)]
    pub parallelism: i64,

    /// Update state prior to checking for differences
    #[arg(id = "plan.refresh", long = "plan.refresh", env = "PARAMETER_REFRESH",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub refresh: bool,

    /// Path to read and save state
    #[arg(id = "plan.state", long = "plan.state", env = "PARAMETER_STATE", default_value = "")]
    pub state: String,

    /// Resource to target
    #[arg(id = "plan.target", long = "plan.target", env = "PARAMETER_TARGET", default_value = "")]
    pub target: String,

    /// Variables to pass to terraform (`<key>=<value>`)
    #[arg(id = "plan.vars", long = "plan.vars", env = "PARAMETER_VARS", value_delimiter = ',')]
    pub vars: Vec<String>,

    /// Var files to use
    #[arg(id = "plan.var-files", long = "plan.var-files", env = "PARAMETER_VAR_FILES", value_delimiter = ',')]
    pub var_files: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ValidationArgs {
    /// Check whether all required variables have been specified
    #[arg(id = "validation.check-variables", long = "validation.check-variables", env = "PARAMETER_CHECK_VARIABLES",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub check_variables: bool,

    /// The directory for action to be performed on
    #[arg(id = "validation.directory", long = "validation.directory", env = "PARAMETER_DIRECTORY", default_value = ".")]
    pub directory: String,

    /// Disables colors in output
    #[arg(id = "validation.no-color", long = "validation.no-color", env = "PARAMETER_NO_COLOR",
        action = ArgAction::Set, num_args = 0..=1, default_value_t = false, default_missing_value = "true",
        value_parser = BoolishValueParser::new())]
    pub no_color: bool,

    /// Variables to pass to terraform (`<key>=<value>`)
    #[arg(id = "validation.vars", long = "validation.vars", env = "PARAMETER_VARS", value_delimiter = ',')]
    pub vars: Vec<String>,

    /// Var files to use
    #[arg(id = "validation.var-files", long = "validation.var-files", env = "PARAMETER_VAR_FILES", value_delimiter = ',')]
    pub var_files: Vec<String>,
}

/// `EnvFilter` directive for a `log.level` setting. Unknown levels fall back
/// to info.
pub fn log_filter(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "t" | "trace" => "trace",
        "d" | "debug" => "debug",
        "w" | "warn" => "warn",
        "e" | "error" | "f" | "fatal" | "p" | "panic" => "error",
        _ => "info",
    }
}

impl Cli {
    /// The pinned version when one was requested, else the image default.
    /// `None` leaves detection to `terraform version`.
    pub fn resolve_version(&self, image_default: Option<&str>) -> Result<Option<TerraformVersion>> {
        self.terraform_version
            .as_deref()
            .or(image_default)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::parse::<TerraformVersion>)
            .transpose()
    }

    pub fn into_plugin(self, version: Option<TerraformVersion>) -> Plugin {
        let version_or_default = version.unwrap_or_default();
        Plugin {
            apply: Apply {
                auto_approve: self.apply.auto_approve,
                backup: self.apply.backup,
                directory: self.apply.directory,
                input: self.apply.input,
                lock: self.apply.lock,
                lock_timeout: self.apply.lock_timeout,
                no_color: self.apply.no_color,
                parallelism: self.apply.parallelism,
                refresh: self.apply.refresh,
                state: self.apply.state,
                state_out: self.apply.state_out,
                target: self.apply.target,
                vars: self.apply.vars,
                var_files: self.apply.var_files,
                version: version_or_default,
            },
            config: Config {
                action: self.config.action,
                netrc: Netrc {
                    machine: self.config.netrc_machine,
                    login: self.config.netrc_username,
                    password: self.config.netrc_password,
                },
            },
            destroy: Destroy {
                auto_approve: self.destroy.auto_approve,
                backup: self.destroy.backup,
                directory: self.destroy.directory,
                lock: self.destroy.lock,
                lock_timeout: self.destroy.lock_timeout,
                no_color: self.destroy.no_color,
                parallelism: self.destroy.parallelism,
                refresh: self.destroy.refresh,
                state: self.destroy.state,
                state_out: self.destroy.state_out,
                target: self.destroy.target,
                vars: self.destroy.vars,
                var_files: self.destroy.var_files,
                version: version_or_default,
            },
            fmt: Fmt {
                check: self.fmt.check,
                diff: self.fmt.diff,
                directory: self.fmt.directory,
                list: self.fmt.list,
                write: self.fmt.write,
                version: version_or_default,
            },
            init: Init {
                directory: self.init.directory,
                raw_options: self.init.options,
                version: version_or_default,
                ..Default::default()
            },
            plan: Plan {
                destroy: self.plan.destroy,
                detailed_exit_code: self.plan.detailed_exit_code,
                directory: self.plan.directory,
                input: self.plan.input,
                lock: self.plan.lock,
                lock_timeout: self.plan.lock_timeout,
                module_depth: self.plan.module_depth,
                no_color: self.plan.no_color,
                out: self.plan.out,
                parallelism: self.plan.parallelism,
                refresh: self.plan.refresh,
                state: self.plan.state,
                target: self.plan.target,
                vars: self.plan.vars,
                var_files: self.plan.var_files,
                version: version_or_default,
            },
            validation: Validation {
                check_variables: self.validation.check_variables,
                directory: self.validation.directory,
                no_color: self.validation.no_color,
                vars: self.validation.vars,
                var_files: self.validation.var_files,
                version: version_or_default,
            },
            version,
        }
    }
}
