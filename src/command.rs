use std::fmt;
use std::time::Duration;

use crate::duration::format_duration;
use crate::version::TerraformVersion;

/// Location of the terraform binary inside the plugin image.
pub const TERRAFORM_BIN: &str = "/bin/terraform";

/// A fully rendered external command: program, ordered arguments and any
/// extra environment for the child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), envs: Vec::new() }
    }

    pub fn terraform(args: Vec<String>) -> Self {
        Self { args, ..Self::new(TERRAFORM_BIN) }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_envs(mut self, envs: Vec<(String, String)>) -> Self {
        self.envs = envs;
        self
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// One entry of an action's flag table.
#[derive(Debug, Clone)]
pub enum Flag<'a> {
    /// `-name` when set.
    Switch(&'static str, bool),
    /// `-name=true` when set.
    Enabled(&'static str, bool),
    /// `-name=<value>` whenever `emit` holds, value rendered as `true`/`false`.
    Explicit { name: &'static str, value: bool, emit: bool },
    /// Fixed text emitted when set.
    Literal(&'static str, bool),
    /// `-name=<value>` when non-empty.
    Text(&'static str, &'a str),
    /// `-name=<n>` when non-zero; negative values go to terraform as-is.
    Count(&'static str, i64),
    /// `-name=<duration>` when non-zero.
    Timeout(&'static str, Duration),
    /// One `-name=<value>` per element, in order.
    Repeated(&'static str, &'a [String]),
}

impl Flag<'_> {
    fn render(&self, out: &mut Vec<String>) {
        match *self {
            Flag::Switch(name, true) => out.push(format!("-{name}")),
            Flag::Enabled(name, true) => out.push(format!("-{name}=true")),
            Flag::Explicit { name, value, emit: true } => out.push(format!("-{name}={value}")),
            Flag::Literal(text, true) => out.push(text.to_string()),
            Flag::Text(name, value) if !value.is_empty() => out.push(format!("-{name}={value}")),
            Flag::Count(name, n) if n != 0 => out.push(format!("-{name}={n}")),
            Flag::Timeout(name, d) if !d.is_zero() => {
                out.push(format!("-{name}={}", format_duration(d)))
            }
            Flag::Repeated(name, values) => {
                out.extend(values.iter().map(|v| format!("-{name}={v}")))
            }
            _ => {}
        }
    }
}

/// Render `terraform [-chdir=<dir>] <verb> [flags...] [<dir>]`.
///
/// A non-default directory becomes the global `-chdir` flag ahead of the
/// verb when the release supports it, otherwise a trailing positional
/// argument.
pub fn render(verb: &str, directory: &str, version: TerraformVersion, flags: &[Flag<'_>]) -> CommandSpec {
    tracing::trace!("rendering terraform {} command", verb);

    let custom_dir = directory != ".";
    let mut args = Vec::new();

    if custom_dir && version.supports_chdir() {
        args.push(format!("-chdir={directory}"));
    }

    args.push(verb.to_string());

    for flag in flags {
        flag.render(&mut args);
    }

    if custom_dir && !version.supports_chdir() {
        args.push(directory.to_string());
    }

    CommandSpec::terraform(args)
}

/// `terraform version`, printed for troubleshooting and used to detect the
/// installed release.
pub fn version_command() -> CommandSpec {
    tracing::trace!("creating terraform version command");
    CommandSpec::new(TERRAFORM_BIN).arg("version")
}

/// `terraform get`, fetching the modules of the working directory.
pub fn get_command(directory: &str, version: TerraformVersion) -> CommandSpec {
    tracing::trace!("creating terraform get command");
    render("get", directory, version, &[])
}
