//! Settings that clap cannot read on its own: alias environment variables
//! and the parameter/secret files Vela mounts into the container.
//!
//! Each source found becomes the argument's default, so the command line
//! and the primary `PARAMETER_*` variable still take precedence.

use std::path::Path;

use clap::Command;

const PARAMETERS: &str = "/vela/parameters/terraform";
const SECRETS: &str = "/vela/secrets/terraform";

/// Extra environment variables accepted per flag, in order of preference.
const ALIASES: &[(&str, &[&str])] = &[
    ("log.level", &["VELA_LOG_LEVEL", "KUBERNETES_LOG_LEVEL"]),
    ("terraform.version", &["VELA_TERRAFORM_VERSION", "TERRAFORM_VERSION"]),
    ("config.netrc.machine", &["VELA_NETRC_MACHINE"]),
    ("config.netrc.username", &["VELA_NETRC_USERNAME", "GIT_USERNAME"]),
    ("config.netrc.password", &["VELA_NETRC_PASSWORD", "GIT_PASSWORD"]),
    ("apply.backup", &["PARAMETER_BACK_UP"]),
    ("destroy.backup", &["PARAMETER_BACK_UP"]),
];

pub trait Lookup {
    fn var(&self, name: &str) -> Option<String>;
    fn read(&self, path: &Path) -> Option<String>;
}

/// The real environment and filesystem.
pub struct System;

impl Lookup for System {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn read(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// Path of a flag's file below the parameter and secret roots,
/// e.g. `apply.lock-timeout` is read from `apply/lock_timeout`.
pub fn file_key(long: &str) -> String {
    match long {
        "log.level" => "log_level".into(),
        "terraform.version" => "version".into(),
        "apply.backup" => "apply/back_up".into(),
        "destroy.backup" => "destroy/back_up".into(),
        _ => long.replace('.', "/").replace('-', "_"),
    }
}

/// First value for `long` among its aliases, then the parameter file, then
/// the secret file.
pub fn resolve(long: &str, lookup: &dyn Lookup) -> Option<String> {
    let aliases = ALIASES
        .iter()
        .find(|(flag, _)| *flag == long)
        .map_or(&[][..], |(_, names)| *names);

    if let Some(value) = aliases.iter().find_map(|name| lookup.var(name)) {
        return Some(value);
    }

    let key = file_key(long);
    [PARAMETERS, SECRETS].iter().find_map(|root| {
        let value = lookup.read(&Path::new(root).join(&key))?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Install every resolvable fallback as its argument's default value.
pub fn with_fallbacks(mut cmd: Command, lookup: &dyn Lookup) -> Command {
    let args: Vec<(String, String, bool)> = cmd
        .get_arguments()
        .filter_map(|arg| {
            let long = arg.get_long().filter(|l| l.contains('.'))?;
            Some((arg.get_id().to_string(), long.to_string(), arg.get_value_delimiter().is_some()))
        })
        .collect();

    for (id, long, is_list) in args {
        let Some(value) = resolve(&long, lookup) else {
            continue;
        };
        cmd = cmd.mut_arg(id, move |arg| {
            if is_list {
                let values: Vec<String> = value.split(',').map(str::to_string).collect();
                arg.default_values(values)
            } else {
                arg.default_value(value)
            }
        });
    }
    cmd
}
