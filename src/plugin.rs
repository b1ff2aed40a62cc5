use std::path::PathBuf;

use crate::actions::{Action, ActionConfig, Apply, Destroy, Fmt, Init, Plan, Validation};
use crate::command::{get_command, version_command};
use crate::config::Config;
use crate::env::lowercase_tf_vars;
use crate::error::Result;
use crate::fs::Filesystem;
use crate::runner::CommandRunner;
use crate::version::TerraformVersion;

/// Everything loaded for one plugin run.
#[derive(Debug, Clone, Default)]
pub struct Plugin {
    pub apply: Apply,
    pub config: Config,
    pub destroy: Destroy,
    pub fmt: Fmt,
    pub init: Init,
    pub plan: Plan,
    pub validation: Validation,
    /// Release being driven; detected from `terraform version` when unset.
    pub version: Option<TerraformVersion>,
}

/// Collaborators a run talks to.
pub struct Runtime<'a> {
    pub runner: &'a dyn CommandRunner,
    pub fs: &'a dyn Filesystem,
    pub netrc: PathBuf,
    /// snapshot of the process environment
    pub env: Vec<(String, String)>,
}

impl Plugin {
    /// Check the run-wide config, then init (which always runs), then the
    /// selected action.
    pub fn validate(&mut self) -> Result<()> {
        tracing::debug!("validating plugin configuration");

        self.config.validate()?;
        let action: Action = self.config.action.parse()?;

        self.init.unmarshal()?;
        self.init.validate()?;

        match action {
            Action::Apply => self.apply.validate(),
            Action::Destroy => self.destroy.validate(),
            Action::Fmt => self.fmt.validate(),
            Action::Init => Ok(()),
            Action::Plan => self.plan.validate(),
            Action::Validate => self.validation.validate(),
        }
    }

    /// Write credentials, report the terraform version, init, fetch modules
    /// and then run the selected action. Any failure ends the run.
    pub async fn exec(&mut self, rt: &Runtime<'_>) -> Result<()> {
        tracing::debug!("running plugin with provided configuration");

        let action: Action = self.config.action.parse()?;

        self.config.write(rt.fs, &rt.netrc)?;

        let output = rt.runner.output(&version_command()).await?;
        print!("{output}");
        let version = match self.version {
            Some(version) => version,
            None => TerraformVersion::from_version_output(&output)?,
        };
        tracing::debug!("using terraform {}", version);
        self.set_version(version);

        rt.runner.run(&self.init.command()).await?;
        rt.runner.run(&get_command(&self.init.directory, version)).await?;

        let tf_vars = lowercase_tf_vars(rt.env.iter().cloned());

        let spec = match action {
            Action::Apply => self.apply.command(),
            Action::Destroy => self.destroy.command(),
            Action::Fmt => self.fmt.command(),
            Action::Init => self.init.command(),
            Action::Plan => self.plan.command(),
            Action::Validate => self.validation.command(),
        };
        rt.runner.run(&spec.with_envs(tf_vars)).await
    }

    fn set_version(&mut self, version: TerraformVersion) {
        self.version = Some(version);
        self.apply.set_version(version);
        self.destroy.set_version(version);
        self.fmt.set_version(version);
        self.init.set_version(version);
        self.plan.set_version(version);
        self.validation.set_version(version);
    }
}
