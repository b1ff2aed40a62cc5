use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ActionConfig;
use crate::command::Flag;
use crate::error::Error;
use crate::version::TerraformVersion;

/// Flags for `terraform init`, supplied as one raw JSON document.
///
/// Keys match case-insensitively and ignore underscores, so `BackendConfigs`,
/// `backendconfigs` and `backend_configs` all fill `backend_configs`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InitOptions {
    /// configure the backend for this configuration, "-backend=true"
    pub backend: bool,
    /// merged with what is in the configuration file, "-backend-config=path"
    #[serde(rename = "backendconfigs")]
    pub backend_configs: Vec<String>,
    /// suppress prompts about copying state data, "-force-copy"
    #[serde(rename = "forcecopy")]
    pub force_copy: bool,
    /// copy the given module into the target directory first, "-from-module=SOURCE"
    #[serde(rename = "frommodule")]
    pub from_module: String,
    /// download any modules for this configuration, "-get=true"
    pub get: bool,
    /// download any missing plugins, "-get-plugins=true"
    #[serde(rename = "getplugins")]
    pub get_plugins: bool,
    pub input: bool,
    pub lock: bool,
    #[serde(rename = "locktimeout", deserialize_with = "crate::duration::deserialize")]
    pub lock_timeout: Duration,
    #[serde(rename = "nocolor")]
    pub no_color: bool,
    /// directories containing plugin binaries, "-plugin-dir=path"
    #[serde(rename = "plugindirs")]
    pub plugin_dirs: Vec<String>,
    /// reconfigure the backend, ignoring any saved configuration, "-reconfigure"
    pub reconfigure: bool,
    /// "-upgrade=false"
    pub upgrade: bool,
    /// verify downloaded plugins, "-verify-plugins=true"
    #[serde(rename = "verifyplugins")]
    pub verify_plugins: bool,
}

const OPTION_KEYS: &[&str] = &[
    "backend",
    "backendconfigs",
    "forcecopy",
    "frommodule",
    "get",
    "getplugins",
    "input",
    "lock",
    "locktimeout",
    "nocolor",
    "plugindirs",
    "reconfigure",
    "upgrade",
    "verifyplugins",
];

/// Fold object keys to the lowercase, underscore-free form `InitOptions`
/// is declared with.
fn normalize_keys(value: Value) -> Value {
    let map = match value {
        Value::Object(map) => map,
        other => return other,
    };
    let map: Map<String, Value> = map
        .into_iter()
        .map(|(key, v)| {
            let folded = key.replace('_', "").to_ascii_lowercase();
            if !OPTION_KEYS.contains(&folded.as_str()) {
                tracing::warn!("ignoring unknown init option {:?}", key);
            }
            (folded, v)
        })
        .collect();
    Value::Object(map)
}

/// Settings for `terraform init`, which runs ahead of every action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Init {
    /// terraform file or directory to initialize
    pub directory: String,
    pub options: InitOptions,
    /// raw JSON for `options`, as provided to the plugin
    pub raw_options: String,
    pub version: TerraformVersion,
}

impl Init {
    /// Deserialize `raw_options` into `options`. Blank input leaves every
    /// option at its default.
    pub fn unmarshal(&mut self) -> Result<(), Error> {
        tracing::trace!("unmarshaling init options");

        let raw = self.raw_options.trim();
        self.options = if raw.is_empty() {
            InitOptions::default()
        } else {
            let value: Value = serde_json::from_str(raw)?;
            serde_json::from_value(normalize_keys(value))?
        };
        Ok(())
    }
}

impl ActionConfig for Init {
    const VERB: &'static str = "init";

    action_common!();

    fn flags(&self) -> Vec<Flag<'_>> {
        let o = &self.options;
        vec![
            Flag::Enabled("backend", o.backend),
            Flag::Repeated("backend-config", &o.backend_configs),
            Flag::Switch("force-copy", o.force_copy),
            Flag::Text("from-module", &o.from_module),
            Flag::Enabled("get", o.get),
            Flag::Enabled("get-plugins", o.get_plugins),
            Flag::Enabled("input", o.input),
            Flag::Enabled("lock", o.lock),
            Flag::Timeout("lock-timeout", o.lock_timeout),
            Flag::Switch("no-color", o.no_color),
            Flag::Repeated("plugin-dir", &o.plugin_dirs),
            Flag::Switch("reconfigure", o.reconfigure),
            // TODO: confirm with plugin owners whether upgrade should render its
            // configured value; every release so far has sent the literal below.
            Flag::Literal("-upgrade=false", o.upgrade),
            Flag::Enabled("verify-plugins", o.verify_plugins),
        ]
    }
}
