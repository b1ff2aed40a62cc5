const TF_VAR: &str = "TF_VAR_";

/// Lower-cased copies of `TF_VAR_*` variables. CI systems tend to only
/// inject upper-case names, while terraform variables are usually declared
/// lower-case.
pub fn lowercase_tf_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| {
            let suffix = name.strip_prefix(TF_VAR)?;
            let lowered = format!("{TF_VAR}{}", suffix.to_lowercase());
            (lowered != name).then_some((lowered, value))
        })
        .collect()
}

/// This process's environment; entries that are not valid UTF-8 are skipped.
pub fn snapshot() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
