//! `modula env`: print the environment context every module is assembled
//! against.

use modula_core::domain::{CI_SIGNAL_VAR, EnvironmentContext, SettingValue, SettingsDictionary};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let env = config.environment_context();

    if output.is_json() {
        output.emit_json(&env)?;
        return Ok(());
    }

    for line in describe(&env) {
        output.emit(&line)?;
    }
    Ok(())
}

fn describe(env: &EnvironmentContext) -> Vec<String> {
    let targets = env.deployment_targets();
    let versions: Vec<String> = [
        ("ios", &targets.ios),
        ("macos", &targets.macos),
        ("visionos", &targets.visionos),
    ]
    .into_iter()
    .filter_map(|(os, v)| v.as_ref().map(|v| format!("{os} {v}")))
    .collect();

    let destinations: Vec<&str> = env.destinations().iter().map(|d| d.as_str()).collect();

    let mut lines = vec![
        format!("organization:       {}", env.organization()),
        format!("deployment targets: {}", versions.join(", ")),
        format!("destinations:       {}", destinations.join(", ")),
        format!(
            "ci:                 {} ({CI_SIGNAL_VAR})",
            if env.is_ci() { "yes" } else { "no" }
        ),
        format!(
            "lint script:        {}",
            env.lint_script().map_or("-", |s| s.name.as_str())
        ),
    ];
    lines.extend(settings_block("base settings", env.base_settings()));
    lines.extend(settings_block("code signing", env.code_sign_settings()));
    lines
}

fn settings_block(title: &str, settings: &SettingsDictionary) -> Vec<String> {
    let mut lines = vec![format!("{title}:")];
    lines.extend(settings.iter().map(|(key, value)| match value {
        SettingValue::String(s) => format!("  {key} = {s:?}"),
        SettingValue::Array(items) => format!("  {key} = {items:?}"),
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_defaults() {
        let env = AppConfig::default().environment_context_with(None);
        let lines = describe(&env);

        assert_eq!(lines[0], "organization:       io.modula");
        assert!(lines.contains(&"deployment targets: ios 16.0".to_string()));
        assert!(lines.contains(&"destinations:       iphone, ipad".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("ci:                 no")));
        assert!(lines.contains(&"  SWIFT_VERSION = \"5.9\"".to_string()));
    }

    #[test]
    fn reports_ci_and_missing_lint() {
        let mut config = AppConfig::default();
        config.environment.lint_enabled = false;
        let lines = describe(&config.environment_context_with(Some("1")));

        assert!(lines.iter().any(|l| l.starts_with("ci:                 yes")));
        assert!(lines.contains(&"lint script:        -".to_string()));
    }
}
