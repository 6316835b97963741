use std::path::PathBuf;

use tracing::warn;
use tracing_subscriber::EnvFilter;

const UMCI_APPS_CONFIG_ENV_NAME: &str = "UMCI_APPS_CONFIG_PATH";

/// Path of the controller config: `config` if given, otherwise the value of
/// `UMCI_APPS_CONFIG_PATH`.
pub fn get_apps_controller_config(config: Option<PathBuf>) -> Option<PathBuf> {
    config.or_else(|| {
        let path = PathBuf::from(std::env::var_os(UMCI_APPS_CONFIG_ENV_NAME)?);
        warn!("using {} from {UMCI_APPS_CONFIG_ENV_NAME}", path.display());
        Some(path)
    })
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test that touches UMCI_APPS_CONFIG_PATH.
    #[test]
    fn config_path_from_argument_or_env() {
        std::env::remove_var(UMCI_APPS_CONFIG_ENV_NAME);
        assert_eq!(get_apps_controller_config(None), None);
        assert_eq!(
            get_apps_controller_config(Some("motors.toml".into())),
            Some(PathBuf::from("motors.toml"))
        );

        std::env::set_var(UMCI_APPS_CONFIG_ENV_NAME, "from_env.toml");
        assert_eq!(
            get_apps_controller_config(None),
            Some(PathBuf::from("from_env.toml"))
        );
        assert_eq!(
            get_apps_controller_config(Some("motors.toml".into())),
            Some(PathBuf::from("motors.toml"))
        );
        std::env::remove_var(UMCI_APPS_CONFIG_ENV_NAME);
    }
}
