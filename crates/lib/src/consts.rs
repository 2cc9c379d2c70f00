/// Application name, used for configuration directories.
pub const APP_NAME: &str = "wifi";

/// File name of the registry looked up in the configuration directory.
pub const REGISTRY_FILENAME: &str = "extras.json";

/// Environment variable naming a registry file.
pub const REGISTRY_ENV: &str = "WIFI_EXTRAS_REGISTRY";

/// Environment variable naming the directory extras sources are read from.
pub const SOURCE_ROOT_ENV: &str = "WIFI_EXTRAS_SOURCE_ROOT";
