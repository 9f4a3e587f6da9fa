/// Project configuration file looked up at the project root.
pub const CONFIG_FILENAME: &str = "cartridge.json";

/// Environment variable overriding the project root.
pub const ROOT_ENV_VAR: &str = "CARTRIDGE_ROOT";

/// Directory under the project root that holds one directory per cartridge.
pub const CARTRIDGES_DIR: &str = "cartridges";

pub const DEFAULT_MAIN_ENTRY_NAME: &str = "main";
pub const DEFAULT_MAIN_FILES: &[&str] = &["main.js", "main.scss"];
pub const DEFAULT_SEARCH_DIRECTORY: &str = "node_modules";

/// Locale whose sources back the per-cartridge import aliases.
pub const DEFAULT_LOCALE: &str = "default";

pub const PLAN_HASH_PREFIX_LEN: usize = 20;
