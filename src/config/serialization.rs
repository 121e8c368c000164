//! Config serialization to TOML
//!
//! Single source of truth for the config file format: `ensure_config_exists`
//! and `config --reset` both write `Config::default().to_toml()`.

use super::Config;

impl Config {
    /// Render the full config file, including commented guidance
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# mapctl configuration\n");
        output.push_str("#\n");
        output.push_str("# Precedence: environment variables > this file > built-in defaults\n");
        output.push_str("# Env: MAPCTL_BACKEND_URL, MAPCTL_TIMEOUT_SECS, MAPCTL_DATASOURCE_ID,\n");
        output.push_str("#      MAPCTL_NO_TUI, MAPCTL_DEMO\n\n");

        output.push_str("# Analytics backend base URL\n");
        output.push_str(&format!("backend_url = {:?}\n", self.backend_url));
        output.push_str("# Value lookup timeout in seconds (0 disables the timeout)\n");
        output.push_str(&format!(
            "request_timeout_secs = {}\n",
            self.request_timeout_secs
        ));

        output.push_str(&self.datasource_to_toml());
        output.push_str(&self.logging_to_toml());
        output
    }

    fn datasource_to_toml(&self) -> String {
        let ds = &self.datasource;
        let mut output = String::from("\n[datasource]\n");
        output.push_str(&format!("id = {}\n", ds.id));
        output.push_str(&format!("name = {:?}\n", ds.name));
        output.push_str(&format!("columns = {:?}\n", ds.columns));
        output.push_str("# Set to false if the backend cannot list distinct column values\n");
        output.push_str(&format!("supports_lookup = {}\n", ds.supports_lookup));
        output
    }

    fn logging_to_toml(&self) -> String {
        let logging = &self.logging;
        let mut output = String::from("\n[logging]\n");
        output.push_str("# trace, debug, info, warn, error (RUST_LOG overrides)\n");
        output.push_str(&format!("level = {:?}\n", logging.level));
        output.push_str(&format!("file_enabled = {}\n", logging.file_enabled));
        output.push_str(&format!(
            "file_dir = {:?}\n",
            logging.file_dir.display().to_string()
        ));
        output.push_str("# hourly, daily, never\n");
        output.push_str(&format!(
            "file_rotation = {:?}\n",
            logging.file_rotation.as_str()
        ));
        output.push_str(&format!("file_prefix = {:?}\n", logging.file_prefix));
        output
    }
}
