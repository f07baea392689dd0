use crate::core::config::data::Config;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        print_value("model", self.model.as_deref(), self.model());
        print_value("base-url", self.base_url.as_deref(), self.base_url());
        print_value("api-key-env", self.api_key_env.as_deref(), self.api_key_env());
        print_value(
            "default-session",
            self.default_session.as_deref(),
            self.default_session(),
        );
        match self.history_mode {
            Some(mode) => println!("  history-mode: {mode}"),
            None => println!("  history-mode: {} (default)", self.history_mode()),
        }
        match self.request_timeout_secs {
            Some(secs) => println!("  request-timeout-secs: {secs}"),
            None => println!("  request-timeout-secs: (unset)"),
        }
    }
}

fn print_value(key: &str, explicit: Option<&str>, effective: &str) {
    match explicit {
        Some(value) => println!("  {key}: {value}"),
        None => println!("  {key}: {effective} (default)"),
    }
}
