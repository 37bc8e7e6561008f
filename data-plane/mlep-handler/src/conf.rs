use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "HTTP_PORT", default = "8080")]
    pub http_port: u16,
    /// Directory the model artifacts were unpacked into
    #[envconfig(from = "MODEL_DIR", default = "/opt/ml/model")]
    pub model_dir: String,
    /// Maximum request body in bytes
    #[envconfig(from = "MAX_PAYLOAD_BYTES", default = "6291456")]
    pub max_payload_bytes: usize,
    // Either "json" or "plain"/"text"; anything else falls back to plain
    #[envconfig(from = "LOG_FORMAT")]
    pub log_format: Option<String>,
}

impl Config {
    pub fn json_logs(&self) -> bool {
        matches!(
            self.log_format.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("json" | "structured")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_hosting_contract() {
        let conf = Config::init_from_hashmap(&HashMap::new()).unwrap();
        assert_eq!(conf.http_port, 8080);
        assert_eq!(conf.model_dir, "/opt/ml/model");
        assert!(!conf.json_logs());
    }

    #[test]
    fn log_format_is_case_insensitive() {
        let env = HashMap::from([("LOG_FORMAT".to_string(), "JSON".to_string())]);
        let conf = Config::init_from_hashmap(&env).unwrap();
        assert!(conf.json_logs());
    }
}
