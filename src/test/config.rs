#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write, time::Duration};

    use tempfile::NamedTempFile;

    use crate::{
        config::{DEFAULT_BASE_URL, FxConfig},
        error::QuoteError,
    };

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_poll_every_fifteen_seconds() {
        let config = FxConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, FxConfig::default());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(*config.poll_interval(), Duration::from_secs(15));
        assert_eq!(*config.channel_capacity(), 16);
        assert_eq!(*config.request_timeout(), None);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = FxConfig::from_lookup(lookup(&[
            ("FX_BASE_URL", "http://localhost:8080/symbols"),
            ("FX_POLL_INTERVAL_SECS", "2.5"),
            ("FX_CHANNEL_CAPACITY", "4"),
            ("FX_REQUEST_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "http://localhost:8080/symbols");
        assert_eq!(*config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(*config.channel_capacity(), 4);
        assert_eq!(*config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn rejects_unparseable_interval() {
        let result = FxConfig::from_lookup(lookup(&[("FX_POLL_INTERVAL_SECS", "soon")]));
        assert!(matches!(result, Err(QuoteError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_seconds() {
        for value in ["1e20", "-1", "inf", "NaN"] {
            let result = FxConfig::from_lookup(lookup(&[("FX_POLL_INTERVAL_SECS", value)]));
            assert!(matches!(result, Err(QuoteError::Config(_))), "{}", value);

            let result = FxConfig::from_lookup(lookup(&[("FX_REQUEST_TIMEOUT_SECS", value)]));
            assert!(matches!(result, Err(QuoteError::Config(_))), "{}", value);
        }
    }

    #[test]
    fn rejects_zero_request_timeout() {
        let result = FxConfig::from_lookup(lookup(&[("FX_REQUEST_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(QuoteError::Config(_))));

        let result = FxConfig::default()
            .with_request_timeout(Some(Duration::ZERO))
            .validate();
        assert!(matches!(result, Err(QuoteError::Config(_))));
    }

    #[test]
    fn rejects_zero_interval_and_capacity() {
        let result = FxConfig::from_lookup(lookup(&[("FX_POLL_INTERVAL_SECS", "0")]));
        assert!(matches!(result, Err(QuoteError::Config(_))));

        let result = FxConfig::from_lookup(lookup(&[("FX_CHANNEL_CAPACITY", "0")]));
        assert!(matches!(result, Err(QuoteError::Config(_))));

        let result = FxConfig::default().with_base_url(" ").validate();
        assert!(matches!(result, Err(QuoteError::Config(_))));
    }

    #[test]
    fn reads_dotenv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# local mock").unwrap();
        writeln!(file, "FX_BASE_URL=http://127.0.0.1:9000/symbols").unwrap();
        writeln!(file, "FX_POLL_INTERVAL_SECS=1").unwrap();

        let config = FxConfig::from_env_file(file.path()).unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000/symbols");
        assert_eq!(*config.poll_interval(), Duration::from_secs(1));
        assert_eq!(*config.channel_capacity(), 16);
    }

    #[test]
    fn missing_dotenv_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FxConfig::from_env_file(dir.path().join("missing.env"));

        assert!(matches!(result, Err(QuoteError::Config(_))));
    }
}
