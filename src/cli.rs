//! Command-line surfaces of `duckdns-update` and `freedns-update`.

use crate::config::{
    parse_timeout, resolve_env, UpdateOptions, DUCKDNS_DEFAULT_TIMEOUT, FREEDNS_DEFAULT_TIMEOUT,
};
use crate::error::Result;
use crate::output::Echo;
use crate::pause::Pause;
use crate::providers::{DuckDnsProvider, FreeDnsProvider};
use clap::{ArgAction, Parser};
use std::time::Duration;

/// Duck DNS (https://www.duckdns.org) updater using their HTTP API
/// specification (https://www.duckdns.org/spec.jsp).
#[derive(Parser, Debug)]
#[command(name = "duckdns-update")]
#[command(version)]
pub struct DuckDnsArgs {
    /// Optional IP address, empty string uses server-side auto-detection
    #[arg(short, long, default_value = "")]
    pub ip: String,

    /// HTTP timeout value in seconds
    #[arg(
        short,
        long,
        default_value = DUCKDNS_DEFAULT_TIMEOUT,
        value_parser = parse_timeout,
        allow_negative_numbers = true
    )]
    pub timeout: Duration,

    /// Verbosity, repeat to increase
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Domain to update, repeat flag for multiple
    #[arg(short, long = "domain", required = true)]
    pub domains: Vec<String>,

    /// Token linked to DDNS entry to update ($NAME reads it from the environment)
    pub token: String,
}

impl DuckDnsArgs {
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions::new(self.timeout, self.verbose)
    }

    /// Provider configured from these arguments.
    pub fn provider(&self) -> Result<DuckDnsProvider> {
        DuckDnsProvider::new(self.options())
    }

    /// Run one DuckDNS update, echoing to `echo`.
    pub async fn run(&self, echo: Echo) -> Result<()> {
        self.run_with(&self.provider()?.with_echo(echo)).await
    }

    /// Run one DuckDNS update through `provider`.
    pub async fn run_with(&self, provider: &DuckDnsProvider) -> Result<()> {
        let token = resolve_env(&self.token);
        provider
            .update(&token, &self.domains, Some(self.ip.as_str()))
            .await
    }
}

/// FreeDNS (https://freedns.afraid.org) DDNS IP updater using the Sync v2
/// API (https://freedns.afraid.org/dynamic/v2/tips/).
#[derive(Parser, Debug)]
#[command(name = "freedns-update")]
#[command(version)]
pub struct FreeDnsArgs {
    /// Optional IP address, the empty string engages server-side auto-detection
    #[arg(short, long, default_value = "")]
    pub ip: String,

    /// HTTP timeout value in seconds
    #[arg(
        short,
        long,
        default_value = FREEDNS_DEFAULT_TIMEOUT,
        value_parser = parse_timeout,
        allow_negative_numbers = true
    )]
    pub timeout: Duration,

    /// Verbosity, repeat to increase
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Token(s) linked to DDNS entry to update ($NAME reads it from the environment)
    #[arg(value_name = "TOKEN", required = true, num_args = 1..)]
    pub tokens: Vec<String>,
}

impl FreeDnsArgs {
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions::new(self.timeout, self.verbose)
    }

    /// Provider configured from these arguments.
    pub fn provider(&self) -> Result<FreeDnsProvider> {
        FreeDnsProvider::new(self.options())
    }

    /// Run one FreeDNS sync per token, stopping at the first failure.
    pub async fn run(&self, echo: Echo, pause: &dyn Pause) -> Result<()> {
        self.run_with(&self.provider()?.with_echo(echo), pause).await
    }

    /// Same as [`FreeDnsArgs::run`], through `provider`.
    pub async fn run_with(&self, provider: &FreeDnsProvider, pause: &dyn Pause) -> Result<()> {
        let tokens: Vec<String> = self.tokens.iter().map(|t| resolve_env(t)).collect();
        provider
            .update_all(&tokens, Some(self.ip.as_str()), pause)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pause::MockPause;
    use clap::error::ErrorKind;
    use clap::CommandFactory;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn targets_changed() -> serde_json::Value {
        serde_json::json!({
            "targets": [{"host": "a.example", "statuscode": 0, "statustext": "Changed"}]
        })
    }

    /// Query strings of every request the server saw.
    async fn received_queries(server: &MockServer) -> Vec<String> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_duckdns_args_verify() {
        DuckDnsArgs::command().debug_assert();
    }

    #[test]
    fn test_freedns_args_verify() {
        FreeDnsArgs::command().debug_assert();
    }

    #[test]
    fn test_duckdns_defaults() {
        let args = DuckDnsArgs::try_parse_from(["duckdns-update", "-d", "home", "tok"]).unwrap();
        assert_eq!(args.token, "tok");
        assert_eq!(args.domains, vec!["home".to_string()]);
        assert_eq!(args.ip, "");
        assert_eq!(args.timeout, Duration::from_secs(60));
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_duckdns_repeated_flags() {
        let args = DuckDnsArgs::try_parse_from([
            "duckdns-update",
            "-d",
            "home",
            "--domain",
            "lab",
            "-vv",
            "-t",
            "2.5",
            "--ip",
            "1.2.3.4",
            "tok",
        ])
        .unwrap();
        assert_eq!(args.domains, vec!["home".to_string(), "lab".to_string()]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.timeout, Duration::from_millis(2500));
        assert_eq!(args.ip, "1.2.3.4");
        assert!(args.options().server_verbose());
    }

    #[test]
    fn test_duckdns_requires_domain() {
        let err = DuckDnsArgs::try_parse_from(["duckdns-update", "tok"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let err = DuckDnsArgs::try_parse_from(["duckdns-update", "-d", "a", "-t", "-1", "tok"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_freedns_defaults() {
        let args = FreeDnsArgs::try_parse_from(["freedns-update", "tok"]).unwrap();
        assert_eq!(args.tokens, vec!["tok".to_string()]);
        assert_eq!(args.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_freedns_many_tokens() {
        let args = FreeDnsArgs::try_parse_from(["freedns-update", "-v", "one", "two", "three"])
            .unwrap();
        assert_eq!(args.tokens.len(), 3);
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_freedns_requires_token() {
        let err = FreeDnsArgs::try_parse_from(["freedns-update"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[tokio::test]
    async fn test_duckdns_run_resolves_env_token() {
        std::env::set_var("TEST_DDNS_UPDATE_DUCK_TOKEN", "duck-secret");
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .and(query_param("token", "duck-secret"))
            .and(query_param("domains", "home,lab"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let args = DuckDnsArgs::try_parse_from([
            "duckdns-update",
            "-d",
            "lab",
            "-d",
            "home",
            "-i",
            "",
            "$TEST_DDNS_UPDATE_DUCK_TOKEN",
        ])
        .unwrap();
        let provider = args
            .provider()
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_echo(Echo::sink());

        tokio_test::assert_ok!(args.run_with(&provider).await);
        std::env::remove_var("TEST_DDNS_UPDATE_DUCK_TOKEN");

        let queries = received_queries(&mock_server).await;
        assert_eq!(queries.len(), 1);
        assert!(!queries[0].contains("ip="));
    }

    #[tokio::test]
    async fn test_duckdns_run_passes_ip_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/update"))
            .and(query_param("ip", "203.0.113.7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let args = DuckDnsArgs::try_parse_from([
            "duckdns-update",
            "-d",
            "home",
            "--ip",
            "203.0.113.7",
            "tok",
        ])
        .unwrap();
        let provider = args
            .provider()
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_echo(Echo::sink());

        tokio_test::assert_ok!(args.run_with(&provider).await);
    }

    #[tokio::test]
    async fn test_freedns_run_two_tokens_pause_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/u/one/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(targets_changed()))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/u/two/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(targets_changed()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut pause = MockPause::new();
        pause.expect_pause().times(1).returning(|_| ());

        let args = FreeDnsArgs::try_parse_from(["freedns-update", "one", "two"]).unwrap();
        let provider = args
            .provider()
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_echo(Echo::sink());

        tokio_test::assert_ok!(args.run_with(&provider, &pause).await);
    }

    #[tokio::test]
    async fn test_freedns_run_single_token_no_pause() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(targets_changed()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut pause = MockPause::new();
        pause.expect_pause().times(0);

        let args = FreeDnsArgs::try_parse_from(["freedns-update", "only"]).unwrap();
        let provider = args
            .provider()
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_echo(Echo::sink());

        tokio_test::assert_ok!(args.run_with(&provider, &pause).await);
    }

    #[tokio::test]
    async fn test_freedns_run_resolves_env_token_without_ip() {
        std::env::set_var("TEST_DDNS_UPDATE_FREE_TOKEN", "free-secret");
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/u/free-secret/"))
            .and(query_param("content-type", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(targets_changed()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut pause = MockPause::new();
        pause.expect_pause().times(0);

        let args = FreeDnsArgs::try_parse_from([
            "freedns-update",
            "--ip",
            "",
            "$TEST_DDNS_UPDATE_FREE_TOKEN",
        ])
        .unwrap();
        let provider = args
            .provider()
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_echo(Echo::sink());

        tokio_test::assert_ok!(args.run_with(&provider, &pause).await);
        std::env::remove_var("TEST_DDNS_UPDATE_FREE_TOKEN");

        let queries = received_queries(&mock_server).await;
        assert_eq!(queries, vec!["content-type=json".to_string()]);
    }
}
