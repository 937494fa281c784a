//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from config file to manifest.

use link_spider::config::{load_config, Config, Credentials};
use link_spider::crawler::crawl;
use link_spider::output::{render, write_manifest};
use link_spider::{ConfigError, FilterVerdict, SpiderError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOCALHOST_WHITELIST: &str = r"^127\.0\.0\.1$";

/// Writes a config and seed file into `dir` and loads the config back
fn create_test_config(dir: &TempDir, seeds: &[String], extra: &str) -> Config {
    let seed_path = dir.path().join("uris.txt");
    fs::write(&seed_path, seeds.join("\n")).expect("Failed to write seeds");

    let config_path = dir.path().join("config.toml");
    let content = format!(
        r#"
uri-file = "{}"
download-path = "/srv/mirror"
domain-whitelist = ['{}']
{}

[fetcher]
timeout-secs = 5
"#,
        seed_path.display(),
        LOCALHOST_WHITELIST,
        extra
    );
    fs::write(&config_path, content).expect("Failed to write config");

    load_config(Path::new(&config_path)).expect("Failed to load config")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn head_as(content_type: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).insert_header("content-type", content_type)
}

fn manifest_text(config: &Config, downloads: &[link_spider::Uri]) -> String {
    let entries = render(
        downloads,
        &config.download_path,
        config.uri_strip_paths.as_deref(),
    );
    let mut out = Vec::new();
    write_manifest(&mut out, &entries).expect("Failed to write manifest");
    String::from_utf8(out).expect("Manifest is not UTF-8")
}

#[tokio::test]
async fn test_full_crawl_single_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(head_as("text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r##"<a href="/a.zip">A</a>
                <a href="https://y.tld/b">elsewhere</a>
                <a href="#frag">self</a>
                <a href="{}/b.iso">B</a>
                <a href="/a.zip">A again</a>"##,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/a.zip"))
        .respond_with(head_as("application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/b.iso"))
        .respond_with(head_as("application/octet-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &[format!("{}/", base_url)], "");

    let report = crawl(&config, None).await.expect("Crawl failed");

    assert_eq!(
        manifest_text(&config, &report.downloads),
        format!(
            "==CUT==\n{0}/a.zip\n out=/srv/mirror/a.zip\n{0}/b.iso\n out=/srv/mirror/b.iso\n",
            base_url
        )
    );

    let stats = &report.statistics;
    assert_eq!(stats.fetch_cycles, 3);
    assert_eq!(stats.discovered_fetches, 2);
    assert_eq!(stats.rejected(FilterVerdict::NotWhitelisted), 1);
    assert_eq!(stats.duplicate_links, 2);
}

#[tokio::test]
async fn test_redirect_resolves_against_final_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(head_as("text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/old">moved</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/"))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new/"))
        .respond_with(head_as("text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new/"))
        .respond_with(html(r#"<a href="doc.pdf">doc</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new/doc.pdf"))
        .respond_with(head_as("application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &[format!("{}/", base_url)], "");

    let report = crawl(&config, None).await.expect("Crawl failed");

    let hrefs: Vec<&str> = report.downloads.iter().map(|u| u.href()).collect();
    assert_eq!(hrefs, vec![format!("{}/new/doc.pdf", base_url)]);
}

#[tokio::test]
async fn test_basic_auth_sent_on_every_request() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // "user:pass"
    let auth = "Basic dXNlcjpwYXNz";

    Mock::given(method("HEAD"))
        .and(path("/"))
        .and(header("authorization", auth))
        .respond_with(head_as("text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("authorization", auth))
        .respond_with(html(r#"<a href="private.tar.gz">archive</a>"#.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/private.tar.gz"))
        .and(header("authorization", auth))
        .respond_with(head_as("application/gzip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &[format!("{}/", base_url)], "");
    let credentials = Credentials::from_parts(Some("user".to_string()), Some("pass".to_string()));

    let report = crawl(&config, credentials).await.expect("Crawl failed");

    assert_eq!(report.downloads.len(), 1);
    assert_eq!(
        report.downloads[0].href(),
        format!("{}/private.tar.gz", base_url)
    );
}

#[tokio::test]
async fn test_unsuccessful_responses_not_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(head_as("text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="/gone.zip">gone</a>
               <a href="/locked/">locked</a>
               <a href="/notes.txt">notes</a>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    // /gone.zip falls through to wiremock's default 404
    Mock::given(method("HEAD"))
        .and(path("/locked/"))
        .respond_with(ResponseTemplate::new(403).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/locked/"))
        .respond_with(html(r#"<a href="/secret.zip">secret</a>"#.to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/notes.txt"))
        .respond_with(head_as("text/plain"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&dir, &[format!("{}/", base_url)], "");

    let report = crawl(&config, None).await.expect("Crawl failed");

    let hrefs: Vec<&str> = report.downloads.iter().map(|u| u.href()).collect();
    assert_eq!(hrefs, vec![format!("{}/notes.txt", base_url)]);
    assert_eq!(report.statistics.unsuccessful_responses, 2);
}

#[tokio::test]
async fn test_blacklists_and_strip_path() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/pub/"))
        .respond_with(head_as("text/html"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pub/"))
        .respond_with(html(
            r#"<a href="?C=M;O=A">sort</a>
               <a href="../">parent</a>
               <a href="My%20Report.pdf">report</a>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/pub/My%20Report.pdf"))
        .respond_with(head_as("application/pdf"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        &dir,
        &[format!("{}/pub/", base_url)],
        r#"uri-strip-paths = "/pub"
uri-blacklist = ['\?C=']
uri-path-blacklist = ['^\.\./']"#,
    );

    let report = crawl(&config, None).await.expect("Crawl failed");

    assert_eq!(
        manifest_text(&config, &report.downloads),
        format!(
            "==CUT==\n{}/pub/My%20Report.pdf\n out=/srv/mirror/My Report.pdf\n",
            base_url
        )
    );
    assert_eq!(report.statistics.rejected(FilterVerdict::Blacklisted), 1);
    assert_eq!(report.statistics.rejected(FilterVerdict::PathBlacklisted), 1);
}

#[tokio::test]
async fn test_invalid_seed_file_fails_before_crawl() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        &dir,
        &["# mirrors".to_string(), "not a uri".to_string()],
        "",
    );

    let result = crawl(&config, None).await;
    assert!(matches!(
        result,
        Err(SpiderError::Config(ConfigError::InvalidSeed { line: 2, .. }))
    ));
}

#[tokio::test]
async fn test_empty_whitelist_follows_relative_links_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(head_as("text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<a href="local.zip">local</a><a href="{}/absolute.zip">absolute</a>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/local.zip"))
        .respond_with(head_as("application/zip"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/absolute.zip"))
        .respond_with(head_as("application/zip"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let seed_path = dir.path().join("uris.txt");
    fs::write(&seed_path, format!("{}/\n", base_url)).expect("Failed to write seeds");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "uri-file = \"{}\"\ndownload-path = \"/srv/mirror\"\n",
            seed_path.display()
        ),
    )
    .expect("Failed to write config");
    let config = load_config(&config_path).expect("Failed to load config");

    let report = crawl(&config, None).await.expect("Crawl failed");

    let hrefs: Vec<&str> = report.downloads.iter().map(|u| u.href()).collect();
    assert_eq!(hrefs, vec![format!("{}/local.zip", base_url)]);
    assert_eq!(report.statistics.seeds_queued, 1);
    assert_eq!(report.statistics.rejected(FilterVerdict::NotWhitelisted), 1);
}

#[tokio::test]
async fn test_uri_file_supplied_after_load() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/only.bin"))
        .respond_with(head_as("application/octet-stream"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let seed_path = dir.path().join("other-uris.txt");
    fs::write(&seed_path, format!("{}/only.bin\n", base_url)).expect("Failed to write seeds");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "download-path = \"/srv/mirror\"\ndomain-whitelist = ['{}']\n",
            LOCALHOST_WHITELIST
        ),
    )
    .expect("Failed to write config");

    let mut config = load_config(&config_path).expect("Failed to load config");
    assert!(matches!(
        crawl(&config, None).await,
        Err(SpiderError::Config(ConfigError::Validation(_)))
    ));

    config.uri_file = seed_path.display().to_string();
    let report = crawl(&config, None).await.expect("Crawl failed");
    assert_eq!(report.downloads.len(), 1);
}
