//! End-to-end pipeline tests against a wiremock Reddit.
//!
//! Email is never configured here, so the email sink must report `Skipped`
//! while the file sink still writes the report.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use fitwatch_core::{AppConfig, EmailSettings, Watchlist};
use fitwatch_monitor::{run_report, DeliveryOutcome, RedditClient, RunOptions};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> AppConfig {
    AppConfig {
        reddit_client_id: "client-id".to_string(),
        reddit_client_secret: "client-secret".to_string(),
        reddit_user_agent: "fitwatch-test/0.1".to_string(),
        reddit_oauth: false,
        email: EmailSettings {
            from: Some("bot@example.com".to_string()),
            password: Some(String::new()),
            to: Some("team@example.com".to_string()),
            smtp_server: "smtp.invalid".to_string(),
            smtp_port: 587,
        },
        log_level: "debug".to_string(),
        days_back: 7,
        limit_per_channel: 50,
        request_delay_ms: 0,
        request_timeout_secs: 5,
        report_prefix: "test_report".to_string(),
        output_dir: PathBuf::from("."),
        watchlist_path: None,
    }
}

fn options(output_dir: PathBuf) -> RunOptions {
    RunOptions {
        output_dir,
        request_delay: Duration::ZERO,
        ..RunOptions::from_config(&test_config())
    }
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("fitwatch-pipeline-{}", uuid::Uuid::new_v4()))
}

fn child(title: &str, score: i64, comments: i64, age_secs: i64) -> serde_json::Value {
    #[allow(clippy::cast_precision_loss)]
    let created = (Utc::now().timestamp() - age_secs) as f64;
    json!({
        "kind": "t3",
        "data": {
            "title": title,
            "selftext": "",
            "score": score,
            "num_comments": comments,
            "created_utc": created,
            "permalink": format!("/r/fitness/comments/{score}/post/")
        }
    })
}

fn listing(children: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "kind": "Listing", "data": { "children": children } })
}

#[tokio::test]
async fn failed_channel_does_not_stop_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/fitness/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![
            child("Best pre-workout?", 10, 5, 3_600),
            child("Cycling tips", 1, 0, 3_600),
            child("Creatine from last month", 50, 20, 30 * 86_400),
            child("MyProtein discount code", 4, 9, 7_200),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/nutrition/new.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config();
    let watchlist = Watchlist::default()
        .with_channels(["nutrition", "fitness"])
        .unwrap();
    let client = RedditClient::connect_with_base_url(&config, &server.uri())
        .await
        .unwrap();
    let out = temp_dir();
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let summary = run_report(
        &client,
        &watchlist,
        &config.email,
        &options(out.clone()),
        Utc::now(),
        date,
    )
    .await;

    let report = &summary.report;
    assert_eq!(report.failed_channels.len(), 1);
    assert_eq!(report.failed_channels[0].channel, "nutrition");
    assert_eq!(report.scanned_posts, 3);
    assert_eq!(report.total_posts, 2);
    assert_eq!(report.top_posts[0].post.title, "Best pre-workout?");
    assert_eq!(report.top_posts[1].post.title, "MyProtein discount code");
    assert_eq!(report.competitor_mentions[0].label, "Myprotein");

    let expected = out.join("test_report_2025-03-10.html");
    assert_eq!(summary.file, DeliveryOutcome::Delivered(expected.display().to_string()));
    let written = std::fs::read_to_string(&expected).unwrap();
    assert_eq!(written, summary.html);
    assert!(written.contains("Best pre-workout?"));

    assert!(matches!(summary.email, DeliveryOutcome::Skipped(_)));

    std::fs::remove_dir_all(&out).ok();
}

#[tokio::test]
async fn empty_result_still_renders_and_writes_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/fitness/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![child(
            "Cycling tips",
            1,
            0,
            60,
        )])))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::connect_with_base_url(&config, &server.uri())
        .await
        .unwrap();
    let out = temp_dir();
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let summary = run_report(
        &client,
        &Watchlist::default(),
        &config.email,
        &options(out.clone()),
        Utc::now(),
        date,
    )
    .await;

    assert!(!summary.report.has_mentions());
    assert!(summary.html.contains("No competitor mentions found this week."));
    assert!(matches!(summary.file, DeliveryOutcome::Delivered(_)));
    assert!(out.join("test_report_2025-03-10.html").exists());

    std::fs::remove_dir_all(&out).ok();
}

#[tokio::test]
async fn disabled_sinks_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/fitness/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(Vec::new())))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::connect_with_base_url(&config, &server.uri())
        .await
        .unwrap();
    let out = temp_dir();
    let opts = RunOptions {
        write_file: false,
        send_email: false,
        ..options(out.clone())
    };

    let summary = run_report(
        &client,
        &Watchlist::default(),
        &config.email,
        &opts,
        Utc::now(),
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    )
    .await;

    assert!(matches!(summary.file, DeliveryOutcome::Skipped(_)));
    assert!(matches!(summary.email, DeliveryOutcome::Skipped(_)));
    assert!(!summary.delivery_failed());
    assert!(!out.exists());
}

#[tokio::test]
async fn unwritable_output_dir_fails_file_sink_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/fitness/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![child(
            "Best pre-workout?",
            10,
            5,
            60,
        )])))
        .mount(&server)
        .await;

    let config = test_config();
    let client = RedditClient::connect_with_base_url(&config, &server.uri())
        .await
        .unwrap();

    // A regular file where the output directory should be.
    let blocker = temp_dir();
    std::fs::write(&blocker, "not a directory").unwrap();

    let summary = run_report(
        &client,
        &Watchlist::default(),
        &config.email,
        &options(blocker.clone()),
        Utc::now(),
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    )
    .await;

    assert_eq!(summary.report.total_posts, 1);
    assert!(matches!(summary.file, DeliveryOutcome::Failed(_)));
    assert!(matches!(summary.email, DeliveryOutcome::Skipped(_)));
    assert!(summary.delivery_failed());

    std::fs::remove_file(&blocker).ok();
}
