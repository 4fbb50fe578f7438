//! End-to-end tests for the `influbazzar` command.
//!
//! Commands are parsed with clap and run through [`execute`] against data
//! files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use influbazzar::cli::{execute, Cli};
use influbazzar::config::Config;
use influbazzar::AppError;
use serde_json::Value as Json;
use tempfile::TempDir;

const CREATORS: &str = r#"[
  { "id": 1, "name": "Ajay Singh", "handle": "@ajaytech", "category": "Tech",
    "location": "Delhi", "followers": 125000, "engagement": 6.8,
    "platforms": ["YouTube"], "rate": 15000, "rating": 4.6, "verified": true,
    "audience": { "top_city": "Delhi", "age_band": "18-24", "female_share": 22.0 } },
  { "id": 2, "name": "Sneha Kapoor", "handle": "@snehaglows", "category": "Beauty",
    "location": "Mumbai", "followers": 89000, "engagement": 7.2,
    "platforms": ["Instagram", "YouTube"], "rate": 12000, "verified": true,
    "audience": { "top_city": "Mumbai", "age_band": "18-24", "female_share": 81.0 } },
  { "id": 3, "name": "Rajat Verma", "handle": "@rajatfit", "category": "Fitness",
    "location": "Bengaluru", "followers": 54000, "engagement": 5.9,
    "platforms": ["Instagram"], "rate": 8000, "rating": 4.1,
    "audience": { "top_city": "Bengaluru", "age_band": "25-34", "female_share": 35.0 } }
]"#;

const EARNINGS: &str = r#"
- { id: 1, campaign: Summer Glow, brand: Lakme, amount: 12000, date: 2024-05-02, status: Paid }
- { id: 2, campaign: Gadget Week, brand: boAt, amount: 8000, date: 2024-05-20, status: Pending }
- { id: 3, campaign: Run Club, brand: Puma, amount: 3000, date: 2024-06-01, status: Paid }
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Fixture {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("creators.json", CREATORS);
        fixture.write("earnings.yaml", EARNINGS);
        fixture
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn run_with(&self, config: &Config, args: &[&str]) -> Result<String, AppError> {
        let argv = std::iter::once("influbazzar").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(&cli, config)
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        self.run_with(&Config::default(), args)
    }

    fn json(&self, args: &[&str]) -> Json {
        let mut args = args.to_vec();
        args.extend(["--output", "json"]);
        serde_json::from_str(&self.run(&args).unwrap()).unwrap()
    }
}

fn names(view: &Json) -> Vec<&str> {
    view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

// =============================================================================
// query
// =============================================================================

#[test]
fn sort_and_paginate() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let view = fx.json(&[
        "query",
        "creators",
        "--data",
        &data,
        "--sort",
        "engagement:desc",
        "--page-size",
        "2",
    ]);
    assert_eq!(names(&view), vec!["Sneha Kapoor", "Ajay Singh"]);
    assert_eq!(view["total_matched"], 3);
    assert_eq!(view["total_pages"], 2);
    assert_eq!(view["page"], 1);
}

#[test]
fn sort_on_nested_path() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let view = fx.json(&[
        "query",
        "creators",
        "-d",
        &data,
        "--sort",
        "audience.female_share:desc",
    ]);
    assert_eq!(names(&view), vec!["Sneha Kapoor", "Rajat Verma", "Ajay Singh"]);

    let view = fx.json(&["query", "creators", "-d", &data, "--sort", "audience.top_city"]);
    assert_eq!(names(&view), vec!["Rajat Verma", "Ajay Singh", "Sneha Kapoor"]);
}

#[test]
fn search_filter_and_bound() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");

    let view = fx.json(&["query", "creators", "-d", &data, "--search", "KAPOOR"]);
    assert_eq!(names(&view), vec!["Sneha Kapoor"]);

    let view = fx.json(&["query", "creators", "-d", &data, "-f", "category=Beauty"]);
    assert_eq!(names(&view), vec!["Sneha Kapoor"]);

    let view = fx.json(&[
        "query",
        "creators",
        "-d",
        &data,
        "-f",
        "platforms=Instagram",
        "-w",
        "followers>=60000",
    ]);
    assert_eq!(names(&view), vec!["Sneha Kapoor"]);

    let view = fx.json(&["query", "creators", "-d", &data, "-f", "category=all"]);
    assert_eq!(view["total_matched"], 3);
}

#[test]
fn search_in_overrides_fields() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let view = fx.json(&[
        "query", "creators", "-d", &data, "--search", "Delhi", "--in", "location",
    ]);
    assert_eq!(names(&view), vec!["Ajay Singh"]);

    let view = fx.json(&["query", "creators", "-d", &data, "--search", "Delhi"]);
    assert_eq!(view["total_matched"], 0);
}

#[test]
fn text_table_with_footer() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let out = fx
        .run(&[
            "query",
            "creators",
            "-d",
            &data,
            "--sort",
            "followers:desc",
            "--page-size",
            "2",
            "-o",
            "text",
        ])
        .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("ID  NAME"));
    assert!(lines[1].contains("Ajay Singh"));
    assert!(lines[2].contains("Sneha Kapoor"));
    assert_eq!(lines[3], "Showing 1-2 of 3 creators · page 1 of 2");
}

#[test]
fn empty_and_past_end_pages() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let out = fx
        .run(&["query", "creators", "-d", &data, "-s", "nobody", "-o", "text"])
        .unwrap();
    assert_eq!(out, "No creators match.");

    let out = fx
        .run(&["query", "creators", "-d", &data, "-p", "9", "-o", "text"])
        .unwrap();
    assert_eq!(out, "Page 9 is past the end (1 pages).");
}

#[test]
fn csv_writes_items_only() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let out = fx
        .run(&[
            "query", "creators", "-d", &data, "-f", "category=Tech", "-o", "csv",
        ])
        .unwrap();
    let mut lines = out.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("id,name,handle,category"));
    assert!(lines.next().unwrap().starts_with("1,Ajay Singh,@ajaytech,Tech"));
    assert_eq!(lines.next(), None);
}

#[test]
fn yaml_earnings_by_status() {
    let fx = Fixture::new();
    let data = fx.path("earnings.yaml");
    let view = fx.json(&[
        "query", "earnings", "-d", &data, "-f", "status=Paid", "--sort", "amount",
    ]);
    let amounts: Vec<u64> = view["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["amount"].as_u64().unwrap())
        .collect();
    assert_eq!(amounts, vec![3000, 12000]);
}

#[test]
fn undeclared_fields_fail() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let err = fx
        .run(&["query", "creators", "-d", &data, "--sort", "handle"])
        .unwrap_err();
    assert!(matches!(err, AppError::NotSortable { .. }));

    let err = fx
        .run(&["query", "creators", "-d", &data, "-f", "rate=100"])
        .unwrap_err();
    assert_eq!(err.to_string(), "Field 'rate' cannot be filtered on creators");
}

#[test]
fn unsupported_and_missing_files() {
    let fx = Fixture::new();
    let csv = fx.write("creators.csv", "id,name\n");
    let err = fx
        .run(&["query", "creators", "-d", &csv.display().to_string()])
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedFormat(_)));

    let missing = fx.path("missing.json");
    let err = fx.run(&["query", "creators", "-d", &missing]).unwrap_err();
    assert!(matches!(err, AppError::Read { .. }));
}

// =============================================================================
// facets / preset
// =============================================================================

#[test]
fn facets_count_list_elements() {
    let fx = Fixture::new();
    let data = fx.path("creators.json");
    let counts = fx.json(&["facets", "creators", "-d", &data, "--field", "platforms"]);
    assert_eq!(
        counts,
        serde_json::json!([
            { "value": "YouTube", "count": 2 },
            { "value": "Instagram", "count": 2 }
        ])
    );

    let err = fx
        .run(&["facets", "creators", "-d", &data, "--field", "name"])
        .unwrap_err();
    assert!(matches!(err, AppError::NotFilterable { .. }));
}

#[test]
fn preset_from_config() {
    let fx = Fixture::new();
    let config_path = fx.write(
        "influbazzar.yaml",
        r#"
presets:
  instagram-stars:
    collection: creators
    description: Instagram creators by engagement
    query:
      filters:
        platforms: [Instagram]
      sort: { field: engagement, dir: desc }
"#,
    );
    let config = Config::load(Some(Path::new(&config_path))).unwrap();
    let data = fx.path("creators.json");
    let out = fx
        .run_with(
            &config,
            &["preset", "instagram-stars", "-d", &data, "-o", "json"],
        )
        .unwrap();
    let view: Json = serde_json::from_str(&out).unwrap();
    assert_eq!(names(&view), vec!["Sneha Kapoor", "Rajat Verma"]);

    let err = fx
        .run_with(&config, &["preset", "nope", "-d", &data])
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownPreset(_)));
}

#[test]
fn config_page_size_applies_to_query() {
    let fx = Fixture::new();
    let config = Config {
        page_size: std::num::NonZeroUsize::new(1),
        ..Config::default()
    };
    let data = fx.path("creators.json");
    let out = fx
        .run_with(&config, &["query", "creators", "-d", &data, "-o", "json"])
        .unwrap();
    let view: Json = serde_json::from_str(&out).unwrap();
    assert_eq!(view["page_size"], 1);
    assert_eq!(view["total_pages"], 3);
}

// =============================================================================
// wizard / withdraw
// =============================================================================

#[test]
fn campaign_wizard_replay() {
    let fx = Fixture::new();
    let answers = fx.write(
        "campaign.yaml",
        r#"
title: Summer Glow Launch
brand: Lakme
category: Beauty
description: Launch reels for the new sunscreen range
budget: 50000
start_date: 2024-06-01
deadline: 2024-06-30
platforms: [Instagram]
deliverables: 2 reels, 3 stories
accept_terms: true
"#,
    );
    let report = fx.json(&[
        "wizard",
        "campaign",
        "--answers",
        &answers.display().to_string(),
    ]);
    assert_eq!(report["submitted"], true);
    assert_eq!(report["progress"], 100);
    assert_eq!(report["receipt"]["reference"], "draft-summer-glow-launch");
}

#[test]
fn signup_wizard_stops_on_wrong_otp() {
    let fx = Fixture::new();
    let answers = fx.write(
        "signup.json",
        r#"{ "name": "Sneha Kapoor", "email": "sneha@example.com",
             "phone": "9876543210", "otp": "111111" }"#,
    );
    let out = fx
        .run(&[
            "wizard",
            "signup",
            "--answers",
            &answers.display().to_string(),
            "--otp",
            "482913",
            "-o",
            "text",
        ])
        .unwrap();
    assert_eq!(
        out,
        "signup wizard: step 2 of 4 (Verification), 50% complete\n  - OTP does not match"
    );
}

#[test]
fn signup_otp_shape_ignores_surrounding_spaces() {
    let fx = Fixture::new();
    let answers = fx.write(
        "signup.json",
        r#"{ "name": "Sneha Kapoor", "email": "sneha@example.com",
             "phone": "9876543210", "otp": " 123456 " }"#,
    );
    let answers = answers.display().to_string();
    let without = fx
        .run(&["wizard", "signup", "--answers", &answers, "-o", "text"])
        .unwrap();
    let with = fx
        .run(&["wizard", "signup", "--answers", &answers, "--otp", "123456", "-o", "text"])
        .unwrap();
    assert!(without.contains("step 3 of 4 (Profile)"), "{}", without);
    assert_eq!(without, with);
}

#[test]
fn withdraw_from_paid_balance() {
    let fx = Fixture::new();
    let data = fx.path("earnings.yaml");
    let out = fx
        .run(&["withdraw", "-d", &data, "--amount", "5000", "-o", "text"])
        .unwrap();
    assert_eq!(
        out,
        "Withdrawal of ₹5000 requested, ₹10000 remains available [wd-5000]"
    );

    let err = fx
        .run(&["withdraw", "-d", &data, "--amount", "20000"])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Requested ₹20000 exceeds the available balance of ₹15000"
    );

    let err = fx
        .run(&["withdraw", "-d", &data, "--amount", "100"])
        .unwrap_err();
    assert!(matches!(err, AppError::Action(_)));
}
