use std::cell::RefCell;

use session::api::{AnalysisReport, AnalysisRequestError, CatalogLoadError, RequestFailure};
use session::catalog::Product;
use session::conversation::ConversationEntry;

use super::*;

struct MockApi {
    calls: RefCell<Vec<String>>,
}

impl MockApi {
    fn new() -> Self {
        Self { calls: RefCell::new(Vec::new()) }
    }
}

#[async_trait::async_trait(?Send)]
impl AnalysisApi for MockApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogLoadError> {
        Ok(vec![Product::new("Peanut Bar"), Product::new("Rice Cake")])
    }

    async fn analyze_product(&self, product_name: &str) -> Result<AnalysisReport, AnalysisRequestError> {
        self.calls.borrow_mut().push(product_name.to_owned());
        if product_name == "Unknown Item" {
            return Err(RequestFailure::Network("timeout".into()).into());
        }
        Ok(AnalysisReport {
            detected_allergens: vec!["peanut".into()],
            risk_level: "High".into(),
            ethical_score: 70.0,
            recommendations: vec!["Avoid if you are allergic.".into()],
        })
    }
}

async fn run_script(script: &str) -> (AnalysisSession, Vec<String>, String) {
    let api = MockApi::new();
    let mut session = AnalysisSession::new();
    session.catalog_mut().load(&api).await;
    let mut out = Vec::new();
    run(&mut session, &api, script.as_bytes(), &mut out).await.unwrap();
    let calls = api.calls.borrow().clone();
    (session, calls, String::from_utf8(out).unwrap())
}

// =========================================================================
// parse_line
// =========================================================================

#[test]
fn parse_plain_text_is_submission() {
    assert_eq!(parse_line("Milk Chocolate\n"), ReplCommand::Submit("Milk Chocolate".into()));
}

#[test]
fn parse_slash_commands() {
    assert_eq!(parse_line("/search  pea \n"), ReplCommand::Search("pea".into()));
    assert_eq!(parse_line("/search"), ReplCommand::Search(String::new()));
    assert_eq!(parse_line("/products"), ReplCommand::Products);
    assert_eq!(parse_line("/pick 2"), ReplCommand::Pick(2));
    assert_eq!(parse_line("/help"), ReplCommand::Help);
    assert_eq!(parse_line("/quit\r\n"), ReplCommand::Quit);
    assert_eq!(parse_line("/exit"), ReplCommand::Quit);
}

#[test]
fn parse_rejects_bad_pick_and_unknown_commands() {
    assert_eq!(parse_line("/pick 0"), ReplCommand::Unknown("/pick 0".into()));
    assert_eq!(parse_line("/pick two"), ReplCommand::Unknown("/pick two".into()));
    assert_eq!(parse_line("/dance"), ReplCommand::Unknown("/dance".into()));
}

// =========================================================================
// run
// =========================================================================

#[tokio::test]
async fn typed_submission_prints_report() {
    let (session, calls, out) = run_script("Milk Chocolate\n/quit\n").await;
    assert_eq!(calls, vec!["Milk Chocolate"]);
    assert_eq!(session.log().len(), 2);
    assert!(out.contains("you> Milk Chocolate"));
    assert!(out.contains("Risk Level: High"));
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let (session, calls, _) = run_script("   \n\n").await;
    assert!(calls.is_empty());
    assert!(session.log().is_empty());
}

#[tokio::test]
async fn search_then_pick_analyzes_catalog_item() {
    let (session, calls, out) = run_script("/search rice\n/pick 1\n").await;
    assert!(out.contains("  1. Rice Cake"));
    assert_eq!(calls, vec!["Rice Cake"]);
    assert_eq!(session.log().all()[0], ConversationEntry::user("Rice Cake"));
}

#[tokio::test]
async fn pick_out_of_range_reports_and_keeps_log() {
    let (session, calls, out) = run_script("/search pea\n/pick 2\n").await;
    assert!(out.contains("no product #2"));
    assert!(calls.is_empty());
    assert!(session.log().is_empty());
}

#[tokio::test]
async fn failed_analysis_prints_error_report() {
    let (session, _, out) = run_script("Unknown Item\n").await;
    assert!(out.contains("Risk Level: Error"));
    assert!(out.contains("- timeout"));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn quit_stops_before_remaining_lines() {
    let (_, calls, _) = run_script("/quit\nMilk Chocolate\n").await;
    assert!(calls.is_empty());
}

#[tokio::test]
async fn unknown_command_hints_help() {
    let (_, _, out) = run_script("/dance\n").await;
    assert!(out.contains("unknown command: /dance (try /help)"));
}
