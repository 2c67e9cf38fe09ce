use super::*;

fn report() -> AnalysisReport {
    AnalysisReport {
        detected_allergens: vec!["milk".into()],
        risk_level: "High".into(),
        ethical_score: 3.0,
        recommendations: vec![],
    }
}

#[test]
fn new_log_is_empty() {
    let log = ConversationLog::new();
    assert!(log.is_empty());
    assert_eq!(log.revision(), 0);
    assert!(log.last().is_none());
}

#[test]
fn append_keeps_order_and_returns_index() {
    let mut log = ConversationLog::new();
    assert_eq!(log.append(ConversationEntry::user("Milk Chocolate")), 0);
    assert_eq!(log.append(ConversationEntry::Bot(report())), 1);

    assert_eq!(log.len(), 2);
    assert!(log.all()[0].is_user());
    assert!(log.all()[1].is_bot());
    assert_eq!(log.last(), Some(&ConversationEntry::Bot(report())));
}

#[test]
fn append_bumps_revision() {
    let mut log = ConversationLog::new();
    log.append(ConversationEntry::user("a"));
    log.append(ConversationEntry::user("b"));
    assert_eq!(log.revision(), 2);
}

#[test]
fn since_returns_new_tail() {
    let mut log = ConversationLog::new();
    log.append(ConversationEntry::user("a"));
    let cursor = log.len();
    log.append(ConversationEntry::Bot(report()));

    assert_eq!(log.since(cursor), &[ConversationEntry::Bot(report())]);
    assert!(log.since(log.len()).is_empty());
    assert!(log.since(99).is_empty());
}

#[test]
fn entries_serialize_with_type_tag() {
    let user = serde_json::to_value(ConversationEntry::user("Rice Cake")).unwrap();
    assert_eq!(user, serde_json::json!({ "type": "user", "text": "Rice Cake" }));

    let bot = serde_json::to_value(ConversationEntry::Bot(report())).unwrap();
    assert_eq!(bot["type"], "bot");
    assert_eq!(bot["risk_level"], "High");
}
