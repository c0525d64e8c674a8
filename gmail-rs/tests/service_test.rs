//! EmailService behavior over an in-memory mailbox

mod common;

use common::{message, sample_mailbox, MockProvider};
use gmail_rs::gmail::Folder;
use gmail_rs::service::EmailService;
use spam_rs::SpamClassifier;
use std::sync::Arc;

fn service(provider: Arc<MockProvider>, max_results: u32) -> EmailService {
    EmailService::new(provider, SpamClassifier::new(), max_results)
}

#[tokio::test]
async fn test_list_respects_max_results() {
    let provider = Arc::new(MockProvider::new(sample_mailbox()));
    let emails = service(provider, 2).list_folder(Folder::All).await.unwrap();

    let ids: Vec<_> = emails.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["m4", "m3"]);
}

#[tokio::test]
async fn test_unparseable_messages_are_skipped() {
    let mut mailbox = sample_mailbox();
    let mut broken = message("m5", &["INBOX"], "x@example.com", "Broken", "");
    broken.payload = None;
    mailbox.push(broken);

    let provider = Arc::new(MockProvider::new(mailbox));
    let emails = service(provider, 10).list_folder(Folder::Inbox).await.unwrap();

    let ids: Vec<_> = emails.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["m4", "m3", "m1"]);
}

#[tokio::test]
async fn test_missing_headers_get_defaults() {
    let mut bare = message("m9", &["INBOX"], "", "", "plain words");
    if let Some(payload) = bare.payload.as_mut() {
        payload.headers.clear();
    }

    let provider = Arc::new(MockProvider::new(vec![bare]));
    let emails = service(provider, 5).list_folder(Folder::Inbox).await.unwrap();

    assert_eq!(emails[0].subject, "No Subject");
    assert_eq!(emails[0].from, "Unknown");
    assert_eq!(emails[0].date, "");
    assert_eq!(emails[0].body, "plain words");
}

#[tokio::test]
async fn test_check_message_falls_back_to_snippet() {
    let mut odd = message("m7", &["INBOX"], "x@example.com", "Hello", "");
    if let Some(body) = odd.payload.as_mut().and_then(|p| p.body.as_mut()) {
        body.data = Some("@@not base64@@".to_string());
    }
    odd.snippet = Some("claim now".to_string());

    let provider = Arc::new(MockProvider::new(vec![odd]));
    assert!(service(provider, 5).check_message("m7").await.unwrap());
}

#[tokio::test]
async fn test_rule_updates_are_shared() {
    let provider = Arc::new(MockProvider::new(vec![]));
    let service = service(provider, 5);

    assert!(!service.check_spam("Weekly sync", "Agenda attached").await);
    service.add_spam_keywords(&["agenda".to_string()]).await;
    assert!(service.check_spam("Weekly sync", "Agenda attached").await);
    assert!(service.classifier().read().await.rules().keywords().contains(&"agenda".to_string()));

    let bad = vec![r"sync\s+\w+".to_string(), "[".to_string(), "never".to_string()];
    assert!(service.add_spam_patterns(&bad).await.is_err());
    // Patterns before the invalid one are kept
    assert!(service.check_spam("sync today", "").await);
    assert!(!service.check_spam("", "never mind").await);
}
