//
//  exonet-api
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use exonet_api::{
    Client, Document, ErrorKind, PersonalAccessToken, Resource, ResourceIdentifier,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use mockito::{Matcher, Server};
use serde_json::json;

const TOKEN: &str = "test-token";

fn client(server: &Server) -> Client {
    Client::builder()
        .token(PersonalAccessToken::new(TOKEN))
        .api_url(server.url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_sends_headers_and_maps_resource() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/dns_zones/VX09kwR3KxNo")
        .match_header("authorization", "Bearer test-token")
        .match_header("accept", "application/vnd.Exonet.v1+json")
        .match_header(
            "user-agent",
            format!("exonet-api-rs/{}", exonet_api::VERSION).as_str(),
        )
        .with_status(200)
        .with_body(
            json!({"data": {
                "type": "dns_zones",
                "id": "VX09kwR3KxNo",
                "attributes": {"name": "example.com"},
                "relationships": {"records": {"data": [{"type": "dns_records", "id": "r1"}]}}
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let zone = client(&server)
        .resource("dns_zones")
        .find("VX09kwR3KxNo")
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(zone.attribute("name").unwrap(), "example.com");
    assert_eq!(zone.relationship("records").unwrap().linkage().unwrap().as_many().unwrap().len(), 1);
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tickets")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page[size]".into(), "5".into()),
            Matcher::UrlEncoded("page[number]".into(), "2".into()),
            Matcher::UrlEncoded("filter[open]".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"data": [], "meta": {"resources": {"total": 0}}}"#)
        .create_async()
        .await;

    let tickets = client(&server)
        .resource("tickets")
        .size(5)
        .page(2)
        .filter("open")
        .get()
        .await
        .unwrap()
        .into_set()
        .unwrap();

    mock.assert_async().await;
    assert!(tickets.is_empty());
    assert_eq!(tickets.total(), Some(0));
}

#[tokio::test]
async fn test_next_page_issues_exactly_one_get() {
    let mut server = Server::new_async().await;
    let first_body = json!({
        "data": [{"type": "dns_zones", "id": "a", "attributes": {"name": "a.com"}}],
        "links": {"next": format!("{}/dns_zones?page%5Bnumber%5D=2", server.url()), "prev": null}
    });
    let first = server
        .mock("GET", "/dns_zones")
        .with_status(200)
        .with_body(first_body.to_string())
        .create_async()
        .await;
    let second = server
        .mock("GET", "/dns_zones")
        .match_query(Matcher::UrlEncoded("page[number]".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({
                "data": [{"type": "dns_zones", "id": "b", "attributes": {"name": "b.com"}}],
                "links": {"next": null}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let page = client.resource("dns_zones").get().await.unwrap().into_set().unwrap();
    assert!(page.previous_page(&client).await.unwrap().is_none());

    let next = page.next_page(&client).await.unwrap().unwrap().into_set().unwrap();
    assert_eq!(next[0].id(), Some("b"));
    assert!(next.next_page(&client).await.unwrap().is_none());

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_get_all_concatenates_pages() {
    let mut server = Server::new_async().await;
    let _first = server
        .mock("GET", "/dns_records")
        .with_status(200)
        .with_body(
            json!({
                "data": [{"type": "dns_records", "id": "r1", "attributes": {}}],
                "links": {"next": format!("{}/dns_records?page%5Bnumber%5D=2", server.url())}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/dns_records")
        .match_query(Matcher::UrlEncoded("page[number]".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({
                "data": [{"type": "dns_records", "id": "r2", "attributes": {}}],
                "meta": {"resources": {"total": 2}},
                "links": {"next": null}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let all = client(&server).resource("dns_records").get_all().await.unwrap();
    let ids: Vec<_> = all.iter().filter_map(|entry| entry.id()).collect();
    assert_eq!(ids, ["r1", "r2"]);
    assert_eq!(all.total(), Some(2));
}

#[tokio::test]
async fn test_post_sends_full_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/dns_records")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"data": {
            "type": "dns_records",
            "attributes": {"name": "www", "ttl": 3600},
            "relationships": {"zone": {"data": {"type": "dns_zones", "id": "abc"}}}
        }})))
        .with_status(201)
        .with_body(r#"{"data": {"type": "dns_records", "id": "new", "attributes": {"name": "www", "ttl": 3600}}}"#)
        .create_async()
        .await;

    let mut record = Resource::new("dns_records");
    record
        .set_attribute("name", "www")
        .set_attribute("ttl", 3600)
        .set_relationship("zone", ResourceIdentifier::new("dns_zones", "abc"));

    let created = record.post(&client(&server)).await.unwrap().into_resource().unwrap();

    mock.assert_async().await;
    assert_eq!(created.id(), Some("new"));
}

#[tokio::test]
async fn test_patch_sends_only_changes() {
    let mut server = Server::new_async().await;
    let attributes = server
        .mock("PATCH", "/dns_zones/abc")
        .match_body(Matcher::Json(json!({"data": {
            "type": "dns_zones",
            "id": "abc",
            "attributes": {"hostmaster": "dns@example.com"}
        }})))
        .with_status(204)
        .create_async()
        .await;
    let relationship = server
        .mock("PATCH", "/dns_zones/abc/relationships/customer")
        .match_body(Matcher::Json(json!({"data": {"type": "customers", "id": "c1"}})))
        .with_status(204)
        .create_async()
        .await;

    let mut zone = Document::from_json(
        r#"{"data": {"type": "dns_zones", "id": "abc", "attributes": {"name": "example.com", "hostmaster": "old@example.com"}}}"#,
    )
    .unwrap()
    .into_resource()
    .unwrap();
    zone.set_attribute("hostmaster", "dns@example.com");
    zone.set_relationship("customer", ResourceIdentifier::new("customers", "c1"));

    assert!(zone.patch(&client(&server)).await.unwrap());
    attributes.assert_async().await;
    relationship.assert_async().await;
}

#[tokio::test]
async fn test_patch_without_id_is_invalid_request() {
    let server = Server::new_async().await;
    let mut record = Resource::new("dns_records");
    record.set_attribute("name", "www");

    let error = record.patch(&client(&server)).await.unwrap_err();
    assert_eq!(error.kind(), Some(ErrorKind::InvalidRequest));
}

#[tokio::test]
async fn test_delete_without_changed_relationships() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/dns_records/r1")
        .with_status(204)
        .create_async()
        .await;

    let client = client(&server);
    assert!(client.identifier("dns_records", "r1").delete(&client).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_changed_relationship_only() {
    let mut server = Server::new_async().await;
    let unlink = server
        .mock("DELETE", "/dns_zones/abc/relationships/records")
        .match_body(Matcher::Json(json!({"data": {"type": "dns_records", "id": "r1"}})))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let whole = server
        .mock("DELETE", "/dns_zones/abc")
        .with_status(204)
        .expect(0)
        .create_async()
        .await;

    let client = client(&server);
    let mut zone = client.identifier("dns_zones", "abc");
    zone.set_relationship("records", ResourceIdentifier::new("dns_records", "r1"));
    assert!(zone.delete(&client).await.unwrap());

    unlink.assert_async().await;
    whole.assert_async().await;
}

#[tokio::test]
async fn test_post_relationships_accepts_empty_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/dns_zones/abc/relationships/records")
        .match_body(Matcher::Json(json!({"data": [{"type": "dns_records", "id": "r1"}]})))
        .with_status(204)
        .create_async()
        .await;

    let client = client(&server);
    let mut zone = client.identifier("dns_zones", "abc");
    zone.set_relationship("records", vec![ResourceIdentifier::new("dns_records", "r1")]);
    assert!(zone.post_relationships(&client).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_related_resources() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/dns_zones/abc/records")
        .with_status(200)
        .with_body(r#"{"data": [{"type": "dns_records", "id": "r1", "attributes": {"name": "www"}}]}"#)
        .create_async()
        .await;

    let client = client(&server);
    let records = client
        .identifier("dns_zones", "abc")
        .related("records")
        .get(&client)
        .await
        .unwrap()
        .into_set()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(records[0].attribute("name").unwrap(), "www");
}

#[tokio::test]
async fn test_401_is_authentication_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/tickets")
        .with_status(401)
        .with_body(r#"{"content": "Unauthorized"}"#)
        .create_async()
        .await;

    let error = client(&server).resource("tickets").get().await.unwrap_err();
    assert_eq!(error.kind(), Some(ErrorKind::Authentication));
    assert_eq!(error.to_string(), "Unauthenticated");
}

#[tokio::test]
async fn test_422_collects_failed_validations() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/dns_records")
        .with_status(422)
        .with_body(
            json!({"errors": [
                {"status": 422, "code": "102.10001", "detail": "The name is required.", "variables": {"field": "name"}},
                {"status": 422, "code": "102.10001", "detail": "The content is required.", "variables": {"field": "content"}}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let error = Resource::new("dns_records")
        .post(&client(&server))
        .await
        .unwrap_err();

    match error {
        exonet_api::Error::Api(api) => {
            assert_eq!(api.kind(), ErrorKind::Validation);
            assert_eq!(api.message(), "There are 2 validation errors.");
            assert_eq!(api.failed_validations().len(), 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_500_without_body_is_unknown() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/dns_records/r1")
        .with_status(500)
        .create_async()
        .await;

    let client = client(&server);
    let error = client
        .identifier("dns_records", "r1")
        .delete(&client)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), Some(ErrorKind::Unknown));
}

#[tokio::test]
async fn test_missing_token_fails_before_sending() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tickets")
        .expect(0)
        .create_async()
        .await;

    let client = Client::builder().api_url(server.url()).build().unwrap();
    let error = client.resource("tickets").get().await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::Authentication));
    assert_eq!(error.to_string(), "No authentication method set.");
    mock.assert_async().await;
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_unreadable_error_body_is_logged_and_classified() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/tickets")
        .with_status(500)
        .with_chunked_body(|w| {
            w.write_all(b"{\"errors\": [")?;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection dropped"))
        })
        .create_async()
        .await;

    let error = client(&server).resource("tickets").get().await.unwrap_err();
    assert_eq!(error.kind(), Some(ErrorKind::Unknown));

    let contents = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(contents.contains("Could not read error response body"));
    assert!(contents.contains("status_code=500"));
}
