// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

use dayprint_caldav::{AuthMethod, DavClient, DavConfig, DavError, Href, TimeRange};
use jiff::Timestamp;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn multistatus(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(207).set_body_raw(
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n\
<D:multistatus xmlns:D=\"DAV:\" xmlns:C=\"urn:ietf:params:xml:ns:caldav\" \
xmlns:A=\"urn:ietf:params:xml:ns:carddav\">{body}</D:multistatus>"
        ),
        "application/xml",
    )
}

fn client(server: &MockServer, path: &str) -> DavClient {
    let config = DavConfig::new(
        format!("{}{path}", server.uri()),
        AuthMethod::Basic {
            username: "user".to_string(),
            password: "secret".to_string(),
        },
    );
    DavClient::new(config).expect("Failed to create client")
}

#[tokio::test]
#[ignore = "require network"]
async fn client_discover_calendars() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/"))
        .and(header("Depth", "0"))
        .and(body_string_contains("current-user-principal"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/</D:href><D:propstat><D:prop>\
<D:current-user-principal><D:href>/dav/principals/user/</D:href></D:current-user-principal>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/principals/user/"))
        .and(body_string_contains("calendar-home-set"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/principals/user/</D:href><D:propstat><D:prop>\
<C:calendar-home-set><D:href>/dav/calendars/user/</D:href></C:calendar-home-set>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/calendars/user/"))
        .and(header("Depth", "1"))
        .and(header("Content-Type", "application/xml; charset=utf-8"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/calendars/user/work/</D:href><D:propstat><D:prop>\
<D:displayname>Work</D:displayname>\
<D:resourcetype><D:collection/><C:calendar/></D:resourcetype>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, "/dav/");
    let calendars = client
        .discover_calendars()
        .await
        .expect("Failed to discover");

    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].href.as_str(), "/dav/calendars/user/work/");
    assert_eq!(calendars[0].display_name.as_deref(), Some("Work"));
}

#[tokio::test]
#[ignore = "require network"]
async fn client_discover_address_books() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/"))
        .and(body_string_contains("current-user-principal"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/</D:href><D:propstat><D:prop>\
<D:current-user-principal><D:href>/dav/principals/user/</D:href></D:current-user-principal>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/principals/user/"))
        .and(body_string_contains("addressbook-home-set"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/principals/user/</D:href><D:propstat><D:prop>\
<A:addressbook-home-set><D:href>/dav/addressbooks/user/</D:href></A:addressbook-home-set>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("PROPFIND"))
        .and(path("/dav/addressbooks/user/"))
        .and(header("Depth", "1"))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/addressbooks/user/</D:href><D:propstat><D:prop>\
<D:resourcetype><D:collection/></D:resourcetype>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>\
<D:response><D:href>/dav/addressbooks/user/staff/</D:href><D:propstat><D:prop>\
<D:displayname>Staff</D:displayname>\
<D:resourcetype><D:collection/><A:addressbook/></D:resourcetype>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, "/dav/");
    let books = client
        .discover_address_books()
        .await
        .expect("Failed to discover");

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].href.as_str(), "/dav/addressbooks/user/staff/");
    assert_eq!(books[0].display_name.as_deref(), Some("Staff"));
}

#[tokio::test]
#[ignore = "require network"]
async fn client_query_events() {
    let mock_server = MockServer::start().await;

    Mock::given(method("REPORT"))
        .and(path("/dav/calendars/user/work/"))
        .and(body_string_contains(
            "start=\"20250101T210000Z\" end=\"20250102T210000Z\"",
        ))
        .respond_with(multistatus(
            "<D:response><D:href>/dav/calendars/user/work/1.ics</D:href><D:propstat><D:prop>\
<D:getetag>\"1\"</D:getetag>\
<C:calendar-data>BEGIN:VCALENDAR&#13;\nBEGIN:VEVENT&#13;\nUID:1&#13;\n\
DTSTART:20250102T070000Z&#13;\nSUMMARY:Planning&#13;\nEND:VEVENT&#13;\nEND:VCALENDAR&#13;\n\
</C:calendar-data></D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, "/dav/");
    let time_range = TimeRange {
        start: "2025-01-01T21:00:00Z".parse::<Timestamp>().unwrap(),
        end: "2025-01-02T21:00:00Z".parse::<Timestamp>().unwrap(),
    };
    let objects = client
        .query_events(&Href::from("/dav/calendars/user/work/"), time_range)
        .await
        .expect("Failed to query events");

    assert_eq!(objects.len(), 1);
    assert!(objects[0].data.contains("SUMMARY:Planning\r\n"));
}

#[tokio::test]
#[ignore = "require network"]
async fn client_loads_vcards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/ab/user/contacts/"))
        .respond_with(multistatus(
            "<D:response><D:href>/ab/user/contacts/jane.vcf</D:href><D:propstat><D:prop>\
<D:getcontenttype>text/vcard</D:getcontenttype>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("REPORT"))
        .and(path("/ab/user/contacts/"))
        .and(body_string_contains("<D:href>/ab/user/contacts/jane.vcf</D:href>"))
        .respond_with(multistatus(
            "<D:response><D:href>/ab/user/contacts/jane.vcf</D:href><D:propstat><D:prop>\
<A:address-data>BEGIN:VCARD\nFN:Jane Doe\nEMAIL:jane@example.com\nEND:VCARD\n</A:address-data>\
</D:prop><D:status>HTTP/1.1 200 OK</D:status></D:propstat></D:response>",
        ))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, "/ab/user/");
    let book = Href::from("/ab/user/contacts/");
    let hrefs = client.list_vcards(&book).await.expect("Failed to list");
    let objects = client
        .multiget_vcards(&book, &hrefs)
        .await
        .expect("Failed to fetch vCards");

    assert_eq!(objects.len(), 1);
    assert!(objects[0].data.contains("FN:Jane Doe"));
}

#[tokio::test]
#[ignore = "require network"]
async fn client_reports_authentication_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, "/dav/");
    let err = client.discover_calendars().await.unwrap_err();
    assert!(matches!(err, DavError::Auth(_)));
}
