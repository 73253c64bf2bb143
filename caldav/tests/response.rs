// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Multistatus parsing tests.

use dayprint_caldav::MultiStatusResponse;

#[test]
fn response_principal_and_home_sets() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<d:multistatus xmlns:d="DAV:" xmlns:cal="urn:ietf:params:xml:ns:caldav" xmlns:card="urn:ietf:params:xml:ns:carddav">
  <d:response>
    <d:href>/remote.php/dav/principals/users/jane/</d:href>
    <d:propstat>
      <d:prop>
        <d:current-user-principal>
          <d:href>/remote.php/dav/principals/users/jane/</d:href>
        </d:current-user-principal>
        <cal:calendar-home-set>
          <d:href>/remote.php/dav/calendars/jane/</d:href>
        </cal:calendar-home-set>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
    <d:propstat>
      <d:prop>
        <card:addressbook-home-set/>
      </d:prop>
      <d:status>HTTP/1.1 404 Not Found</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

    let multistatus = MultiStatusResponse::from_xml(xml).expect("Failed to parse");

    assert_eq!(multistatus.responses.len(), 1);
    assert_eq!(multistatus.responses[0].prop_stats.len(), 2);
    assert_eq!(
        multistatus.current_user_principal().unwrap().as_str(),
        "/remote.php/dav/principals/users/jane/"
    );
    assert_eq!(
        multistatus.calendar_home_set().unwrap().as_str(),
        "/remote.php/dav/calendars/jane/"
    );
    assert!(multistatus.address_book_home_set().is_none());
}

#[test]
fn response_calendar_collections() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/dav/calendars/user/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Home</D:displayname>
        <D:resourcetype><D:collection/></D:resourcetype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/dav/calendars/user/tasks/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Tasks</D:displayname>
        <D:resourcetype><D:collection/><C:calendar/></D:resourcetype>
        <C:supported-calendar-component-set>
          <C:comp name="VTODO"/>
        </C:supported-calendar-component-set>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/dav/calendars/user/work/</D:href>
    <D:propstat>
      <D:prop>
        <D:displayname>Work &amp; Meetings</D:displayname>
        <D:resourcetype><D:collection/><C:calendar/></D:resourcetype>
        <C:supported-calendar-component-set>
          <C:comp name="VEVENT"/>
          <C:comp name="VTODO"/>
        </C:supported-calendar-component-set>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let calendars = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse")
        .into_calendars();

    assert_eq!(calendars.len(), 2);
    assert_eq!(calendars[0].href.as_str(), "/dav/calendars/user/tasks/");
    assert!(!calendars[0].supports("VEVENT"));
    assert_eq!(
        calendars[1].display_name.as_deref(),
        Some("Work & Meetings")
    );
    assert_eq!(
        calendars[1].supported_components,
        vec!["VEVENT".to_string(), "VTODO".to_string()]
    );
    assert!(calendars[1].supports("VEVENT"));
}

#[test]
fn response_calendar_data_keeps_line_breaks() {
    let xml = "<?xml version=\"1.0\" encoding=\"utf-8\" ?>
<D:multistatus xmlns:D=\"DAV:\" xmlns:C=\"urn:ietf:params:xml:ns:caldav\">
  <D:response>
    <D:href>/calendars/user/work/1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"1-abc\"</D:getetag>
        <C:calendar-data>BEGIN:VCALENDAR&#13;
BEGIN:VEVENT&#13;
UID:1&#13;
SUMMARY:R&amp;D sync&#13;
DTSTART:20250101T100000Z&#13;
END:VEVENT&#13;
END:VCALENDAR&#13;
</C:calendar-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/calendars/user/work/2.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>\"2-def\"</D:getetag>
        <C:calendar-data><![CDATA[BEGIN:VCALENDAR
BEGIN:VEVENT
UID:2
SUMMARY:a < b
DTSTART:20250101T110000Z
END:VEVENT
END:VCALENDAR
]]></C:calendar-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>";

    let objects = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse")
        .into_calendar_objects();

    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].href.as_str(), "/calendars/user/work/1.ics");
    assert_eq!(objects[0].etag.as_ref().unwrap().as_str(), "\"1-abc\"");
    assert!(objects[0].data.starts_with("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n"));
    assert!(objects[0].data.contains("SUMMARY:R&D sync\r\n"));
    assert!(objects[1].data.contains("SUMMARY:a < b\nDTSTART"));
}

#[test]
fn response_address_books_and_vcards() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:" xmlns:A="urn:ietf:params:xml:ns:carddav">
  <D:response>
    <D:href>/addressbooks/user/</D:href>
    <D:propstat>
      <D:prop><D:resourcetype><D:collection/></D:resourcetype></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/addressbooks/user/contacts/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype><D:collection/><A:addressbook/></D:resourcetype>
        <D:displayname>Contacts</D:displayname>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let books = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse")
        .into_address_books();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].href.as_str(), "/addressbooks/user/contacts/");
    assert_eq!(books[0].display_name.as_deref(), Some("Contacts"));

    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/addressbooks/user/contacts/</D:href>
    <D:propstat>
      <D:prop><D:getcontenttype>httpd/unix-directory</D:getcontenttype></D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/addressbooks/user/contacts/jane.vcf</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"7"</D:getetag>
        <D:getcontenttype>text/vcard; charset=utf-8</D:getcontenttype>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    let hrefs = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse")
        .vcard_hrefs();
    assert_eq!(hrefs.len(), 1);
    assert_eq!(hrefs[0].as_str(), "/addressbooks/user/contacts/jane.vcf");
}

#[test]
fn response_address_data() {
    let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:multistatus xmlns:D="DAV:" xmlns:A="urn:ietf:params:xml:ns:carddav">
  <D:response>
    <D:href>/addressbooks/user/contacts/jane.vcf</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"7"</D:getetag>
        <A:address-data>BEGIN:VCARD
FN:Jane Doe
EMAIL:jane@example.com
END:VCARD</A:address-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/addressbooks/user/contacts/gone.vcf</D:href>
    <D:status>HTTP/1.1 404 Not Found</D:status>
  </D:response>
</D:multistatus>"#;

    let objects = MultiStatusResponse::from_xml(xml)
        .expect("Failed to parse")
        .into_address_objects();
    assert_eq!(objects.len(), 1);
    assert!(objects[0].data.contains("FN:Jane Doe"));
}

#[test]
fn response_rejects_malformed_xml() {
    let xml = "<D:multistatus xmlns:D=\"DAV:\"><D:response></D:multistatus>";
    assert!(MultiStatusResponse::from_xml(xml).is_err());
}
