use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;

fn xmlfetch() -> Command {
    Command::cargo_bin("xmlfetch").unwrap()
}

#[test]
fn fetches_and_prints_a_well_formed_document() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data.xml")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body("<data><item>one</item></data>")
        .expect(1)
        .create();

    xmlfetch()
        .arg(format!("{}/data.xml", server.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("<item>one</item>"));

    mock.assert();
}

#[test]
fn reports_a_non_ok_status_without_retrying() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data.xml")
        .with_status(503)
        .expect(1)
        .create();

    xmlfetch()
        .arg(format!("{}/data.xml", server.url()))
        .arg("--retries")
        .arg("2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("503"));

    mock.assert();
}

#[test]
fn reports_malformed_xml_after_a_diagnostic_refetch() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data.xml")
        .with_status(200)
        .with_body("<data><item>")
        .expect(2)
        .create();

    xmlfetch()
        .arg(format!("{}/data.xml", server.url()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("well-formed"));

    mock.assert();
}

#[test]
fn raw_mode_prints_the_body_without_validation() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/page")
        .with_status(200)
        .with_body("not xml at all")
        .create();

    xmlfetch()
        .arg(format!("{}/page", server.url()))
        .arg("--raw")
        .assert()
        .success()
        .stdout(predicate::str::contains("not xml at all"));
}

#[test]
fn applies_a_stylesheet_when_one_is_given() {
    let mut server = Server::new();
    let _source = server
        .mock("GET", "/data.xml")
        .with_status(200)
        .with_body("<data><item>hello</item></data>")
        .create();
    let _style = server
        .mock("GET", "/style.xsl")
        .with_status(200)
        .with_body(
            r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:template match="/">
    <out><xsl:value-of select="/data/item"/></out>
  </xsl:template>
</xsl:stylesheet>"#,
        )
        .create();

    xmlfetch()
        .arg(format!("{}/data.xml", server.url()))
        .arg("--xslt")
        .arg(format!("{}/style.xsl", server.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));
}
