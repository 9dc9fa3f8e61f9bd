mod common;

use basex_rest::{Client, ClientError, Parameters, TemplateDirectory};
use matches::assert_matches;
use mockito::Matcher;
use std::fs;

#[test]
fn test_named_query_from_template_directory() -> Result<(), ClientError> {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("GetFragment.xquery"),
        "declare variable $fragmentId external; db:get($dbname)//*[@xml:id = $fragmentId]",
    )
    .unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/rest")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"declare variable \$fragmentId external;"#.to_owned()),
            Matcher::Regex(r#"<variable name="fragmentId" value="sec-1" />"#.to_owned()),
            Matcher::Regex(r#"<variable name="includeChildren" value="true" />"#.to_owned()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body("<section xml:id=\"sec-1\"/>")
        .create();

    let client = Client::connect(common::options(&server), "library", TemplateDirectory::new(dir.path()))?;
    let response = client.get_fragment("IBC2018", "sec-1", true)?;

    mock.assert();
    assert_eq!("application/xml", response.content_type());
    assert_eq!(b"<section xml:id=\"sec-1\"/>", response.body());
    Ok(())
}

#[test]
fn test_missing_template_does_not_contact_server() -> Result<(), ClientError> {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/rest").expect(0).create();

    let client = Client::connect(common::options(&server), "library", TemplateDirectory::new(dir.path()))?;
    let error = client.run_named_query("GetBook", Parameters::new()).unwrap_err();

    mock.assert();
    assert_matches!(error, ClientError::TemplateNotFound { .. });
    Ok(())
}
