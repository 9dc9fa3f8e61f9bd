mod common;

use basex_rest::{Client, ClientError, MemoryTemplates, Parameters};
use mockito::Matcher;

#[test]
fn test_query_posts_envelope() -> Result<(), ClientError> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/rest")
        .match_header("authorization", common::AUTHORIZATION)
        .match_header("content-type", "application/xml")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"^<query xmlns="http://basex.org/rest">"#.to_owned()),
            Matcher::Regex(r#"<text><!\[CDATA\[count\(//book\)\]\]></text>"#.to_owned()),
            Matcher::Regex(r#"<variable name="genre" value="sci-fi" />"#.to_owned()),
            Matcher::Regex(r#"<variable name="dbname" value="library" />"#.to_owned()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/plain; charset=UTF-8")
        .with_body("3")
        .create();

    let client = Client::connect(common::options(&server), "library", MemoryTemplates::new())?;
    let response = client.run_query("count(//book)", Parameters::new().with("genre", "sci-fi"))?;

    mock.assert();
    assert_eq!(200, response.status());
    assert_eq!("text/plain; charset=UTF-8", response.content_type());
    assert_eq!("3", response.text()?);
    Ok(())
}
