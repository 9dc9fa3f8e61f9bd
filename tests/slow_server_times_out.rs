mod common;

use basex_rest::{Client, ClientError, MemoryTemplates, Parameters};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_slow_server_times_out() -> Result<(), ClientError> {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/rest")
        .with_status(200)
        .with_chunked_body(|w| {
            thread::sleep(Duration::from_secs(2));
            w.write_all(b"<late/>")
        })
        .create();

    let options = common::options(&server).with_timeout(Duration::from_millis(200));
    let client = Client::connect(options, "library", MemoryTemplates::new())?;
    let started = Instant::now();
    let error = client.run_query("()", Parameters::new()).unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2));
    match error {
        ClientError::Transport(transport) => assert!(transport.response().is_none()),
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}
