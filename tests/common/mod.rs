use basex_rest::ConnectionOptions;

/// Credentials the tests authenticate with, `admin:admin` in basic auth form.
pub const AUTHORIZATION: &str = "Basic YWRtaW46YWRtaW4=";

/// Connection options pointing at the given mock server.
pub fn options(server: &mockito::ServerGuard) -> ConnectionOptions {
    let address = server.host_with_port();
    let (host, port) = address.split_once(':').unwrap();
    ConnectionOptions::new(host, port.parse().unwrap(), "admin", "admin")
}
