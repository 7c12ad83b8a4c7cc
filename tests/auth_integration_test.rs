use httpmock::prelude::*;
use spielerplus::{Endpoints, HttpSessionClient, Scraper};
use std::time::Duration;

fn scraper_for(server: &MockServer) -> Scraper<HttpSessionClient> {
    let endpoints = Endpoints::new(&server.base_url()).unwrap();
    let client = HttpSessionClient::new(Duration::from_secs(5)).unwrap();
    Scraper::new(client, endpoints)
}

/// Login success is only observable as cookie-jar growth past the four
/// anonymous baseline cookies.
#[tokio::test]
async fn login_succeeds_when_jar_grows_past_baseline() {
    let server = MockServer::start();

    let form_page = server.mock(|when, then| {
        when.method(GET).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "PHPSESSID=abc; Path=/")
            .header("Set-Cookie", "_csrf=tok; Path=/")
            .header("Set-Cookie", "consent=1; Path=/")
            .header("Set-Cookie", "lang=en; Path=/")
            .body("<form></form>");
    });
    let submit = server.mock(|when, then| {
        when.method(POST).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "_identity=me; Path=/")
            .body("");
    });

    let mut scraper = scraper_for(&server);
    let ok = scraper.login("user@example.com", "secret").await.unwrap();

    assert!(ok);
    assert!(scraper.is_authenticated());
    form_page.assert();
    submit.assert();
}

#[tokio::test]
async fn login_fails_when_jar_stays_at_baseline() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "PHPSESSID=abc; Path=/")
            .header("Set-Cookie", "_csrf=tok; Path=/")
            .header("Set-Cookie", "consent=1; Path=/")
            .header("Set-Cookie", "lang=en; Path=/")
            .body("<form></form>");
    });
    // Rejected credentials: the server re-renders the form, no new cookie.
    server.mock(|when, then| {
        when.method(POST).path("/en/site/login");
        then.status(200).body("<form>wrong password</form>");
    });

    let mut scraper = scraper_for(&server);
    let ok = scraper.login("user@example.com", "wrong").await.unwrap();

    assert!(!ok);
    assert!(!scraper.is_authenticated());
}

/// A real login answers with a redirect to the dashboard and sets the
/// session cookie on that 302; the jar heuristic must see it.
#[tokio::test]
async fn login_counts_cookie_set_on_redirect_response() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "PHPSESSID=abc; Path=/")
            .header("Set-Cookie", "_csrf=tok; Path=/")
            .header("Set-Cookie", "consent=1; Path=/")
            .header("Set-Cookie", "lang=en; Path=/")
            .body("<form></form>");
    });
    let submit = server.mock(|when, then| {
        when.method(POST).path("/en/site/login");
        then.status(302)
            .header("Location", "/landing")
            .header("Set-Cookie", "_identity=me; Path=/")
            .body("");
    });
    // No mock for /landing: the redirect target must never be fetched.

    let mut scraper = scraper_for(&server);
    let ok = scraper.login("user@example.com", "secret").await.unwrap();

    assert!(ok);
    assert!(scraper.is_authenticated());
    submit.assert();
}

/// Repeating a cookie the jar already holds must not count as growth.
#[tokio::test]
async fn refreshed_cookies_do_not_fake_a_login() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "PHPSESSID=abc; Path=/")
            .header("Set-Cookie", "_csrf=tok; Path=/")
            .header("Set-Cookie", "consent=1; Path=/")
            .header("Set-Cookie", "lang=en; Path=/")
            .body("<form></form>");
    });
    server.mock(|when, then| {
        when.method(POST).path("/en/site/login");
        then.status(200)
            .header("Set-Cookie", "PHPSESSID=rotated; Path=/")
            .body("");
    });

    let mut scraper = scraper_for(&server);
    let ok = scraper.login("user@example.com", "wrong").await.unwrap();

    assert!(!ok);
}
