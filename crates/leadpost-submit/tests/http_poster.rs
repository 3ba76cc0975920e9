//! Exercises the reqwest poster against a throw-away local server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use leadpost_submit::{FormPoster, HttpFormPoster};

/// Serve one request with `status` and `body`; returns the raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/submit", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().expect("content length");
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).expect("read body");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).expect("write");
        head + &String::from_utf8_lossy(&payload)
    });
    (url, handle)
}

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn posts_form_encoded_body() {
    let (url, server) = serve_once("200 OK", r#"{"outcome":"success","lead":{"id":"x1"}}"#);
    let poster = HttpFormPoster::new(Duration::from_secs(5)).expect("client");

    let response = poster
        .post_form(&url, &fields(&[("email", "a@b.com"), ("first_name", "Ada Lovelace")]))
        .expect("post");

    assert_eq!(response.status, 200);
    assert!(response.body.contains("x1"));
    let request = server.join().expect("server thread");
    assert!(request.starts_with("POST /submit HTTP/1.1"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded")
    );
    assert!(request.ends_with("email=a%40b.com&first_name=Ada+Lovelace"));
}

#[test]
fn non_success_status_is_returned_not_raised() {
    let (url, server) = serve_once("503 Service Unavailable", "{}");
    let poster = HttpFormPoster::new(Duration::from_secs(5)).expect("client");
    let response = poster.post_form(&url, &[]).expect("post");
    assert_eq!(response.status, 503);
    assert!(!response.is_success());
    server.join().expect("server thread");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let poster = HttpFormPoster::new(Duration::from_secs(5)).expect("client");
    let err = poster
        .post_form(&format!("http://{addr}/submit"), &[])
        .expect_err("nothing listening");
    assert!(!err.to_string().is_empty());
}
