use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;
use tracing::warn;
use wikipane_core::{ContentFetcher, FetchRequest, FetchTarget, PageContent};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A decoded content response on its way into the app's event loop.
#[derive(Debug)]
pub struct FetchedMessage {
    pub target: FetchTarget,
    pub token: u64,
    pub content: PageContent,
}

#[derive(Debug, Error)]
enum HttpError {
    #[error("transport: {0}")]
    Transport(#[from] minreq::Error),
    #[error("unexpected status {0}")]
    Status(i32),
}

/// Fetches wiki content on a worker thread. Requests are fire and forget;
/// a failed request is logged and swallowed so dependent page state keeps
/// its last successful value.
pub struct HttpFetcher {
    requests: Sender<FetchRequest>,
}

impl HttpFetcher {
    pub fn start(out: Sender<FetchedMessage>) -> Self {
        let (requests, worker_rx) = mpsc::channel();
        thread::spawn(move || run_worker(worker_rx, out));
        Self { requests }
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&mut self, request: FetchRequest) {
        let _ = self.requests.send(request);
    }
}

fn run_worker(requests: Receiver<FetchRequest>, out: Sender<FetchedMessage>) {
    while let Ok(request) = requests.recv() {
        match get_content(&request.url) {
            Ok(content) => {
                let _ = out.send(FetchedMessage {
                    target: request.target,
                    token: request.token,
                    content,
                });
            }
            Err(err) => warn!(url = %request.url, error = %err, "wiki content fetch failed"),
        }
    }
}

fn get_content(url: &str) -> Result<PageContent, HttpError> {
    let response = minreq::get(url).with_timeout(REQUEST_TIMEOUT_SECS).send()?;
    if !(200..300).contains(&response.status_code) {
        return Err(HttpError::Status(response.status_code));
    }
    Ok(response.json::<PageContent>()?)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use tiny_http::{Response, Server};
    use wikipane_core::{ContentFetcher, FetchRequest, FetchTarget};

    use super::HttpFetcher;

    fn serve_once(body: &'static str, status: u16) -> String {
        let server = Server::http("127.0.0.1:0").expect("bind test server");
        let addr = server.server_addr().to_ip().expect("ip addr");
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let response = Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
        });
        format!("http://{addr}/wiki/content/")
    }

    fn request(token: u64, url: String) -> FetchRequest {
        FetchRequest {
            target: FetchTarget::View,
            token,
            url,
        }
    }

    #[test]
    fn delivers_decoded_content() {
        let (out_tx, out_rx) = mpsc::channel();
        let mut fetcher = HttpFetcher::start(out_tx);

        let url = serve_once(r##"{"wiki_content":"# hello","wiki_rendered":null}"##, 200);
        fetcher.fetch(request(1, url));

        let msg = out_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("fetched message");
        assert_eq!(msg.target, FetchTarget::View);
        assert_eq!(msg.token, 1);
        assert_eq!(msg.content.wiki_content.as_deref(), Some("# hello"));
        assert_eq!(msg.content.wiki_rendered, None);
    }

    #[test]
    fn failed_requests_are_swallowed_and_the_worker_keeps_going() {
        let (out_tx, out_rx) = mpsc::channel();
        let mut fetcher = HttpFetcher::start(out_tx);

        fetcher.fetch(request(1, serve_once("boom", 500)));
        fetcher.fetch(request(2, serve_once("not json", 200)));
        fetcher.fetch(request(3, serve_once(r#"{"wiki_content":"ok"}"#, 200)));

        let msg = out_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("surviving message");
        assert_eq!(msg.token, 3);
        assert_eq!(msg.content.wiki_content.as_deref(), Some("ok"));
    }
}
