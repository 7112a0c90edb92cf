#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

pub const LISTING_PATH: &str = "/product/category/CategoryProductContents";

#[derive(Debug, Clone)]
pub enum PageReply {
    Html(String),
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub page: Option<u32>,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

pub struct CatalogStub {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CatalogStub {
    pub fn listing_url(&self) -> String {
        format!("{}{LISTING_PATH}", self.base_url)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("lock seen requests").clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.seen().iter().filter_map(|req| req.page).collect()
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Serves `pages` by their `page` query parameter; pages not in the map get a
/// fragment without listing items.
pub fn spawn(pages: HashMap<u32, PageReply>) -> CatalogStub {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let base_url = format!("http://{}", server.server_addr());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_server = Arc::clone(&seen);

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let url = url::Url::parse(&format!("http://stub{}", request.url()))
                .expect("parse request url");
            let query: HashMap<String, String> = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            let headers: HashMap<String, String> = request
                .headers()
                .iter()
                .map(|h| {
                    (
                        h.field.as_str().as_str().to_ascii_lowercase(),
                        h.value.as_str().to_owned(),
                    )
                })
                .collect();
            let page = query.get("page").and_then(|p| p.parse::<u32>().ok());
            seen_in_server
                .lock()
                .expect("lock seen requests")
                .push(SeenRequest {
                    page,
                    query,
                    headers,
                });

            if url.path() != LISTING_PATH {
                let _ = request.respond(
                    tiny_http::Response::from_string("not found").with_status_code(404),
                );
                continue;
            }

            let reply = page
                .and_then(|p| pages.get(&p).cloned())
                .unwrap_or_else(|| PageReply::Html("<div class=\"empty\"></div>".to_owned()));
            let response = match reply {
                PageReply::Html(body) => {
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"text/html; charset=utf-8"[..],
                    )
                    .expect("build header");
                    tiny_http::Response::from_string(body)
                        .with_status_code(200)
                        .with_header(header)
                }
                PageReply::Status(status) => {
                    tiny_http::Response::from_string("upstream error").with_status_code(status)
                }
            };
            let _ = request.respond(response);
        }
    });

    CatalogStub {
        base_url,
        seen,
        shutdown_tx,
        handle: Some(handle),
    }
}

pub fn item_html(goods_id: u32, title: &str, sale_index: &str, date: &str) -> String {
    format!(
        r##"<div class="itemUnit">
  <div class="info_row info_name"><a class="gd_name" href="/product/goods/{goods_id}">{title}</a></div>
  <div class="info_row info_pubGrp">
    <span class="authPub info_auth"><a href="#">저자{goods_id}</a></span>
    <span class="authPub info_pub"><a href="#">출판사{goods_id}</a></span>
    <span class="authPub info_date">{date}</span>
  </div>
  <div class="info_row info_price">
    <strong class="txt_num"><em class="yes_b">18,000</em>원</strong>
    <span class="txt_num dash"><em class="yes_m">20,000</em>원</span>
  </div>
  <div class="info_row info_rating">
    <span class="rating_rvCount"><a href="#">리뷰 <em class="txC_blue">{goods_id}</em>건</a></span>
    <span class="saleNum">판매지수 {sale_index}</span>
  </div>
  <div class="info_row info_read">{title} 소개</div>
</div>"##
    )
}

pub fn listing_html(items: &[String]) -> String {
    format!("<ul id=\"yesSchList\">{}</ul>", items.concat())
}
