//! Shared fixtures: an in-process fake of the Cloudflare DNS records API

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use cfdns::{CloudflareClient, Config};

pub const TOKEN: &str = "test-token";
pub const ZONE_ID: &str = "zone123";
pub const DOMAIN: &str = "example.com";
pub const RECORDS_PATH: &str = "/zones/zone123/dns_records";
const RECORD_PATH_RE: &str = r"^/zones/zone123/dns_records/[^/]+$";

pub fn client_for(server: &MockServer) -> CloudflareClient {
    let config = Config::new(TOKEN, ZONE_ID, DOMAIN).with_base_url(server.uri());
    CloudflareClient::new(config).expect("client")
}

pub fn envelope(result: Value) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "success": false,
        "errors": [{"code": 81044, "message": "Record does not exist."}],
        "messages": [],
        "result": null,
    }))
}

/// A zone held in memory, served over HTTP
#[derive(Clone, Default)]
pub struct FakeZone {
    records: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicUsize>,
}

#[derive(Clone, Copy)]
enum Op {
    Create,
    Read,
    Update,
    Delete,
}

struct Handler {
    zone: FakeZone,
    op: Op,
}

impl FakeZone {
    /// Starts a server exposing this zone; requests without the test token
    /// fall through to wiremock's default 404
    pub async fn serve(&self) -> MockServer {
        let server = MockServer::start().await;
        for (verb, op, by_id) in [
            ("POST", Op::Create, false),
            ("GET", Op::Read, false),
            ("PATCH", Op::Update, true),
            ("DELETE", Op::Delete, true),
        ] {
            let mock = if by_id {
                Mock::given(method(verb)).and(path_regex(RECORD_PATH_RE))
            } else {
                Mock::given(method(verb)).and(path(RECORDS_PATH))
            };
            mock.and(bearer_token(TOKEN))
                .respond_with(Handler {
                    zone: self.clone(),
                    op,
                })
                .mount(&server)
                .await;
        }
        server
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }
}

impl Respond for Handler {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut records = self.zone.records.lock().unwrap();
        let record_id = request
            .url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default()
            .to_string();

        match self.op {
            Op::Create => {
                let mut record: Value = match serde_json::from_slice(&request.body) {
                    Ok(v) => v,
                    Err(_) => return ResponseTemplate::new(400),
                };
                let n = self.zone.next_id.fetch_add(1, Ordering::SeqCst);
                record["id"] = json!(format!("rec{n}"));
                records.push(record.clone());
                ResponseTemplate::new(200).set_body_json(envelope(record))
            }
            Op::Read => {
                let name = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "name")
                    .map(|(_, v)| v.into_owned());
                let matching: Vec<Value> = records
                    .iter()
                    .filter(|r| name.as_deref().map_or(true, |n| r["name"] == n))
                    .cloned()
                    .collect();
                ResponseTemplate::new(200).set_body_json(envelope(Value::Array(matching)))
            }
            Op::Update => {
                let patch: Value = match serde_json::from_slice(&request.body) {
                    Ok(v) => v,
                    Err(_) => return ResponseTemplate::new(400),
                };
                let Some(existing) = records.iter_mut().find(|r| r["id"] == record_id.as_str())
                else {
                    return not_found();
                };
                if let (Some(target), Some(fields)) = (existing.as_object_mut(), patch.as_object()) {
                    for (key, value) in fields {
                        if key != "id" {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
                ResponseTemplate::new(200).set_body_json(envelope(existing.clone()))
            }
            Op::Delete => {
                let before = records.len();
                records.retain(|r| r["id"] != record_id.as_str());
                if records.len() == before {
                    return not_found();
                }
                ResponseTemplate::new(200).set_body_json(envelope(json!({ "id": record_id })))
            }
        }
    }
}
