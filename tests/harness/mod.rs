//! Shared test harness for the admin components
//!
//! Provides `ScriptedTransport`, an `ApiTransport` that records every call and
//! answers from per-route scripts, plus builders for services and components
//! wired to it.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use order_admin::prelude::*;

pub const ORDERS: &str = "/order";
pub const ROLES: &str = "/user/roles";

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// A recorded transport call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get {
        path: String,
        query: Vec<(String, String)>,
    },
    Post {
        path: String,
        body: Value,
    },
}

/// A scripted answer
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16, String),
}

/// Transport answering from queues keyed by method and path
///
/// Each queue pops one reply per call; its last reply is sticky and keeps
/// answering once everything before it has been consumed. Unscripted routes
/// answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<HashMap<(&'static str, String), VecDeque<Reply>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn script(&self, method: &'static str, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn on_get(&self, path: &str, body: Value) {
        self.script("GET", path, Reply::Json(body));
    }

    pub fn on_get_status(&self, path: &str, status: u16, message: &str) {
        self.script("GET", path, Reply::Status(status, message.to_string()));
    }

    pub fn on_post(&self, path: &str, body: Value) {
        self.script("POST", path, Reply::Json(body));
    }

    pub fn on_post_status(&self, path: &str, status: u16, message: &str) {
        self.script("POST", path, Reply::Status(status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets(&self, path: &str) -> Vec<Vec<(String, String)>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Get { path: p, query } if p == path => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn posts(&self, path: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post { path: p, body } if p == path => Some(body),
                _ => None,
            })
            .collect()
    }

    fn answer(&self, method: &'static str, path: &str) -> Result<Value, AdminError> {
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(&(method, path.to_string())) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status, message)) => Err(AdminError::Api {
                status: StatusCode::from_u16(status).unwrap(),
                message,
            }),
            None => Err(AdminError::Api {
                status: StatusCode::NOT_FOUND,
                message: format!("no scripted reply for {} {}", method, path),
            }),
        }
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AdminError> {
        self.calls.lock().unwrap().push(Call::Get {
            path: path.to_string(),
            query: query.to_vec(),
        });
        self.answer("GET", path)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, AdminError> {
        self.calls.lock().unwrap().push(Call::Post {
            path: path.to_string(),
            body,
        });
        self.answer("POST", path)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn order_json(id: i64, description: &str, qtd: i64, price: f64) -> Value {
    json!({ "id": id, "description": description, "qtd": qtd, "price": price })
}

pub fn page_json(total: u64, results: Vec<Value>) -> Value {
    json!({ "total": total, "results": results })
}

pub fn existing_order() -> Order {
    Order {
        id: Some(OrderId(7)),
        description: "X".to_string(),
        qtd: 1,
        price: 1.0,
        created_date: None,
        updated_date: None,
    }
}

/// Everything a component test needs, all on one scripted transport
pub struct Fixture {
    pub transport: Arc<ScriptedTransport>,
    pub app: AdminApp,
    pub notices: NoticeBoard,
}

impl Fixture {
    /// Roles granted, no orders scripted
    pub fn new() -> Self {
        let fixture = Self::without_roles();
        fixture.transport.on_get(ROLES, json!(["admin"]));
        fixture
    }

    /// Nothing scripted at all
    pub fn without_roles() -> Self {
        let transport = ScriptedTransport::new();
        let notices = NoticeBoard::new();
        let api: Arc<dyn ApiTransport> = transport.clone();
        let app = AdminApp::with_transport(api, &AdminConfig::default())
            .with_notifier(Arc::new(notices.clone()));

        Self {
            transport,
            app,
            notices,
        }
    }

    /// A mounted dialog (roles fetched)
    pub async fn dialog(&self) -> FormDialog {
        let mut dialog = self.app.form_dialog();
        dialog.mount().await;
        dialog
    }

    pub fn fill(dialog: &mut FormDialog, description: &str, qtd: &str, price: &str) {
        assert!(dialog.set_input(OrderField::Description, description));
        assert!(dialog.set_input(OrderField::Qtd, qtd));
        assert!(dialog.set_input(OrderField::Price, price));
    }
}
