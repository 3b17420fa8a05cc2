//! Full API walk-through against a live todo service.
//!
//! Starts the service on a random port, then exercises every client
//! operation over real HTTP using ureq, validating that request building and
//! response parsing agree with the actual server.

use todo_client::{
    ApiError, Category, CreateTodo, HttpMethod, HttpResponse, ListFilter, Priority, TodoClient,
    UpdateTodo,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: todo_client::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_service::run(listener, todo_service::Config::default()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn api_walkthrough() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // Health.
    let health = client.parse_health(execute(client.build_health())).unwrap();
    assert_eq!(health.status, "OK");
    assert_eq!(health.version, "1.0.0");

    // Seed data is present.
    let req = client.build_list_todos(&ListFilter::default()).unwrap();
    let list = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(list.total, 2);
    let stats = client.parse_stats(execute(client.build_stats())).unwrap();
    assert_eq!(stats.total, 2);

    // Create with defaults.
    let create_input = CreateTodo {
        title: "Buy milk".to_string(),
        ..Default::default()
    };
    let req = client.build_create_todo(&create_input).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.id, 3);
    assert!(!created.completed);
    assert_eq!(created.priority, Priority::Medium);
    assert_eq!(created.category, Category::Personal);
    let id = created.id;

    // Validation is reported with the server's message.
    let req = client.build_create_todo(&CreateTodo::default()).unwrap();
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Validation(msg) if msg == "Title is required"));

    // Get returns the identical object.
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, created);

    // Partial update: only completed.
    let update_input = UpdateTodo {
        completed: Some(true),
        ..Default::default()
    };
    let req = client.build_update_todo(id, &update_input).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert!(updated.completed);
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.updated_at >= created.updated_at);

    // Filter by completion and category.
    let filter = ListFilter {
        completed: Some(true),
        category: Some(Category::Personal),
        ..Default::default()
    };
    let list = client
        .parse_list_todos(execute(client.build_list_todos(&filter).unwrap()))
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.todos[0].id, id);

    // Stats reflect the change.
    let stats = client.parse_stats(execute(client.build_stats())).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completed + stats.pending, stats.total);
    assert_eq!(
        stats.by_priority.high + stats.by_priority.medium + stats.by_priority.low,
        stats.total
    );

    // Delete.
    let deleted = client
        .parse_delete_todo(execute(client.build_delete_todo(id)))
        .unwrap();
    assert_eq!(deleted.todo.id, id);

    // Get after delete, delete again.
    let err = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Total back to the seed count.
    let stats = client.parse_stats(execute(client.build_stats())).unwrap();
    assert_eq!(stats.total, 2);
}
