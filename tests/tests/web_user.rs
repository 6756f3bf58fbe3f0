use demos::{index, web_user};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use stampede::prelude::*;
use stampede::Method;
use stampede_tests::{MockSession, RefusingSession};
use std::time::Duration;

#[test]
fn wait_time_is_exactly_one_second() {
    let behavior = web_user::<MockSession>().unwrap();
    let mut rng = SmallRng::from_entropy();

    let wait = behavior.wait_time();
    assert_eq!(wait.min(), Duration::from_secs(1));
    assert_eq!(wait.max(), Duration::from_secs(1));

    let samples: Vec<_> = (0..1_000).map(|_| wait.sample(&mut rng)).collect();
    assert_eq!(samples.len(), 1_000);
    assert!(samples.iter().all(|d| *d == Duration::from_secs(1)));
}

#[test]
fn declares_single_index_task() {
    let behavior = web_user::<MockSession>().unwrap();

    assert_eq!(behavior.name(), "WebUser");
    assert_eq!(behavior.order(), TaskOrder::Weighted);
    assert_eq!(behavior.tasks().len(), 1);

    let task = &behavior.tasks()[0];
    assert_eq!(task.name(), "index");
    assert_eq!(task.weight(), 1);
}

#[tracing_test::traced_test]
#[tokio::test]
async fn index_issues_one_get_to_root() {
    let session = MockSession::new(200);

    index().run(&session).await.unwrap();

    let calls = session.calls();
    assert_eq!(calls.len(), 1);

    let request = &calls[0].request;
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/");
    assert_eq!(request.query(), None);
    assert!(request.body.is_none());
}

#[tokio::test]
async fn server_error_is_not_raised_or_retried() {
    let session = MockSession::new(500);

    let res = index().run(&session).await;
    assert!(res.is_ok());

    // The 500 is only visible through the session's own log.
    let calls = session.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].status, 500);
}

#[tokio::test]
async fn one_request_per_invocation() {
    for status in [200, 201, 302, 404, 500, 503] {
        let session = MockSession::new(status);
        let behavior = web_user::<MockSession>().unwrap();
        let task = behavior.task("index").unwrap();

        for _ in 0..3 {
            task.run(&session).await.unwrap();
        }

        assert_eq!(session.calls().len(), 3, "status {status}");
    }
}

#[tokio::test]
async fn transport_failure_propagates() {
    let err = index().run(&RefusingSession).await.unwrap_err();
    assert_eq!(err.to_string(), "connection refused");
}

#[tokio::test(start_paused = true)]
async fn swarm_of_web_users() {
    let session = MockSession::new(200);
    let shared = session.clone();

    let stats = Swarm::new(web_user().unwrap(), move |_: &stampede::Url| {
        Ok(shared.clone())
    })
    .host("http://127.0.0.1:8080")
    .users(3)
    .spawn_rate(3)
    .duration(Duration::from_secs(5))
    .await
    .unwrap();

    assert_eq!(stats.users, 3);
    assert_eq!(stats.task_errors, 0);

    // One GET / per user per second.
    let calls = session.calls();
    assert!(calls.len() >= 12 && calls.len() <= 18, "{} calls", calls.len());
    assert!(calls.iter().all(|c| c.request == Request::get("/")));
}
