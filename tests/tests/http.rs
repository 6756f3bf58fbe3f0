mod utils;
#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;
    use demos::web_user;
    use stampede::prelude::*;
    use std::sync::OnceLock;
    use std::time::Duration;

    fn host() -> &'static str {
        static HOST: OnceLock<String> = OnceLock::new();
        HOST.get_or_init(|| format!("http://{MOCK_ADDR}"))
    }

    #[tokio::test]
    async fn web_users_against_mock_service() {
        init().await;
        let before = mock_service::hits();

        let stats = Swarm::new(web_user().unwrap(), HttpSession::new)
            .host(host())
            .users(5)
            .spawn_rate(5)
            .duration(Duration::from_secs(3))
            .await
            .unwrap();

        assert_eq!(stats.users, 5);
        assert!(stats.requests >= 10, "{stats}");
        assert_eq!(stats.failed_requests, 0);
        assert_eq!(stats.task_errors, 0);
        assert!(mock_service::hits() - before >= stats.requests);
    }

    #[tokio::test]
    async fn headers_only_sessions() {
        init().await;

        let stats = Swarm::new(web_user().unwrap(), |host: &stampede::Url| {
            Ok(HttpSession::new(host)?.drain_body(false))
        })
        .host(host())
        .users(3)
        .spawn_rate(3)
        .duration(Duration::from_secs(2))
        .await
        .unwrap();

        assert!(stats.requests >= 3, "{stats}");
        assert_eq!(stats.failed_requests, 0);
        assert_eq!(stats.task_errors, 0);
    }

    #[tokio::test]
    async fn server_errors_are_failed_requests() {
        init().await;

        let stats = Swarm::new(error_user().unwrap(), HttpSession::new)
            .host(host())
            .users(2)
            .spawn_rate(2)
            .duration(Duration::from_secs(2))
            .await
            .unwrap();

        assert!(stats.requests > 0);
        assert_eq!(stats.failed_requests, stats.requests);
        assert_eq!(stats.task_errors, 0);
    }

    #[tokio::test]
    async fn unreachable_host_is_task_error() {
        init().await;

        let stats = Swarm::new(web_user().unwrap(), HttpSession::new)
            .host("http://127.0.0.1:9")
            .users(1)
            .duration(Duration::from_secs(2))
            .await
            .unwrap();

        assert!(stats.tasks > 0);
        assert_eq!(stats.task_errors, stats.tasks);
        assert_eq!(stats.failed_requests, stats.requests);
    }

    #[task]
    async fn server_error<S: Session>(session: &S) -> Result<(), TransportError> {
        session.get("/status/500").await?;
        Ok(())
    }

    fn error_user<S: Session>() -> Result<UserBehavior<S>, ConfigError> {
        UserBehavior::builder("ErrorUser")
            .wait_time(WaitPolicy::between_secs(0.1, 0.2)?)
            .task(server_error())
            .build()
    }
}
