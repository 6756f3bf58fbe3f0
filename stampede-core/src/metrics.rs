#[macro_export]
macro_rules! generate_labels {
    ($base_name:ident) => {
        $crate::RequestLabels {
            success: concat!(stringify!($base_name), "_success"),
            error: concat!(stringify!($base_name), "_error"),
            latency: concat!(stringify!($base_name), "_latency"),
        }
    };
}

/// Metric names used when recording requests through the `metrics` facade.
#[derive(Copy, Clone, Debug)]
pub struct RequestLabels {
    pub success: &'static str,
    pub error: &'static str,
    pub latency: &'static str,
}

/// Labels for requests issued by the HTTP session.
pub const HTTP_LABELS: RequestLabels = generate_labels!(stampede_http);

/// Metric names for task executions.
pub const TASK_SUCCESS: &str = "stampede_task_success";
pub const TASK_ERROR: &str = "stampede_task_error";

/// Gauge tracking the number of live virtual users.
pub const USERS_GAUGE: &str = "stampede_users";
