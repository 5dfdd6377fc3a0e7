//! Fixed names shared with the deployment: parameter keys, event routing
//! constants, and defaults. Parameter keys must match the deployed parameter
//! store entries exactly.

/// Parameter names resolving queue and topic destinations.
pub mod params {
    pub const AI_PROCESSING_QUEUE: &str = "/ventaro-ai/sqs/ai-processing-queue";
    pub const USER_PROCESSING_QUEUE: &str = "/ventaro-ai/sqs/user-processing-queue";
    pub const ANALYTICS_QUEUE: &str = "/ventaro-ai/sqs/analytics-queue";
    pub const IOT_QUEUE: &str = "/ventaro-ai/sqs/iot-queue";
    pub const EDGE_QUEUE: &str = "/ventaro-ai/sqs/edge-queue";
    pub const NOTIFICATIONS_TOPIC: &str = "/ventaro-ai/sns/notifications-topic";
    pub const ALERTS_TOPIC: &str = "/ventaro-ai/sns/alerts-topic";

    /// Every destination parameter, in declaration order.
    pub const ALL: [&str; 7] = [
        AI_PROCESSING_QUEUE,
        USER_PROCESSING_QUEUE,
        ANALYTICS_QUEUE,
        IOT_QUEUE,
        EDGE_QUEUE,
        NOTIFICATIONS_TOPIC,
        ALERTS_TOPIC,
    ];
}

/// Event-bus routing constants.
pub mod events {
    /// The only source whose events are dispatched to dedicated handlers.
    pub const SOURCE: &str = "ventaro.ai";

    pub const APPLICATION_EVENT: &str = "Application Event";
    pub const USER_ACTION: &str = "User Action";
    pub const SYSTEM_ALERT: &str = "System Alert";

    /// Application events that trigger a notification.
    pub const CRITICAL_EVENT_NAMES: [&str; 3] =
        ["deployment_completed", "system_error", "security_alert"];

    /// Alert severities that trigger a notification.
    pub const NOTIFY_SEVERITIES: [&str; 2] = ["critical", "high"];
}

/// Default metric namespace.
pub const METRICS_NAMESPACE: &str = "VentaroAI";

/// Subject used when a caller does not supply one.
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "Ventaro AI Notification";
