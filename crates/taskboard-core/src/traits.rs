//! Core traits.

use async_trait::async_trait;

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(HealthStatus);

    #[async_trait]
    impl HealthCheck for Always {
        fn name(&self) -> &str {
            "always"
        }

        async fn check(&self) -> HealthStatus {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_health_check_object_safety() {
        let checks: Vec<Box<dyn HealthCheck>> = vec![
            Box::new(Always(HealthStatus::Healthy)),
            Box::new(Always(HealthStatus::Unhealthy("down".to_string()))),
        ];

        let mut healthy = 0;
        for check in &checks {
            assert_eq!(check.name(), "always");
            if check.check().await.is_healthy() {
                healthy += 1;
            }
        }
        assert_eq!(healthy, 1);
    }
}
